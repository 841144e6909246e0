//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::grid::ParkingLot;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation parameters: seed, cost, and temperature pass inputs.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Street map labels.
    #[serde(default)]
    pub map: MapConfig,
    /// Parking lot records, in allocation order.
    #[serde(default)]
    pub lots: Vec<LotConfig>,
}

/// Simulation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed for the reliability draw.
    pub seed: u64,
    /// Fixed cost per placed panel (must be > 0).
    pub cost_per_panel: f32,
    /// Temperature for the efficiency pass (°F).
    pub temperature_f: i32,
    /// Efficiency change per degree away from 77 °F (usually negative).
    pub temp_coefficient: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 2023,
            cost_per_panel: 450.0,
            temperature_f: 77,
            temp_coefficient: -0.5,
        }
    }
}

/// Street map labels: one row of lot names per grid row.
///
/// An empty string marks a position that belongs to no lot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    /// Rectangular label grid, row-major.
    pub rows: Vec<Vec<String>>,
}

/// One parking lot record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LotConfig {
    /// Unique lot name matched against map labels.
    pub name: String,
    /// Maximum number of panels the lot may hold.
    #[serde(default)]
    pub max_panels: usize,
    /// Budget available for panel purchases.
    #[serde(default)]
    pub budget: f32,
    /// Rated energy capacity per panel.
    #[serde(default)]
    pub energy_capacity: f32,
    /// Rated efficiency per panel (percent).
    #[serde(default)]
    pub panel_efficiency: f32,
}

impl From<&LotConfig> for ParkingLot {
    fn from(lot: &LotConfig) -> Self {
        ParkingLot::new(
            lot.name.clone(),
            lot.max_panels,
            lot.budget,
            lot.energy_capacity,
            lot.panel_efficiency,
        )
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.cost_per_panel"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

fn rows(labels: &[&str]) -> Vec<Vec<String>> {
    labels
        .iter()
        .map(|row| row.split_whitespace().map(str::to_string).collect())
        .collect()
}

/// Replaces the `.` placeholder used in preset label rows with the empty
/// label the grid expects.
fn dotted(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    for row in &mut rows {
        for label in row.iter_mut() {
            if label == "." {
                label.clear();
            }
        }
    }
    rows
}

impl ScenarioConfig {
    /// Returns the baseline scenario: three lots on a 3×4 campus block.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            map: MapConfig {
                rows: dotted(rows(&[
                    "North   North   .       South",
                    "North   .       South   South",
                    "Visitor Visitor .       South",
                ])),
            },
            lots: vec![
                LotConfig {
                    name: "North".to_string(),
                    max_panels: 3,
                    budget: 1500.0,
                    energy_capacity: 10.0,
                    panel_efficiency: 88.0,
                },
                LotConfig {
                    name: "South".to_string(),
                    max_panels: 4,
                    budget: 1200.0,
                    energy_capacity: 12.0,
                    panel_efficiency: 92.0,
                },
                LotConfig {
                    name: "Visitor".to_string(),
                    max_panels: 2,
                    budget: 500.0,
                    energy_capacity: 8.0,
                    panel_efficiency: 85.0,
                },
            ],
        }
    }

    /// Returns the broad-campus preset: four lots with generous budgets.
    pub fn broad_campus() -> Self {
        Self {
            simulation: SimulationConfig {
                cost_per_panel: 400.0,
                ..SimulationConfig::default()
            },
            map: MapConfig {
                rows: dotted(rows(&[
                    "North   North   North   .       Stadium",
                    "North   .       South   South   Stadium",
                    "Visitor Visitor South   South   Stadium",
                    ".       Visitor .       South   Stadium",
                ])),
            },
            lots: vec![
                LotConfig {
                    name: "North".to_string(),
                    max_panels: 4,
                    budget: 2400.0,
                    energy_capacity: 10.0,
                    panel_efficiency: 88.0,
                },
                LotConfig {
                    name: "South".to_string(),
                    max_panels: 5,
                    budget: 2400.0,
                    energy_capacity: 12.0,
                    panel_efficiency: 92.0,
                },
                LotConfig {
                    name: "Visitor".to_string(),
                    max_panels: 3,
                    budget: 1600.0,
                    energy_capacity: 8.0,
                    panel_efficiency: 85.0,
                },
                LotConfig {
                    name: "Stadium".to_string(),
                    max_panels: 4,
                    budget: 2000.0,
                    energy_capacity: 15.0,
                    panel_efficiency: 90.0,
                },
            ],
        }
    }

    /// Returns the tight-budget preset: the baseline campus block with
    /// budgets that run out mid-lot, simulated on a hot day.
    pub fn tight_budget() -> Self {
        let mut cfg = Self::baseline();
        cfg.simulation.temperature_f = 95;
        for lot in &mut cfg.lots {
            lot.budget = 500.0;
        }
        cfg
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "broad_campus", "tight_budget"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "broad_campus" => Ok(Self::broad_campus()),
            "tight_budget" => Ok(Self::tight_budget()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if !s.cost_per_panel.is_finite() || s.cost_per_panel <= 0.0 {
            errors.push(ConfigError {
                field: "simulation.cost_per_panel".into(),
                message: "must be a finite value > 0".into(),
            });
        }
        if !(-60..=150).contains(&s.temperature_f) {
            errors.push(ConfigError {
                field: "simulation.temperature_f".into(),
                message: "must be in [-60, 150]".into(),
            });
        }
        if !s.temp_coefficient.is_finite() {
            errors.push(ConfigError {
                field: "simulation.temp_coefficient".into(),
                message: "must be finite".into(),
            });
        }

        if self.map.rows.is_empty() {
            errors.push(ConfigError {
                field: "map.rows".into(),
                message: "must not be empty".into(),
            });
        } else {
            let width = self.map.rows[0].len();
            if width == 0 {
                errors.push(ConfigError {
                    field: "map.rows".into(),
                    message: "rows must not be empty".into(),
                });
            }
            if self.map.rows.iter().any(|row| row.len() != width) {
                errors.push(ConfigError {
                    field: "map.rows".into(),
                    message: format!("all rows must have the same width ({width})"),
                });
            }
        }

        for (i, lot) in self.lots.iter().enumerate() {
            if lot.name.is_empty() {
                errors.push(ConfigError {
                    field: format!("lots[{i}].name"),
                    message: "must not be empty".into(),
                });
            }
            if self.lots[..i].iter().any(|other| other.name == lot.name) {
                errors.push(ConfigError {
                    field: format!("lots[{i}].name"),
                    message: format!("duplicate lot name \"{}\"", lot.name),
                });
            }
            if !lot.budget.is_finite() || lot.budget < 0.0 {
                errors.push(ConfigError {
                    field: format!("lots[{i}].budget"),
                    message: "must be a finite value >= 0".into(),
                });
            }
            if !(0.0..=100.0).contains(&lot.panel_efficiency) {
                errors.push(ConfigError {
                    field: format!("lots[{i}].panel_efficiency"),
                    message: "must be in [0, 100]".into(),
                });
            }
            if !lot.energy_capacity.is_finite() || lot.energy_capacity < 0.0 {
                errors.push(ConfigError {
                    field: format!("lots[{i}].energy_capacity"),
                    message: "must be a finite value >= 0".into(),
                });
            }
        }

        errors
    }

    /// Lot records converted to core entities, in allocation order.
    pub fn parking_lots(&self) -> Vec<ParkingLot> {
        self.lots.iter().map(ParkingLot::from).collect()
    }
}
