//! Grid manager: panel allocation, efficiency updates, and aggregation.

use super::sampler::ReliabilitySampler;
use super::types::{
    DAYS_PER_YEAR, ENERGY_UNIT_FACTOR, GridError, OPTIMUM_TEMP_F, PANEL_RATING_W,
    PANEL_RELIABILITY, PEAK_SUN_HOURS, Panel, PanelRecord, ParkingLot,
};

/// One grid position: an optional street-map label and an optional panel.
///
/// Merging the label grid and the panel grid into one cell keeps the
/// position-matching invariant structural: a panel can only ever sit next to
/// the label that justified it.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// Lot name occupying this position, if any.
    pub label: Option<String>,
    /// Panel placed here by allocation, if any.
    pub panel: Option<Panel>,
}

/// The placement grid and lot collection, with all core operations.
///
/// Owns its cells and lots exclusively; every operation runs to completion
/// against this in-memory state. Operations that read or mutate panels
/// require a prior [`SolarGrid::insert_panels`] call and report
/// [`GridError::InvalidState`] otherwise.
#[derive(Debug, Clone)]
pub struct SolarGrid {
    cells: Vec<Vec<Cell>>,
    lots: Vec<ParkingLot>,
    allocated: bool,
}

impl SolarGrid {
    /// Creates a grid from street-map labels and lot records.
    ///
    /// Empty-string labels mean the position belongs to no lot. Labels that
    /// match no lot name are kept but never receive a panel.
    pub fn new(map: Vec<Vec<String>>, lots: Vec<ParkingLot>) -> Self {
        let cells = map
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|label| Cell {
                        label: if label.is_empty() { None } else { Some(label) },
                        panel: None,
                    })
                    .collect()
            })
            .collect();
        Self {
            cells,
            lots,
            allocated: false,
        }
    }

    /// Places panels lot by lot, as far as space and budget allow.
    ///
    /// For each lot in input order, cells are scanned in row-major order;
    /// a panel is placed where the label matches the lot name, the lot still
    /// has capacity, and its remaining budget covers `cost_per_panel`. Each
    /// placement decrements the lot budget and consumes exactly one draw
    /// from `sampler`; the panel works iff the draw is below
    /// [`PANEL_RELIABILITY`]. Traversal order is part of the contract: it
    /// decides which cells win when budget runs out mid-lot, and it fixes
    /// the draw sequence for a given seed.
    ///
    /// Cells left without a panel are a normal outcome, not an error.
    /// Returns the total number of panels placed.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if `cost_per_panel` is not a
    /// finite positive number.
    pub fn insert_panels<R: ReliabilitySampler>(
        &mut self,
        cost_per_panel: f32,
        sampler: &mut R,
    ) -> Result<usize, GridError> {
        if !cost_per_panel.is_finite() || cost_per_panel <= 0.0 {
            return Err(GridError::InvalidArgument {
                argument: "cost_per_panel",
                message: format!("must be a finite value > 0, got {cost_per_panel}"),
            });
        }

        let mut total_placed = 0usize;
        for lot in &mut self.lots {
            let mut placed = 0usize;
            for row in &mut self.cells {
                for cell in row.iter_mut() {
                    let matches = cell.label.as_deref() == Some(lot.name.as_str());
                    if !matches || placed >= lot.max_panels || lot.budget < cost_per_panel {
                        continue;
                    }
                    let works = sampler.sample() < PANEL_RELIABILITY;
                    cell.panel = Some(Panel::new(lot.panel_efficiency, lot.energy_capacity, works));
                    lot.budget -= cost_per_panel;
                    placed += 1;
                    total_placed += 1;
                }
            }
        }

        self.allocated = true;
        Ok(total_placed)
    }

    /// Recomputes every panel's actual efficiency for the given temperature.
    ///
    /// The change is `coefficient * (temperature_f - 77)`; 77 °F is the
    /// optimum, so a negative coefficient yields a gain below 77 °F and a
    /// loss above it. The recompute applies to broken panels too, and the
    /// result is clamped to `[0, 100]`. Absent cells are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidState`] if allocation has not run yet.
    pub fn update_actual_efficiency(
        &mut self,
        temperature_f: i32,
        coefficient: f32,
    ) -> Result<(), GridError> {
        self.ensure_allocated("update_actual_efficiency")?;

        let efficiency_change = coefficient * (temperature_f - OPTIMUM_TEMP_F) as f32;
        for panel in self.panels_mut() {
            panel.actual_efficiency =
                (panel.rated_efficiency + efficiency_change).clamp(0.0, 100.0);
        }
        Ok(())
    }

    /// Recomputes electricity generated by each working panel.
    ///
    /// A working panel generates `actual_efficiency / 100 * 1500 * 4`
    /// (four hours of equivalent peak sunlight at the 1500 W rating); a
    /// broken panel generates 0. Panels generate nothing until the first
    /// [`SolarGrid::update_actual_efficiency`] pass, since actual efficiency
    /// starts at 0. Returns the total generated across the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidState`] if allocation has not run yet.
    pub fn update_electricity_generated(&mut self) -> Result<f32, GridError> {
        self.ensure_allocated("update_electricity_generated")?;

        let mut total_wh = 0.0;
        for panel in self.panels_mut() {
            panel.electricity_generated_wh = if panel.is_working {
                panel.actual_efficiency / 100.0 * PANEL_RATING_W * PEAK_SUN_HOURS
            } else {
                0.0
            };
            total_wh += panel.electricity_generated_wh;
        }
        Ok(total_wh)
    }

    /// Counts working panels in cells labelled `lot_name`.
    ///
    /// Unknown lot names are not an error; they simply count 0.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidState`] if allocation has not run yet.
    pub fn count_working_panels(&self, lot_name: &str) -> Result<usize, GridError> {
        self.ensure_allocated("count_working_panels")?;

        let count = self
            .cells
            .iter()
            .flatten()
            .filter(|cell| cell.label.as_deref() == Some(lot_name))
            .filter_map(|cell| cell.panel.as_ref())
            .filter(|panel| panel.is_working)
            .count();
        Ok(count)
    }

    /// Repairs every broken panel and returns the grid-wide working count.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidState`] if allocation has not run yet.
    pub fn update_working_panels(&mut self) -> Result<usize, GridError> {
        self.ensure_allocated("update_working_panels")?;

        let mut working = 0usize;
        for panel in self.panels_mut() {
            panel.is_working = true;
            working += 1;
        }
        Ok(working)
    }

    /// Projects annual savings from the energy generated so far.
    ///
    /// Total generation is converted to billable units (× 0.001) and scaled
    /// to a 365-day year. Returns 0 if no panel has generated anything yet.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidState`] if allocation has not run yet.
    pub fn calculate_savings(&self) -> Result<f32, GridError> {
        self.ensure_allocated("calculate_savings")?;

        let total_wh: f32 = self
            .panels()
            .map(|panel| panel.electricity_generated_wh)
            .sum();
        Ok(total_wh * ENERGY_UNIT_FACTOR * DAYS_PER_YEAR)
    }

    /// Returns the panel at `[row][col]`, if one was placed there.
    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        self.cells.get(row)?.get(col)?.panel.as_ref()
    }

    /// Grid dimensions as `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        let rows = self.cells.len();
        let cols = self.cells.first().map_or(0, Vec::len);
        (rows, cols)
    }

    /// The lot collection, with budgets as left by allocation.
    pub fn lots(&self) -> &[ParkingLot] {
        &self.lots
    }

    /// Whether [`SolarGrid::insert_panels`] has run.
    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    /// Flattens placed panels into records, in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidState`] if allocation has not run yet.
    pub fn panel_records(&self) -> Result<Vec<PanelRecord>, GridError> {
        self.ensure_allocated("panel_records")?;

        let mut records = Vec::new();
        for (i, row) in self.cells.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let Some(panel) = &cell.panel else { continue };
                // Invariant: a panel only exists behind a matching label.
                let lot = cell.label.clone().unwrap_or_default();
                records.push(PanelRecord {
                    row: i,
                    col: j,
                    lot,
                    rated_efficiency: panel.rated_efficiency,
                    actual_efficiency: panel.actual_efficiency,
                    is_working: panel.is_working,
                    generated_wh: panel.electricity_generated_wh,
                });
            }
        }
        Ok(records)
    }

    fn ensure_allocated(&self, operation: &'static str) -> Result<(), GridError> {
        if self.allocated {
            Ok(())
        } else {
            Err(GridError::InvalidState {
                operation,
                message: "insert_panels has not run yet".to_string(),
            })
        }
    }

    fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.cells
            .iter()
            .flatten()
            .filter_map(|cell| cell.panel.as_ref())
    }

    fn panels_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.cells
            .iter_mut()
            .flatten()
            .filter_map(|cell| cell.panel.as_mut())
    }
}
