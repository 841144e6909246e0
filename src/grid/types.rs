//! Core grid types: panel and lot entities, per-panel records, and errors.

use std::fmt;

/// Temperature at which panels perform at their rated efficiency (°F).
pub const OPTIMUM_TEMP_F: i32 = 77;

/// Probability that a freshly placed panel works.
pub const PANEL_RELIABILITY: f32 = 0.95;

/// Nominal panel rating used in the generation formula (W).
pub const PANEL_RATING_W: f32 = 1500.0;

/// Equivalent peak-sunlight hours per generation pass.
pub const PEAK_SUN_HOURS: f32 = 4.0;

/// Conversion factor from generated units to billable energy units.
pub const ENERGY_UNIT_FACTOR: f32 = 0.001;

/// Days per year used when projecting annual savings.
pub const DAYS_PER_YEAR: f32 = 365.0;

/// A single solar panel placed in a grid cell.
///
/// Created during allocation and owned by its cell for the lifetime of the
/// grid. `is_working` is set once by the reliability draw and changes only
/// through a repair pass.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Nominal efficiency assigned by the panel's lot (percent).
    pub rated_efficiency: f32,
    /// Rated energy ceiling inherited from the lot.
    pub max_output_wh: f32,
    /// Whether the panel works; drawn at creation, mutable only by repair.
    pub is_working: bool,
    /// Temperature-adjusted efficiency, clamped to [0, 100]. Starts at 0
    /// until the first efficiency pass runs.
    pub actual_efficiency: f32,
    /// Energy generated by the last generation pass (0 when not working).
    pub electricity_generated_wh: f32,
}

impl Panel {
    /// Creates a panel with the lot's rated values and the given working status.
    pub fn new(rated_efficiency: f32, max_output_wh: f32, is_working: bool) -> Self {
        Self {
            rated_efficiency,
            max_output_wh,
            is_working,
            actual_efficiency: 0.0,
            electricity_generated_wh: 0.0,
        }
    }
}

/// A parking lot project: placement capacity, budget, and panel ratings.
///
/// Created once at setup. The budget is decremented during allocation;
/// all other fields stay fixed.
#[derive(Debug, Clone)]
pub struct ParkingLot {
    /// Unique name matched against street-map cell labels.
    pub name: String,
    /// Maximum number of panels this lot may hold.
    pub max_panels: usize,
    /// Remaining budget; decremented by the cost of each placed panel.
    pub budget: f32,
    /// Rated energy capacity assigned to each panel placed here.
    pub energy_capacity: f32,
    /// Rated efficiency assigned to each panel placed here (percent).
    pub panel_efficiency: f32,
}

impl ParkingLot {
    pub fn new(
        name: impl Into<String>,
        max_panels: usize,
        budget: f32,
        energy_capacity: f32,
        panel_efficiency: f32,
    ) -> Self {
        Self {
            name: name.into(),
            max_panels,
            budget,
            energy_capacity,
            panel_efficiency,
        }
    }
}

/// Flat per-panel record: one row per placed panel, in row-major order.
///
/// This is the return-value counterpart of the grid's internal state, used
/// by reporting and CSV export so the core never prints.
#[derive(Debug, Clone)]
pub struct PanelRecord {
    /// Grid row of the panel.
    pub row: usize,
    /// Grid column of the panel.
    pub col: usize,
    /// Name of the lot the panel belongs to.
    pub lot: String,
    /// Rated efficiency (percent).
    pub rated_efficiency: f32,
    /// Temperature-adjusted efficiency (percent).
    pub actual_efficiency: f32,
    /// Whether the panel works.
    pub is_working: bool,
    /// Energy generated by the last generation pass.
    pub generated_wh: f32,
}

impl fmt::Display for PanelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] lot={:<8} rated={:>6.2}%  actual={:>6.2}%  gen={:>8.1} Wh  {}",
            self.row,
            self.col,
            self.lot,
            self.rated_efficiency,
            self.actual_efficiency,
            self.generated_wh,
            if self.is_working { "works" } else { "broken" },
        )
    }
}

/// Error raised by grid operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// An operation ran against a grid that is not in the required state,
    /// e.g. querying panels before allocation.
    InvalidState {
        /// The operation that was attempted.
        operation: &'static str,
        /// What the grid was missing.
        message: String,
    },
    /// A caller-supplied argument was outside the operation's domain.
    InvalidArgument {
        /// The offending argument name.
        argument: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidState { operation, message } => {
                write!(f, "invalid state in {operation}: {message}")
            }
            GridError::InvalidArgument { argument, message } => {
                write!(f, "invalid argument `{argument}`: {message}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_panel_starts_cold_and_idle() {
        let p = Panel::new(90.0, 10.0, true);
        assert_eq!(p.rated_efficiency, 90.0);
        assert_eq!(p.actual_efficiency, 0.0);
        assert_eq!(p.electricity_generated_wh, 0.0);
        assert!(p.is_working);
    }

    #[test]
    fn panel_record_display_does_not_panic() {
        let r = PanelRecord {
            row: 1,
            col: 2,
            lot: "A".to_string(),
            rated_efficiency: 90.0,
            actual_efficiency: 80.0,
            is_working: false,
            generated_wh: 0.0,
        };
        let s = format!("{r}");
        assert!(s.contains("broken"));
    }

    #[test]
    fn grid_error_display_names_the_kind() {
        let e = GridError::InvalidState {
            operation: "calculate_savings",
            message: "no panels allocated".to_string(),
        };
        assert!(format!("{e}").contains("invalid state in calculate_savings"));

        let e = GridError::InvalidArgument {
            argument: "cost_per_panel",
            message: "must be > 0".to_string(),
        };
        assert!(format!("{e}").contains("`cost_per_panel`"));
    }
}
