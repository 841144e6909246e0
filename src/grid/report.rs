//! Post-hoc aggregation of grid state into a savings report.

use std::fmt;

use super::manager::SolarGrid;
use super::types::GridError;

/// Aggregate statistics derived from a populated grid.
///
/// Computed post-hoc from the grid so reported numbers always agree with
/// the panel state they came from. Rendering is left to `Display`; the
/// core never prints.
#[derive(Debug, Clone)]
pub struct SavingsReport {
    /// Total panels placed across the grid.
    pub total_panels: usize,
    /// Panels currently working.
    pub working_panels: usize,
    /// Panels currently broken.
    pub broken_panels: usize,
    /// Working-panel count per lot, in lot input order.
    pub working_by_lot: Vec<(String, usize)>,
    /// Total electricity generated by the last generation pass.
    pub total_generated_wh: f32,
    /// Projected annual savings in billable energy units.
    pub annual_savings: f32,
}

impl SavingsReport {
    /// Computes all aggregates from the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidState`] if allocation has not run yet.
    pub fn from_grid(grid: &SolarGrid) -> Result<Self, GridError> {
        let records = grid.panel_records()?;

        let total_panels = records.len();
        let working_panels = records.iter().filter(|r| r.is_working).count();
        let total_generated_wh = records.iter().map(|r| r.generated_wh).sum();

        let mut working_by_lot = Vec::with_capacity(grid.lots().len());
        for lot in grid.lots() {
            let count = grid.count_working_panels(&lot.name)?;
            working_by_lot.push((lot.name.clone(), count));
        }

        Ok(Self {
            total_panels,
            working_panels,
            broken_panels: total_panels - working_panels,
            working_by_lot,
            total_generated_wh,
            annual_savings: grid.calculate_savings()?,
        })
    }
}

impl fmt::Display for SavingsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Savings Report ---")?;
        writeln!(f, "Panels placed:     {}", self.total_panels)?;
        writeln!(
            f,
            "Working / broken:  {} / {}",
            self.working_panels, self.broken_panels
        )?;
        for (lot, count) in &self.working_by_lot {
            writeln!(f, "  {lot}: {count} working")?;
        }
        writeln!(f, "Generated:         {:.1} Wh", self.total_generated_wh)?;
        write!(f, "Annual savings:    {:.2}", self.annual_savings)
    }
}
