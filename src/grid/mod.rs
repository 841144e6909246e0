//! Panel placement grid and its operations.

/// Grid manager owning cells, lots, and the core operations.
pub mod manager;
/// Savings and working-count aggregation report.
pub mod report;
/// Injectable reliability random source.
pub mod sampler;
pub mod types;

// Re-export the main types for convenience
pub use manager::{Cell, SolarGrid};
pub use report::SavingsReport;
pub use sampler::{ReliabilitySampler, SeededSampler};
pub use types::{GridError, Panel, PanelRecord, ParkingLot};
