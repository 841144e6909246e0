//! Campus parking-lot solar panel placement and operation simulator.

/// TOML scenario configuration and preset definitions.
pub mod config;
/// Placement grid, panel entities, efficiency model, and aggregation queries.
pub mod grid;
/// CSV export of per-panel records.
pub mod io;
