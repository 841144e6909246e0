//! Shared test fixtures for integration tests.

use solar_lot_sim::config::ScenarioConfig;
use solar_lot_sim::grid::{ParkingLot, SeededSampler, SolarGrid};

/// The two-lot 2×2 map: A covers the top row, B the bottom-left corner.
pub fn two_lot_map() -> Vec<Vec<String>> {
    vec![
        vec!["A".to_string(), "A".to_string()],
        vec!["B".to_string(), String::new()],
    ]
}

/// Lot records for the two-lot map: A affords two panels at cost 100,
/// B affords none.
pub fn two_lot_lots() -> Vec<ParkingLot> {
    vec![
        ParkingLot::new("A", 2, 200.0, 10.0, 90.0),
        ParkingLot::new("B", 1, 50.0, 10.0, 80.0),
    ]
}

/// Fresh unallocated grid over the two-lot fixtures.
pub fn two_lot_grid() -> SolarGrid {
    SolarGrid::new(two_lot_map(), two_lot_lots())
}

/// Two-lot grid with allocation already run (cost 100, seed 2023).
pub fn allocated_two_lot_grid() -> SolarGrid {
    let mut grid = two_lot_grid();
    let mut sampler = SeededSampler::new(2023);
    grid.insert_panels(100.0, &mut sampler)
        .expect("allocation should succeed");
    grid
}

/// Builds a grid from a scenario config and runs the full pass sequence:
/// allocation, temperature update, generation.
pub fn run_scenario(cfg: &ScenarioConfig) -> SolarGrid {
    let sim = &cfg.simulation;
    let mut grid = SolarGrid::new(cfg.map.rows.clone(), cfg.parking_lots());
    let mut sampler = SeededSampler::new(sim.seed);
    grid.insert_panels(sim.cost_per_panel, &mut sampler)
        .expect("allocation should succeed");
    grid.update_actual_efficiency(sim.temperature_f, sim.temp_coefficient)
        .expect("efficiency pass should succeed");
    grid.update_electricity_generated()
        .expect("generation pass should succeed");
    grid
}
