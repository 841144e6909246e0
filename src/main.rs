//! Solar lot simulator entry point — CLI wiring and config-driven grid runs.

use std::path::Path;
use std::process;

use solar_lot_sim::config::ScenarioConfig;
use solar_lot_sim::grid::{SavingsReport, SeededSampler, SolarGrid};
use solar_lot_sim::io::export::export_csv;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    temperature_override: Option<i32>,
    coefficient_override: Option<f32>,
    repair: bool,
    panels_out: Option<String>,
}

fn print_help() {
    eprintln!("solar-lot-sim — campus parking-lot solar panel simulator");
    eprintln!();
    eprintln!("Usage: solar-lot-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --temperature <i32>      Override temperature for the efficiency pass (°F)");
    eprintln!("  --coefficient <f32>      Override the temperature coefficient");
    eprintln!("  --repair                 Repair all broken panels before reporting");
    eprintln!("  --panels-out <path>      Export per-panel records to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        temperature_override: None,
        coefficient_override: None,
        repair: false,
        panels_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--temperature" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --temperature requires an i32 argument");
                    process::exit(1);
                }
                if let Ok(t) = args[i].parse::<i32>() {
                    cli.temperature_override = Some(t);
                } else {
                    eprintln!(
                        "error: --temperature value \"{}\" is not a valid i32",
                        args[i]
                    );
                    process::exit(1);
                }
            }
            "--coefficient" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --coefficient requires an f32 argument");
                    process::exit(1);
                }
                if let Ok(c) = args[i].parse::<f32>() {
                    cli.coefficient_override = Some(c);
                } else {
                    eprintln!(
                        "error: --coefficient value \"{}\" is not a valid f32",
                        args[i]
                    );
                    process::exit(1);
                }
            }
            "--repair" => {
                cli.repair = true;
            }
            "--panels-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --panels-out requires a path argument");
                    process::exit(1);
                }
                cli.panels_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply overrides
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(t) = cli.temperature_override {
        scenario.simulation.temperature_f = t;
    }
    if let Some(c) = cli.coefficient_override {
        scenario.simulation.temp_coefficient = c;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run: allocate, temperature pass, generation pass
    let sim = &scenario.simulation;
    let mut grid = SolarGrid::new(scenario.map.rows.clone(), scenario.parking_lots());
    let mut sampler = SeededSampler::new(sim.seed);

    let run = grid
        .insert_panels(sim.cost_per_panel, &mut sampler)
        .and_then(|_| grid.update_actual_efficiency(sim.temperature_f, sim.temp_coefficient))
        .and_then(|_| grid.update_electricity_generated());
    if let Err(e) = run {
        eprintln!("{e}");
        process::exit(1);
    }

    if cli.repair {
        if let Err(e) = grid.update_working_panels() {
            eprintln!("{e}");
            process::exit(1);
        }
    }

    let records = match grid.panel_records() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print per-panel records
    for r in &records {
        println!("{r}");
    }

    // Print the savings report
    match SavingsReport::from_grid(&grid) {
        Ok(report) => println!("\n{report}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }

    // Export CSV if requested
    if let Some(ref path) = cli.panels_out {
        if let Err(e) = export_csv(&records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Panel records written to {path}");
    }
}
