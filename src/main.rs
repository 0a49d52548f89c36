//! microgrid-sim entry point: CLI wiring and config-driven evaluation.

use std::path::Path;
use std::process;

use tracing::info;

use microgrid_sim::config::ScenarioConfig;
use microgrid_sim::evaluate;
use microgrid_sim::io::export::export_csv;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    trajectory_out: Option<String>,
    quiet: bool,
}

fn print_help() {
    eprintln!("microgrid-sim: islanded microgrid dispatch simulation and LCOE evaluation");
    eprintln!();
    eprintln!("Usage: microgrid-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (island_baseline, gen_only, high_solar, wind_diesel)");
    eprintln!("  --seed <u64>             Override the synthetic-profile seed");
    eprintln!("  --trajectory-out <path>  Export step records to CSV");
    eprintln!("  --quiet                  Suppress the per-step dump");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the island_baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        trajectory_out: None,
        quiet: false,
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
            "--trajectory-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --trajectory-out requires a path argument");
                    process::exit(1);
                }
                cli.trajectory_out = Some(args[i].clone());
            }
            "--quiet" => {
                cli.quiet = true;
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
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then the baseline
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
        ScenarioConfig::island_baseline()
    };

    if let Some(seed) = cli.seed_override {
        scenario.timeseries.seed = seed;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let mg = match scenario.build() {
        Ok(mg) => mg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    info!(
        steps = mg.horizon_steps(),
        gen_kw = mg.generator.power_rated_kw,
        pv_kw = mg.pv.power_rated_kw,
        wind_kw = mg.wind.power_rated_kw,
        battery_kwh = mg.battery.energy_rated_kwh,
        "microgrid built"
    );

    let evaluation = match evaluate(&mg) {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if !cli.quiet {
        for r in &evaluation.records {
            println!("{r}");
        }
        println!();
    }

    println!("{}", evaluation.stats);
    println!();
    println!("{}", evaluation.costs);
    info!(
        npc = evaluation.costs.npc,
        lcoe = evaluation.costs.lcoe,
        served_kwh = evaluation.stats.served_energy,
        "evaluation complete"
    );

    if let Some(ref path) = cli.trajectory_out {
        if let Err(e) = export_csv(&evaluation.records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Trajectories written to {path}");
    }
}
