//! Headless skirmish driver
//!
//! Loads a scenario (or the built-in demo), runs the fixed-step tick loop and
//! prints the combat log and a per-unit summary.

mod cli;
mod runner;
mod scenario;

use item_core::ItemRegistry;
use scenario::Scenario;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    // Step 1: Rule constants, before any unit is created
    let installed = match &args.constants {
        Some(path) => combat_core::init_constants(path),
        None => combat_core::init_constants_default(),
    };
    if let Err(e) = installed {
        error!(error = %e, "failed to load constants");
        return ExitCode::FAILURE;
    }

    // Step 2: Item database
    let mut registry = ItemRegistry::builtin();
    if let Some(dir) = &args.items {
        if let Err(e) = registry.load_dir(dir) {
            error!(error = %e, "failed to load items");
            return ExitCode::FAILURE;
        }
    }

    // Step 3: Scenario with command-line overrides
    let mut scenario = match &args.scenario {
        Some(path) => match Scenario::load_from_file(path) {
            Ok(scenario) => scenario,
            Err(e) => {
                error!(error = %e, "failed to load scenario");
                return ExitCode::FAILURE;
            }
        },
        None => Scenario::demo(),
    };
    if let Some(seconds) = args.seconds {
        scenario.duration = seconds;
    }
    if let Some(dt) = args.dt {
        scenario.dt = dt;
    }
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }

    let mut world = match scenario.build(&registry) {
        Ok(world) => world,
        Err(e) => {
            error!(error = %e, "invalid scenario");
            return ExitCode::FAILURE;
        }
    };

    // Step 4: Run and report
    let report = runner::run(&mut world, scenario.duration, scenario.dt);
    match report.render(args.json) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            error!(error = %e, "failed to render report");
            return ExitCode::FAILURE;
        }
    }

    if report.outcome.is_crash() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
