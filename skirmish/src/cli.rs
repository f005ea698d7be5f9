//! Command-line interface for the skirmish driver

use clap::Parser;
use std::path::PathBuf;

/// Run a headless party-versus-enemies skirmish
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Headless real-time combat skirmish")]
#[command(version)]
pub struct Args {
    /// Scenario JSON file. The built-in demo runs when omitted.
    #[arg(long, value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// Simulated seconds to run, overriding the scenario
    #[arg(long)]
    pub seconds: Option<f64>,

    /// Fixed tick length in seconds, overriding the scenario
    #[arg(long)]
    pub dt: Option<f64>,

    /// RNG seed, overriding the scenario
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory of extra item TOML files merged over the built-in database
    #[arg(long, value_name = "DIR")]
    pub items: Option<PathBuf>,

    /// Rule constants TOML file
    #[arg(long, value_name = "FILE")]
    pub constants: Option<PathBuf>,

    /// Print final unit snapshots as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
