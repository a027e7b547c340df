//! CLI command definitions and dispatch.

pub mod check;
pub mod params;
pub mod plan;
pub mod scan;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wirebox — compile-once dependency injection.
#[derive(Parser, Debug)]
#[command(name = "wbx", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file.
    #[arg(long, global = true, env = "WIREBOX_CONFIG", default_value = wirebox_common::constants::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the service identifiers declared in a source tree.
    Scan(scan::ScanArgs),
    /// Show the construction order of a service manifest.
    Plan(plan::PlanArgs),
    /// Compile a service manifest and show every resolved service.
    Check(check::CheckArgs),
    /// Show configured parameters.
    Params(params::ParamsArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if loading the configuration or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = crate::config::load(&cli.config)?;
    match cli.command {
        Command::Scan(args) => scan::execute(args, &config),
        Command::Plan(args) => plan::execute(args, &config),
        Command::Check(args) => check::execute(args, &config),
        Command::Params(args) => params::execute(args, &config),
    }
}
