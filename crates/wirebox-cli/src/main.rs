//! # wbx — Wirebox CLI
//!
//! Inspects source trees and service manifests, and compiles them into a
//! container to check that every service can be constructed.

mod commands;
mod config;
mod manifest;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
