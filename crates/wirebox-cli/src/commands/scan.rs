//! `wbx scan` — List service identifiers declared in a source tree.

use std::path::PathBuf;

use clap::Args;
use wirebox_common::config::WireboxConfig;
use wirebox_discovery::SourceScanner;

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root directory; defaults to the configured discovery root.
    pub root: Option<PathBuf>,

    /// Recognised file extension (repeatable); defaults to the configured ones.
    #[arg(long = "ext")]
    pub extensions: Vec<String>,
}

/// Executes the `scan` command.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or a file cannot be read.
pub fn execute(args: ScanArgs, config: &WireboxConfig) -> anyhow::Result<()> {
    let mut discovery = config.discovery.clone();
    if let Some(root) = args.root {
        discovery.root = root;
    }
    if !args.extensions.is_empty() {
        discovery.extensions = args.extensions;
    }

    let scanner = SourceScanner::from_config(&discovery);
    let mut count = 0_usize;
    println!("Declared types under: {}", scanner.root().display());
    println!();
    for file in scanner.scan() {
        let file = file?;
        println!("  + {}", file.id);
        println!("      file: {}", file.path.display());
        count += 1;
    }
    println!();
    println!("  {count} type(s) found.");
    Ok(())
}
