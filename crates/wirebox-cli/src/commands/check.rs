//! `wbx check` — Compile a service manifest.

use std::path::PathBuf;

use clap::Args;
use wirebox_common::config::WireboxConfig;

use crate::manifest::{Record, ServiceManifest};

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the service manifest.
    #[arg(default_value = "services.yaml")]
    pub manifest: PathBuf,

    /// Discover services from the source tree instead of the manifest list.
    #[arg(long)]
    pub tree: bool,

    /// Source tree root; defaults to the configured discovery root.
    #[arg(long, requires = "tree")]
    pub root: Option<PathBuf>,
}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the manifest is invalid or compilation fails.
pub fn execute(args: CheckArgs, config: &WireboxConfig) -> anyhow::Result<()> {
    let manifest = ServiceManifest::load(&args.manifest)?;
    let mut container = if args.tree {
        let mut discovery = config.discovery.clone();
        if let Some(root) = args.root {
            discovery.root = root;
        }
        println!("Discovering from: {}", discovery.root.display());
        manifest.tree_container(config, &discovery)
    } else {
        manifest.container(config)
    };
    container.compile()?;

    println!("Resolved services in: {}", args.manifest.display());
    println!();
    for id in container.ids() {
        let record = container.get_as::<Record>(id.as_str())?;
        println!("  ok {record}");
    }
    println!();
    println!("  {} service(s) {}.", container.len(), container.state());
    Ok(())
}
