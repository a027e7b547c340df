//! `wbx plan` — Display the construction order of a service manifest.

use std::path::PathBuf;

use clap::Args;
use wirebox_common::config::WireboxConfig;

use crate::manifest::ServiceManifest;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the service manifest.
    #[arg(default_value = "services.yaml")]
    pub manifest: PathBuf,
}

/// Executes the `plan` command.
///
/// Registers the manifest's services, builds the dependency graph, and
/// prints the order in which they would be constructed.
///
/// # Errors
///
/// Returns an error if the manifest is invalid, a dependency is missing,
/// or the graph contains a cycle.
pub fn execute(args: PlanArgs, config: &WireboxConfig) -> anyhow::Result<()> {
    let manifest = ServiceManifest::load(&args.manifest)?;
    let mut container = manifest.container(config);
    let _ = container.discover()?;
    let order = container.plan()?;

    println!("Construction plan for: {}", args.manifest.display());
    println!();
    for (step, id) in order.iter().enumerate() {
        println!("  {}. {id}", step + 1);
        let deps = manifest
            .services
            .iter()
            .find(|decl| decl.id == id.as_str())
            .map(|decl| {
                decl.parameters
                    .iter()
                    .filter_map(|p| p.required_type.as_deref())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        if !deps.is_empty() {
            println!("      needs: {}", deps.join(", "));
        }
    }
    println!();
    println!("  {} service(s) will be constructed.", order.len());
    Ok(())
}
