//! `wbx params` — Show configured parameters.

use clap::Args;
use wirebox_common::config::WireboxConfig;

/// Arguments for the `params` command.
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Show only this parameter.
    pub key: Option<String>,
}

/// Executes the `params` command.
///
/// # Errors
///
/// Returns an error if the requested key is not configured.
pub fn execute(args: ParamsArgs, config: &WireboxConfig) -> anyhow::Result<()> {
    let bag = config.parameter_bag();
    if let Some(key) = args.key {
        println!("{}", bag.get(&key)?);
        return Ok(());
    }
    for (key, value) in bag.all() {
        println!("{key} = {value}");
    }
    Ok(())
}
