//! Loading the YAML configuration file.

use std::path::Path;

use anyhow::Context;
use wirebox_common::config::WireboxConfig;

/// Reads the configuration at `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> anyhow::Result<WireboxConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no configuration file, using defaults");
        return Ok(WireboxConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("invalid configuration in {}", path.display()))
}
