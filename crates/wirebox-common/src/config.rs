//! Global configuration model for Wirebox.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_SOURCE_EXTENSION, DEFAULT_SOURCE_ROOT, SERVICE_MARKER};
use crate::parameters::ParameterBag;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireboxConfig {
    /// Where and how to look for service declarations.
    pub discovery: DiscoveryConfig,
    /// Marker that classifies a type as a service.
    pub service_marker: String,
    /// Scalar configuration values exposed through a [`ParameterBag`].
    pub parameters: BTreeMap<String, Value>,
}

impl WireboxConfig {
    /// Builds the immutable parameter bag from the configured values.
    #[must_use]
    pub fn parameter_bag(&self) -> ParameterBag {
        ParameterBag::new(self.parameters.clone())
    }
}

impl Default for WireboxConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            service_marker: SERVICE_MARKER.to_string(),
            parameters: BTreeMap::new(),
        }
    }
}

/// Source tree discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directory scanned recursively.
    pub root: PathBuf,
    /// File extensions (without the dot) that hold service declarations.
    pub extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            extensions: vec![DEFAULT_SOURCE_EXTENSION.to_string()],
        }
    }
}
