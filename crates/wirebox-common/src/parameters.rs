//! Immutable scalar configuration values.
//!
//! The bag is built once and only queried afterwards. Service resolution
//! never reads from it; constructors that need configuration receive it
//! through their own wiring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, WireboxError};

/// Read-only mapping from parameter key to scalar value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag {
    parameters: BTreeMap<String, Value>,
}

impl ParameterBag {
    /// Creates a bag from a fixed mapping.
    #[must_use]
    pub const fn new(parameters: BTreeMap<String, Value>) -> Self {
        Self { parameters }
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::ParameterNotFound`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.parameters
            .get(key)
            .ok_or_else(|| WireboxError::ParameterNotFound { key: key.into() })
    }

    /// Returns whether `key` is present. A `null` value still counts.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// Returns every parameter.
    #[must_use]
    pub const fn all(&self) -> &BTreeMap<String, Value> {
        &self.parameters
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bag() -> ParameterBag {
        [
            ("mailer.host", json!("smtp.local")),
            ("mailer.port", json!(25)),
            ("feature.beta", Value::Null),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn get_returns_stored_value() {
        let bag = bag();
        assert_eq!(bag.get("mailer.port").expect("port"), &json!(25));
    }

    #[test]
    fn get_missing_key_fails() {
        let err = bag().get("mailer.user").unwrap_err();
        assert!(
            matches!(err, WireboxError::ParameterNotFound { ref key } if key == "mailer.user"),
            "got: {err}"
        );
    }

    #[test]
    fn has_counts_null_values() {
        let bag = bag();
        assert!(bag.has("feature.beta"));
        assert!(!bag.has("feature.alpha"));
    }

    #[test]
    fn all_is_sorted_by_key() {
        let bag = bag();
        let keys: Vec<&str> = bag.all().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["feature.beta", "mailer.host", "mailer.port"]);
    }

    #[test]
    fn empty_bag_has_nothing() {
        let bag = ParameterBag::default();
        assert!(bag.all().is_empty());
        assert!(bag.get("x").is_err());
    }
}
