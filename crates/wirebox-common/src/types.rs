//! Domain primitive types used across the Wirebox workspace.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::NAMESPACE_SEPARATOR;

/// Fully-qualified identifier of a service type, e.g. `app.mail.Mailer`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Creates a new service ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Joins a dotted namespace and a short type name.
    #[must_use]
    pub fn namespaced(namespace: &str, short_name: &str) -> Self {
        if namespace.is_empty() {
            return Self::new(short_name);
        }
        Self(format!("{namespace}{NAMESPACE_SEPARATOR}{short_name}"))
    }

    /// Returns the last segment of the identifier.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map_or(self.0.as_str(), |(_, short)| short)
    }

    /// Returns everything before the last segment, if there is a namespace.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once(NAMESPACE_SEPARATOR).map(|(ns, _)| ns)
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for ServiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ServiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle state of a container. Transitions only forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompileState {
    /// Services may still be registered; nothing has been instantiated.
    Uncompiled,
    /// Every registered service has been resolved into an instance.
    Compiled,
    /// Discovery or resolution failed. Terminal; the container is unusable.
    Failed,
}

impl fmt::Display for CompileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncompiled => write!(f, "uncompiled"),
            Self::Compiled => write!(f, "compiled"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_joins_with_dot() {
        let id = ServiceId::namespaced("app.mail", "Mailer");
        assert_eq!(id.as_str(), "app.mail.Mailer");
        assert_eq!(id.short_name(), "Mailer");
        assert_eq!(id.namespace(), Some("app.mail"));
    }

    #[test]
    fn bare_identifier_has_no_namespace() {
        let id = ServiceId::namespaced("", "Clock");
        assert_eq!(id.as_str(), "Clock");
        assert_eq!(id.short_name(), "Clock");
        assert!(id.namespace().is_none());
    }

    #[test]
    fn service_id_serializes_as_plain_string() {
        let id = ServiceId::new("app.Clock");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"app.Clock\"");
    }

    #[test]
    fn compile_state_display() {
        assert_eq!(CompileState::Uncompiled.to_string(), "uncompiled");
        assert_eq!(CompileState::Compiled.to_string(), "compiled");
        assert_eq!(CompileState::Failed.to_string(), "failed");
    }
}
