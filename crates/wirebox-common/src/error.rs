//! Unified error types for the Wirebox workspace.
//!
//! Every failure raised while discovering, classifying, or resolving
//! services surfaces as a [`WireboxError`] naming the offending
//! identifier or parameter.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum WireboxError {
    /// No registry entry exists for the requested identifier.
    #[error("service not found: {id}")]
    ServiceNotFound {
        /// Identifier that was looked up.
        id: String,
    },

    /// A type marked as a service cannot be constructed.
    #[error("service {id} is not instantiable")]
    NotInstantiable {
        /// Identifier of the abstract or constructor-less type.
        id: String,
    },

    /// A constructor parameter has neither a service type nor a default value.
    #[error("cannot resolve parameter `{parameter}` of service {service}")]
    UnresolvableParameter {
        /// Service whose constructor declares the parameter.
        service: String,
        /// Name of the offending parameter.
        parameter: String,
    },

    /// A configuration parameter lookup missed.
    #[error("parameter not found: {key}")]
    ParameterNotFound {
        /// Key that was looked up.
        key: String,
    },

    /// A service depends on itself, directly or transitively.
    #[error("cyclic dependency detected: {}", chain.join(" -> "))]
    CyclicDependency {
        /// Identifiers along the cycle, starting and ending with the same one.
        chain: Vec<String>,
    },

    /// The entry exists but has not been resolved into an instance yet.
    #[error("service {id} has not been resolved yet")]
    Unresolved {
        /// Identifier of the pending entry.
        id: String,
    },

    /// A resolved entry cannot be overwritten with a descriptor.
    #[error("service {id} is already resolved")]
    AlreadyResolved {
        /// Identifier of the resolved entry.
        id: String,
    },

    /// The introspection facility has no descriptor for a derived identifier.
    #[error("unknown type: {id}")]
    UnknownType {
        /// Identifier derived from the source tree.
        id: String,
    },

    /// A constructor argument does not have the type the constructor expects.
    #[error("argument {index} of service {service} is not a {expected}")]
    ArgumentMismatch {
        /// Service being constructed.
        service: String,
        /// Position of the argument in the constructor's parameter list.
        index: usize,
        /// Name of the expected type.
        expected: &'static str,
    },

    /// A resolved instance is not of the requested concrete type.
    #[error("service {id} is not a {expected}")]
    TypeMismatch {
        /// Identifier of the resolved service.
        id: String,
        /// Name of the requested type.
        expected: &'static str,
    },

    /// The container has already been compiled.
    #[error("container is already compiled")]
    AlreadyCompiled,

    /// A previous compilation failed; the container must be discarded.
    #[error("container compilation failed earlier and cannot be used")]
    CompilationFailed,

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, WireboxError>;
