//! Constructor metadata for service types.
//!
//! A [`TypeDescriptor`] is the statically declared counterpart of a
//! reflected class: an identifier, the ordered constructor parameters, and
//! the constructor itself. Instances are shared through [`Instance`], so
//! every consumer of a service observes the same allocation.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use wirebox_common::error::{Result, WireboxError};
use wirebox_common::types::ServiceId;

/// A constructed service, shared between every consumer.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Builds an instance from its resolved constructor arguments.
pub type Constructor = Arc<dyn Fn(&Arguments) -> Result<Instance> + Send + Sync>;

/// A single constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Parameter name, used in error messages.
    pub name: String,
    /// Service type the parameter requires, if it is service-typed.
    pub required_type: Option<ServiceId>,
    /// Default value. `Some(Value::Null)` is a `null` default.
    pub default: Option<Value>,
}

impl ParameterSpec {
    /// A parameter injected with the service registered under `required_type`.
    #[must_use]
    pub fn service(name: impl Into<String>, required_type: impl Into<ServiceId>) -> Self {
        Self {
            name: name.into(),
            required_type: Some(required_type.into()),
            default: None,
        }
    }

    /// A parameter without a service type. Only resolvable through a default.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_type: None,
            default: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns whether a default value is available.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Introspectable metadata for a candidate service type.
#[derive(Clone)]
pub struct TypeDescriptor {
    id: ServiceId,
    parameters: Vec<ParameterSpec>,
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    /// Describes an instantiable type built by `constructor`.
    pub fn new<T, F>(id: impl Into<ServiceId>, constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
    {
        let constructor: Constructor = Arc::new(move |args: &Arguments| {
            constructor(args).map(|value| Arc::new(value) as Instance)
        });
        Self {
            id: id.into(),
            parameters: Vec::new(),
            constructor: Some(constructor),
        }
    }

    /// Describes a type that cannot be constructed (abstract, interface-like).
    #[must_use]
    pub fn non_instantiable(id: impl Into<ServiceId>) -> Self {
        Self {
            id: id.into(),
            parameters: Vec::new(),
            constructor: None,
        }
    }

    /// Appends a constructor parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Appends several constructor parameters in order.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = ParameterSpec>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Returns the type identifier.
    #[must_use]
    pub const fn id(&self) -> &ServiceId {
        &self.id
    }

    /// Returns the constructor parameters in declared order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Returns whether the type has a constructor.
    #[must_use]
    pub const fn is_instantiable(&self) -> bool {
        self.constructor.is_some()
    }

    /// Service types this descriptor's constructor requires, in parameter order.
    pub fn dependencies(&self) -> impl Iterator<Item = &ServiceId> {
        self.parameters
            .iter()
            .filter_map(|p| p.required_type.as_ref())
    }

    /// Invokes the constructor.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::NotInstantiable`] if there is no constructor,
    /// or whatever error the constructor itself reports.
    pub fn instantiate(&self, arguments: &Arguments) -> Result<Instance> {
        let constructor = self
            .constructor
            .as_ref()
            .ok_or_else(|| WireboxError::NotInstantiable {
                id: self.id.to_string(),
            })?;
        constructor(arguments)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("id", &self.id)
            .field("parameters", &self.parameters)
            .field("instantiable", &self.is_instantiable())
            .finish()
    }
}

/// A resolved constructor argument.
#[derive(Clone)]
pub enum Argument {
    /// A shared service instance.
    Service(Instance),
    /// A parameter's default value.
    Value(Value),
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(_) => f.write_str("Service(..)"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

/// Ordered arguments handed to a [`Constructor`].
#[derive(Debug, Clone)]
pub struct Arguments {
    service: ServiceId,
    values: Vec<Argument>,
}

impl Arguments {
    /// Creates the argument list for constructing `service`.
    #[must_use]
    pub const fn new(service: ServiceId, values: Vec<Argument>) -> Self {
        Self { service, values }
    }

    /// Identifier of the service being constructed.
    #[must_use]
    pub const fn service_id(&self) -> &ServiceId {
        &self.service
    }

    /// Number of arguments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether there are no arguments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the raw argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.values.get(index)
    }

    /// Iterates over the arguments in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.values.iter()
    }

    /// Returns the service instance at `index` as a concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::ArgumentMismatch`] if the argument is missing,
    /// is a plain value, or holds a different type.
    pub fn service<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        match self.values.get(index) {
            Some(Argument::Service(instance)) => Arc::clone(instance)
                .downcast::<T>()
                .map_err(|_| self.mismatch(index, type_name::<T>())),
            _ => Err(self.mismatch(index, type_name::<T>())),
        }
    }

    /// Returns the plain value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::ArgumentMismatch`] if the argument is missing
    /// or is a service instance.
    pub fn value(&self, index: usize) -> Result<&Value> {
        match self.values.get(index) {
            Some(Argument::Value(value)) => Ok(value),
            _ => Err(self.mismatch(index, "value")),
        }
    }

    fn mismatch(&self, index: usize, expected: &'static str) -> WireboxError {
        WireboxError::ArgumentMismatch {
            service: self.service.to_string(),
            index,
            expected,
        }
    }
}
