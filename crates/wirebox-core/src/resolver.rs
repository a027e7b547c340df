//! Recursive constructor injection.
//!
//! The resolver borrows the registry for the duration of a resolution pass
//! and memoizes every dependency it constructs back into it, so a service
//! shared by several consumers is built once. The identifiers currently
//! being constructed are tracked on a stack; re-entering one of them is a
//! cycle and fails fast.

use std::sync::Arc;

use wirebox_common::error::{Result, WireboxError};
use wirebox_common::types::ServiceId;

use crate::descriptor::{Argument, Arguments, Instance, ParameterSpec, TypeDescriptor};
use crate::registry::{Entry, Registry};

/// Resolves descriptors into instances against a registry.
#[derive(Debug)]
pub struct Resolver<'r> {
    registry: &'r mut Registry,
    resolving: Vec<ServiceId>,
}

impl<'r> Resolver<'r> {
    /// Creates a resolver operating on `registry`.
    pub fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            resolving: Vec::new(),
        }
    }

    /// Read access to the registry being resolved.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Resolves the registered entry `id` in place and returns its instance.
    ///
    /// Already resolved entries are returned as-is. Cycles are tracked by
    /// registry key, so one type registered under several keys is fine.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::ServiceNotFound`] if `id` is not registered, or
    /// any error raised while resolving its descriptor.
    pub fn resolve_entry(&mut self, id: &ServiceId) -> Result<Instance> {
        let descriptor = match self.registry.get(id.as_str())? {
            Entry::Resolved(instance) => return Ok(Arc::clone(instance)),
            Entry::Unresolved(descriptor) => descriptor.clone(),
        };
        let instance = self.construct(id, &descriptor)?;
        self.registry.replace(id, Arc::clone(&instance))?;
        tracing::debug!(id = %id, "service resolved");
        Ok(instance)
    }

    /// Constructs `descriptor` under its own identifier, resolving each
    /// parameter in declared order.
    ///
    /// # Errors
    ///
    /// - [`WireboxError::NotInstantiable`] if the type has no constructor.
    /// - [`WireboxError::UnresolvableParameter`] for an untyped parameter
    ///   without a default.
    /// - [`WireboxError::ServiceNotFound`] for a dependency that was never
    ///   registered.
    /// - [`WireboxError::CyclicDependency`] if construction re-enters a
    ///   service that is still being built.
    pub fn resolve(&mut self, descriptor: &TypeDescriptor) -> Result<Instance> {
        self.construct(descriptor.id(), descriptor)
    }

    fn construct(&mut self, id: &ServiceId, descriptor: &TypeDescriptor) -> Result<Instance> {
        if !descriptor.is_instantiable() {
            return Err(WireboxError::NotInstantiable { id: id.to_string() });
        }
        if self.resolving.contains(id) {
            return Err(self.cycle_error(id));
        }

        self.resolving.push(id.clone());
        let arguments = self.collect_arguments(id, descriptor);
        let _ = self.resolving.pop();

        descriptor.instantiate(&arguments?)
    }

    fn collect_arguments(
        &mut self,
        id: &ServiceId,
        descriptor: &TypeDescriptor,
    ) -> Result<Arguments> {
        let mut values = Vec::with_capacity(descriptor.parameters().len());
        for parameter in descriptor.parameters() {
            values.push(self.resolve_parameter(id, parameter)?);
        }
        Ok(Arguments::new(id.clone(), values))
    }

    fn resolve_parameter(
        &mut self,
        service: &ServiceId,
        parameter: &ParameterSpec,
    ) -> Result<Argument> {
        match &parameter.required_type {
            Some(dependency) => self.resolve_entry(dependency).map(Argument::Service),
            None => parameter.default.clone().map(Argument::Value).ok_or_else(|| {
                WireboxError::UnresolvableParameter {
                    service: service.to_string(),
                    parameter: parameter.name.clone(),
                }
            }),
        }
    }

    fn cycle_error(&self, id: &ServiceId) -> WireboxError {
        let start = self.resolving.iter().position(|r| r == id).unwrap_or(0);
        let chain = self.resolving[start..]
            .iter()
            .chain(std::iter::once(id))
            .map(ToString::to_string)
            .collect();
        WireboxError::CyclicDependency { chain }
    }
}
