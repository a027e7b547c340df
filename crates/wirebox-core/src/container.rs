//! The compile-once service container.
//!
//! [`Container::compile`] runs two passes over the registry: discovery
//! registers every classified, instantiable candidate as unresolved, then
//! resolution walks the registry and turns each entry into a shared
//! instance. A failed compilation moves the container to
//! [`CompileState::Failed`], after which every lookup and registration is
//! rejected.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use wirebox_common::error::{Result, WireboxError};
use wirebox_common::parameters::ParameterBag;
use wirebox_common::types::{CompileState, ServiceId};

use crate::builder::ContainerBuilder;
use crate::classifier::ServiceClassifier;
use crate::descriptor::{Instance, TypeDescriptor};
use crate::graph::DependencyGraph;
use crate::registry::{Entry, Registry};
use crate::resolver::Resolver;
use crate::source::ServiceSource;

/// Dependency-injection container.
pub struct Container {
    registry: Registry,
    source: Box<dyn ServiceSource>,
    classifier: Box<dyn ServiceClassifier>,
    parameters: ParameterBag,
    state: CompileState,
    discovered: bool,
}

impl Container {
    /// An empty container with no discovery source. Services are added with
    /// [`set`](Self::set).
    #[must_use]
    pub fn new() -> Self {
        ContainerBuilder::new().build()
    }

    /// Starts configuring a container.
    #[must_use]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub(crate) fn from_parts(
        source: Box<dyn ServiceSource>,
        classifier: Box<dyn ServiceClassifier>,
        parameters: ParameterBag,
    ) -> Self {
        Self {
            registry: Registry::new(),
            source,
            classifier,
            parameters,
            state: CompileState::Uncompiled,
            discovered: false,
        }
    }

    /// Registers an unresolved service before compilation.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::AlreadyCompiled`] after compilation and
    /// [`WireboxError::CompilationFailed`] after a failed one.
    pub fn set(&mut self, id: impl Into<ServiceId>, descriptor: TypeDescriptor) -> Result<()> {
        match self.state {
            CompileState::Uncompiled => self.registry.set(id.into(), descriptor),
            CompileState::Compiled => Err(WireboxError::AlreadyCompiled),
            CompileState::Failed => Err(WireboxError::CompilationFailed),
        }
    }

    /// Returns whether `id` is registered.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.registry.has(id)
    }

    /// Returns the shared instance registered under `id`.
    ///
    /// # Errors
    ///
    /// - [`WireboxError::ServiceNotFound`] if nothing is registered under `id`.
    /// - [`WireboxError::Unresolved`] if the entry is not constructed yet.
    /// - [`WireboxError::CompilationFailed`] if compilation failed.
    pub fn get(&self, id: &str) -> Result<Instance> {
        match self.entry(id)? {
            Entry::Resolved(instance) => Ok(Arc::clone(instance)),
            Entry::Unresolved(_) => Err(WireboxError::Unresolved { id: id.into() }),
        }
    }

    /// Returns the instance registered under `id` as a concrete type.
    ///
    /// # Errors
    ///
    /// Everything [`get`](Self::get) reports, plus
    /// [`WireboxError::TypeMismatch`] if the instance is not a `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| WireboxError::TypeMismatch {
                id: id.into(),
                expected: type_name::<T>(),
            })
    }

    /// Returns the raw registry entry for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::ServiceNotFound`] if nothing is registered under
    /// `id`, or [`WireboxError::CompilationFailed`] if compilation failed.
    pub fn entry(&self, id: &str) -> Result<&Entry> {
        self.ensure_usable()?;
        self.registry.get(id)
    }

    /// Registered identifiers in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &ServiceId> {
        self.registry.ids()
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns whether no service is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> CompileState {
        self.state
    }

    /// Scalar configuration values. Never consulted during resolution.
    #[must_use]
    pub const fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    /// Runs the discovery pass on its own, registering every classified
    /// candidate. Runs at most once; later calls return `0`.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::NotInstantiable`] for a service that cannot be
    /// constructed, or whatever error the source reports. Either one fails
    /// the container.
    pub fn discover(&mut self) -> Result<usize> {
        self.ensure_usable()?;
        if self.discovered {
            return Ok(0);
        }
        let registered = self.register_candidates();
        self.fail_on_error(registered)
    }

    fn register_candidates(&mut self) -> Result<usize> {
        tracing::info!("discovering services");

        let mut registered = 0;
        for candidate in self.source.discover() {
            let (id, descriptor) = candidate?;
            if !self.classifier.is_service(&descriptor) {
                tracing::debug!(id = %id, "skipping type without service marker");
                continue;
            }
            if !descriptor.is_instantiable() {
                return Err(WireboxError::NotInstantiable { id: id.to_string() });
            }
            tracing::debug!(id = %id, "registering service");
            self.registry.set(id, descriptor)?;
            registered += 1;
        }

        self.discovered = true;
        tracing::info!(registered, "discovery finished");
        Ok(registered)
    }

    /// Construction order of the registered services, computed without
    /// instantiating anything.
    ///
    /// # Errors
    ///
    /// - [`WireboxError::ServiceNotFound`] for the first dependency that is
    ///   not registered.
    /// - [`WireboxError::CyclicDependency`] if the graph has a cycle.
    pub fn plan(&self) -> Result<Vec<ServiceId>> {
        let graph = DependencyGraph::from_registry(&self.registry);
        if let Some(missing) = graph.missing().first() {
            return Err(WireboxError::ServiceNotFound {
                id: missing.dependency.to_string(),
            });
        }
        graph.resolve_order()
    }

    /// Discovers, registers, and resolves every service.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::AlreadyCompiled`] on a second call,
    /// [`WireboxError::CompilationFailed`] after an earlier failure, otherwise
    /// the first discovery or resolution error. Any such error moves the
    /// container to [`CompileState::Failed`].
    pub fn compile(&mut self) -> Result<()> {
        match self.state {
            CompileState::Uncompiled => {}
            CompileState::Compiled => return Err(WireboxError::AlreadyCompiled),
            CompileState::Failed => return Err(WireboxError::CompilationFailed),
        }
        let _ = self.discover()?;

        let resolved = self.resolve_all();
        self.fail_on_error(resolved)?;

        self.state = CompileState::Compiled;
        tracing::info!(services = self.registry.len(), "container compiled");
        Ok(())
    }

    fn resolve_all(&mut self) -> Result<()> {
        tracing::info!(services = self.registry.len(), "resolving services");
        let mut resolver = Resolver::new(&mut self.registry);
        let mut index = 0;
        while let Some(id) = resolver.registry().id_at(index).cloned() {
            let _ = resolver.resolve_entry(&id)?;
            index += 1;
        }
        Ok(())
    }

    fn fail_on_error<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "compilation failed");
            self.state = CompileState::Failed;
        }
        result
    }

    const fn ensure_usable(&self) -> Result<()> {
        match self.state {
            CompileState::Failed => Err(WireboxError::CompilationFailed),
            CompileState::Uncompiled | CompileState::Compiled => Ok(()),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .field("parameters", &self.parameters)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::DescriptorTable;
    use crate::classifier::MarkerClassifier;
    use crate::descriptor::ParameterSpec;
    use crate::source::StaticSource;

    struct Clock;

    fn clock() -> TypeDescriptor {
        TypeDescriptor::new("app.Clock", |_| Ok(Clock))
    }

    #[test]
    fn new_container_is_empty_and_uncompiled() {
        let container = Container::new();
        assert!(container.is_empty());
        assert_eq!(container.state(), CompileState::Uncompiled);
    }

    #[test]
    fn get_before_compile_reports_unresolved() {
        let mut container = Container::new();
        container.set("app.Clock", clock()).expect("set");
        assert!(container.has("app.Clock"));
        let err = container.get("app.Clock").unwrap_err();
        assert!(matches!(err, WireboxError::Unresolved { .. }), "got: {err}");
        assert!(container.entry("app.Clock").expect("entry").descriptor().is_some());
    }

    #[test]
    fn compile_resolves_registered_services() {
        let mut container = Container::new();
        container.set("app.Clock", clock()).expect("set");
        container.compile().expect("compile");
        assert_eq!(container.state(), CompileState::Compiled);
        assert!(container.get_as::<Clock>("app.Clock").is_ok());
    }

    #[test]
    fn compile_twice_fails() {
        let mut container = Container::new();
        container.compile().expect("first");
        let err = container.compile().unwrap_err();
        assert!(matches!(err, WireboxError::AlreadyCompiled), "got: {err}");
    }

    #[test]
    fn set_after_compile_fails() {
        let mut container = Container::new();
        container.compile().expect("compile");
        let err = container.set("app.Clock", clock()).unwrap_err();
        assert!(matches!(err, WireboxError::AlreadyCompiled), "got: {err}");
        assert!(!container.has("app.Clock"));
    }

    #[test]
    fn get_as_wrong_type_fails() {
        let mut container = Container::new();
        container.set("app.Clock", clock()).expect("set");
        container.compile().expect("compile");
        let err = container.get_as::<String>("app.Clock").unwrap_err();
        assert!(matches!(err, WireboxError::TypeMismatch { .. }), "got: {err}");
    }

    #[test]
    fn discovery_skips_unmarked_types() {
        let table = Arc::new(
            DescriptorTable::new()
                .with_service(clock())
                .with_type(TypeDescriptor::non_instantiable("app.Helper")),
        );
        let mut container = Container::builder()
            .source(Arc::clone(&table))
            .classifier(MarkerClassifier::new(table))
            .build();
        assert_eq!(container.discover().expect("discover"), 1);
        assert_eq!(container.discover().expect("again"), 0);
        container.compile().expect("compile");
        assert!(!container.has("app.Helper"));
        assert!(container.has("app.Clock"));
    }

    #[test]
    fn plan_orders_dependencies_first() {
        let source = StaticSource::new()
            .with(
                TypeDescriptor::new("app.Timer", |_| Ok(()))
                    .with_parameter(ParameterSpec::service("clock", "app.Clock")),
            )
            .with(clock());
        let mut container = Container::builder().source(source).build();
        let _ = container.discover().expect("discover");
        let order = container.plan().expect("plan");
        assert_eq!(order, vec![ServiceId::new("app.Clock"), ServiceId::new("app.Timer")]);
    }

    #[test]
    fn plan_reports_missing_dependency() {
        let mut container = Container::new();
        container
            .set(
                "app.Timer",
                TypeDescriptor::new("app.Timer", |_| Ok(()))
                    .with_parameter(ParameterSpec::service("clock", "app.Clock")),
            )
            .expect("set");
        let err = container.plan().unwrap_err();
        assert!(
            matches!(err, WireboxError::ServiceNotFound { ref id } if id == "app.Clock"),
            "got: {err}"
        );
    }

    #[test]
    fn parameters_are_exposed_but_not_injected() {
        let mut container = Container::builder()
            .parameters([("host", json!("smtp.local"))].into_iter().collect())
            .build();
        container
            .set(
                "app.Mailer",
                TypeDescriptor::new("app.Mailer", |_| Ok(()))
                    .with_parameter(ParameterSpec::scalar("host")),
            )
            .expect("set");
        assert!(container.parameters().has("host"));
        let err = container.compile().unwrap_err();
        assert!(
            matches!(err, WireboxError::UnresolvableParameter { .. }),
            "got: {err}"
        );
        assert_eq!(container.state(), CompileState::Failed);
    }

    #[test]
    fn failed_discovery_is_not_repeated() {
        let table = Arc::new(
            DescriptorTable::new()
                .with_service(clock())
                .with_service(TypeDescriptor::non_instantiable("app.Port")),
        );
        let mut container = Container::builder()
            .source(Arc::clone(&table))
            .classifier(MarkerClassifier::new(table))
            .build();
        assert!(matches!(
            container.discover(),
            Err(WireboxError::NotInstantiable { .. })
        ));
        assert_eq!(container.state(), CompileState::Failed);
        assert!(matches!(
            container.discover(),
            Err(WireboxError::CompilationFailed)
        ));
        assert_eq!(container.len(), 1);
    }
}
