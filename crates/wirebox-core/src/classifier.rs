//! Deciding which descriptors are services.

use wirebox_common::constants::SERVICE_MARKER;

use crate::catalog::MarkerLookup;
use crate::descriptor::TypeDescriptor;

/// Predicate over descriptors. Implementations must not mutate anything.
pub trait ServiceClassifier: Send + Sync {
    /// Returns whether the described type is a declared service.
    fn is_service(&self, descriptor: &TypeDescriptor) -> bool;
}

impl<F> ServiceClassifier for F
where
    F: Fn(&TypeDescriptor) -> bool + Send + Sync,
{
    fn is_service(&self, descriptor: &TypeDescriptor) -> bool {
        self(descriptor)
    }
}

/// Treats every descriptor as a service. Suited to explicit registration lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ServiceClassifier for AcceptAll {
    fn is_service(&self, _descriptor: &TypeDescriptor) -> bool {
        true
    }
}

/// Classifies a type as a service when a marker is attached to it.
#[derive(Debug, Clone)]
pub struct MarkerClassifier<L> {
    lookup: L,
    marker: String,
}

impl<L: MarkerLookup> MarkerClassifier<L> {
    /// Looks for the default `service` marker.
    pub fn new(lookup: L) -> Self {
        Self::with_marker(lookup, SERVICE_MARKER)
    }

    /// Looks for a custom marker.
    pub fn with_marker(lookup: L, marker: impl Into<String>) -> Self {
        Self {
            lookup,
            marker: marker.into(),
        }
    }

    /// The marker this classifier looks for.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl<L: MarkerLookup> ServiceClassifier for MarkerClassifier<L> {
    fn is_service(&self, descriptor: &TypeDescriptor) -> bool {
        self.lookup.has_marker(descriptor.id(), &self.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DescriptorTable;

    #[test]
    fn marker_classifier_follows_the_table() {
        let clock = TypeDescriptor::new("app.Clock", |_| Ok(()));
        let helper = TypeDescriptor::new("app.Helper", |_| Ok(()));
        let table = DescriptorTable::new()
            .with_service(clock.clone())
            .with_type(helper.clone());
        let classifier = MarkerClassifier::new(table);
        assert!(classifier.is_service(&clock));
        assert!(!classifier.is_service(&helper));
    }

    #[test]
    fn custom_marker() {
        let worker = TypeDescriptor::new("app.Worker", |_| Ok(()));
        let mut table = DescriptorTable::new().with_service(worker.clone());
        table.mark("app.Worker", "component");
        let classifier = MarkerClassifier::with_marker(table, "component");
        assert_eq!(classifier.marker(), "component");
        assert!(classifier.is_service(&worker));
    }

    #[test]
    fn closures_classify() {
        let classifier = |d: &TypeDescriptor| d.id().as_str().starts_with("app.");
        assert!(classifier.is_service(&TypeDescriptor::new("app.A", |_| Ok(()))));
        assert!(!classifier.is_service(&TypeDescriptor::new("vendor.B", |_| Ok(()))));
    }

    #[test]
    fn accept_all_accepts_abstract_types() {
        assert!(AcceptAll.is_service(&TypeDescriptor::non_instantiable("app.Port")));
    }
}
