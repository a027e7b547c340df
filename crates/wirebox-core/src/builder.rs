//! Fluent API for configuring a container before compilation.

use wirebox_common::parameters::ParameterBag;

use crate::classifier::{AcceptAll, ServiceClassifier};
use crate::container::Container;
use crate::source::{ServiceSource, StaticSource};

/// Builder for a [`Container`].
///
/// Without a source, nothing is discovered; without a classifier, every
/// discovered type is a service.
#[derive(Default)]
pub struct ContainerBuilder {
    source: Option<Box<dyn ServiceSource>>,
    classifier: Option<Box<dyn ServiceClassifier>>,
    parameters: ParameterBag,
}

impl ContainerBuilder {
    /// Creates a builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where candidate types come from.
    #[must_use]
    pub fn source(mut self, source: impl ServiceSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Sets how candidates are classified as services.
    #[must_use]
    pub fn classifier(mut self, classifier: impl ServiceClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Sets the scalar configuration values.
    #[must_use]
    pub fn parameters(mut self, parameters: ParameterBag) -> Self {
        self.parameters = parameters;
        self
    }

    /// Builds the uncompiled container.
    #[must_use]
    pub fn build(self) -> Container {
        Container::from_parts(
            self.source
                .unwrap_or_else(|| Box::new(StaticSource::new())),
            self.classifier.unwrap_or_else(|| Box::new(AcceptAll)),
            self.parameters,
        )
    }
}

impl std::fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("has_source", &self.source.is_some())
            .field("has_classifier", &self.classifier.is_some())
            .field("parameters", &self.parameters)
            .finish()
    }
}
