//! Sequences of discovered service descriptors.

use std::sync::Arc;

use wirebox_common::error::Result;
use wirebox_common::types::ServiceId;

use crate::descriptor::TypeDescriptor;

/// A discovered candidate: its identifier and descriptor.
pub type Discovered = (ServiceId, TypeDescriptor);

/// Yields candidate types. Each call walks the source once; every element is
/// produced exactly once per call.
pub trait ServiceSource: Send + Sync {
    /// Returns the candidates, possibly computed lazily.
    fn discover(&self) -> Box<dyn Iterator<Item = Result<Discovered>> + '_>;
}

impl<T: ServiceSource + ?Sized> ServiceSource for Arc<T> {
    fn discover(&self) -> Box<dyn Iterator<Item = Result<Discovered>> + '_> {
        (**self).discover()
    }
}

/// Explicit registration list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    descriptors: Vec<TypeDescriptor>,
}

impl StaticSource {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Appends a descriptor.
    pub fn push(&mut self, descriptor: TypeDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Chaining form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.push(descriptor);
        self
    }
}

impl FromIterator<TypeDescriptor> for StaticSource {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
        }
    }
}

impl ServiceSource for StaticSource {
    fn discover(&self) -> Box<dyn Iterator<Item = Result<Discovered>> + '_> {
        Box::new(
            self.descriptors
                .iter()
                .map(|d| Ok((d.id().clone(), d.clone()))),
        )
    }
}
