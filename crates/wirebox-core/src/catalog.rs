//! Descriptor tables and marker lookup.
//!
//! [`TypeCatalog`] answers "what does this type look like", [`MarkerLookup`]
//! answers "is this marker attached to this type". [`DescriptorTable`] is
//! the explicit, statically populated implementation of both.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use wirebox_common::constants::SERVICE_MARKER;
use wirebox_common::error::Result;
use wirebox_common::types::ServiceId;

use crate::descriptor::TypeDescriptor;
use crate::source::{Discovered, ServiceSource};

/// Introspection facility: maps an identifier to its descriptor.
pub trait TypeCatalog: Send + Sync {
    /// Returns the descriptor for `id`, if the type is known.
    fn describe(&self, id: &ServiceId) -> Option<TypeDescriptor>;
}

/// Marker facility: reports type-level markers keyed by identifier.
pub trait MarkerLookup: Send + Sync {
    /// Returns whether `marker` is attached to the type `id`.
    fn has_marker(&self, id: &ServiceId, marker: &str) -> bool;
}

impl<T: TypeCatalog + ?Sized> TypeCatalog for Arc<T> {
    fn describe(&self, id: &ServiceId) -> Option<TypeDescriptor> {
        (**self).describe(id)
    }
}

impl<T: MarkerLookup + ?Sized> MarkerLookup for Arc<T> {
    fn has_marker(&self, id: &ServiceId, marker: &str) -> bool {
        (**self).has_marker(id, marker)
    }
}

/// Statically declared descriptors and their markers.
#[derive(Debug, Clone, Default)]
pub struct DescriptorTable {
    types: HashMap<ServiceId, TypeDescriptor>,
    order: Vec<ServiceId>,
    markers: HashMap<ServiceId, HashSet<String>>,
}

impl DescriptorTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a descriptor. Replacing keeps the original position.
    pub fn insert(&mut self, descriptor: TypeDescriptor) {
        let id = descriptor.id().clone();
        if self.types.insert(id.clone(), descriptor).is_none() {
            self.order.push(id);
        }
    }

    /// Adds a descriptor and marks it as a service.
    pub fn insert_service(&mut self, descriptor: TypeDescriptor) {
        let id = descriptor.id().clone();
        self.insert(descriptor);
        self.mark(id, SERVICE_MARKER);
    }

    /// Attaches `marker` to the type `id`.
    pub fn mark(&mut self, id: impl Into<ServiceId>, marker: impl Into<String>) {
        let _ = self
            .markers
            .entry(id.into())
            .or_default()
            .insert(marker.into());
    }

    /// Chaining form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Chaining form of [`insert_service`](Self::insert_service).
    #[must_use]
    pub fn with_service(mut self, descriptor: TypeDescriptor) -> Self {
        self.insert_service(descriptor);
        self
    }

    /// Number of described types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl TypeCatalog for DescriptorTable {
    fn describe(&self, id: &ServiceId) -> Option<TypeDescriptor> {
        self.types.get(id).cloned()
    }
}

impl MarkerLookup for DescriptorTable {
    fn has_marker(&self, id: &ServiceId, marker: &str) -> bool {
        self.markers
            .get(id)
            .is_some_and(|markers| markers.contains(marker))
    }
}

impl ServiceSource for DescriptorTable {
    fn discover(&self) -> Box<dyn Iterator<Item = Result<Discovered>> + '_> {
        Box::new(
            self.order
                .iter()
                .filter_map(|id| self.types.get(id))
                .map(|descriptor| Ok((descriptor.id().clone(), descriptor.clone()))),
        )
    }
}
