//! Identifier to unresolved descriptor or resolved instance.
//!
//! Entries are inserted during discovery and transition from
//! [`Entry::Unresolved`] to [`Entry::Resolved`] during resolution. An entry
//! is never removed and never reverts.

use std::collections::HashMap;
use std::fmt;

use wirebox_common::error::{Result, WireboxError};
use wirebox_common::types::ServiceId;

use crate::descriptor::{Instance, TypeDescriptor};

/// A registry slot.
#[derive(Clone)]
pub enum Entry {
    /// Discovered but not yet constructed.
    Unresolved(TypeDescriptor),
    /// Constructed and shared.
    Resolved(Instance),
}

impl Entry {
    /// Returns whether the entry holds an instance.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns the instance of a resolved entry.
    #[must_use]
    pub const fn instance(&self) -> Option<&Instance> {
        match self {
            Self::Resolved(instance) => Some(instance),
            Self::Unresolved(_) => None,
        }
    }

    /// Returns the descriptor of an unresolved entry.
    #[must_use]
    pub const fn descriptor(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Unresolved(descriptor) => Some(descriptor),
            Self::Resolved(_) => None,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved(descriptor) => f.debug_tuple("Unresolved").field(descriptor).finish(),
            Self::Resolved(_) => f.write_str("Resolved(..)"),
        }
    }
}

/// The shared store every resolution step operates on.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<ServiceId, Entry>,
    order: Vec<ServiceId>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an unresolved entry. Last write wins; the first insertion
    /// position is kept.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::AlreadyResolved`] if `id` already holds an instance.
    pub fn set(&mut self, id: ServiceId, descriptor: TypeDescriptor) -> Result<()> {
        if let Some(entry) = self.entries.get_mut(&id) {
            if entry.is_resolved() {
                return Err(WireboxError::AlreadyResolved { id: id.to_string() });
            }
            *entry = Entry::Unresolved(descriptor);
            return Ok(());
        }
        let _ = self
            .entries
            .insert(id.clone(), Entry::Unresolved(descriptor));
        self.order.push(id);
        Ok(())
    }

    /// Returns the entry for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::ServiceNotFound`] if nothing is registered under `id`.
    pub fn get(&self, id: &str) -> Result<&Entry> {
        self.entries
            .get(id)
            .ok_or_else(|| WireboxError::ServiceNotFound { id: id.into() })
    }

    /// Returns whether `id` is registered.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Transitions `id` to resolved.
    pub(crate) fn replace(&mut self, id: &ServiceId, instance: Instance) -> Result<()> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| WireboxError::ServiceNotFound { id: id.to_string() })?;
        *entry = Entry::Resolved(instance);
        Ok(())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identifier at insertion position `index`. Entries appended later stay
    /// reachable, which makes index-based iteration a live view.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&ServiceId> {
        self.order.get(index)
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &ServiceId> {
        self.order.iter()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceId, &Entry)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| (id, entry)))
    }

    /// Number of entries still waiting for resolution.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.entries.values().filter(|e| !e.is_resolved()).count()
    }
}
