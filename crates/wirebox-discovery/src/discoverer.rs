//! Source tree discovery as a [`ServiceSource`].

use wirebox_common::config::DiscoveryConfig;
use wirebox_common::error::{Result, WireboxError};
use wirebox_core::catalog::TypeCatalog;
use wirebox_core::source::{Discovered, ServiceSource};

use crate::scanner::{SourceFile, SourceScanner};

/// Yields a descriptor for every declared type in a source tree.
///
/// Identifiers come from the files; their constructor metadata comes from
/// the catalog. A derived identifier the catalog does not know is an error.
#[derive(Debug, Clone)]
pub struct SourceTreeDiscoverer<C> {
    scanner: SourceScanner,
    catalog: C,
}

impl<C: TypeCatalog> SourceTreeDiscoverer<C> {
    /// Discovers with `scanner`, introspecting through `catalog`.
    pub const fn new(scanner: SourceScanner, catalog: C) -> Self {
        Self { scanner, catalog }
    }

    /// Discovers according to `config`.
    pub fn from_config(config: &DiscoveryConfig, catalog: C) -> Self {
        Self::new(SourceScanner::from_config(config), catalog)
    }

    /// The underlying scanner.
    pub const fn scanner(&self) -> &SourceScanner {
        &self.scanner
    }

    fn introspect(&self, file: SourceFile) -> Result<Discovered> {
        let descriptor = self
            .catalog
            .describe(&file.id)
            .ok_or_else(|| WireboxError::UnknownType {
                id: file.id.to_string(),
            })?;
        Ok((file.id, descriptor))
    }
}

impl<C: TypeCatalog> ServiceSource for SourceTreeDiscoverer<C> {
    fn discover(&self) -> Box<dyn Iterator<Item = Result<Discovered>> + '_> {
        Box::new(
            self.scanner
                .scan()
                .map(|file| file.and_then(|f| self.introspect(f))),
        )
    }
}
