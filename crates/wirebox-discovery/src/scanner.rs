//! Source tree traversal.
//!
//! Walks a root directory in file-name order and derives one identifier per
//! recognised file. Files without a namespace declaration are not services
//! and are skipped without error.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wirebox_common::config::DiscoveryConfig;
use wirebox_common::constants::DEFAULT_SOURCE_EXTENSION;
use wirebox_common::error::{Result, WireboxError};
use wirebox_common::types::ServiceId;

use crate::header;

/// A source file that declares a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the declaring file.
    pub path: PathBuf,
    /// Identifier derived from the namespace header and file stem.
    pub id: ServiceId,
}

/// Walks a directory for service declaration files.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    root: PathBuf,
    extensions: Vec<String>,
}

impl SourceScanner {
    /// Scans `root` for files with the default extension.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec![DEFAULT_SOURCE_EXTENSION.to_string()],
        }
    }

    /// Builds a scanner from discovery settings.
    #[must_use]
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self {
            root: config.root.clone(),
            extensions: config.extensions.clone(),
        }
    }

    /// Replaces the recognised extensions (without the dot).
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// The scanned root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_recognised(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Recognised files under the root, in a stable order.
    pub fn files(&self) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => (entry.file_type().is_file() && self.is_recognised(entry.path()))
                    .then(|| Ok(entry.into_path())),
                Err(err) => {
                    let path = err
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    Some(Err(WireboxError::Io {
                        path,
                        source: err.into(),
                    }))
                }
            })
    }

    /// Files that declare a type, with their derived identifiers.
    pub fn scan(&self) -> impl Iterator<Item = Result<SourceFile>> + '_ {
        tracing::info!(root = %self.root.display(), "scanning source tree");
        self.files()
            .filter_map(|path| path.and_then(|p| read_declaration(&p)).transpose())
    }
}

fn read_declaration(path: &Path) -> Result<Option<SourceFile>> {
    let source = std::fs::read_to_string(path).map_err(|e| WireboxError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let Some(id) = header::derive_identifier(path, &source) else {
        tracing::debug!(path = %path.display(), "no namespace declaration, skipping");
        return Ok(None);
    };
    tracing::debug!(path = %path.display(), id = %id, "derived identifier");
    Ok(Some(SourceFile {
        path: path.to_path_buf(),
        id,
    }))
}
