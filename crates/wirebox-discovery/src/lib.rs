//! # wirebox-discovery
//!
//! Runtime discovery of services from a source tree.
//!
//! Handles:
//! - **Header**: Parsing `namespace <dotted.path>;` declarations with `nom`.
//! - **Scanner**: Walking a directory and deriving one identifier per file.
//! - **Discoverer**: Introspecting derived identifiers into descriptors,
//!   exposed as a [`ServiceSource`](wirebox_core::source::ServiceSource).

pub mod discoverer;
pub mod header;
pub mod scanner;

pub use discoverer::SourceTreeDiscoverer;
pub use scanner::{SourceFile, SourceScanner};
