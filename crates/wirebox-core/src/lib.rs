//! # wirebox-core
//!
//! The discovery-and-resolution engine of Wirebox.
//!
//! Handles:
//! - **Descriptor**: Statically declared constructor metadata for service types.
//! - **Catalog**: Descriptor tables and marker lookup.
//! - **Classifier**: Deciding which descriptors are services.
//! - **Source**: Sequences of discovered descriptors.
//! - **Registry**: Identifier to unresolved descriptor or resolved instance.
//! - **Resolver**: Recursive constructor injection with cycle detection.
//! - **Graph**: Static validation and construction ordering.
//! - **Container**: The compile-once façade tying everything together.
//!
//! # Example
//!
//! ```rust
//! use wirebox_core::container::Container;
//! use wirebox_core::descriptor::{ParameterSpec, TypeDescriptor};
//!
//! struct Clock;
//! struct Scheduler {
//!     clock: std::sync::Arc<Clock>,
//! }
//!
//! let mut container = Container::new();
//! container
//!     .set("app.Clock", TypeDescriptor::new("app.Clock", |_| Ok(Clock)))
//!     .unwrap();
//! container
//!     .set(
//!         "app.Scheduler",
//!         TypeDescriptor::new("app.Scheduler", |args| {
//!             Ok(Scheduler { clock: args.service(0)? })
//!         })
//!         .with_parameter(ParameterSpec::service("clock", "app.Clock")),
//!     )
//!     .unwrap();
//! container.compile().unwrap();
//!
//! let scheduler = container.get_as::<Scheduler>("app.Scheduler").unwrap();
//! let clock = container.get_as::<Clock>("app.Clock").unwrap();
//! assert!(std::sync::Arc::ptr_eq(&scheduler.clock, &clock));
//! ```

pub mod builder;
pub mod catalog;
pub mod classifier;
pub mod container;
pub mod descriptor;
pub mod graph;
pub mod registry;
pub mod resolver;
pub mod source;

pub use wirebox_common::error::{Result, WireboxError};
pub use wirebox_common::types::ServiceId;
