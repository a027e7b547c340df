//! YAML service manifests.
//!
//! A manifest declares services by identifier together with their
//! constructor parameters. Every declared service is instantiated as a
//! [`Record`] of its resolved arguments, which is enough to validate the
//! wiring of a graph without the real types.
//!
//! ```yaml
//! services:
//!   - id: app.Clock
//!   - id: app.Scheduler
//!     parameters:
//!       - { name: clock, type: app.Clock }
//!       - { name: interval, default: 30 }
//!   - id: app.Transport
//!     abstract: true
//!     service: false
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use wirebox_common::config::{DiscoveryConfig, WireboxConfig};
use wirebox_common::error::Result;
use wirebox_common::types::ServiceId;
use wirebox_core::catalog::DescriptorTable;
use wirebox_core::classifier::MarkerClassifier;
use wirebox_core::source::ServiceSource;
use wirebox_discovery::SourceTreeDiscoverer;
use wirebox_core::container::Container;
use wirebox_core::descriptor::{Argument, Arguments, ParameterSpec, TypeDescriptor};

/// Root of a manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceManifest {
    /// Declared types, in declaration order.
    #[serde(default)]
    pub services: Vec<ServiceDecl>,
}

/// One declared type.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDecl {
    /// Fully-qualified identifier.
    pub id: String,
    /// Constructor parameters in order.
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    /// Whether the type lacks a constructor.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Whether the service marker is attached.
    #[serde(default = "default_true")]
    pub service: bool,
}

/// One constructor parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDecl {
    /// Parameter name.
    pub name: String,
    /// Required service type.
    #[serde(default, rename = "type")]
    pub required_type: Option<String>,
    /// Default value; an explicit `null` is a null default.
    #[serde(default, deserialize_with = "present_value")]
    pub default: Option<Value>,
}

const fn default_true() -> bool {
    true
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// The instance every manifest service is built as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Identifier of the constructed service.
    pub id: ServiceId,
    /// Rendered arguments: `@id` for services, JSON for values.
    pub arguments: Vec<String>,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.id, self.arguments.join(", "))
    }
}

fn build_record(args: &Arguments) -> Result<Record> {
    let arguments = args
        .iter()
        .enumerate()
        .map(|(index, argument)| match argument {
            Argument::Service(_) => args.service::<Record>(index).map(|r| format!("@{}", r.id)),
            Argument::Value(value) => Ok(value.to_string()),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Record {
        id: args.service_id().clone(),
        arguments,
    })
}

impl ParameterDecl {
    fn to_spec(&self) -> ParameterSpec {
        let spec = match &self.required_type {
            Some(required) => ParameterSpec::service(&self.name, required.as_str()),
            None => ParameterSpec::scalar(&self.name),
        };
        match &self.default {
            Some(value) => spec.with_default(value.clone()),
            None => spec,
        }
    }
}

impl ServiceDecl {
    fn to_descriptor(&self) -> TypeDescriptor {
        let descriptor = if self.is_abstract {
            TypeDescriptor::non_instantiable(self.id.as_str())
        } else {
            TypeDescriptor::new(self.id.as_str(), build_record)
        };
        descriptor.with_parameters(self.parameters.iter().map(ParameterDecl::to_spec))
    }
}

impl ServiceManifest {
    /// Reads a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid manifest {}", path.display()))
    }

    /// Descriptor table of the declared types, marked as configured.
    #[must_use]
    pub fn to_table(&self, marker: &str) -> DescriptorTable {
        let mut table = DescriptorTable::new();
        for decl in &self.services {
            table.insert(decl.to_descriptor());
            if decl.service {
                table.mark(decl.id.as_str(), marker);
            }
        }
        table
    }

    /// An uncompiled container over the declared types.
    #[must_use]
    pub fn container(&self, config: &WireboxConfig) -> Container {
        let table = Arc::new(self.to_table(&config.service_marker));
        Self::assemble(Arc::clone(&table), table, config)
    }

    /// An uncompiled container discovering the types declared in the source
    /// tree described by `discovery`, introspected through this manifest.
    #[must_use]
    pub fn tree_container(
        &self,
        config: &WireboxConfig,
        discovery: &DiscoveryConfig,
    ) -> Container {
        let table = Arc::new(self.to_table(&config.service_marker));
        let source = SourceTreeDiscoverer::from_config(discovery, Arc::clone(&table));
        Self::assemble(source, table, config)
    }

    fn assemble(
        source: impl ServiceSource + 'static,
        table: Arc<DescriptorTable>,
        config: &WireboxConfig,
    ) -> Container {
        Container::builder()
            .source(source)
            .classifier(MarkerClassifier::with_marker(
                table,
                config.service_marker.as_str(),
            ))
            .parameters(config.parameter_bag())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use wirebox_common::error::WireboxError;

    use super::*;

    const MANIFEST: &str = r"
services:
  - id: app.Scheduler
    parameters:
      - { name: clock, type: app.Clock }
      - { name: interval, default: 30 }
      - { name: label, default: null }
  - id: app.Clock
  - id: app.Transport
    abstract: true
    service: false
";

    fn manifest() -> ServiceManifest {
        serde_yaml::from_str(MANIFEST).expect("manifest")
    }

    #[test]
    fn parses_declarations() {
        let manifest = manifest();
        assert_eq!(manifest.services.len(), 3);
        let scheduler = &manifest.services[0];
        assert!(scheduler.service);
        assert_eq!(scheduler.parameters[0].required_type.as_deref(), Some("app.Clock"));
        assert_eq!(scheduler.parameters[1].default, Some(Value::from(30)));
        assert_eq!(scheduler.parameters[2].default, Some(Value::Null));
        assert!(manifest.services[2].is_abstract);
        assert!(!manifest.services[2].service);
    }

    #[test]
    fn compiles_records_with_rendered_arguments() {
        let mut container = manifest().container(&WireboxConfig::default());
        container.compile().expect("compile");

        assert!(!container.has("app.Transport"));
        let scheduler = container.get_as::<Record>("app.Scheduler").expect("scheduler");
        assert_eq!(scheduler.to_string(), "app.Scheduler(@app.Clock, 30, null)");
    }

    #[test]
    fn plan_lists_dependencies_first() {
        let mut container = manifest().container(&WireboxConfig::default());
        let _ = container.discover().expect("discover");
        let order: Vec<String> = container
            .plan()
            .expect("plan")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(order, vec!["app.Clock", "app.Scheduler"]);
    }

    #[test]
    fn marked_abstract_service_fails() {
        let manifest: ServiceManifest =
            serde_yaml::from_str("services:\n  - id: app.Port\n    abstract: true\n")
                .expect("manifest");
        let err = manifest
            .container(&WireboxConfig::default())
            .compile()
            .unwrap_err();
        assert!(matches!(err, WireboxError::NotInstantiable { .. }), "got: {err}");
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("services.yaml");
        std::fs::write(&path, MANIFEST).expect("write");
        assert_eq!(ServiceManifest::load(&path).expect("load").services.len(), 3);
    }

    #[test]
    fn tree_container_discovers_declared_files_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Clock.svc"), "namespace app;\n").expect("clock");
        std::fs::write(dir.path().join("Scheduler.svc"), "namespace app;\n").expect("scheduler");
        let discovery = DiscoveryConfig {
            root: dir.path().to_path_buf(),
            ..DiscoveryConfig::default()
        };

        let mut container = manifest().tree_container(&WireboxConfig::default(), &discovery);
        container.compile().expect("compile");
        assert_eq!(container.len(), 2);
        assert!(!container.has("app.Transport"));
        let scheduler = container.get_as::<Record>("app.Scheduler").expect("scheduler");
        assert_eq!(scheduler.to_string(), "app.Scheduler(@app.Clock, 30, null)");
    }

    #[test]
    fn tree_container_rejects_undeclared_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Ghost.svc"), "namespace app;\n").expect("ghost");
        let discovery = DiscoveryConfig {
            root: dir.path().to_path_buf(),
            ..DiscoveryConfig::default()
        };

        let err = manifest()
            .tree_container(&WireboxConfig::default(), &discovery)
            .compile()
            .unwrap_err();
        assert!(
            matches!(err, WireboxError::UnknownType { ref id } if id == "app.Ghost"),
            "got: {err}"
        );
    }
}
