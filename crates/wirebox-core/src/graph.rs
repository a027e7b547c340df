//! Dependency graph management using `petgraph`.
//!
//! Builds a directed graph from the service-typed constructor parameters of
//! registered descriptors and resolves a construction order without
//! instantiating anything.

use std::collections::{HashMap, VecDeque};

use petgraph::Direction;
use petgraph::graph::NodeIndex;
use wirebox_common::error::{Result, WireboxError};
use wirebox_common::types::ServiceId;

use crate::registry::Registry;

/// A dependency on a type that is not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDependency {
    /// Service declaring the parameter.
    pub dependent: ServiceId,
    /// Required type that has no registry entry.
    pub dependency: ServiceId,
}

/// A dependency graph of services.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: petgraph::Graph<ServiceId, ()>,
    nodes: HashMap<ServiceId, NodeIndex>,
    missing: Vec<MissingDependency>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph of every entry in `registry`.
    ///
    /// Resolved entries become nodes without edges; their dependencies were
    /// already satisfied.
    #[must_use]
    pub fn from_registry(registry: &Registry) -> Self {
        let mut graph = Self::new();
        for id in registry.ids() {
            let _ = graph.add_service(id.clone());
        }
        for (id, entry) in registry.iter() {
            let Some(descriptor) = entry.descriptor() else {
                continue;
            };
            for dependency in descriptor.dependencies() {
                if registry.has(dependency.as_str()) {
                    graph.add_dependency(id, dependency);
                } else {
                    graph.missing.push(MissingDependency {
                        dependent: id.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }
        graph
    }

    /// Adds a service node, returning the existing one for a known identifier.
    pub fn add_service(&mut self, id: ServiceId) -> NodeIndex {
        if let Some(&index) = self.nodes.get(&id) {
            return index;
        }
        let index = self.graph.add_node(id.clone());
        let _ = self.nodes.insert(id, index);
        index
    }

    /// Adds a dependency edge: `dependent` depends on `dependency`.
    ///
    /// The graph edge points from `dependency` to `dependent`
    /// so that topological sort yields dependencies first.
    pub fn add_dependency(&mut self, dependent: &ServiceId, dependency: &ServiceId) {
        let dependent = self.add_service(dependent.clone());
        let dependency = self.add_service(dependency.clone());
        let _ = self.graph.add_edge(dependency, dependent, ());
    }

    /// Dependencies that point at unregistered types.
    #[must_use]
    pub fn missing(&self) -> &[MissingDependency] {
        &self.missing
    }

    /// Number of services in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns whether the graph has no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns a construction order: dependencies before their dependents.
    ///
    /// # Errors
    ///
    /// Returns [`WireboxError::CyclicDependency`] naming one cycle if the
    /// graph is not acyclic.
    pub fn resolve_order(&self) -> Result<Vec<ServiceId>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => Err(WireboxError::CyclicDependency {
                chain: self.cycle_through(cycle.node_id()),
            }),
        }
    }

    /// Shortest dependency path from `start` back to itself.
    fn cycle_through(&self, start: NodeIndex) -> Vec<String> {
        let name = |idx: NodeIndex| {
            self.graph
                .node_weight(idx)
                .map_or_else(String::new, ToString::to_string)
        };

        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors_directed(node, Direction::Incoming) {
                if next == start {
                    let mut path = vec![node];
                    let mut current = node;
                    while let Some(&prev) = parent.get(&current) {
                        path.push(prev);
                        current = prev;
                    }
                    path.reverse();
                    path.push(start);
                    return path.into_iter().map(name).collect();
                }
                if !parent.contains_key(&next) {
                    let _ = parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }
        vec![name(start)]
    }
}
