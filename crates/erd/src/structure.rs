//! Graph view of a schema registry.
//!
//! [`EntityGraph`] holds one node per entity and one directed edge per
//! one-to-many relationship, pointing from the parent to the child. Layout
//! engines and exporters work on this graph rather than on the registry.
//!
//! Many-to-many relationships are not edges: their join entity is a node of
//! its own, and the two one-to-many relationships into it already depict
//! the association.

use std::collections::HashMap;

use log::trace;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use erd_core::schema::{Cardinality, Entity, Relationship, Schema};

use crate::error::ErdError;

/// Directed graph of entities connected by their one-to-many relationships.
#[derive(Debug)]
pub struct EntityGraph<'a> {
    graph: DiGraph<&'a Entity, &'a Relationship>,
    node_map: HashMap<&'a str, NodeIndex>,
}

impl<'a> EntityGraph<'a> {
    /// Builds the graph of `schema`, keeping entity declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::Graph`] if a relationship names an entity the
    /// registry does not contain.
    pub fn from_schema(schema: &'a Schema) -> Result<Self, ErdError> {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for entity in schema.entities() {
            let idx = graph.add_node(entity);
            node_map.insert(entity.name(), idx);
        }

        for relationship in schema.relationships() {
            if relationship.cardinality() == Cardinality::ManyToMany {
                trace!(name = relationship.name(); "Skipping many-to-many relationship");
                continue;
            }

            let lookup = |name: &str| {
                node_map.get(name).copied().ok_or_else(|| {
                    ErdError::Graph(format!(
                        "Relationship `{}` refers to unknown entity `{name}`",
                        relationship.name()
                    ))
                })
            };
            let parent = lookup(relationship.parent())?;
            let child = lookup(relationship.child())?;
            graph.add_edge(parent, child, relationship);
        }

        Ok(Self { graph, node_map })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in entity declaration order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub fn nodes_with_indices(&self) -> impl Iterator<Item = (NodeIndex, &'a Entity)> + '_ {
        self.graph
            .node_indices()
            .map(|idx| (idx, self.graph[idx]))
    }

    /// Returns the entity stored at `idx`, if the index belongs to this graph.
    pub fn entity(&self, idx: NodeIndex) -> Option<&'a Entity> {
        self.graph.node_weight(idx).copied()
    }

    /// Finds the node of the entity called `name`.
    #[cfg(test)]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Every edge as `(parent, child, relationship)`, in declaration order.
    pub fn relations(
        &self,
    ) -> impl Iterator<Item = (NodeIndex, NodeIndex, &'a Relationship)> + '_ {
        self.graph.edge_indices().filter_map(|idx| self.relation(idx))
    }

    fn relation(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex, &'a Relationship)> {
        let (source, target) = self.graph.edge_endpoints(idx)?;
        let relationship = self.graph.edge_weight(idx)?;
        Some((source, target, *relationship))
    }
}
