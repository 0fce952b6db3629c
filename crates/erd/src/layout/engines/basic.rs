//! Rank-based row assignment.

use log::trace;
use petgraph::graph::NodeIndex;

use crate::{error::ErdError, layout, structure::EntityGraph};

/// Places every table one row below its lowest parent.
///
/// Ranks are longest-path distances from the roots. Cycles cannot push a
/// rank past the number of tables, so cyclic schemas still terminate; tables
/// keep their declaration order within a row.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub(super) fn ranks(graph: &EntityGraph<'_>) -> Vec<usize> {
        let count = graph.node_count();
        let mut ranks = vec![0; count];

        let edges: Vec<(usize, usize)> = graph
            .relations()
            .filter(|(parent, child, _)| parent != child)
            .map(|(parent, child, _)| (parent.index(), child.index()))
            .collect();

        // Bellman-Ford style relaxation: at most `count` passes.
        for _ in 0..count {
            let mut changed = false;
            for &(parent, child) in &edges {
                let candidate = ranks[parent] + 1;
                if candidate > ranks[child] && candidate < count {
                    ranks[child] = candidate;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        ranks
    }
}

impl layout::Engine for Engine {
    fn rows(&self, graph: &EntityGraph<'_>) -> Result<Vec<Vec<NodeIndex>>, ErdError> {
        let ranks = Self::ranks(graph);
        let depth = ranks.iter().max().map_or(0, |max| max + 1);

        let mut rows = vec![Vec::new(); depth];
        for node in graph.node_indices() {
            rows[ranks[node.index()]].push(node);
        }
        trace!(rows:? = rows; "Basic rows");

        Ok(rows)
    }
}
