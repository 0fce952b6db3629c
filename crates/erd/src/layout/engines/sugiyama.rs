//! Layered row assignment backed by `rust-sugiyama`.

use std::collections::{BTreeMap, HashSet};

use log::{debug, warn};
use petgraph::graph::NodeIndex;
use rust_sugiyama::configure::Config;

use crate::{error::ErdError, layout, structure::EntityGraph};

use super::basic;

/// The Sugiyama engine.
///
/// Rows are the layers computed by the algorithm and the order inside a row
/// is its crossing-minimised order. Tables without relationships join the top
/// row. If the algorithm fails the rows of the [`basic`] engine are used.
#[derive(Debug)]
pub struct Engine {
    horizontal_spacing: f32,
}

impl Engine {
    pub fn new(horizontal_spacing: f32) -> Self {
        Self { horizontal_spacing }
    }

    fn layers(&self, graph: &EntityGraph<'_>) -> Result<Vec<Vec<NodeIndex>>, String> {
        let mut edges: Vec<(u32, u32)> = Vec::new();
        for (parent, child, _) in graph.relations() {
            if parent == child {
                continue;
            }
            let edge = (parent.index() as u32, child.index() as u32);
            if !edges.contains(&edge) {
                edges.push(edge);
            }
        }

        if edges.is_empty() {
            return Ok(vec![graph.node_indices().collect()]);
        }

        debug!(
            nodes = graph.node_count(),
            edges = edges.len();
            "Applying Sugiyama algorithm"
        );

        let vertex_spacing = (self.horizontal_spacing / 20.0).clamp(2.0, 5.0) as f64;
        let edges_for_layout = edges.clone();
        let components = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges_for_layout, &config)
        })
        .map_err(|err| match err.downcast_ref::<String>() {
            Some(message) => format!("rust-sugiyama panicked: {message}"),
            None => "rust-sugiyama panicked with unknown error".to_string(),
        })?;

        if components.is_empty() {
            return Err("rust-sugiyama returned empty layout results".to_string());
        }

        // Layers keyed by y, then ordered by x within a layer. Components are
        // laid side by side, so layer `i` of every component shares row `i`.
        let mut rows: Vec<Vec<NodeIndex>> = Vec::new();
        let mut placed = HashSet::new();
        for (coords, _, _) in &components {
            let mut layers: BTreeMap<i64, Vec<(f64, NodeIndex)>> = BTreeMap::new();
            for &(id, (x, y)) in coords {
                if id >= graph.node_count() {
                    debug!(id = id; "Node id from rust-sugiyama is out of range");
                    continue;
                }
                let node = NodeIndex::new(id);
                if placed.insert(node) {
                    layers.entry(y.round() as i64).or_default().push((x, node));
                }
            }

            for (row_idx, (_, mut layer)) in layers.into_iter().enumerate() {
                layer.sort_by(|a, b| a.0.total_cmp(&b.0));
                if rows.len() <= row_idx {
                    rows.resize_with(row_idx + 1, Vec::new);
                }
                rows[row_idx].extend(layer.into_iter().map(|(_, node)| node));
            }
        }

        Self::orient(&mut rows, &edges);

        let isolated: Vec<_> = graph
            .node_indices()
            .filter(|node| !placed.contains(node))
            .collect();
        match rows.first_mut() {
            Some(top) => top.extend(isolated),
            None => rows.push(isolated),
        }

        Ok(rows)
    }

    /// Flips the rows when most edges point upwards, so parents sit above
    /// their children whatever sign convention the algorithm used for y.
    fn orient(rows: &mut [Vec<NodeIndex>], edges: &[(u32, u32)]) {
        let row_of = |id: u32| {
            rows.iter()
                .position(|row| row.iter().any(|node| node.index() == id as usize))
        };

        let mut downwards = 0usize;
        let mut upwards = 0usize;
        for &(parent, child) in edges {
            if let (Some(parent_row), Some(child_row)) = (row_of(parent), row_of(child)) {
                match parent_row.cmp(&child_row) {
                    std::cmp::Ordering::Less => downwards += 1,
                    std::cmp::Ordering::Greater => upwards += 1,
                    std::cmp::Ordering::Equal => {}
                }
            }
        }

        if upwards > downwards {
            rows.reverse();
        }
    }
}

impl layout::Engine for Engine {
    fn rows(&self, graph: &EntityGraph<'_>) -> Result<Vec<Vec<NodeIndex>>, ErdError> {
        match self.layers(graph) {
            Ok(rows) => Ok(rows),
            Err(reason) => {
                warn!(reason = reason.as_str(); "Sugiyama layout failed, using basic layout");
                basic::Engine::new().rows(graph)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use erd_core::schema::{Entity, Field, Schema};

    use super::*;
    use crate::layout::Engine as _;

    #[test]
    fn test_social_schema_places_user_on_top() {
        let schema = erd_models::schema().unwrap();
        let graph = EntityGraph::from_schema(&schema).unwrap();

        let rows = Engine::new(60.0).rows(&graph).unwrap();
        let user = graph.node_index("user").unwrap();
        let comment = graph.node_index("comment").unwrap();

        let row_of = |node| rows.iter().position(|row| row.contains(&node)).unwrap();
        assert_eq!(row_of(user), 0);
        assert!(row_of(comment) > row_of(user));
        assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), 5);
    }

    #[test]
    fn test_graph_without_edges_is_one_row() {
        let schema = Schema::builder()
            .entity(Entity::new("a").with_field(Field::integer("id").primary_key()))
            .entity(Entity::new("b").with_field(Field::integer("id").primary_key()))
            .build()
            .unwrap();
        let graph = EntityGraph::from_schema(&schema).unwrap();

        let rows = Engine::new(60.0).rows(&graph).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_orient_flips_upside_down_rows() {
        let mut rows = vec![vec![NodeIndex::new(1)], vec![NodeIndex::new(0)]];
        Engine::orient(&mut rows, &[(0, 1)]);
        assert_eq!(rows, [vec![NodeIndex::new(0)], vec![NodeIndex::new(1)]]);
    }
}
