//! Table placement.
//!
//! A layout engine decides which tables share a row and in which order; the
//! [`EngineBuilder`] then measures every table and packs the rows top to
//! bottom, centering each row on the widest one. Tables in a row never
//! overlap and rows never overlap, whatever the engine returns.

mod engines;
pub mod table;

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, info, warn};
use petgraph::graph::NodeIndex;

use erd_core::geometry::{Bounds, Insets, Point, Size};

use crate::{config::LayoutEngine, error::ErdError, structure::EntityGraph};

pub use table::TableMetrics;

/// A measured table at its final position.
#[derive(Debug, Clone)]
pub struct PositionedTable {
    node: NodeIndex,
    bounds: Bounds,
    metrics: TableMetrics,
}

impl PositionedTable {
    pub fn node(&self) -> NodeIndex {
        self.node
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn metrics(&self) -> &TableMetrics {
        &self.metrics
    }
}

/// Positions of every table of an [`EntityGraph`].
#[derive(Debug, Clone, Default)]
pub struct Layout {
    tables: IndexMap<NodeIndex, PositionedTable>,
    size: Size,
}

impl Layout {
    pub fn table(&self, node: NodeIndex) -> Option<&PositionedTable> {
        self.tables.get(&node)
    }

    /// Tables in row order, left to right within a row.
    pub fn tables(&self) -> impl Iterator<Item = &PositionedTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Size of the drawing including the outer padding.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Splits a graph into rows of nodes.
pub trait Engine {
    /// Returns the nodes of `graph` grouped into rows, top row first.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::Layout`] if the engine cannot arrange the graph.
    fn rows(&self, graph: &EntityGraph<'_>) -> Result<Vec<Vec<NodeIndex>>, ErdError>;
}

/// Configures and runs a layout engine.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    padding: Insets,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    font_size: f32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            padding: Insets::uniform(30.0),
            horizontal_spacing: 60.0,
            vertical_spacing: 80.0,
            font_size: 13.0,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the padding around the whole drawing
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the gap between tables in a row
    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing.max(0.0);
        self
    }

    /// Set the gap between rows
    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing.max(0.0);
        self
    }

    /// Set the font size tables are measured with
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    fn engine(&self, engine_type: LayoutEngine) -> Box<dyn Engine> {
        match engine_type {
            LayoutEngine::Basic => Box::new(engines::Basic::new()),
            LayoutEngine::Sugiyama => Box::new(engines::Sugiyama::new(self.horizontal_spacing)),
        }
    }

    /// Lays out `graph` with the engine `engine_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::Layout`] if the engine fails or places a table
    /// twice.
    pub fn build(
        &self,
        graph: &EntityGraph<'_>,
        engine_type: LayoutEngine,
    ) -> Result<Layout, ErdError> {
        info!(engine:? = engine_type, tables = graph.node_count(); "Calculating layout");

        let rows = self.engine(engine_type).rows(graph)?;
        let rows = Self::complete_rows(graph, rows)?;
        debug!(rows = rows.len(); "Rows assigned");

        let layout = self.pack(graph, &rows)?;
        debug!(
            width = layout.size.width(),
            height = layout.size.height();
            "Layout calculated"
        );
        Ok(layout)
    }

    /// Rejects duplicates and appends any node the engine left out.
    fn complete_rows(
        graph: &EntityGraph<'_>,
        mut rows: Vec<Vec<NodeIndex>>,
    ) -> Result<Vec<Vec<NodeIndex>>, ErdError> {
        let mut placed = HashSet::new();
        for &node in rows.iter().flatten() {
            if graph.entity(node).is_none() {
                return Err(ErdError::Layout(format!(
                    "Engine placed unknown node {}",
                    node.index()
                )));
            }
            if !placed.insert(node) {
                return Err(ErdError::Layout(format!(
                    "Engine placed node {} more than once",
                    node.index()
                )));
            }
        }

        let missing: Vec<_> = graph
            .node_indices()
            .filter(|node| !placed.contains(node))
            .collect();
        if !missing.is_empty() {
            warn!(count = missing.len(); "Engine left tables unplaced, appending a row");
            rows.push(missing);
        }

        rows.retain(|row| !row.is_empty());
        Ok(rows)
    }

    fn pack(&self, graph: &EntityGraph<'_>, rows: &[Vec<NodeIndex>]) -> Result<Layout, ErdError> {
        let measured: Vec<Vec<(NodeIndex, TableMetrics)>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&node| {
                        let entity = graph.entity(node).ok_or_else(|| {
                            ErdError::Layout(format!("Entity not found for node {}", node.index()))
                        })?;
                        Ok((node, TableMetrics::measure(entity, self.font_size)))
                    })
                    .collect::<Result<Vec<_>, ErdError>>()
            })
            .collect::<Result<_, _>>()?;

        let row_width = |row: &[(NodeIndex, TableMetrics)]| {
            let tables: f32 = row.iter().map(|(_, metrics)| metrics.size().width()).sum();
            tables + self.horizontal_spacing * row.len().saturating_sub(1) as f32
        };
        let content_width = measured
            .iter()
            .map(|row| row_width(row))
            .fold(0.0_f32, f32::max);

        let mut tables = IndexMap::new();
        let mut y = self.padding.top();
        for (row_idx, row) in measured.iter().enumerate() {
            if row_idx > 0 {
                y += self.vertical_spacing;
            }

            let mut x = self.padding.left() + (content_width - row_width(row)) / 2.0;
            let mut row_height = 0.0_f32;
            for &(node, metrics) in row {
                let size = metrics.size();
                let bounds = Bounds::new_from_top_left(Point::new(x, y), size);
                tables.insert(
                    node,
                    PositionedTable {
                        node,
                        bounds,
                        metrics,
                    },
                );
                x += size.width() + self.horizontal_spacing;
                row_height = row_height.max(size.height());
            }
            y += row_height;
        }

        let size = Size::new(content_width, y - self.padding.top()).add_padding(self.padding);
        Ok(Layout { tables, size })
    }
}

#[cfg(test)]
mod tests {
    use erd_core::schema::{Entity, Field, Relationship, Schema};

    use super::*;

    fn chain_schema(len: usize) -> Schema {
        let mut builder = Schema::builder();
        for i in 0..len {
            let mut entity =
                Entity::new(format!("t{i}")).with_field(Field::integer("id").primary_key());
            if i > 0 {
                entity = entity.with_field(
                    Field::integer("parent_id").references(format!("t{}", i - 1), "id"),
                );
            }
            builder = builder.entity(entity);
        }
        for i in 1..len {
            builder = builder.relationship(Relationship::one_to_many(
                format!("t{}", i - 1),
                format!("t{i}"),
                "parent_id",
            ));
        }
        builder.build().unwrap()
    }

    fn assert_no_overlap(layout: &Layout) {
        let tables: Vec<_> = layout.tables().collect();
        for (i, a) in tables.iter().enumerate() {
            for b in &tables[i + 1..] {
                assert!(
                    !a.bounds().intersects(&b.bounds()),
                    "{:?} overlaps {:?}",
                    a.bounds(),
                    b.bounds()
                );
            }
        }
    }

    #[test]
    fn test_every_table_is_placed_once() {
        let schema = erd_models::schema().unwrap();
        let graph = EntityGraph::from_schema(&schema).unwrap();

        for engine in [LayoutEngine::Basic, LayoutEngine::Sugiyama] {
            let layout = EngineBuilder::new().build(&graph, engine).unwrap();
            assert_eq!(layout.len(), 5);
            for node in graph.node_indices() {
                assert!(layout.table(node).is_some());
            }
            assert_no_overlap(&layout);
        }
    }

    #[test]
    fn test_tables_fit_inside_drawing() {
        let schema = erd_models::schema().unwrap();
        let graph = EntityGraph::from_schema(&schema).unwrap();
        let layout = EngineBuilder::new()
            .with_padding(Insets::uniform(10.0))
            .build(&graph, LayoutEngine::Basic)
            .unwrap();

        for table in layout.tables() {
            assert!(table.bounds().min_x() >= 10.0 - f32::EPSILON);
            assert!(table.bounds().min_y() >= 10.0 - f32::EPSILON);
            assert!(table.bounds().max_x() <= layout.size().width() - 10.0 + 0.01);
            assert!(table.bounds().max_y() <= layout.size().height() - 10.0 + 0.01);
        }
    }

    #[test]
    fn test_parent_row_is_above_child_row() {
        let schema = chain_schema(3);
        let graph = EntityGraph::from_schema(&schema).unwrap();
        let layout = EngineBuilder::new()
            .build(&graph, LayoutEngine::Basic)
            .unwrap();

        let top = |name: &str| {
            let node = graph.node_index(name).unwrap();
            layout.table(node).unwrap().bounds().min_y()
        };
        assert!(top("t0") < top("t1"));
        assert!(top("t1") < top("t2"));
    }

    #[test]
    fn test_vertical_spacing_separates_rows() {
        let schema = chain_schema(2);
        let graph = EntityGraph::from_schema(&schema).unwrap();
        let layout = EngineBuilder::new()
            .with_vertical_spacing(100.0)
            .build(&graph, LayoutEngine::Basic)
            .unwrap();

        let parent = layout.table(graph.node_index("t0").unwrap()).unwrap();
        let child = layout.table(graph.node_index("t1").unwrap()).unwrap();
        let gap = child.bounds().min_y() - parent.bounds().max_y();
        assert!((gap - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_schema_has_empty_layout() {
        let schema = Schema::builder().build().unwrap();
        let graph = EntityGraph::from_schema(&schema).unwrap();
        let layout = EngineBuilder::new()
            .build(&graph, LayoutEngine::Sugiyama)
            .unwrap();
        assert!(layout.is_empty());
    }

    struct Duplicating;

    impl Engine for Duplicating {
        fn rows(&self, graph: &EntityGraph<'_>) -> Result<Vec<Vec<NodeIndex>>, ErdError> {
            let first = graph.node_indices().next().unwrap();
            Ok(vec![vec![first, first]])
        }
    }

    struct Forgetful;

    impl Engine for Forgetful {
        fn rows(&self, _graph: &EntityGraph<'_>) -> Result<Vec<Vec<NodeIndex>>, ErdError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_duplicate_placement_is_rejected() {
        let schema = chain_schema(2);
        let graph = EntityGraph::from_schema(&schema).unwrap();
        let rows = Duplicating.rows(&graph).unwrap();

        let err = EngineBuilder::complete_rows(&graph, rows).unwrap_err();
        assert!(matches!(err, ErdError::Layout(_)));
    }

    #[test]
    fn test_missing_tables_are_appended() {
        let schema = chain_schema(3);
        let graph = EntityGraph::from_schema(&schema).unwrap();
        let rows = Forgetful.rows(&graph).unwrap();

        let rows = EngineBuilder::complete_rows(&graph, rows).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
    }
}

#[cfg(test)]
mod proptests {
    use erd_core::schema::{Entity, Field, Relationship, Schema};
    use proptest::prelude::*;

    use super::*;

    /// Random forests: entity `i` optionally points at an earlier entity.
    fn schema_strategy() -> impl Strategy<Value = Schema> {
        prop::collection::vec((any::<Option<prop::sample::Index>>(), 1usize..6), 1..10).prop_map(
            |specs| {
                let mut builder = Schema::builder();
                let mut relationships = Vec::new();
                for (i, (parent, extra_fields)) in specs.iter().enumerate() {
                    let mut entity =
                        Entity::new(format!("e{i}")).with_field(Field::integer("id").primary_key());
                    for f in 0..*extra_fields {
                        entity = entity.with_field(Field::varchar(format!("column_{f}")));
                    }
                    if let (Some(parent), true) = (parent, i > 0) {
                        let parent = parent.index(i);
                        entity = entity.with_field(
                            Field::integer("parent_id").references(format!("e{parent}"), "id"),
                        );
                        relationships.push(Relationship::one_to_many(
                            format!("e{parent}"),
                            format!("e{i}"),
                            "parent_id",
                        ));
                    }
                    builder = builder.entity(entity);
                }
                for relationship in relationships {
                    builder = builder.relationship(relationship);
                }
                builder.build().unwrap()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_tables_never_overlap(
            schema in schema_strategy(),
            sugiyama in any::<bool>(),
            spacing in 0.0f32..100.0,
        ) {
            let graph = EntityGraph::from_schema(&schema).unwrap();
            let engine = if sugiyama { LayoutEngine::Sugiyama } else { LayoutEngine::Basic };
            let layout = EngineBuilder::new()
                .with_horizontal_spacing(spacing)
                .with_vertical_spacing(spacing)
                .build(&graph, engine)
                .unwrap();

            prop_assert_eq!(layout.len(), graph.node_count());
            let tables: Vec<_> = layout.tables().collect();
            for (i, a) in tables.iter().enumerate() {
                for b in &tables[i + 1..] {
                    prop_assert!(!a.bounds().intersects(&b.bounds()));
                }
            }
        }
    }
}
