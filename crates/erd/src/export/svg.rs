//! Native SVG export.
//!
//! Tables are drawn at the positions of a precomputed [`Layout`]: a filled
//! header with the entity name, then one row per field showing key markers,
//! the field name and its column type. Relationship lines run from border to
//! border with a `1` label at the parent end and a `*` label at the child
//! end. Lines over join columns without a foreign key are dashed.

mod layer;

use std::collections::HashMap;

use log::{debug, info};
use petgraph::graph::NodeIndex;
use svg::{
    Document,
    node::element::{Line, Path, Rectangle, Text, path::Data},
};

use erd_core::{
    color::Color,
    geometry::{Bounds, Point},
    schema::Relationship,
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    error::ErdError,
    layout::{Layout, PositionedTable, table::field_markers},
    structure::EntityGraph,
};

pub use layer::{LayeredOutput, RenderLayer};

/// Distance between parallel lines joining the same pair of tables.
const PARALLEL_OFFSET: f32 = 14.0;

/// Distance of a cardinality label from the table border.
const LABEL_DISTANCE: f32 = 14.0;

/// Builder for [`Svg`].
#[derive(Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    layout: Option<&'a Layout>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_layout(mut self, layout: &'a Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// # Errors
    ///
    /// Returns [`ErdError::Config`] if a configured color does not parse, or
    /// [`ErdError::Export`] if no layout was given.
    pub fn build(self) -> Result<Svg<'a>, ErdError> {
        let layout = self
            .layout
            .ok_or_else(|| Error::Render("SVG export needs a layout".to_string()))?;
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        Ok(Svg {
            layout,
            background_color: style.background_color().map_err(ErdError::Config)?,
            header_color: style.header_color().map_err(ErdError::Config)?,
            line_color: style.line_color().map_err(ErdError::Config)?,
            font_family: style.font_family().to_string(),
            font_size: f32::from(style.font_size()),
        })
    }
}

/// SVG backend drawing a laid-out [`EntityGraph`].
#[derive(Debug)]
pub struct Svg<'a> {
    layout: &'a Layout,
    background_color: Option<Color>,
    header_color: Color,
    line_color: Color,
    font_family: String,
    font_size: f32,
}

impl Svg<'_> {
    fn text(&self, content: &str, position: Point, anchor: &str) -> Text {
        Text::new(content)
            .set("x", position.x())
            .set("y", position.y())
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("text-anchor", anchor)
            .set("dominant-baseline", "central")
    }

    fn table(
        &self,
        graph: &EntityGraph<'_>,
        table: &PositionedTable,
    ) -> Result<LayeredOutput, Error> {
        let entity = graph.entity(table.node()).ok_or_else(|| {
            Error::Render(format!("Entity not found for node {}", table.node().index()))
        })?;
        let metrics = table.metrics();
        let bounds = table.bounds();
        let row_height = metrics.row_height();

        let mut output = LayeredOutput::new();

        let header = Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", row_height)
            .set("fill", &self.header_color);
        output.add_to_layer(RenderLayer::Table, Box::new(header));

        let border = Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", "none")
            .set("stroke", &self.line_color)
            .set("stroke-width", 1)
            .set("data-entity", entity.name());
        output.add_to_layer(RenderLayer::Table, Box::new(border));

        let separator_y = bounds.min_y() + row_height;
        let separator = Line::new()
            .set("x1", bounds.min_x())
            .set("y1", separator_y)
            .set("x2", bounds.max_x())
            .set("y2", separator_y)
            .set("stroke", &self.line_color);
        output.add_to_layer(RenderLayer::Table, Box::new(separator));

        let title = self
            .text(
                entity.name(),
                Point::new(bounds.center().x(), bounds.min_y() + row_height / 2.0),
                "middle",
            )
            .set("font-weight", "bold");
        output.add_to_layer(RenderLayer::Text, Box::new(title));

        for (row, field) in entity.fields().iter().enumerate() {
            let y = bounds.min_y() + metrics.row_offset(row) + row_height / 2.0;

            let markers = field_markers(field);
            if !markers.is_empty() {
                let position = Point::new(bounds.min_x() + metrics.padding().left(), y);
                let text = self
                    .text(&markers, position, "start")
                    .set("font-weight", "bold");
                output.add_to_layer(RenderLayer::Text, Box::new(text));
            }

            let name = self.text(
                field.name(),
                Point::new(bounds.min_x() + metrics.name_offset(), y),
                "start",
            );
            output.add_to_layer(RenderLayer::Text, Box::new(name));

            let column_type = self
                .text(
                    &field.field_type().to_string(),
                    Point::new(bounds.min_x() + metrics.type_offset(), y),
                    "end",
                )
                .set("fill-opacity", 0.7);
            output.add_to_layer(RenderLayer::Text, Box::new(column_type));
        }

        Ok(output)
    }

    /// Line between two different tables, shifted sideways by `offset`.
    fn relation(
        &self,
        parent: Bounds,
        child: Bounds,
        offset: f32,
        relationship: &Relationship,
    ) -> LayeredOutput {
        let start = parent.boundary_point_towards(child.center());
        let end = child.boundary_point_towards(parent.center());

        let direction = end.sub_point(start);
        let length = direction.hypot().max(f32::EPSILON);
        let normal = Point::new(-direction.y() / length, direction.x() / length);
        let shift = normal.scale(offset);
        let (start, end) = (start.add_point(shift), end.add_point(shift));

        let mut output = LayeredOutput::new();
        let mut line = Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("stroke", &self.line_color)
            .set("stroke-width", 1.5)
            .set("data-relationship", relationship.name());
        if !relationship.is_enforced() {
            line = line.set("stroke-dasharray", "6 4");
        }
        output.add_to_layer(RenderLayer::Relation, Box::new(line));

        let label_shift = normal.scale(LABEL_DISTANCE / 2.0);
        let one = start.towards(end, LABEL_DISTANCE).add_point(label_shift);
        let many = end.towards(start, LABEL_DISTANCE).add_point(label_shift);
        output.add_to_layer(RenderLayer::Text, Box::new(self.text("1", one, "middle")));
        output.add_to_layer(RenderLayer::Text, Box::new(self.text("*", many, "middle")));

        output
    }

    /// Loop on the right border of a self-referencing table.
    fn self_relation(&self, bounds: Bounds, relationship: &Relationship) -> LayeredOutput {
        let start = Point::new(bounds.max_x(), bounds.min_y() + bounds.height() * 0.3);
        let end = Point::new(bounds.max_x(), bounds.min_y() + bounds.height() * 0.7);
        let reach = LABEL_DISTANCE * 3.0;

        let data = Data::new()
            .move_to((start.x(), start.y()))
            .cubic_curve_to(vec![
                start.x() + reach,
                start.y(),
                end.x() + reach,
                end.y(),
                end.x(),
                end.y(),
            ]);

        let mut output = LayeredOutput::new();
        let mut path = Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", &self.line_color)
            .set("stroke-width", 1.5)
            .set("data-relationship", relationship.name());
        if !relationship.is_enforced() {
            path = path.set("stroke-dasharray", "6 4");
        }
        output.add_to_layer(RenderLayer::Relation, Box::new(path));

        let label_x = bounds.max_x() + LABEL_DISTANCE / 2.0;
        let one = Point::new(label_x, start.y() - LABEL_DISTANCE / 2.0);
        let many = Point::new(label_x, end.y() + LABEL_DISTANCE / 2.0);
        output.add_to_layer(RenderLayer::Text, Box::new(self.text("1", one, "middle")));
        output.add_to_layer(RenderLayer::Text, Box::new(self.text("*", many, "middle")));

        output
    }

    fn relations(&self, graph: &EntityGraph<'_>) -> Result<LayeredOutput, Error> {
        // Parallel lines are spread symmetrically around the direct line.
        let pair_key = |a: NodeIndex, b: NodeIndex| if a <= b { (a, b) } else { (b, a) };
        let mut totals: HashMap<(NodeIndex, NodeIndex), usize> = HashMap::new();
        for (parent, child, _) in graph.relations() {
            *totals.entry(pair_key(parent, child)).or_default() += 1;
        }

        let bounds_of = |node: NodeIndex| {
            self.layout
                .table(node)
                .map(PositionedTable::bounds)
                .ok_or_else(|| {
                    Error::Render(format!("Table not laid out for node {}", node.index()))
                })
        };

        let mut output = LayeredOutput::new();
        let mut drawn: HashMap<(NodeIndex, NodeIndex), usize> = HashMap::new();
        for (parent, child, relationship) in graph.relations() {
            let parent_bounds = bounds_of(parent)?;
            if parent == child {
                output.merge(self.self_relation(parent_bounds, relationship));
                continue;
            }
            let child_bounds = bounds_of(child)?;

            let key = pair_key(parent, child);
            let total = totals.get(&key).copied().unwrap_or(1);
            let index = drawn.entry(key).or_default();
            let mut offset = (*index as f32 - (total as f32 - 1.0) / 2.0) * PARALLEL_OFFSET;
            *index += 1;
            // Keep the offset side stable for both directions of a pair.
            if key.0 != parent {
                offset = -offset;
            }

            output.merge(self.relation(parent_bounds, child_bounds, offset, relationship));
        }

        Ok(output)
    }

    /// Builds the SVG document of `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a node of `graph` has no table in the
    /// layout.
    pub fn render_document(&self, graph: &EntityGraph<'_>) -> Result<Document, Error> {
        let size = self.layout.size();
        let mut document = Document::new()
            .set("viewBox", (0.0, 0.0, size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());

        let mut output = LayeredOutput::new();
        if let Some(background) = &self.background_color {
            let rect = Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", background);
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        for table in self.layout.tables() {
            output.merge(self.table(graph, table)?);
        }
        output.merge(self.relations(graph)?);

        for node in output.render() {
            document = document.add(node);
        }
        Ok(document)
    }
}

impl Exporter for Svg<'_> {
    fn export(&self, graph: &EntityGraph<'_>) -> Result<Vec<u8>, Error> {
        info!(tables = self.layout.len(); "Rendering SVG document");
        let document = self.render_document(graph)?;

        let mut buffer = Vec::new();
        svg::write(&mut buffer, &document)?;
        debug!(bytes = buffer.len(); "SVG document rendered");
        Ok(buffer)
    }
}
