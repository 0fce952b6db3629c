//! Z-ordering of SVG output.
//!
//! Drawing code tags every node with a [`RenderLayer`]; [`LayeredOutput`]
//! emits one `<g data-layer="...">` group per layer, bottom layer first, so
//! relationship lines never hide table contents regardless of draw order.

use std::collections::BTreeMap;

use svg::node::element::Group;

/// Boxed SVG node.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Background,
    /// Relationship lines and their end markers.
    Relation,
    /// Table boxes, header fills and row separators.
    Table,
    Text,
}

impl RenderLayer {
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Relation => "relation",
            Self::Table => "table",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    layers: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.layers.entry(layer).or_default().push(node);
    }

    /// Appends the nodes of `other` after the nodes already in each layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.layers {
            self.layers.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(Vec::is_empty)
    }

    /// Consumes the output into one group per non-empty layer.
    pub fn render(self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        self.layers
            .into_iter()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(layer, nodes)| {
                let group = nodes
                    .into_iter()
                    .fold(Group::new().set("data-layer", layer.name()), |group, node| {
                        group.add(node)
                    });
                Box::new(group) as SvgNode
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle, Text};

    use super::*;

    fn layer_names(nodes: Vec<SvgNode>) -> Vec<String> {
        nodes
            .into_iter()
            .map(|node| {
                let markup = node.to_string();
                let start = markup.find("data-layer=\"").unwrap() + "data-layer=\"".len();
                let end = markup[start..].find('"').unwrap();
                markup[start..start + end].to_string()
            })
            .collect()
    }

    #[test]
    fn test_empty_output_renders_nothing() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layers_render_bottom_up() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Text::new("user")));
        output.add_to_layer(RenderLayer::Table, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Relation, Box::new(Line::new()));

        assert_eq!(layer_names(output.render()), ["relation", "table", "text"]);
    }

    #[test]
    fn test_merge_keeps_both_outputs() {
        let mut tables = LayeredOutput::new();
        tables.add_to_layer(RenderLayer::Table, Box::new(Rectangle::new()));

        let mut lines = LayeredOutput::new();
        lines.add_to_layer(RenderLayer::Relation, Box::new(Line::new()));
        lines.add_to_layer(RenderLayer::Table, Box::new(Rectangle::new()));

        tables.merge(lines);
        let rendered = tables.render();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1].to_string().matches("<rect").count(), 2);
    }
}
