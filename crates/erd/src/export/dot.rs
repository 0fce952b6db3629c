//! Graphviz export.
//!
//! Each entity becomes a node whose label is an HTML table, each
//! relationship an edge from parent to child drawn with a `tee` tail and a
//! `crow` head. DOT output is produced in-process; PNG, JPEG and PDF are
//! rendered by the Graphviz `dot` executable, which must be on `PATH`.

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Vertex,
};
use graphviz_rust::{
    cmd::{CommandArg, Format},
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, info};
use petgraph::graph::NodeIndex;

use erd_core::{color::Color, schema::Entity};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig, error::ErdError, format::OutputFormat, layout::table::field_markers,
    structure::EntityGraph,
};

fn attr(key: &str, value: Id) -> Attribute {
    Attribute(Id::Plain(key.to_string()), value)
}

fn quoted(value: &str) -> Id {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    Id::Escaped(format!("\"{escaped}\""))
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn node_id(idx: NodeIndex) -> NodeId {
    NodeId(Id::Plain(format!("n{}", idx.index())), None)
}

/// Graphviz backend.
#[derive(Debug)]
pub struct Dot {
    format: OutputFormat,
    background_color: Option<Color>,
    header_color: Color,
    line_color: Color,
    font_family: String,
    font_size: u16,
}

impl Dot {
    /// Creates a backend producing `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::UnsupportedFormat`] for formats Graphviz does not
    /// produce here, and [`ErdError::Config`] for unparsable colors.
    pub fn new(format: OutputFormat, style: &StyleConfig) -> Result<Self, ErdError> {
        if !format.requires_graphviz() {
            return Err(ErdError::UnsupportedFormat {
                path: format!("*.{format}").into(),
                reason: "not a Graphviz output format".to_string(),
            });
        }

        Ok(Self {
            format,
            background_color: style.background_color().map_err(ErdError::Config)?,
            header_color: style.header_color().map_err(ErdError::Config)?,
            line_color: style.line_color().map_err(ErdError::Config)?,
            font_family: style.font_family().to_string(),
            font_size: style.font_size(),
        })
    }

    fn label(&self, entity: &Entity) -> Id {
        let mut html = format!(
            "<<table border=\"0\" cellborder=\"1\" cellspacing=\"0\" cellpadding=\"4\">\
             <tr><td colspan=\"3\" bgcolor=\"{}\"><b>{}</b></td></tr>",
            self.header_color.to_hex(),
            html_escape(entity.name()),
        );
        for field in entity.fields() {
            html.push_str(&format!(
                "<tr><td align=\"left\">{}</td><td align=\"left\" port=\"{}\">{}</td>\
                 <td align=\"right\">{}</td></tr>",
                field_markers(field),
                html_escape(field.name()),
                html_escape(field.name()),
                field.field_type(),
            ));
        }
        html.push_str("</table>>");
        Id::Html(html)
    }

    /// Builds the DOT graph of `graph`.
    pub fn graph(&self, graph: &EntityGraph<'_>) -> Graph {
        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(vec![
                attr("rankdir", Id::Plain("TB".to_string())),
                attr("nodesep", Id::Plain("0.8".to_string())),
                attr(
                    "bgcolor",
                    quoted(
                        &self
                            .background_color
                            .map_or_else(|| "transparent".to_string(), |color| color.to_hex()),
                    ),
                ),
            ])),
            Stmt::GAttribute(GraphAttributes::Node(vec![
                attr("shape", Id::Plain("plain".to_string())),
                attr("fontname", quoted(&self.font_family)),
                attr("fontsize", Id::Plain(self.font_size.to_string())),
            ])),
            Stmt::GAttribute(GraphAttributes::Edge(vec![
                attr("color", quoted(&self.line_color.to_hex())),
                attr("dir", Id::Plain("both".to_string())),
                attr("arrowtail", Id::Plain("tee".to_string())),
                attr("arrowhead", Id::Plain("crow".to_string())),
            ])),
        ];

        for (idx, entity) in graph.nodes_with_indices() {
            stmts.push(Stmt::Node(Node::new(
                node_id(idx),
                vec![attr("label", self.label(entity))],
            )));
        }

        for (parent, child, relationship) in graph.relations() {
            let mut attributes = vec![attr("tooltip", quoted(relationship.name()))];
            if !relationship.is_enforced() {
                attributes.push(attr("style", Id::Plain("dashed".to_string())));
            }
            stmts.push(Stmt::Edge(Edge {
                ty: EdgeTy::Pair(Vertex::N(node_id(parent)), Vertex::N(node_id(child))),
                attributes,
            }));
        }

        Graph::DiGraph {
            id: Id::Plain("erd".to_string()),
            strict: false,
            stmts,
        }
    }

    /// DOT source of `graph`.
    pub fn render(&self, graph: &EntityGraph<'_>) -> String {
        self.graph(graph).print(&mut PrinterContext::default())
    }
}

impl Exporter for Dot {
    fn export(&self, graph: &EntityGraph<'_>) -> Result<Vec<u8>, Error> {
        let format = match self.format {
            OutputFormat::Dot => return Ok(self.render(graph).into_bytes()),
            OutputFormat::Png => Format::Png,
            OutputFormat::Jpg => Format::Jpg,
            OutputFormat::Pdf => Format::Pdf,
            other => {
                return Err(Error::Render(format!(
                    "Graphviz cannot produce `{other}` output"
                )));
            }
        };

        info!(format:? = self.format; "Running Graphviz");
        let args: Vec<CommandArg> = vec![format.into()];
        let bytes = graphviz_rust::exec(self.graph(graph), &mut PrinterContext::default(), args)?;
        debug!(bytes = bytes.len(); "Graphviz finished");
        Ok(bytes)
    }
}
