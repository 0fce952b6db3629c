//! Erd - entity-relationship diagrams from schema registries.
//!
//! Turns a [`Schema`] into a diagram: tables with their fields, types and key
//! markers, joined by relationship lines. SVG and ER markup are rendered
//! in-process; DOT, PNG, JPEG and PDF go through Graphviz when the
//! `graphviz` feature is enabled.

pub mod config;

mod error;
mod export;
mod format;
mod layout;
mod structure;

pub use erd_core::{color, geometry, schema};

pub use error::ErdError;
pub use format::OutputFormat;

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use erd_core::{geometry::Insets, schema::Schema};

use config::AppConfig;
use export::Exporter;

/// Builder for rendering schema registries into diagrams.
///
/// # Examples
///
/// ```rust
/// use erd::{DiagramBuilder, config::AppConfig};
///
/// let schema = erd_models::schema().expect("valid schema");
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let svg = builder.render_svg(&schema).expect("Failed to render");
/// assert!(svg.contains("<svg"));
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// let markup = builder.render_er(&schema).expect("Failed to render");
/// assert!(markup.starts_with("[user]"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render `schema` to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns `ErdError` for layout, styling or rendering errors.
    pub fn render_svg(&self, schema: &Schema) -> Result<String, ErdError> {
        let bytes = self.render(schema, OutputFormat::Svg)?;
        String::from_utf8(bytes)
            .map_err(|err| ErdError::Export(Box::new(err)))
    }

    /// Render `schema` to ER markup.
    ///
    /// # Errors
    ///
    /// Returns `ErdError` if the graph cannot be built or rendered.
    pub fn render_er(&self, schema: &Schema) -> Result<String, ErdError> {
        let graph = structure::EntityGraph::from_schema(schema)?;
        Ok(export::er::Er::new().render(&graph)?)
    }

    /// Render `schema` to Graphviz DOT source.
    ///
    /// # Errors
    ///
    /// Returns `ErdError` if the graph cannot be built or a style color is
    /// invalid.
    #[cfg(feature = "graphviz")]
    pub fn render_dot(&self, schema: &Schema) -> Result<String, ErdError> {
        let graph = structure::EntityGraph::from_schema(schema)?;
        let dot = export::dot::Dot::new(OutputFormat::Dot, self.config.style())?;
        Ok(dot.render(&graph))
    }

    /// Render `schema` in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::UnsupportedFormat`] for Graphviz formats when the
    /// `graphviz` feature is disabled, and other `ErdError`s for layout or
    /// rendering failures.
    pub fn render(&self, schema: &Schema, format: OutputFormat) -> Result<Vec<u8>, ErdError> {
        info!(format:? = format; "Building entity graph");
        let graph = structure::EntityGraph::from_schema(schema)?;
        debug!(
            tables = graph.node_count(),
            relations = graph.edge_count();
            "Entity graph built"
        );
        trace!(graph:?; "Entity graph");

        let bytes = match format {
            OutputFormat::Svg => {
                let style = self.config.style();
                let layout = layout::EngineBuilder::new()
                    .with_padding(Insets::uniform(30.0))
                    .with_horizontal_spacing(self.config.layout().horizontal_spacing())
                    .with_vertical_spacing(self.config.layout().vertical_spacing())
                    .with_font_size(f32::from(style.font_size()))
                    .build(&graph, self.config.layout().engine())?;
                if layout.is_empty() {
                    debug!("Schema has no entities, rendering an empty diagram");
                }

                export::svg::SvgBuilder::new()
                    .with_style(style)
                    .with_layout(&layout)
                    .build()?
                    .export(&graph)?
            }
            OutputFormat::Er => export::er::Er::new().export(&graph)?,
            _ => self.render_graphviz(&graph, format)?,
        };

        info!(bytes = bytes.len(); "Diagram rendered");
        Ok(bytes)
    }

    #[cfg(feature = "graphviz")]
    fn render_graphviz(
        &self,
        graph: &structure::EntityGraph<'_>,
        format: OutputFormat,
    ) -> Result<Vec<u8>, ErdError> {
        let dot = export::dot::Dot::new(format, self.config.style())?;
        Ok(dot.export(graph)?)
    }

    #[cfg(not(feature = "graphviz"))]
    fn render_graphviz(
        &self,
        _graph: &structure::EntityGraph<'_>,
        format: OutputFormat,
    ) -> Result<Vec<u8>, ErdError> {
        Err(ErdError::UnsupportedFormat {
            path: PathBuf::from(format!("*.{format}")),
            reason: "built without the `graphviz` feature".to_string(),
        })
    }

    /// Render `schema` into the file at `path`, choosing the format from the
    /// extension.
    ///
    /// The diagram is rendered fully in memory and then moved over `path`, so
    /// a failed run leaves any previous file untouched. The parent directory
    /// must exist.
    ///
    /// # Errors
    ///
    /// Returns `ErdError` if the format is unsupported, rendering fails, the
    /// renderer produced nothing, or the file cannot be written.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use erd::DiagramBuilder;
    ///
    /// let schema = erd_models::schema().expect("valid schema");
    /// let path = DiagramBuilder::default()
    ///     .generate(&schema, "diagram.svg")
    ///     .expect("Failed to generate diagram");
    /// println!("Wrote {}", path.display());
    /// ```
    pub fn generate(&self, schema: &Schema, path: impl AsRef<Path>) -> Result<PathBuf, ErdError> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path)?;

        let bytes = self.render(schema, format)?;
        if bytes.is_empty() {
            return Err(export::Error::Render("renderer produced no output".to_string()).into());
        }

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        debug!(path:? = path; "Writing diagram");

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(&bytes)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|err| ErdError::Io(err.error))?;

        info!(path:? = path, bytes = bytes.len(); "Diagram written");
        Ok(path.to_path_buf())
    }
}
