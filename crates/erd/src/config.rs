//! Configuration types for diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Root combining the sections below.
//! - [`LayoutConfig`] - Which [`LayoutEngine`] places the tables and how far apart.
//! - [`StyleConfig`] - Fonts and colors of the rendered diagram.
//! - [`OutputConfig`] - Where the diagram is written.
//!
//! # Example
//!
//! ```
//! # use erd::config::{AppConfig, LayoutEngine};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     engine = "basic"
//!
//!     [style]
//!     header_color = "lightsteelblue"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().engine(), LayoutEngine::Basic);
//! assert!(config.style().header_color().is_ok());
//! assert_eq!(config.output().path().to_str(), Some("diagram.png"));
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use erd_core::color::Color;

/// Default output file, overwritten on every run.
pub const DEFAULT_OUTPUT_PATH: &str = "diagram.png";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, style: StyleConfig, output: OutputConfig) -> Self {
        Self {
            layout,
            style,
            output,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replaces the output path, e.g. with one given on the command line.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.path = path.into();
        self
    }
}

/// Algorithm used to place tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// Rows by relationship depth, in declaration order.
    Basic,
    /// Layered drawing with crossing reduction.
    #[default]
    Sugiyama,
}

/// Layout section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    engine: LayoutEngine,
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            horizontal_spacing: 60.0,
            vertical_spacing: 80.0,
        }
    }
}

impl LayoutConfig {
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Gap between neighbouring tables in a row.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Gap between rows of tables.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }
}

/// Visual styling. Colors are CSS color strings, validated when read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    header_color: String,
    line_color: String,
    font_family: String,
    font_size: u16,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: Some("white".to_string()),
            header_color: "#dde6f0".to_string(),
            line_color: "#333333".to_string(),
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_size: 13,
        }
    }
}

fn parse_color(value: &str, setting: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {setting} in config: {err}"))
}

impl StyleConfig {
    /// Diagram background, or `None` for a transparent background.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(|color| parse_color(color, "background_color"))
            .transpose()
    }

    /// Fill of table header rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn header_color(&self) -> Result<Color, String> {
        parse_color(&self.header_color, "header_color")
    }

    /// Stroke of table borders and relationship lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn line_color(&self) -> Result<Color, String> {
        parse_color(&self.line_color, "line_color")
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }
}

/// Output section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl OutputConfig {
    pub fn path(&self) -> &Path {
        &self.path
    }
}
