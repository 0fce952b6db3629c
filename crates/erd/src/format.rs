//! Output formats, chosen by file extension.

use std::{fmt, path::Path};

use crate::error::ErdError;

/// Format of a generated diagram file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Svg,
    /// Textual ER markup.
    Er,
    /// Graphviz DOT source.
    Dot,
    Png,
    Jpg,
    Pdf,
}

impl OutputFormat {
    /// Picks the format from the extension of `path`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ErdError::UnsupportedFormat`] if the path has no extension
    /// or an unknown one.
    ///
    /// # Examples
    ///
    /// ```
    /// use erd::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("diagram.png").unwrap(), OutputFormat::Png);
    /// assert_eq!(OutputFormat::from_path("out/Schema.SVG").unwrap(), OutputFormat::Svg);
    /// assert!(OutputFormat::from_path("diagram").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ErdError> {
        let path = path.as_ref();
        let unsupported = |reason: &str| ErdError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| unsupported("missing file extension"))?;

        match extension.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "er" => Ok(Self::Er),
            "dot" | "gv" => Ok(Self::Dot),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "pdf" => Ok(Self::Pdf),
            other => Err(unsupported(&format!("unknown extension `{other}`"))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Er => "er",
            Self::Dot => "dot",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
        }
    }

    /// Whether rendering goes through the Graphviz integration.
    pub fn requires_graphviz(self) -> bool {
        matches!(self, Self::Dot | Self::Png | Self::Jpg | Self::Pdf)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
