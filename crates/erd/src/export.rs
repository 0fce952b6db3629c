//! Export backends.
//!
//! Every backend turns an [`EntityGraph`] into the bytes of one output
//! format. Nothing is written to disk here; the caller decides where the
//! bytes go.
//!
//! - [`svg`] draws the positioned tables natively.
//! - [`er`] writes the textual ER markup.
//! - [`dot`] writes Graphviz DOT and drives the `dot` executable for raster
//!   and PDF output (feature `graphviz`).
//!
//! Backends return [`Error`], which converts into [`ErdError::Export`] at the
//! crate boundary.
//!
//! [`ErdError::Export`]: crate::ErdError::Export

#[cfg(feature = "graphviz")]
pub mod dot;
pub mod er;
pub mod svg;

use crate::structure::EntityGraph;

/// A diagram output backend.
pub trait Exporter {
    /// Renders `graph` into the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the graph cannot be expressed in the
    /// target format, or [`Error::Io`] if producing the bytes fails.
    fn export(&self, graph: &EntityGraph<'_>) -> Result<Vec<u8>, Error>;
}

/// Errors raised by export backends.
#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
