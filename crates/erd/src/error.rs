//! Error types for diagram generation.
//!
//! [`ErdError`] is the single "diagram generation failed" error: every
//! failure between reading the schema registry and replacing the output file
//! surfaces as one of its variants.

use std::{io, path::PathBuf};

use thiserror::Error;

use erd_core::schema::SchemaError;

/// The main error type for Erd operations.
#[derive(Debug, Error)]
pub enum ErdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("Unsupported output format for `{path}`: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for ErdError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
