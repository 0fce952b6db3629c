//! Command-line argument definitions for the Erd CLI.
//!
//! The schema registry is built in, so the only inputs are where to write
//! the diagram, which configuration file to load and how much to log.

use std::path::PathBuf;

use clap::Parser;

/// Render the social network schema registry as an entity-relationship diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output file; the extension selects the format (svg, er, dot, png, jpg, pdf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
