//! CLI logic for the Erd diagram tool.
//!
//! Renders the built-in social network schema registry and reports the
//! outcome on the console.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::io::{self, Write};

use log::{error, info};

use erd::{DiagramBuilder, ErdError};

/// Printed after the diagram file has been written.
pub const SUCCESS_MESSAGE: &str = "Success! Check the file";

/// Printed when any step of diagram generation fails.
pub const FAILURE_MESSAGE: &str = "There was a problem generating the diagram";

/// Run the Erd CLI application, reporting to standard output.
///
/// # Errors
///
/// Returns `ErdError` for configuration, rendering and file I/O errors.
pub fn run(args: &Args) -> Result<(), ErdError> {
    run_with_console(args, &mut io::stdout().lock())
}

/// Run the Erd CLI application, reporting to `console`.
///
/// Exactly one line is written: the success message naming the output file,
/// or the failure message. On failure the underlying error is returned so the
/// caller can render it and exit non-zero.
///
/// # Errors
///
/// Returns `ErdError` for configuration, rendering and file I/O errors.
pub fn run_with_console(args: &Args, console: &mut dyn Write) -> Result<(), ErdError> {
    match generate(args) {
        Ok(path) => {
            writeln!(console, "{SUCCESS_MESSAGE} {}", path.display())?;
            Ok(())
        }
        Err(err) => {
            error!(error:% = err; "Diagram generation failed");
            writeln!(console, "{FAILURE_MESSAGE}")?;
            Err(err)
        }
    }
}

fn generate(args: &Args) -> Result<std::path::PathBuf, ErdError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(output) = &args.output {
        app_config = app_config.with_output_path(output);
    }
    let output = app_config.output().path().to_path_buf();
    info!(output_path:? = output; "Processing schema registry");

    let schema = erd_models::schema()?;
    let builder = DiagramBuilder::new(app_config);
    let written = builder.generate(&schema, &output)?;

    info!(output_file:? = written; "Diagram exported successfully");
    Ok(written)
}
