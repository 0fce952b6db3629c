//! Error adapter for converting ErdError to miette diagnostics.
//!
//! The library reports failures through the plain [`ErdError`]; the CLI
//! wraps it so miette can render a code and a hint next to the message.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};

use erd::ErdError;

/// Adapter rendering an [`ErdError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a ErdError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl Diagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            ErdError::Io(_) => "erd::io",
            ErdError::Schema(_) => "erd::schema",
            ErdError::Graph(_) => "erd::graph",
            ErdError::Layout(_) => "erd::layout",
            ErdError::Export(_) => "erd::export",
            ErdError::UnsupportedFormat { .. } => "erd::unsupported_format",
            ErdError::Config(_) => "erd::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            ErdError::Io(_) => "check that the output directory exists and is writable",
            ErdError::UnsupportedFormat { .. } => {
                "use one of the extensions svg, er, dot, png, jpg or pdf; \
                 dot, png, jpg and pdf need the `graphviz` feature and the `dot` executable"
            }
            ErdError::Export(_) => "raster and PDF output need Graphviz `dot` on PATH",
            ErdError::Config(_) => "see the [layout], [style] and [output] sections of config.toml",
            ErdError::Schema(_) | ErdError::Graph(_) | ErdError::Layout(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use super::*;

    #[test]
    fn test_display_matches_error() {
        let err = ErdError::Graph("graph error".to_string());
        assert_eq!(ErrorAdapter(&err).to_string(), "Graph error: graph error");
    }

    #[test]
    fn test_codes() {
        let cases = [
            (ErdError::Io(io::Error::other("disk")), "erd::io"),
            (ErdError::Layout("x".to_string()), "erd::layout"),
            (ErdError::Config("x".to_string()), "erd::config"),
            (
                ErdError::UnsupportedFormat {
                    path: PathBuf::from("a.bmp"),
                    reason: "unknown".to_string(),
                },
                "erd::unsupported_format",
            ),
        ];

        for (err, expected) in cases {
            let code = ErrorAdapter(&err).code().map(|code| code.to_string());
            assert_eq!(code.as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_help_only_where_actionable() {
        let io = ErdError::Io(io::Error::other("disk"));
        assert!(ErrorAdapter(&io).help().is_some());

        let graph = ErdError::Graph("x".to_string());
        assert!(ErrorAdapter(&graph).help().is_none());
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = ErdError::Config("bad color".to_string());
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();
        assert!(out.contains("erd::config"));
        assert!(out.contains("bad color"));
    }
}
