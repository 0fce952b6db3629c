//! ER markup export.
//!
//! The markup lists every entity as a `[name]` block with one column per
//! line, followed by one line per relationship:
//!
//! ```text
//! [post]
//!     *id {label: "INTEGER"}
//!     +user_id {label: "INTEGER"}
//!
//! user 1--* post {label: "user_id"}
//! ```
//!
//! `*` marks primary key columns and `+` foreign key columns. A relationship
//! whose join column carries no foreign key is labelled `no constraint`.

use std::fmt::Write as _;

use erd_core::schema::{Join, Relationship};

use super::{Error, Exporter};
use crate::structure::EntityGraph;

/// Writes ER markup.
#[derive(Debug, Default)]
pub struct Er;

impl Er {
    pub fn new() -> Self {
        Self
    }

    fn relationship_label(relationship: &Relationship) -> String {
        let column = match relationship.join() {
            Join::Column(column) => column.as_str(),
            Join::Through { entity, .. } => entity.as_str(),
        };
        if relationship.is_enforced() {
            column.to_string()
        } else {
            format!("{column}, no constraint")
        }
    }

    /// Renders `graph` as markup text.
    pub fn render(&self, graph: &EntityGraph<'_>) -> Result<String, Error> {
        let mut out = String::new();
        let fmt_err = |err: std::fmt::Error| Error::Render(err.to_string());

        for (_, entity) in graph.nodes_with_indices() {
            writeln!(out, "[{}]", entity.name()).map_err(fmt_err)?;
            for field in entity.fields() {
                let mut marker = String::new();
                if field.is_primary_key() {
                    marker.push('*');
                }
                if field.foreign_key().is_some() {
                    marker.push('+');
                }
                writeln!(
                    out,
                    "    {marker}{} {{label: \"{}\"}}",
                    field.name(),
                    field.field_type()
                )
                .map_err(fmt_err)?;
            }
            out.push('\n');
        }

        for (_, _, relationship) in graph.relations() {
            writeln!(
                out,
                "{} 1--* {} {{label: \"{}\"}}",
                relationship.parent(),
                relationship.child(),
                Self::relationship_label(relationship)
            )
            .map_err(fmt_err)?;
        }

        Ok(out)
    }
}

impl Exporter for Er {
    fn export(&self, graph: &EntityGraph<'_>) -> Result<Vec<u8>, Error> {
        self.render(graph).map(String::into_bytes)
    }
}
