//! Erd Core Types and Definitions
//!
//! This crate provides the foundational types shared by the schema
//! declarations and the diagram renderer:
//!
//! - **Schema**: the registry of entities, fields, constraints and
//!   relationships ([`schema`] module)
//! - **Records**: flat serialization of entity rows ([`record`] module)
//! - **Geometry**: points, sizes and bounds used by layout ([`geometry`] module)
//! - **Colors**: CSS color handling for styling ([`color::Color`])

pub mod color;
pub mod geometry;
pub mod record;
pub mod schema;
