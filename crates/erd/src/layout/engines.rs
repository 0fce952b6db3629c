//! Row assignment strategies.
//!
//! - [`Basic`] ranks tables by their distance from the root tables.
//! - [`Sugiyama`] runs a layered drawing with crossing reduction and falls
//!   back to [`Basic`] when the algorithm cannot handle the graph.

mod basic;
mod sugiyama;

pub use basic::Engine as Basic;
pub use sugiyama::Engine as Sugiyama;
