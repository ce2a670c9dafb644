//! Lattice primitives for boundary extraction.
//!
//! - **Cell**: `(x, y)` point with a packed, reversible identity
//! - **CellSet**: insertion-ordered set with O(1) membership
//! - **Graph**: 8-connected adjacency with boundary tracing

pub mod cell;
pub mod cell_set;
pub mod graph;

pub use cell::{Cell, CellId, Heading};
pub use cell_set::CellSet;
pub use graph::Graph;
