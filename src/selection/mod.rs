//! Fuzzy selection for image editing.
//!
//! This module provides the selection pipeline:
//! - **Fuzzy select**: tolerance-based scanline flood fill from a seed pixel
//! - **Outlines**: polygon boundaries of the filled region
//!
//! Both are used for magic-wand style tools and marching ants visualization.

pub mod color;
pub mod fuzzy;
pub mod grid;
pub mod outline;
pub mod range;

pub use color::{color_distance, Color};
pub use fuzzy::{FuzzySelection, FuzzySelector, Step, DEFAULT_TOLERANCE};
pub use grid::{ArrayGrid, ColorGrid, RgbaBuffer};
pub use outline::{encode_outlines, trace_outlines};
pub use range::{Range, RangeSet};
