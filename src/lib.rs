//! FuzzySelect Rust Extensions
//!
//! Magic-wand style region selection implemented in Rust
//! with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Pipeline
//! 1. **Fuzzy select**: a seed pixel and a color tolerance produce a set of
//!    filled vertical spans ([`selection::RangeSet`]).
//! 2. **Outlines**: span end points are linked into an 8-connected lattice
//!    graph ([`lattice::Graph`]) whose boundaries are traced into ordered
//!    polygons, the first one outermost.
//!
//! ## Image Format
//! Pixels are read through the [`selection::ColorGrid`] trait. Provided
//! sources:
//! - **Flat RGBA bytes**: 4 bytes per pixel, row-major (canvas `ImageData`)
//! - **ndarray**: (height, width, channels) with 1, 3, or 4 `u8` channels
//!
//! ## Color Distance
//! Alpha whitens a color toward a white background before comparison, so
//! transparent pixels match white ones. See [`selection::color_distance`].

pub mod error;
pub mod lattice;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, SelectError};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::ArrayView3;
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray3};
    use pyo3::prelude::*;

    use crate::selection::{
        color_distance as color_distance_impl, outline, trace_outlines, ArrayGrid, Color,
        FuzzySelector, RangeSet,
    };

    fn select_ranges(
        image: &ArrayView3<u8>,
        x: i32,
        y: i32,
        tolerance: f64,
    ) -> crate::Result<RangeSet> {
        let grid = ArrayGrid::new(image)?;
        FuzzySelector::new(grid).select(x, y, tolerance)
    }

    // ========================================================================
    // Fuzzy Selection
    // ========================================================================

    /// Select the region around (x, y) whose colors are within tolerance.
    ///
    /// # Arguments
    /// * `image` - Input image (height, width, channels) with 1, 3, or 4 channels
    /// * `x`, `y` - Seed pixel
    /// * `tolerance` - Exclusive color distance limit (default 0: selects nothing)
    ///
    /// # Returns
    /// Selection mask (height, width): 255 = selected, 0 = not selected
    #[pyfunction]
    #[pyo3(signature = (image, x, y, tolerance=0.0))]
    pub fn fuzzy_select<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        x: i32,
        y: i32,
        tolerance: f64,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let input = image.as_array();
        let (height, width, _) = input.dim();
        let ranges = select_ranges(&input, x, y, tolerance)?;
        Ok(ranges.to_mask(width, height)?.into_pyarray(py))
    }

    /// Select a region and return its scanlines as SVG path data.
    #[pyfunction]
    #[pyo3(signature = (image, x, y, tolerance=0.0))]
    pub fn fuzzy_select_path(
        image: PyReadonlyArray3<'_, u8>,
        x: i32,
        y: i32,
        tolerance: f64,
    ) -> PyResult<String> {
        let ranges = select_ranges(&image.as_array(), x, y, tolerance)?;
        Ok(ranges.to_path_string())
    }

    /// Select a region and trace its outlines.
    ///
    /// # Returns
    /// List of outlines, each a list of (x, y) points. The first outline is
    /// the outer one.
    #[pyfunction]
    #[pyo3(signature = (image, x, y, tolerance=0.0, prune=true))]
    pub fn fuzzy_select_outlines(
        image: PyReadonlyArray3<'_, u8>,
        x: i32,
        y: i32,
        tolerance: f64,
        prune: bool,
    ) -> PyResult<Vec<Vec<(i32, i32)>>> {
        let ranges = select_ranges(&image.as_array(), x, y, tolerance)?;
        let outlines = trace_outlines(&ranges, prune);
        Ok(outline::outline_points(&outlines))
    }

    /// Distance between two RGBA colors after whitening by alpha.
    #[pyfunction]
    pub fn color_distance(c1: (u8, u8, u8, u8), c2: (u8, u8, u8, u8)) -> f64 {
        color_distance_impl(&Color::from(c1), &Color::from(c2))
    }

    /// Python module definition
    #[pymodule]
    pub fn fuzzyselect(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(fuzzy_select, m)?)?;
        m.add_function(wrap_pyfunction!(fuzzy_select_path, m)?)?;
        m.add_function(wrap_pyfunction!(fuzzy_select_outlines, m)?)?;
        m.add_function(wrap_pyfunction!(color_distance, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::fuzzyselect;
