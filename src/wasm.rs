//! WebAssembly exports for fuzzy selection.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Pixel Data
//!
//! All entry points take the flat RGBA bytes of a canvas `ImageData`
//! (length = width * height * 4). Invalid sizes and seeds outside the
//! image are reported as thrown errors.

use wasm_bindgen::prelude::*;

use crate::selection::{
    color_distance, encode_outlines, trace_outlines, Color, FuzzySelection, FuzzySelector,
    RangeSet, RgbaBuffer,
};

fn select_ranges(
    data: &[u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    tolerance: f64,
) -> crate::Result<RangeSet> {
    let grid = RgbaBuffer::new(data, width, height)?;
    FuzzySelector::new(grid).select(x, y, tolerance)
}

// ============================================================================
// One-shot Selection
// ============================================================================

/// Select the region around (x, y) and return its scanlines as SVG path data.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `x`, `y` - Seed pixel
/// * `tolerance` - Exclusive color distance limit
#[wasm_bindgen]
pub fn fuzzy_select_path_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    tolerance: f64,
) -> Result<String, JsError> {
    let ranges = select_ranges(data, width, height, x, y, tolerance)?;
    Ok(ranges.to_path_string())
}

/// Select a region and return a mask (255 = selected), one byte per pixel.
#[wasm_bindgen]
pub fn fuzzy_select_mask_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    tolerance: f64,
) -> Result<Vec<u8>, JsError> {
    let ranges = select_ranges(data, width, height, x, y, tolerance)?;
    Ok(ranges.to_mask(width, height)?.into_raw_vec_and_offset().0)
}

/// Select a region and trace its outlines.
///
/// # Returns
/// Flat array: [num_outlines, len1, x1, y1, x2, y2, ..., len2, ...]
#[wasm_bindgen]
pub fn fuzzy_select_outlines_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    tolerance: f64,
    prune: bool,
) -> Result<Vec<f32>, JsError> {
    let ranges = select_ranges(data, width, height, x, y, tolerance)?;
    Ok(encode_outlines(&trace_outlines(&ranges, prune)))
}

/// Distance between two RGBA colors after whitening by alpha.
#[wasm_bindgen]
pub fn color_distance_wasm(c1: &[u8], c2: &[u8]) -> Result<f64, JsError> {
    let (Ok(c1), Ok(c2)) = (<[u8; 4]>::try_from(c1), <[u8; 4]>::try_from(c2)) else {
        return Err(JsError::new("colors must have exactly 4 channels"));
    };
    Ok(color_distance(&Color::from(c1), &Color::from(c2)))
}

// ============================================================================
// Incremental Selection
// ============================================================================

/// A selection driven a few seeds at a time, e.g. once per animation frame.
#[wasm_bindgen]
pub struct WasmSelection {
    inner: FuzzySelection<RgbaBuffer<Vec<u8>>>,
}

#[wasm_bindgen]
impl WasmSelection {
    #[wasm_bindgen(constructor)]
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        x: i32,
        y: i32,
        tolerance: f64,
    ) -> Result<WasmSelection, JsError> {
        let grid = RgbaBuffer::new(data, width, height)?;
        let inner = FuzzySelection::new(grid, x, y, tolerance)?;
        Ok(WasmSelection { inner })
    }

    /// Process up to `steps` seeds. Returns true once the selection is complete.
    pub fn step_many(&mut self, steps: usize) -> bool {
        self.inner.advance(steps).is_done()
    }

    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    /// Spans filled so far as SVG path data.
    pub fn path(&self) -> String {
        self.inner.ranges().to_path_string()
    }

    /// Most recent span as [x, min_y, max_y], if any.
    pub fn last_span(&self) -> Option<Vec<i32>> {
        self.inner
            .last_span()
            .map(|(x, range)| vec![x, range.min, range.max])
    }
}
