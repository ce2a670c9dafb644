//! Tolerance-based flood fill.
//!
//! Selects the region around a seed whose colors lie strictly within a
//! tolerance of the seed color (see [`color_distance`]). The fill is a
//! seed-stack scanline fill over columns:
//!
//! 1. Pop a seed and march up the column to the first in-tolerance row.
//! 2. Scan down the column. Along the way, push one seed per contiguous
//!    in-tolerance run found in each neighboring column, skipping rows that
//!    are already filled.
//! 3. Record the scanned span and repeat until no seeds remain. Two columns
//!    can seed the same run before either is processed; each of those seeds
//!    records its own span, so a [`RangeSet`] may hold repeated spans.
//!
//! The fill can run eagerly ([`FuzzySelector::select`]) or one seed at a
//! time through [`FuzzySelection`], which suspends only between seeds.

use log::{debug, trace};

use super::color::{color_distance, Color};
use super::grid::ColorGrid;
use super::range::{Range, RangeSet};
use crate::error::{Result, SelectError};

/// Tolerance used when the caller has no preference.
///
/// Comparisons are strict, so at zero not even the seed color qualifies and
/// the selection comes back empty.
pub const DEFAULT_TOLERANCE: f64 = 0.0;

/// Flood-fill selector over a pixel grid.
pub struct FuzzySelector<G: ColorGrid> {
    grid: G,
}

impl<G: ColorGrid> FuzzySelector<G> {
    pub fn new(grid: G) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Run the fill from `(x, y)` to completion.
    pub fn select(&self, x: i32, y: i32, tolerance: f64) -> Result<RangeSet> {
        Ok(self.select_iteratively(x, y, tolerance)?.finish())
    }

    /// Prepare a fill from `(x, y)` that is driven with
    /// [`FuzzySelection::step`].
    pub fn select_iteratively(&self, x: i32, y: i32, tolerance: f64) -> Result<FuzzySelection<&G>> {
        FuzzySelection::new(&self.grid, x, y, tolerance)
    }
}

/// Outcome of one fill step.
#[derive(Clone, Copy, Debug)]
pub enum Step<'a> {
    /// Seeds remain; the spans filled so far.
    Pending(&'a RangeSet),
    /// The fill is complete.
    Done(&'a RangeSet),
}

impl<'a> Step<'a> {
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    pub fn ranges(&self) -> &'a RangeSet {
        match *self {
            Step::Pending(ranges) | Step::Done(ranges) => ranges,
        }
    }
}

/// A fill in progress.
///
/// Holds the pending-seed stack, the spans filled so far, the reference
/// color, and the tolerance. Dropping it early leaves a valid partial
/// selection behind in [`FuzzySelection::ranges`].
pub struct FuzzySelection<G: ColorGrid> {
    grid: G,
    reference: Color,
    tolerance: f64,
    pending: Vec<(i32, i32)>,
    filled: RangeSet,
    steps: usize,
}

impl<G: ColorGrid> FuzzySelection<G> {
    pub fn new(grid: G, x: i32, y: i32, tolerance: f64) -> Result<Self> {
        if !grid.in_bounds(x as i64, y as i64) {
            return Err(SelectError::SeedOutOfBounds {
                x: x as i64,
                y: y as i64,
                width: grid.width(),
                height: grid.height(),
            });
        }

        let reference = grid.color_at(x as usize, y as usize);
        debug!(
            "fuzzy select from ({}, {}) in {}x{}, tolerance {}, reference {:?}",
            x,
            y,
            grid.width(),
            grid.height(),
            tolerance,
            reference
        );

        Ok(Self {
            grid,
            reference,
            tolerance,
            pending: vec![(x, y)],
            filled: RangeSet::new(),
            steps: 0,
        })
    }

    pub fn reference(&self) -> Color {
        self.reference
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn ranges(&self) -> &RangeSet {
        &self.filled
    }

    /// The span recorded by the most recent step that filled anything.
    pub fn last_span(&self) -> Option<(i32, Range)> {
        self.filled.last()
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Seeds waiting to be processed.
    pub fn pending_seeds(&self) -> usize {
        self.pending.len()
    }

    /// Seeds processed so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Process one seed.
    pub fn step(&mut self) -> Step<'_> {
        if let Some((x, y)) = self.pending.pop() {
            self.fill_column(x, y);
            self.steps += 1;
            if self.pending.is_empty() {
                debug!(
                    "fuzzy select done after {} steps, {} spans",
                    self.steps,
                    self.filled.span_count()
                );
            }
        }

        if self.pending.is_empty() {
            Step::Done(&self.filled)
        } else {
            Step::Pending(&self.filled)
        }
    }

    /// Process up to `max_steps` seeds.
    pub fn advance(&mut self, max_steps: usize) -> Step<'_> {
        for _ in 0..max_steps {
            if self.pending.is_empty() {
                break;
            }
            self.step();
        }

        if self.pending.is_empty() {
            Step::Done(&self.filled)
        } else {
            Step::Pending(&self.filled)
        }
    }

    /// Run the remaining seeds and return the finished selection.
    pub fn finish(mut self) -> RangeSet {
        while !self.pending.is_empty() {
            self.step();
        }
        self.filled
    }

    /// Stop here and keep whatever has been filled.
    pub fn into_ranges(self) -> RangeSet {
        self.filled
    }

    /// Caller guarantees `(x, y)` is inside the grid.
    #[inline]
    fn within_tolerance(&self, x: i32, y: i32) -> bool {
        let color = self.grid.color_at(x as usize, y as usize);
        color_distance(&self.reference, &color) < self.tolerance
    }

    fn fill_column(&mut self, x: i32, seed_y: i32) {
        let width = self.grid.width() as i64;
        let height = self.grid.height() as i32;

        let mut y = seed_y;
        while y >= 0 && self.within_tolerance(x, y) {
            y -= 1;
        }
        y += 1;
        let top = y;

        let left = x - 1;
        let right = x + 1;
        let left_in_bounds = left >= 0;
        let right_in_bounds = (right as i64) < width;
        let mut reach_left = true;
        let mut reach_right = true;

        while y < height && self.within_tolerance(x, y) {
            if left_in_bounds {
                self.seed_neighbor(left, y, &mut reach_left);
            }
            if right_in_bounds {
                self.seed_neighbor(right, y, &mut reach_right);
            }
            y += 1;
        }
        let bottom = y - 1;

        // Only the initial seed can fail its own tolerance test.
        if top <= bottom {
            trace!("fill x={} y={}..={}", x, top, bottom);
            self.filled.add(Range::new(top, bottom), x);
        }
    }

    /// Push at most one seed per contiguous in-tolerance run of a neighbor
    /// column. `reach` re-arms once the run ends.
    #[inline]
    fn seed_neighbor(&mut self, nx: i32, y: i32, reach: &mut bool) {
        let in_tolerance = self.within_tolerance(nx, y);
        if *reach && in_tolerance && !self.filled.contains(nx, y) {
            self.pending.push((nx, y));
            *reach = false;
        } else if !*reach && !in_tolerance {
            *reach = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::grid::{ArrayGrid, RgbaBuffer};
    use ndarray::Array3;

    /// Expand one gray level per pixel into RGBA bytes with equal alpha.
    fn rgba(levels: &[u8]) -> Vec<u8> {
        levels.iter().flat_map(|&v| [v, v, v, v]).collect()
    }

    #[test]
    fn test_excludes_differing_pixel() {
        let data = rgba(&[0, 0, 0, 1]);
        let grid = RgbaBuffer::new(&data, 2, 2).unwrap();
        let set = FuzzySelector::new(grid).select(0, 0, 1.0).unwrap();

        assert_eq!(set.boundaries().len(), 3);
        assert!(!set.contains(1, 1));
        assert!(set.contains(1, 0));
        assert!(set.contains(0, 1));
    }

    #[test]
    fn test_does_not_leak_through_corners() {
        let data = rgba(&[0, 1, 1, 0]);
        let grid = RgbaBuffer::new(&data, 2, 2).unwrap();
        let set = FuzzySelector::new(grid).select(0, 0, 1.0).unwrap();

        assert!(set.contains(0, 0));
        assert!(!set.contains(1, 1));
        assert_eq!(set.pixel_count(), 1);
    }

    #[test]
    fn test_fills_uniform_image() {
        let data = rgba(&[0; 25]);
        let grid = RgbaBuffer::new(&data, 5, 5).unwrap();
        let set = FuzzySelector::new(grid).select(1, 1, 20.0).unwrap();

        assert_eq!(set.boundaries().len(), 10);
        assert_eq!(set.pixel_count(), 25);
        assert_eq!(set.span_count(), 5);
    }

    #[test]
    fn test_diagonals() {
        #[rustfmt::skip]
        let data = rgba(&[
            0, 0, 1, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
            0, 1, 1, 0,
            0, 0, 1, 0,
        ]);
        let grid = RgbaBuffer::new(&data, 4, 5).unwrap();
        let set = FuzzySelector::new(grid).select(3, 3, 1.0).unwrap();

        assert_eq!(set.boundaries().len(), 8);
        assert!(set.contains(1, 0));
        assert!(set.contains(1, 4));
        assert!(!set.contains(1, 1));
    }

    #[test]
    fn test_zero_tolerance_is_empty() {
        let data = rgba(&[7; 9]);
        let grid = RgbaBuffer::new(&data, 3, 3).unwrap();
        let selector = FuzzySelector::new(grid);

        let set = selector.select(1, 1, DEFAULT_TOLERANCE).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.to_path_string(), "M0,0");
    }

    #[test]
    fn test_seed_out_of_bounds() {
        let data = rgba(&[0; 4]);
        let grid = RgbaBuffer::new(&data, 2, 2).unwrap();
        let selector = FuzzySelector::new(grid);

        assert_eq!(
            selector.select(2, 0, 1.0).unwrap_err(),
            SelectError::SeedOutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            }
        );
        assert!(selector.select(0, -1, 1.0).is_err());
    }

    #[test]
    fn test_steps_match_eager_select() {
        #[rustfmt::skip]
        let data = rgba(&[
            0, 0, 0, 0, 0,
            0, 9, 9, 9, 0,
            0, 9, 0, 9, 0,
            0, 9, 9, 9, 0,
            0, 0, 0, 0, 0,
        ]);
        let grid = RgbaBuffer::new(&data, 5, 5).unwrap();
        let selector = FuzzySelector::new(grid);
        let eager = selector.select(0, 0, 1.0).unwrap();

        let mut selection = selector.select_iteratively(0, 0, 1.0).unwrap();
        let mut steps = 0;
        loop {
            let step = selection.step();
            steps += 1;
            if step.is_done() {
                break;
            }
            assert!(step.ranges().span_count() <= eager.span_count());
        }

        assert_eq!(steps, selection.steps_taken());
        assert_eq!(selection.ranges(), &eager);
        assert_eq!(eager.pixel_count(), 16);
        assert_eq!(eager.span_count(), 9);
        assert!(!eager.contains(2, 2));
    }

    #[test]
    fn test_run_seeded_twice_records_both_spans() {
        #[rustfmt::skip]
        let data = rgba(&[
            0, 0, 0,
            0, 9, 0,
            0, 0, 0,
        ]);
        let grid = RgbaBuffer::new(&data, 3, 3).unwrap();
        let selector = FuzzySelector::new(grid);
        let set = selector.select(0, 0, 1.0).unwrap();

        assert_eq!(
            set.to_path_string(),
            "M0,0 M0,0 L0,2 M1,2 L1,2 M1,0 L1,0 M1,0 L1,0 M2,0 L2,2"
        );
        assert_eq!(set.column(1), &[Range::new(2, 2), Range::new(0, 0), Range::new(0, 0)]);
        assert_eq!(set.last(), Some((1, Range::new(0, 0))));
        assert_eq!(set.span_count(), 5);
        assert_eq!(set.pixel_count(), 8);

        // The repeated seed is still one step and reports its span.
        let mut selection = selector.select_iteratively(0, 0, 1.0).unwrap();
        assert!(!selection.advance(4).is_done());
        assert_eq!(selection.ranges().span_count(), 4);
        assert!(selection.step().is_done());
        assert_eq!(selection.last_span(), Some((1, Range::new(0, 0))));
        assert_eq!(selection.steps_taken(), 5);
    }

    #[test]
    fn test_step_exposes_partial_result() {
        let data = rgba(&[0; 9]);
        let grid = RgbaBuffer::new(&data, 3, 3).unwrap();
        let selector = FuzzySelector::new(grid);
        let mut selection = selector.select_iteratively(1, 1, 1.0).unwrap();

        match selection.step() {
            Step::Pending(ranges) => {
                assert_eq!(ranges.span_count(), 1);
                assert!(ranges.contains(1, 0));
                assert!(ranges.contains(1, 2));
            }
            Step::Done(_) => panic!("neighbor columns should still be pending"),
        }
        assert_eq!(selection.last_span(), Some((1, Range::new(0, 2))));
        assert_eq!(selection.pending_seeds(), 2);

        let partial = selection.into_ranges();
        assert_eq!(partial.pixel_count(), 3);
    }

    #[test]
    fn test_advance_in_batches() {
        let data = rgba(&[0; 36]);
        let grid = RgbaBuffer::new(&data, 6, 6).unwrap();
        let selector = FuzzySelector::new(grid);
        let mut selection = selector.select_iteratively(0, 0, 1.0).unwrap();

        assert!(!selection.advance(2).is_done());
        assert_eq!(selection.steps_taken(), 2);
        assert!(selection.advance(100).is_done());
        assert!(selection.is_done());
        assert_eq!(selection.ranges().pixel_count(), 36);
        assert!(selection.advance(1).is_done());
        assert_eq!(selection.steps_taken(), 6);
    }

    #[test]
    fn test_alpha_whitening_joins_transparent_and_white() {
        let mut image = Array3::<u8>::zeros((1, 3, 4));
        for x in 0..2 {
            for c in 0..4 {
                image[[0, x, c]] = 255;
            }
        }
        // (2, 0) stays transparent black.
        let grid = ArrayGrid::new(&image).unwrap();
        let set = FuzzySelector::new(grid).select(0, 0, 0.5).unwrap();

        assert_eq!(set.pixel_count(), 3);
        assert_eq!(set.bounds(), Some((0, 0, 3, 1)));
    }
}
