//! Vertical spans grouped by column.
//!
//! A [`RangeSet`] is the output of a fuzzy selection: for each x it holds the
//! inclusive y-intervals that were filled, in the order they were found.
//! Columns enumerate in ascending x so path output is deterministic.

use std::collections::BTreeMap;

use ndarray::Array2;
use rayon::prelude::*;

use crate::error::{Result, SelectError};
use crate::lattice::{Cell, CellSet};

/// Closed integer interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub min: i32,
    pub max: i32,
}

impl Range {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Number of integers covered; zero when `min > max`.
    #[inline]
    pub fn len(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min) as usize + 1
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: BTreeMap<i32, Vec<Range>>,
    last: Option<(i32, Range)>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `range` to column `x`.
    pub fn add(&mut self, range: Range, x: i32) {
        self.ranges.entry(x).or_default().push(range);
        self.last = Some((x, range));
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.ranges
            .get(&x)
            .is_some_and(|column| column.iter().any(|range| range.contains(y)))
    }

    /// Ranges recorded for column `x`, in insertion order.
    pub fn column(&self, x: i32) -> &[Range] {
        self.ranges.get(&x).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The most recently added `(x, range)` pair.
    pub fn last(&self) -> Option<(i32, Range)> {
        self.last
    }

    /// Every `(x, range)` pair, columns ascending.
    pub fn iter(&self) -> impl Iterator<Item = (i32, Range)> + '_ {
        self.ranges
            .iter()
            .flat_map(|(&x, column)| column.iter().map(move |&range| (x, range)))
    }

    pub fn for_each_range<F: FnMut(i32, &Range)>(&self, mut visit: F) {
        for (&x, column) in &self.ranges {
            for range in column {
                visit(x, range);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn span_count(&self) -> usize {
        self.ranges.values().map(Vec::len).sum()
    }

    /// Distinct covered pixels. Repeated or overlapping spans count once.
    pub fn pixel_count(&self) -> usize {
        self.ranges.values().map(|column| covered_rows(column)).sum()
    }

    /// Selected area as `(x, y, width, height)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(i32, i32, usize, usize)> {
        let min_x = *self.ranges.keys().next()?;
        let max_x = *self.ranges.keys().next_back()?;
        let (min_y, max_y) = self
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), (_, range)| {
                (lo.min(range.min), hi.max(range.max))
            });

        Some((
            min_x,
            min_y,
            (max_x - min_x) as usize + 1,
            (max_y - min_y) as usize + 1,
        ))
    }

    /// Top and bottom cell of every span, in enumeration order.
    pub fn boundaries(&self) -> CellSet {
        let mut cells = CellSet::new();
        for (x, range) in self.iter() {
            cells.add(Cell::new(x, range.min));
            cells.add(Cell::new(x, range.max));
        }
        cells
    }

    /// SVG path data: a leading `M0,0`, then `M{x},{min} L{x},{max}` per span.
    pub fn to_path_string(&self) -> String {
        let mut path = String::from("M0,0");
        for (x, range) in self.iter() {
            path.push_str(&format!(" M{},{} L{},{}", x, range.min, x, range.max));
        }
        path
    }

    /// Rasterize into a `(height, width)` mask, 255 for selected pixels.
    ///
    /// Spans reaching outside the mask are clipped. Rows are filled in
    /// parallel. Fails when `width * height` does not fit in memory indices.
    pub fn to_mask(&self, width: usize, height: usize) -> Result<Array2<u8>> {
        let len = width
            .checked_mul(height)
            .ok_or(SelectError::ImageTooLarge { width, height })?;
        let mut mask = vec![0u8; len];
        if width > 0 {
            mask.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    let y = y as i32;
                    for (x, column) in self.ranges.range(0..width as i32) {
                        if column.iter().any(|range| range.contains(y)) {
                            row[*x as usize] = 255;
                        }
                    }
                });
        }

        Ok(Array2::from_shape_vec((height, width), mask)
            .expect("mask length matches its shape"))
    }
}

/// Rows covered by the union of `column`'s spans.
fn covered_rows(column: &[Range]) -> usize {
    let mut spans: Vec<Range> = column.iter().copied().filter(|r| !r.is_empty()).collect();
    spans.sort_unstable_by_key(|r| r.min);

    let mut count = 0;
    let mut merged: Option<Range> = None;
    for span in spans {
        merged = match merged {
            Some(run) if span.min <= run.max.saturating_add(1) => {
                Some(Range::new(run.min, run.max.max(span.max)))
            }
            run => {
                count += run.map_or(0, |r| r.len());
                Some(span)
            }
        };
    }
    count + merged.map_or(0, |r| r.len())
}

impl FromIterator<(i32, Range)> for RangeSet {
    fn from_iter<I: IntoIterator<Item = (i32, Range)>>(iter: I) -> Self {
        let mut set = RangeSet::new();
        for (x, range) in iter {
            set.add(range, x);
        }
        set
    }
}
