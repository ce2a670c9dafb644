//! Polygon outlines of a fuzzy selection.
//!
//! The top and bottom cell of every filled span are linked into an
//! 8-connected lattice graph, whose boundaries are then traced. The first
//! outline is the outer one; the rest are holes or disjoint pieces.

use log::debug;

use super::range::RangeSet;
use crate::lattice::{CellSet, Graph};

/// Trace every outline of `ranges`.
///
/// With `prune` set, points lying on straight runs are dropped from each
/// outline, leaving only its corners.
pub fn trace_outlines(ranges: &RangeSet, prune: bool) -> Vec<CellSet> {
    let graph: Graph = ranges.boundaries().iter().collect();
    let outlines = graph.all_boundaries();

    debug!(
        "traced {} outlines from {} spans (prune: {})",
        outlines.len(),
        ranges.span_count(),
        prune
    );

    if prune {
        outlines
            .iter()
            .map(CellSet::prune_by_collinearity)
            .collect()
    } else {
        outlines
    }
}

/// Flatten outlines for transfer across language bindings.
///
/// # Returns
/// Flat array: [num_outlines, len1, x1, y1, x2, y2, ..., len2, ...]
pub fn encode_outlines(outlines: &[CellSet]) -> Vec<f32> {
    let points: usize = outlines.iter().map(CellSet::len).sum();
    let mut result = Vec::with_capacity(1 + outlines.len() + points * 2);
    result.push(outlines.len() as f32);

    for outline in outlines {
        result.push(outline.len() as f32);
        for cell in outline {
            result.push(cell.x() as f32);
            result.push(cell.y() as f32);
        }
    }

    result
}

/// Outlines as lists of `(x, y)` points.
pub fn outline_points(outlines: &[CellSet]) -> Vec<Vec<(i32, i32)>> {
    outlines
        .iter()
        .map(|outline| outline.iter().map(|cell| (cell.x(), cell.y())).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Cell;
    use crate::selection::range::Range;
    use crate::selection::{FuzzySelector, RgbaBuffer};

    #[test]
    fn test_empty_selection() {
        let outlines = trace_outlines(&RangeSet::new(), true);
        assert!(outlines.is_empty());
        assert_eq!(encode_outlines(&outlines), vec![0.0]);
    }

    #[test]
    fn test_two_row_strip() {
        let ranges: RangeSet = (0..4).map(|x| (x, Range::new(0, 1))).collect();
        let outlines = trace_outlines(&ranges, false);

        assert_eq!(outlines.len(), 1);
        assert_eq!(
            outline_points(&outlines)[0],
            vec![(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1), (3, 1), (3, 0)]
        );
    }

    #[test]
    fn test_tall_spans_split_into_edges() {
        // Only span ends are kept, so top and bottom edges are not linked.
        let ranges: RangeSet = (0..4).map(|x| (x, Range::new(0, 2))).collect();
        let outlines = trace_outlines(&ranges, false);

        assert_eq!(outlines.len(), 2);
        assert!(outlines[0].iter().all(|cell| cell.y() == 0));
        assert!(outlines[1].iter().all(|cell| cell.y() == 2));
    }

    #[test]
    fn test_pruning_only_removes_points() {
        let ranges: RangeSet = [
            (0, Range::new(1, 2)),
            (1, Range::new(0, 1)),
            (2, Range::new(0, 1)),
            (3, Range::new(0, 1)),
            (4, Range::new(1, 2)),
        ]
        .into_iter()
        .collect();

        let full = trace_outlines(&ranges, false);
        let pruned = trace_outlines(&ranges, true);
        assert_eq!(full.len(), pruned.len());
        for (f, p) in full.iter().zip(&pruned) {
            assert!(p.len() <= f.len());
            assert!(p.iter().all(|cell| f.contains(&cell)));
        }
    }

    #[test]
    fn test_disjoint_selections() {
        let ranges: RangeSet = [(0, Range::new(0, 1)), (5, Range::new(0, 1))]
            .into_iter()
            .collect();
        assert_eq!(trace_outlines(&ranges, false).len(), 2);
    }

    #[test]
    fn test_encode_layout() {
        let outline: CellSet = [Cell::new(1, 2), Cell::new(3, 4)].into_iter().collect();
        let single: CellSet = [Cell::new(7, 8)].into_iter().collect();

        assert_eq!(
            encode_outlines(&[outline, single]),
            vec![2.0, 2.0, 1.0, 2.0, 3.0, 4.0, 1.0, 7.0, 8.0]
        );
    }

    #[test]
    fn test_selection_to_outline() {
        let data = vec![0u8; 6 * 4 * 4];
        let grid = RgbaBuffer::new(&data, 6, 4).unwrap();
        let ranges = FuzzySelector::new(grid).select(2, 2, 1.0).unwrap();

        let outlines = trace_outlines(&ranges, false);
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].len(), 6);
        assert_eq!(outlines[1].len(), 6);

        // Straight edges collapse entirely once collinear points are pruned.
        assert!(trace_outlines(&ranges, true).iter().all(CellSet::is_empty));
    }
}
