//! 8-connected lattice graph and boundary tracing.
//!
//! Cells are linked to every already-present neighbor in each of the eight
//! headings. A cell missing any neighbor is a boundary cell. Boundaries are
//! traced with a greedy walk that prefers cardinal headings, so concave
//! diagonal corners are not skipped. The walk never backtracks; thin bridges
//! entered from the wrong side can end a boundary early.

use std::collections::HashMap;

use log::{debug, trace};

use super::cell::{Cell, CellId, Heading};
use super::cell_set::CellSet;

/// Neighbor identities indexed by [`Heading::index`], plus a presence mask.
#[derive(Clone, Copy, Debug, Default)]
struct Adjacency {
    neighbors: [CellId; 8],
    present: u8,
}

impl Adjacency {
    #[inline]
    fn link(&mut self, heading: Heading, id: CellId) {
        self.neighbors[heading.index()] = id;
        self.present |= 1 << heading.index();
    }

    #[inline]
    fn get(&self, heading: Heading) -> Option<CellId> {
        if self.present & (1 << heading.index()) != 0 {
            Some(self.neighbors[heading.index()])
        } else {
            None
        }
    }

    #[inline]
    fn count(&self) -> u32 {
        self.present.count_ones()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    adjacency: HashMap<CellId, Adjacency>,
    order: Vec<CellId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `cell`, linking it both ways with every present neighbor.
    /// Re-adding a cell is a no-op.
    pub fn add(&mut self, cell: Cell) {
        if self.contains(&cell) {
            return;
        }

        let mut own = Adjacency::default();
        for heading in Heading::ALL {
            let neighbor = cell.step(heading);
            if let Some(other) = self.adjacency.get_mut(&neighbor.id()) {
                own.link(heading, neighbor.id());
                other.link(heading.opposite(), cell.id());
            }
        }

        self.adjacency.insert(cell.id(), own);
        self.order.push(cell.id());
    }

    #[inline]
    pub fn contains(&self, cell: &Cell) -> bool {
        self.adjacency.contains_key(&cell.id())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cells in construction order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.order.iter().map(|&id| Cell::from_id(id))
    }

    /// Neighbors of `cell` present in the graph, in heading order.
    /// Empty if `cell` is not in the graph.
    pub fn neighbors(&self, cell: &Cell) -> Vec<Cell> {
        let Some(adjacency) = self.adjacency.get(&cell.id()) else {
            return Vec::new();
        };
        Heading::ALL
            .iter()
            .filter_map(|&heading| adjacency.get(heading))
            .map(Cell::from_id)
            .collect()
    }

    pub fn neighbor(&self, cell: &Cell, heading: Heading) -> Option<Cell> {
        self.adjacency
            .get(&cell.id())
            .and_then(|adjacency| adjacency.get(heading))
            .map(Cell::from_id)
    }

    pub fn has_neighbor_in_direction(&self, cell: &Cell, heading: Heading) -> bool {
        self.neighbor(cell, heading).is_some()
    }

    /// True when `cell` lacks a neighbor in at least one heading.
    /// Cells outside the graph are not boundary cells.
    pub fn cell_is_boundary(&self, cell: &Cell) -> bool {
        self.adjacency
            .get(&cell.id())
            .is_some_and(|adjacency| adjacency.count() < 8)
    }

    /// The boundary cell with the smallest x; ties go to the earliest added.
    pub fn find_outer_boundary_point(&self) -> Option<Cell> {
        let mut best: Option<Cell> = None;
        for cell in self.cells() {
            if !self.cell_is_boundary(&cell) {
                continue;
            }
            match best {
                Some(current) if cell.x() >= current.x() => {}
                _ => best = Some(cell),
            }
        }
        best
    }

    /// Greedy boundary walk starting at `start`.
    ///
    /// From each cell the first heading in [`Heading::ALL`] order that leads
    /// to an unvisited boundary cell is taken. The walk stops when no such
    /// heading exists.
    pub fn follow_boundary(&self, start: Cell) -> CellSet {
        let mut boundary = CellSet::new();
        boundary.add(start);

        let mut current = start;
        while let Some(next) = self.next_boundary_cell(&current, &boundary) {
            boundary.add(next);
            current = next;
        }

        trace!(
            "boundary from ({}, {}) has {} cells",
            start.x(),
            start.y(),
            boundary.len()
        );
        boundary
    }

    fn next_boundary_cell(&self, current: &Cell, visited: &CellSet) -> Option<Cell> {
        Heading::ALL
            .iter()
            .filter_map(|&heading| self.neighbor(current, heading))
            .find(|neighbor| self.cell_is_boundary(neighbor) && !visited.contains(neighbor))
    }

    /// Trace a boundary not covered by `others`, or `None` when every
    /// boundary cell is already accounted for.
    ///
    /// The walk starts from the *last* uncovered boundary cell in
    /// construction order.
    pub fn find_boundary_excluding(&self, others: &[CellSet]) -> Option<CellSet> {
        let mut unused = None;
        for cell in self.cells() {
            if !self.cell_is_boundary(&cell) {
                continue;
            }
            if !others.iter().any(|boundary| boundary.contains(&cell)) {
                unused = Some(cell);
            }
        }

        unused.map(|start| self.follow_boundary(start))
    }

    /// Every boundary of the graph: the outer one first, then holes and
    /// disjoint pieces in discovery order. Empty for an empty graph.
    pub fn all_boundaries(&self) -> Vec<CellSet> {
        let Some(outer) = self.find_outer_boundary_point() else {
            return Vec::new();
        };

        let mut boundaries = vec![self.follow_boundary(outer)];
        while let Some(next) = self.find_boundary_excluding(&boundaries) {
            boundaries.push(next);
        }

        debug!(
            "traced {} boundaries over {} cells",
            boundaries.len(),
            self.len()
        );
        boundaries
    }
}

impl Extend<Cell> for Graph {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.add(cell);
        }
    }
}

impl FromIterator<Cell> for Graph {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}
