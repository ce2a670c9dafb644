//! Insertion-ordered cell set.
//!
//! Order is kept as a singly linked list threaded through the lookup map:
//! each identity maps to the identity added after it, `None` marks the tail.
//! Membership and append are O(1) and no separate ordering array is needed.

use std::collections::HashMap;

use super::cell::{Cell, CellId};

#[derive(Clone, Debug, Default)]
pub struct CellSet {
    head: Option<CellId>,
    tail: Option<CellId>,
    links: HashMap<CellId, Option<CellId>>,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `cell` unless it is already present.
    pub fn add(&mut self, cell: Cell) {
        let id = cell.id();
        if self.links.contains_key(&id) {
            return;
        }

        match self.tail {
            Some(tail) => {
                self.links.insert(tail, Some(id));
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.links.insert(id, None);
    }

    #[inline]
    pub fn contains(&self, cell: &Cell) -> bool {
        self.links.contains_key(&cell.id())
    }

    #[inline]
    pub fn contains_xy(&self, x: i32, y: i32) -> bool {
        self.links.contains_key(&Cell::hash(x, y))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Walk the chain from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            links: &self.links,
            current: self.head,
        }
    }

    /// Materialize the ordered cells. O(N) on every call.
    pub fn cells(&self) -> Vec<Cell> {
        self.iter().collect()
    }

    /// Drop the middle point of every collinear consecutive triple.
    ///
    /// The sequence is treated as a closed loop, so the last two triples wrap
    /// around to the start. Sets with fewer than three distinct cells always
    /// prune to empty.
    pub fn prune_by_collinearity(&self) -> CellSet {
        let cells = self.cells();
        let n = cells.len();
        let mut pruned = CellSet::new();

        for i in 0..n {
            let c1 = &cells[i];
            let c2 = &cells[(i + 1) % n];
            let c3 = &cells[(i + 2) % n];

            if !Cell::are_collinear(c1, c2, c3) {
                pruned.add(*c2);
            }
        }

        pruned
    }
}

/// Ordered iterator over a [`CellSet`].
pub struct Iter<'a> {
    links: &'a HashMap<CellId, Option<CellId>>,
    current: Option<CellId>,
}

impl Iterator for Iter<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let id = self.current?;
        self.current = self.links.get(&id).copied().flatten();
        Some(Cell::from_id(id))
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = Cell;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Extend<Cell> for CellSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.add(cell);
        }
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::new();
        set.extend(iter);
        set
    }
}
