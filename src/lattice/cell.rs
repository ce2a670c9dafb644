//! Lattice cells and compass headings.
//!
//! A [`Cell`] is an immutable `(x, y)` lattice point carrying a reversible
//! integer identity. The identity packs both coordinates into one `u32`:
//!
//! ```text
//! id = ((x + 1) << 16) + (y + 1)
//! ```
//!
//! The `+1` offset lets coordinates of `-1` (one step outside an image) be
//! represented. Coordinates must stay within `-1..=65534` or identities
//! collide; this is a caller precondition and is not checked.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Packed cell identity.
pub type CellId = u32;

/// Number of bits the x coordinate is shifted by inside a [`CellId`].
pub const SHIFT_SIZE: u32 = 16;

const LOW_MASK: u32 = 0xFFFF;

/// One of the eight compass directions.
///
/// Variant order is the contour-walk priority: cardinal directions first,
/// then diagonals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    West,
    South,
    East,
    NorthWest,
    SouthWest,
    SouthEast,
    NorthEast,
}

impl Heading {
    /// All headings in walk priority order.
    pub const ALL: [Heading; 8] = [
        Heading::North,
        Heading::West,
        Heading::South,
        Heading::East,
        Heading::NorthWest,
        Heading::SouthWest,
        Heading::SouthEast,
        Heading::NorthEast,
    ];

    /// The four cardinal headings.
    pub const CARDINAL: [Heading; 4] = [
        Heading::North,
        Heading::West,
        Heading::South,
        Heading::East,
    ];

    /// Unit `(dx, dy)` offset. Y grows downward, so north is `dy = -1`.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::West => (-1, 0),
            Heading::South => (0, 1),
            Heading::East => (1, 0),
            Heading::NorthWest => (-1, -1),
            Heading::SouthWest => (-1, 1),
            Heading::SouthEast => (1, 1),
            Heading::NorthEast => (1, -1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::West => Heading::East,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::NorthWest => Heading::SouthEast,
            Heading::SouthWest => Heading::NorthEast,
            Heading::SouthEast => Heading::NorthWest,
            Heading::NorthEast => Heading::SouthWest,
        }
    }

    #[inline]
    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Heading::North | Heading::West | Heading::South | Heading::East
        )
    }

    /// Position of this heading in [`Heading::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Immutable lattice coordinate with a packed identity.
///
/// Equality and hashing use the identity only.
#[derive(Clone, Copy)]
pub struct Cell {
    x: i32,
    y: i32,
    id: CellId,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            id: Self::hash(x, y),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Pack `(x, y)` into a [`CellId`].
    ///
    /// Arithmetic wraps so that an x near the top of the 16-bit range still
    /// decodes correctly through [`Cell::from_id`].
    #[inline]
    pub fn hash(x: i32, y: i32) -> CellId {
        ((x.wrapping_add(1) as u32) << SHIFT_SIZE).wrapping_add(y.wrapping_add(1) as u32)
    }

    /// Decode a packed identity back into a cell.
    #[inline]
    pub fn from_id(id: CellId) -> Self {
        Self {
            x: (id >> SHIFT_SIZE) as i32 - 1,
            y: (id & LOW_MASK) as i32 - 1,
            id,
        }
    }

    /// The cell one step away in `heading`. No bounds checking.
    #[inline]
    pub fn step(&self, heading: Heading) -> Cell {
        let (dx, dy) = heading.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn equals(&self, other: &Cell) -> bool {
        self.id == other.id
    }

    /// True when the triangle `c1, c2, c3` has zero signed area.
    pub fn are_collinear(c1: &Cell, c2: &Cell, c3: &Cell) -> bool {
        let dx1 = c2.x as i64 - c1.x as i64;
        let dy1 = c2.y as i64 - c1.y as i64;
        let dx2 = c3.x as i64 - c2.x as i64;
        let dy2 = c3.y as i64 - c2.y as i64;

        dx1 * dy2 - dx2 * dy1 == 0
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}
