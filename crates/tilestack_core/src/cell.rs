//! Integer grid coordinates and tile identities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// An integer 2D grid coordinate.
///
/// Uses a Y-up convention: `(0, 1)` is the cell above `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ZERO: Self = Cell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Component-wise addition, or `None` if either coordinate overflows
    pub fn checked_add(self, rhs: Cell) -> Option<Cell> {
        Some(Cell::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Cell {
    type Output = Cell;

    fn neg(self) -> Cell {
        Cell::new(-self.x, -self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Opaque identity of a placed tile.
///
/// Two cells hold "the same tile" iff their ids are equal. What an id refers
/// to (a tileset index, an asset handle) is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        TileId(id)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
