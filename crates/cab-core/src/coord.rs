//! Grid coordinate type.
//!
//! Coordinates are signed so that neighbor offsets and ring searches can step
//! past the grid edge without wrapping; bounds are checked by the grid.

use std::fmt;

use crate::Direction;

/// A tile coordinate.  `x` grows to the right, `y` grows downwards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> TilePos {
        TilePos::new(self.x + dx, self.y + dy)
    }

    /// The neighboring tile one step in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> TilePos {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    /// Manhattan (4-connected) distance; the A* heuristic.
    #[inline]
    pub fn manhattan(self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The direction that leads from `self` to an orthogonally adjacent
    /// `other`, or `None` if the two tiles are not 4-neighbors.
    pub fn direction_to(self, other: TilePos) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.step(d) == other)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for TilePos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        TilePos::new(x, y)
    }
}
