//! Travel directions and compact direction sets.
//!
//! A ROAD tile stores the set of directions of travel with which a vehicle
//! may step *into* it.  The set is a 4-bit mask; iteration always follows
//! [`Direction::ALL`] order (up, right, down, left), which is also the
//! pathfinder's neighbor expansion order.

use std::fmt;

/// One of the four grid directions.  Screen coordinates: `Up` is `-y`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector `(dx, dy)`.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down  => (0, 1),
            Direction::Left  => (-1, 0),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
        }
    }

    /// Lowercase label, used in asset paths and persisted state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up    => "up",
            Direction::Right => "right",
            Direction::Down  => "down",
            Direction::Left  => "left",
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Direction::Up    => 0b0001,
            Direction::Right => 0b0010,
            Direction::Down  => 0b0100,
            Direction::Left  => 0b1000,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DirectionSet ──────────────────────────────────────────────────────────────

/// A set of [`Direction`]s stored as a bitmask.
///
/// Serialized as a list (`["up", "left"]`) so persisted maps stay readable.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Vec<Direction>", from = "Vec<Direction>"))]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);
    pub const ALL: DirectionSet = DirectionSet(0b1111);

    /// Build a set from a slice; usable in `const` rule tables.
    pub const fn of(dirs: &[Direction]) -> DirectionSet {
        let mut bits = 0;
        let mut i = 0;
        while i < dirs.len() {
            bits |= dirs[i].bit();
            i += 1;
        }
        DirectionSet(bits)
    }

    #[inline]
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    #[inline]
    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    #[inline]
    pub const fn union(self, other: DirectionSet) -> DirectionSet {
        DirectionSet(self.0 | other.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in [`Direction::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl From<Vec<Direction>> for DirectionSet {
    fn from(dirs: Vec<Direction>) -> Self {
        dirs.into_iter().collect()
    }
}

impl From<DirectionSet> for Vec<Direction> {
    fn from(set: DirectionSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
