//! Declarative adjacency pattern matching.
//!
//! A [`PatternMatcher`] holds an ordered list of [`PatternRule`]s.  Each rule
//! is a conjunction of [`OffsetPredicate`]s (the tile at `(dx, dy)` from the
//! query position satisfies a predicate) and a value.  Classifying a
//! position returns the value of the **first** rule whose predicates all
//! hold.  Rule tables are hand-ordered from most to least specific, so
//! reordering a table changes its output.
//!
//! The same evaluator serves both the sprite table and the direction-legality
//! table (see [`rules`](crate::rules)), which keeps the drawn road seams and
//! the legal entry directions in agreement.
//!
//! # Out-of-grid neighbors
//!
//! A position outside the grid has no tile.  `Is(_)` fails there and
//! `IsNot(_)` holds, so the map edge behaves as "not a road".

use serde::{Deserialize, Serialize};

use cab_core::{DirectionSet, TilePos};

use crate::{Tile, TileGrid, TileType};

// ── Predicates ────────────────────────────────────────────────────────────────

/// A test on one neighboring tile.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "camelCase")]
pub enum TilePredicate {
    /// The tile exists and has this type.
    Is(TileType),
    /// The tile is missing (out of grid) or has another type.
    IsNot(TileType),
    /// Always holds.
    Any,
}

impl TilePredicate {
    #[inline]
    pub fn holds(self, tile: Option<&Tile>) -> bool {
        match self {
            TilePredicate::Is(t)    => tile.is_some_and(|tile| tile.is(t)),
            TilePredicate::IsNot(t) => !tile.is_some_and(|tile| tile.is(t)),
            TilePredicate::Any      => true,
        }
    }
}

/// A predicate applied at a relative offset from the query position.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OffsetPredicate {
    pub dx:        i32,
    pub dy:        i32,
    pub predicate: TilePredicate,
}

// ── Rules ─────────────────────────────────────────────────────────────────────

/// An ordered-table entry: all `offsets` must hold for `value` to apply.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PatternRule<V> {
    pub offsets: Vec<OffsetPredicate>,
    pub value:   V,
}

impl<V> PatternRule<V> {
    /// A rule with no predicates (matches everywhere) yielding `value`.
    pub fn new(value: V) -> Self {
        Self { offsets: Vec::new(), value }
    }

    /// Add a predicate at `(dx, dy)`.
    pub fn at(mut self, dx: i32, dy: i32, predicate: TilePredicate) -> Self {
        self.offsets.push(OffsetPredicate { dx, dy, predicate });
        self
    }

    /// `true` if every predicate holds around `pos`.
    pub fn matches(&self, grid: &TileGrid, pos: TilePos) -> bool {
        self.offsets
            .iter()
            .all(|o| o.predicate.holds(grid.tile(pos.offset(o.dx, o.dy))))
    }
}

// ── PatternMatcher ────────────────────────────────────────────────────────────

/// Ordered first-match classifier over a rule table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternMatcher<V> {
    rules: Vec<PatternRule<V>>,
}

/// Classifies ROAD tiles into legal entry directions.
pub type DirectionMatcher = PatternMatcher<DirectionSet>;

/// Classifies tiles into sprite paths.
pub type ImageMatcher = PatternMatcher<String>;

impl<V> PatternMatcher<V> {
    pub fn new(rules: Vec<PatternRule<V>>) -> Self {
        Self { rules }
    }

    #[inline]
    pub fn rules(&self) -> &[PatternRule<V>] {
        &self.rules
    }

    /// Value of the first rule matching at `pos`, or `None` if no rule
    /// matches.  Pure: the grid is only read.
    pub fn classify(&self, grid: &TileGrid, pos: TilePos) -> Option<&V> {
        self.rules
            .iter()
            .find(|rule| rule.matches(grid, pos))
            .map(|rule| &rule.value)
    }

    /// Index of the first matching rule; useful when debugging a table.
    pub fn matching_rule(&self, grid: &TileGrid, pos: TilePos) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(grid, pos))
    }
}

impl DirectionMatcher {
    /// The built-in right-hand two-lane traffic table.
    pub fn directions() -> Self {
        PatternMatcher::new(crate::rules::direction_rules())
    }

    /// Legal entry directions at `pos`; empty when no rule matches.
    pub fn directions_at(&self, grid: &TileGrid, pos: TilePos) -> DirectionSet {
        self.classify(grid, pos).copied().unwrap_or_default()
    }
}

impl ImageMatcher {
    /// The built-in sprite table.
    pub fn images() -> Self {
        PatternMatcher::new(crate::rules::image_rules())
    }
}
