//! Built-in rule tables.
//!
//! Both tables look at the 3×3 window around the query tile.  Notation in
//! the comments: `R` = ROAD, `N` = not ROAD (or off the map).
//!
//! # Traffic model (direction table)
//!
//! Roads are two lanes wide with right-hand traffic (screen coordinates,
//! `up` = `-y`):
//!
//! ```text
//!   vertical road          horizontal road
//!   ↓ ↑                    ← ← ← ←   top row
//!   ↓ ↑                    → → → →   bottom row
//!   left col / right col
//! ```
//!
//! A tile admits the flow of every lane it belongs to.  Straight lane tiles
//! also admit a sideways entry from the opposite lane (lane change).  The
//! 2×2 block where two roads cross admits one lane per axis, which makes it a
//! one-way mini roundabout connecting every approach to every exit.  Rules
//! 1–12 cover every shape the generator produces with `road_size = 2`; the
//! final rule admits all four directions on any road tile they miss.
//!
//! Other road widths still hit rules 1–12 wherever the window looks like a
//! two-lane shape.  A single-lane crossing has all four diagonals off-road,
//! so rule 1 matches and the tile admits only `{down, left}`, while its
//! straight single-lane neighbors fall through to the catch-all.

use cab_core::{Direction, DirectionSet};
use Direction::{Down as D, Left as L, Right as Rt, Up as U};

use crate::pattern::{PatternRule, TilePredicate};
use crate::TileType;

const R: TilePredicate = TilePredicate::Is(TileType::Road);
const N: TilePredicate = TilePredicate::IsNot(TileType::Road);

const UP: (i32, i32)         = (0, -1);
const DOWN: (i32, i32)       = (0, 1);
const LEFT: (i32, i32)       = (-1, 0);
const RIGHT: (i32, i32)      = (1, 0);
const UP_LEFT: (i32, i32)    = (-1, -1);
const UP_RIGHT: (i32, i32)   = (1, -1);
const DOWN_LEFT: (i32, i32)  = (-1, 1);
const DOWN_RIGHT: (i32, i32) = (1, 1);

/// Rule whose center tile must be `center`, plus `pattern` around it.
fn rule<V>(value: V, center: TileType, pattern: &[((i32, i32), TilePredicate)]) -> PatternRule<V> {
    pattern
        .iter()
        .fold(PatternRule::new(value).at(0, 0, TilePredicate::Is(center)), |r, &((dx, dy), p)| {
            r.at(dx, dy, p)
        })
}

/// All four orthogonal neighbors are roads and `gap` is the one diagonal
/// that is not: a quadrant of a crossing.
fn crossing(gap: (i32, i32)) -> [((i32, i32), TilePredicate); 5] {
    [(UP, R), (DOWN, R), (LEFT, R), (RIGHT, R), (gap, N)]
}

/// Exactly `open` is not a road among the orthogonal neighbors: a lane tile.
fn lane(open: (i32, i32)) -> Vec<((i32, i32), TilePredicate)> {
    [UP, DOWN, LEFT, RIGHT]
        .into_iter()
        .map(|o| (o, if o == open { N } else { R }))
        .collect()
}

/// `a` and `b` are not roads, the other two orthogonals are: a ring corner.
fn corner(a: (i32, i32), b: (i32, i32)) -> Vec<((i32, i32), TilePredicate)> {
    [UP, DOWN, LEFT, RIGHT]
        .into_iter()
        .map(|o| (o, if o == a || o == b { N } else { R }))
        .collect()
}

// ── Direction table ───────────────────────────────────────────────────────────

/// Legal entry directions for ROAD tiles.
pub fn direction_rules() -> Vec<PatternRule<DirectionSet>> {
    let road = TileType::Road;
    vec![
        // 1–4: crossing quadrants, named by their non-road diagonal.
        rule(DirectionSet::of(&[D, L]), road, &crossing(UP_LEFT)),
        rule(DirectionSet::of(&[U, L]), road, &crossing(UP_RIGHT)),
        rule(DirectionSet::of(&[D, Rt]), road, &crossing(DOWN_LEFT)),
        rule(DirectionSet::of(&[U, Rt]), road, &crossing(DOWN_RIGHT)),
        // 5–8: straight lanes; flow plus lane change from the other lane.
        rule(DirectionSet::of(&[L, U]), road, &lane(UP)),
        rule(DirectionSet::of(&[Rt, D]), road, &lane(DOWN)),
        rule(DirectionSet::of(&[D, L]), road, &lane(LEFT)),
        rule(DirectionSet::of(&[U, Rt]), road, &lane(RIGHT)),
        // 9–12: outer corners of the map ring.
        rule(DirectionSet::of(&[D, L]), road, &corner(UP, LEFT)),
        rule(DirectionSet::of(&[L, U]), road, &corner(UP, RIGHT)),
        rule(DirectionSet::of(&[D, Rt]), road, &corner(DOWN, LEFT)),
        rule(DirectionSet::of(&[Rt, U]), road, &corner(DOWN, RIGHT)),
        // 13: anything else that is a road.
        rule(DirectionSet::ALL, road, &[]),
    ]
}

// ── Image table ───────────────────────────────────────────────────────────────

fn tile_asset(name: &str) -> String {
    format!("assets/tiles/{name}.png")
}

/// Sprite selection for ROAD and SIDEWALK tiles.  Road sprites follow the
/// same shapes as [`direction_rules`] so lane markings match legality.
pub fn image_rules() -> Vec<PatternRule<String>> {
    let road = TileType::Road;
    let walk = TileType::Sidewalk;
    vec![
        rule(tile_asset("road-crossing-tl"), road, &crossing(UP_LEFT)),
        rule(tile_asset("road-crossing-tr"), road, &crossing(UP_RIGHT)),
        rule(tile_asset("road-crossing-bl"), road, &crossing(DOWN_LEFT)),
        rule(tile_asset("road-crossing-br"), road, &crossing(DOWN_RIGHT)),
        rule(tile_asset("road-top"), road, &lane(UP)),
        rule(tile_asset("road-bottom"), road, &lane(DOWN)),
        rule(tile_asset("road-left"), road, &lane(LEFT)),
        rule(tile_asset("road-right"), road, &lane(RIGHT)),
        rule(tile_asset("road-corner-tl"), road, &corner(UP, LEFT)),
        rule(tile_asset("road-corner-tr"), road, &corner(UP, RIGHT)),
        rule(tile_asset("road-corner-bl"), road, &corner(DOWN, LEFT)),
        rule(tile_asset("road-corner-br"), road, &corner(DOWN, RIGHT)),
        // Sidewalk corners touch road on two sides, edges on one.
        rule(tile_asset("sidewalk-top-left"), walk, &[(UP, R), (LEFT, R)]),
        rule(tile_asset("sidewalk-top-right"), walk, &[(UP, R), (RIGHT, R)]),
        rule(tile_asset("sidewalk-bottom-left"), walk, &[(DOWN, R), (LEFT, R)]),
        rule(tile_asset("sidewalk-bottom-right"), walk, &[(DOWN, R), (RIGHT, R)]),
        rule(tile_asset("sidewalk-top"), walk, &[(UP, R)]),
        rule(tile_asset("sidewalk-bottom"), walk, &[(DOWN, R)]),
        rule(tile_asset("sidewalk-left"), walk, &[(LEFT, R)]),
        rule(tile_asset("sidewalk-right"), walk, &[(RIGHT, R)]),
    ]
}
