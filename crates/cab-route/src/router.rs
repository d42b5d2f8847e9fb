//! Routing trait and the default A* implementation.
//!
//! # Pluggability
//!
//! `cab-sim` calls routing through the [`Router`] trait, so hosts can swap in
//! their own search (congestion-aware costs, precomputed tables) without
//! touching the simulation loop.
//!
//! # Legality
//!
//! A move from a tile in direction `D` is legal iff the target tile is ROAD
//! and its `possible_directions` contain `D`.  The start tile itself is
//! never checked.
//!
//! # Tie-breaking
//!
//! The open set is a plain `Vec` stable-sorted by `f = g + h` before every
//! pop, so among equal `f` the earliest inserted entry wins.  Neighbors are
//! expanded in [`Direction::ALL`] order (up, right, down, left).  Both rules
//! make routes reproducible across runs and platforms.

use log::{error, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use cab_core::{Direction, TilePos};
use cab_map::TileGrid;

use crate::{Path, PathOptions, PathStep, RouteError, RouteResult};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a batch can be routed on Rayon
/// workers against one shared grid (see [`route_many`]).
pub trait Router: Send + Sync {
    /// Route from `start` to `end`, padded per `options`.
    ///
    /// Returns [`RouteError::NoRoute`] when `end` is unreachable.
    fn route(
        &self,
        grid: &TileGrid,
        start: TilePos,
        end: TilePos,
        options: &PathOptions,
    ) -> RouteResult<Path>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* with unit step cost and a Manhattan heuristic.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarRouter;

impl AStarRouter {
    /// Upper bound on predecessor hops walked while rebuilding a path.
    pub const MAX_RECONSTRUCT_ITERATIONS: usize = 1000;

    /// Infallible form of [`Router::route`]: an unreachable `end` yields an
    /// empty [`Path`].
    pub fn find_shortest_path(
        &self,
        grid: &TileGrid,
        start: TilePos,
        end: TilePos,
        options: &PathOptions,
    ) -> Path {
        self.route(grid, start, end, options).unwrap_or_default()
    }
}

impl Router for AStarRouter {
    fn route(
        &self,
        grid: &TileGrid,
        start: TilePos,
        end: TilePos,
        options: &PathOptions,
    ) -> RouteResult<Path> {
        let path = astar(grid, start, end)?;
        Ok(path.with_idle_padding(options.from_idle_steps, options.to_idle_steps))
    }
}

// ── Batch routing ─────────────────────────────────────────────────────────────

/// Route every `(start, end)` request against one grid.
///
/// Results are in request order.  With the `parallel` feature the batch runs
/// on Rayon's thread pool; the grid is only read, so no locking is needed.
pub fn route_many<R>(
    router: &R,
    grid: &TileGrid,
    requests: &[(TilePos, TilePos)],
    options: &PathOptions,
) -> Vec<RouteResult<Path>>
where
    R: Router + ?Sized,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        requests
            .par_iter()
            .map(|&(start, end)| router.route(grid, start, end, options))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        requests
            .iter()
            .map(|&(start, end)| router.route(grid, start, end, options))
            .collect()
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

#[inline]
fn legal_entry(grid: &TileGrid, pos: TilePos, dir: Direction) -> bool {
    grid.tile(pos)
        .is_some_and(|t| t.is_road() && t.properties.possible_directions.contains(dir))
}

fn astar(grid: &TileGrid, start: TilePos, end: TilePos) -> RouteResult<Path> {
    let no_route = RouteError::NoRoute { from: start, to: end };
    if !grid.is_road(end) {
        return Err(no_route);
    }
    if start == end {
        return Ok(Path::from_steps(vec![PathStep::new(start, None)]));
    }

    let mut open: Vec<TilePos> = vec![start];
    let mut in_open: FxHashSet<TilePos> = FxHashSet::default();
    in_open.insert(start);

    let mut g_score: FxHashMap<TilePos, u32> = FxHashMap::default();
    let mut f_score: FxHashMap<TilePos, u32> = FxHashMap::default();
    // came_from[v] = (predecessor, direction of the move into v).
    let mut came_from: FxHashMap<TilePos, (TilePos, Direction)> = FxHashMap::default();
    g_score.insert(start, 0);
    f_score.insert(start, start.manhattan(end));

    while !open.is_empty() {
        // Stable: equal f keeps insertion order.
        open.sort_by_key(|p| f_score.get(p).copied().unwrap_or(u32::MAX));
        let current = open.remove(0);
        in_open.remove(&current);

        if current == end {
            return Ok(reconstruct(&came_from, start, end));
        }

        let g_current = g_score.get(&current).copied().unwrap_or(u32::MAX);
        for dir in Direction::ALL {
            let next = current.step(dir);
            if !legal_entry(grid, next, dir) {
                continue;
            }
            let tentative = g_current.saturating_add(1);
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, (current, dir));
                g_score.insert(next, tentative);
                f_score.insert(next, tentative + next.manhattan(end));
                if in_open.insert(next) {
                    open.push(next);
                }
            }
        }
    }

    Err(no_route)
}

/// Walk predecessors from `end` back to `start`.
///
/// Stops early, keeping the partial chain, on a repeated tile or after
/// [`AStarRouter::MAX_RECONSTRUCT_ITERATIONS`] hops.
pub(crate) fn reconstruct(
    came_from: &FxHashMap<TilePos, (TilePos, Direction)>,
    start: TilePos,
    end: TilePos,
) -> Path {
    let mut steps = Vec::new();
    let mut visited: FxHashSet<TilePos> = FxHashSet::default();
    let mut current = end;
    let mut first_move: Option<Direction> = None;
    let mut iterations = 0;
    let mut truncated = false;

    while current != start {
        let Some(&(prev, dir)) = came_from.get(&current) else {
            break;
        };
        iterations += 1;
        if iterations > AStarRouter::MAX_RECONSTRUCT_ITERATIONS {
            error!("path reconstruction {start} -> {end}: iteration cap reached, truncating");
            truncated = true;
            break;
        }
        if !visited.insert(current) {
            warn!("path reconstruction {start} -> {end}: cycle at {current}, truncating");
            truncated = true;
            break;
        }
        steps.push(PathStep::new(current, Some(dir)));
        first_move = Some(dir);
        current = prev;
    }

    // The chain head carries the heading of the first move out of it.
    if !truncated {
        steps.push(PathStep::new(current, first_move));
    }
    steps.reverse();
    Path::from_steps(steps)
}
