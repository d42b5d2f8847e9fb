//! The authoritative map state.
//!
//! # Data layout
//!
//! Tiles are stored row-major in one `Vec`: tile `(x, y)` lives at index
//! `y * size + x`.  [`TileGrid::row`] exposes a row as a slice for callers
//! that want the `[y][x]` view.
//!
//! # Road index
//!
//! `road_tiles` is a derived index of ROAD coordinates.  [`TileGrid::set_tile`]
//! adds to it incrementally and never removes: overwriting a ROAD tile with
//! another type leaves a stale entry until
//! [`rebuild_road_index`](TileGrid::rebuild_road_index) runs.  The generator
//! rebuilds the index once all placement is done.
//!
//! The index is a `BTreeSet` so iteration order, and therefore seeded random
//! selection, is deterministic.

use std::collections::BTreeSet;

use cab_core::{SimRng, TilePos};

use crate::{MapError, MapResult, Tile, TileProperties, TileType};

/// Offsets from a road tile at which a high-rise hides it from view.
const OCCLUSION_SHIFTS: [(i32, i32); 4] = [(3, 3), (2, 3), (3, 2), (2, 2)];

/// A square grid of tiles plus the road index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    size:       usize,
    tiles:      Vec<Tile>,
    road_tiles: BTreeSet<TilePos>,
}

impl TileGrid {
    /// A `size × size` grid of GRASS.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            tiles:      vec![Tile::default(); size * size],
            road_tiles: BTreeSet::new(),
        }
    }

    /// Assemble a grid from parts without validation; used by snapshot
    /// restore after it has checked the dimensions.
    pub(crate) fn from_parts(size: usize, tiles: Vec<Tile>, road_tiles: BTreeSet<TilePos>) -> Self {
        debug_assert_eq!(tiles.len(), size * size);
        Self { size, tiles, road_tiles }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    #[inline]
    fn index(&self, pos: TilePos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.size + pos.x as usize)
    }

    // ── Tile access ───────────────────────────────────────────────────────

    /// The tile at `pos`, or `None` outside the grid.
    #[inline]
    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    #[inline]
    pub fn tile_type(&self, pos: TilePos) -> Option<TileType> {
        self.tile(pos).map(Tile::tile_type)
    }

    /// `true` if `pos` is inside the grid and holds a ROAD tile.
    /// Out-of-grid positions are never roads.
    #[inline]
    pub fn is_road(&self, pos: TilePos) -> bool {
        self.tile(pos).is_some_and(Tile::is_road)
    }

    /// Mutable access to a tile's properties (metadata passes only).  The
    /// tile type itself can only change through [`set_tile`](Self::set_tile).
    #[inline]
    pub fn properties_mut(&mut self, pos: TilePos) -> Option<&mut TileProperties> {
        self.index(pos).map(|i| &mut self.tiles[i].properties)
    }

    /// Row `y` as a slice of `size` tiles.
    pub fn row(&self, y: usize) -> Option<&[Tile]> {
        (y < self.size).then(|| &self.tiles[y * self.size..(y + 1) * self.size])
    }

    /// Iterator over `(pos, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, &Tile)> + '_ {
        let size = self.size;
        self.tiles.iter().enumerate().map(move |(i, t)| {
            (TilePos::new((i % size) as i32, (i / size) as i32), t)
        })
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Place `tile` at `pos`, replacing whatever was there.
    ///
    /// ROAD placements are added to the road index.  Nothing is removed from
    /// the index when a ROAD tile is overwritten.
    pub fn set_tile(&mut self, pos: TilePos, tile: Tile) -> MapResult<()> {
        let Some(i) = self.index(pos) else {
            return Err(MapError::OutOfBounds { pos, size: self.size });
        };
        if tile.is_road() {
            self.road_tiles.insert(pos);
        }
        self.tiles[i] = tile;
        Ok(())
    }

    /// Recompute the road index from the tiles.  Returns the number of stale
    /// entries that were dropped.
    pub fn rebuild_road_index(&mut self) -> usize {
        let rebuilt: BTreeSet<TilePos> = self
            .iter()
            .filter(|(_, t)| t.is_road())
            .map(|(p, _)| p)
            .collect();
        let stale = self.road_tiles.difference(&rebuilt).count();
        self.road_tiles = rebuilt;
        stale
    }

    // ── Road queries ──────────────────────────────────────────────────────

    /// The road index, in `(x, y)` order.
    #[inline]
    pub fn road_tiles(&self) -> &BTreeSet<TilePos> {
        &self.road_tiles
    }

    /// A uniformly random entry of the road index.
    pub fn random_road_tile(&self, rng: &mut SimRng) -> Option<TilePos> {
        rng.choose_iter(self.road_tiles.iter()).copied()
    }

    /// Road tiles the player cannot see because a high-rise house stands at
    /// one of [`OCCLUSION_SHIFTS`] from them.
    pub fn occluded_roads(&self) -> BTreeSet<TilePos> {
        self.road_tiles
            .iter()
            .copied()
            .filter(|&pos| {
                OCCLUSION_SHIFTS.iter().any(|&(dx, dy)| {
                    self.tile(pos.offset(dx, dy))
                        .and_then(Tile::neighborhood_kind)
                        .is_some_and(|(kind, variant)| kind.is_high_rise(variant))
                })
            })
            .collect()
    }

    /// Road tiles not hidden behind a high-rise, in index order.
    pub fn visible_roads(&self) -> Vec<TilePos> {
        let hidden = self.occluded_roads();
        self.road_tiles
            .iter()
            .copied()
            .filter(|p| !hidden.contains(p))
            .collect()
    }
}
