//! Procedural map generation.
//!
//! # Passes
//!
//! 1. [`MapGenerator::generate_base_map`] lays out every neighborhood cell:
//!    the block (NOTHING, seeded with random NEIGHBORHOOD tiles on an even
//!    sub-grid), its sidewalk ring, then its road ring.  Road rings of
//!    adjacent cells overlap and the later write wins.  Special buildings are
//!    overlaid afterwards at fixed positions, overwriting the random fill, so
//!    they are never skipped.  The road index is rebuilt at the end.
//! 2. [`MapGenerator::fill_map_metadata`] classifies every ROAD tile with the
//!    direction rule table.  It must run after all placement: a tile's legal
//!    directions depend on its final neighbors.

use log::{debug, info};

use cab_core::{DirectionSet, MapConfig, SimRng, TilePos};

use crate::pattern::DirectionMatcher;
use crate::{MapResult, NeighborhoodType, Tile, TileGrid, TileType};

/// Chance that an even sub-grid block tile receives a building.
const FILL_PROBABILITY: f64 = 0.86;

/// Random fill catalogue: `(type, weight, variants drawn from)`.
const RANDOM_FILL: [(NeighborhoodType, f64, u8); 3] = [
    (NeighborhoodType::House,   0.6, 7),
    (NeighborhoodType::Parking, 0.3, 3),
    (NeighborhoodType::Park,    0.1, 2),
];

// ── Special placements ────────────────────────────────────────────────────────

/// A deterministic building overlay.
///
/// For each neighborhood cell `(nx, ny)` in `cells`, a building of `kind`
/// (variant drawn from `variants`) is placed at
/// `(block_start(nx) + size - inset.0, block_start(ny) + size - inset.1)`.
/// Cell indices past the last neighborhood clamp to it; negative indices
/// address the border strip before the first neighborhood.
struct SpecialPlacement {
    kind:     NeighborhoodType,
    variants: &'static [u8],
    cells:    &'static [(i32, i32)],
    inset:    (i32, i32),
}

const fn special(
    kind:     NeighborhoodType,
    variants: &'static [u8],
    cells:    &'static [(i32, i32)],
    inset:    (i32, i32),
) -> SpecialPlacement {
    SpecialPlacement { kind, variants, cells, inset }
}

const TOP_LINE: &[(i32, i32)] = &[(0, -1), (1, -1), (2, -1), (3, -1)];
const BOTTOM_LINE: &[(i32, i32)] = &[(0, 3), (1, 3), (2, 3), (3, 3)];

/// Overlay order: shops, gas stations, offices, high-rises, factories,
/// parks, garages.
const SPECIAL_PLACEMENTS: &[SpecialPlacement] = {
    use NeighborhoodType::{Factory, Garage, Gas, House, Office, Park, Shop};
    &[
        special(Shop,    &[0],       &[(0, 2), (1, 0), (3, 2)],         (2, 2)),
        special(Gas,     &[0],       &[(0, 0), (2, 3), (3, 1)],         (6, 2)),
        special(Office,  &[0],       &[(1, 1)],                         (4, 4)),
        special(House,   &[1, 3, 5], &[(0, 0), (0, 3), (3, 0), (3, 3)], (2, 6)),
        special(House,   &[5],       &[(1, 1)],                         (2, 4)),
        special(House,   &[1],       &[(1, 1)],                         (4, 2)),
        special(Factory, &[0],       &[(1, 2)],                         (2, 2)),
        special(Factory, &[1],       &[(1, 2)],                         (2, 4)),
        // Decorative park line along the top border.
        special(Park,    &[1],       TOP_LINE,                          (4, 1)),
        special(Park,    &[0],       TOP_LINE,                          (6, 2)),
        special(Park,    &[0],       TOP_LINE,                          (9, 2)),
        special(Park,    &[2],       TOP_LINE,                          (11, 1)),
        special(Park,    &[0],       &[(3, -1)],                        (-4, 2)),
        special(Park,    &[0],       &[(3, -1)],                        (-1, 2)),
        special(Park,    &[2],       &[(3, -1)],                        (1, 1)),
        // And along the bottom border.
        special(Park,    &[1],       BOTTOM_LINE,                       (4, -4)),
        special(Park,    &[0],       BOTTOM_LINE,                       (6, -3)),
        special(Park,    &[0],       BOTTOM_LINE,                       (9, -3)),
        special(Park,    &[2],       BOTTOM_LINE,                       (11, -4)),
        special(Park,    &[0],       &[(3, 3)],                         (-4, -3)),
        special(Park,    &[0],       &[(3, 3)],                         (-1, -3)),
        special(Park,    &[2],       &[(3, 3)],                         (1, -4)),
        special(Garage,  &[0],       &[(2, 2)],                         (4, 4)),
    ]
};

// ── MapGenerator ──────────────────────────────────────────────────────────────

/// Builds [`TileGrid`]s from a [`MapConfig`].
pub struct MapGenerator {
    config:     MapConfig,
    directions: DirectionMatcher,
}

impl MapGenerator {
    /// Validate `config` and pair it with a direction rule table.
    pub fn new(config: MapConfig, directions: DirectionMatcher) -> MapResult<Self> {
        config.validate()?;
        Ok(Self { config, directions })
    }

    /// Generator using the built-in direction table.
    pub fn with_default_rules(config: MapConfig) -> MapResult<Self> {
        Self::new(config, DirectionMatcher::directions())
    }

    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[inline]
    pub fn directions(&self) -> &DirectionMatcher {
        &self.directions
    }

    /// Both passes for the configured neighborhood count.
    pub fn generate(&self, rng: &mut SimRng) -> TileGrid {
        let mut grid = self.generate_base_map(self.config.neighborhood_count, rng);
        self.fill_map_metadata(&mut grid);
        grid
    }

    /// Lay out `neighborhood_count` neighborhoods on a square arrangement of
    /// `ceil(sqrt(neighborhood_count))` cells per side.
    pub fn generate_base_map(&self, neighborhood_count: u32, rng: &mut SimRng) -> TileGrid {
        let cfg = &self.config;
        let per_side = MapConfig { neighborhood_count, ..cfg.clone() }.neighborhoods_per_side();
        let size = cfg.grid_size_for(neighborhood_count) as usize;
        let mut grid = TileGrid::new(size);

        for i in 0..per_side as i32 {
            for j in 0..per_side as i32 {
                let origin = TilePos::new(cfg.block_start(j), cfg.block_start(i));
                self.lay_block(&mut grid, origin, rng);
                self.lay_sidewalk(&mut grid, origin);
                self.lay_road_ring(&mut grid, origin);
            }
        }

        if per_side > 0 {
            self.place_specials(&mut grid, per_side as i32, rng);
        }

        let stale = grid.rebuild_road_index();
        if stale > 0 {
            debug!("generate_base_map: dropped {stale} overwritten road tiles from the index");
        }
        info!(
            "generate_base_map: {per_side}x{per_side} neighborhoods, grid {size}x{size}, {} road tiles",
            grid.road_tiles().len()
        );
        grid
    }

    /// Annotate ROAD tiles with legal entry directions and NEIGHBORHOOD tiles
    /// with their object sprite.
    pub fn fill_map_metadata(&self, grid: &mut TileGrid) {
        let roads: Vec<(TilePos, DirectionSet)> = grid
            .iter()
            .filter(|(_, t)| t.is_road())
            .map(|(pos, _)| (pos, self.directions.directions_at(grid, pos)))
            .collect();
        let objects: Vec<(TilePos, String)> = grid
            .iter()
            .filter_map(|(pos, t)| {
                t.neighborhood_kind()
                    .map(|(kind, variant)| (pos, kind.object_image(variant)))
            })
            .collect();

        for (pos, dirs) in roads {
            if let Some(props) = grid.properties_mut(pos) {
                props.possible_directions = dirs;
            }
        }
        for (pos, image) in objects {
            if let Some(props) = grid.properties_mut(pos) {
                props.image_src = image;
            }
        }
    }

    /// Nearest ROAD tile to `pos`: `pos` itself if it is a road, otherwise
    /// the first road on square rings of growing radius.
    ///
    /// Ring scan order at radius `d`: for each row from top to bottom the
    /// left edge then the right edge; then for each column between the
    /// corners the top edge then the bottom edge.  Out-of-grid positions are
    /// never roads.  Returns `None` when no road lies within `grid.size()`.
    pub fn find_nearest_road(grid: &TileGrid, pos: TilePos) -> Option<TilePos> {
        if grid.is_road(pos) {
            return Some(pos);
        }
        let max = grid.size() as i32;
        for d in 1..=max {
            for i in -d..=d {
                for candidate in [pos.offset(-d, i), pos.offset(d, i)] {
                    if grid.is_road(candidate) {
                        return Some(candidate);
                    }
                }
            }
            for i in (-d + 1)..d {
                for candidate in [pos.offset(i, -d), pos.offset(i, d)] {
                    if grid.is_road(candidate) {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }

    // ── Layout helpers ────────────────────────────────────────────────────

    /// Block interior: NOTHING, with random buildings on even offsets.
    fn lay_block(&self, grid: &mut TileGrid, origin: TilePos, rng: &mut SimRng) {
        let n = self.config.neighborhood_size as i32;
        for y in 0..n {
            for x in 0..n {
                place(grid, origin.offset(x, y), Tile::new(TileType::Nothing));
            }
        }
        for y in (0..n).step_by(2) {
            for x in (0..n).step_by(2) {
                if rng.gen_bool(FILL_PROBABILITY) {
                    let (kind, variant) = random_neighborhood(rng);
                    place(grid, origin.offset(x, y), Tile::neighborhood(kind, variant));
                }
            }
        }
    }

    fn lay_sidewalk(&self, grid: &mut TileGrid, origin: TilePos) {
        for ring in 1..=self.config.sidewalk_size as i32 {
            self.lay_ring(grid, origin, ring, TileType::Sidewalk);
        }
    }

    fn lay_road_ring(&self, grid: &mut TileGrid, origin: TilePos) {
        let sidewalk = self.config.sidewalk_size as i32;
        for lane in 0..self.config.road_size as i32 {
            self.lay_ring(grid, origin, sidewalk + lane + 1, TileType::Road);
        }
    }

    /// Square ring at Chebyshev distance `ring` outside the block.
    fn lay_ring(&self, grid: &mut TileGrid, origin: TilePos, ring: i32, tile_type: TileType) {
        let n = self.config.neighborhood_size as i32;
        for i in -ring..n + ring {
            place(grid, origin.offset(-ring, i), Tile::new(tile_type));
            place(grid, origin.offset(n - 1 + ring, i), Tile::new(tile_type));
        }
        for i in -ring..n + ring {
            place(grid, origin.offset(i, -ring), Tile::new(tile_type));
            place(grid, origin.offset(i, n - 1 + ring), Tile::new(tile_type));
        }
    }

    fn place_specials(&self, grid: &mut TileGrid, per_side: i32, rng: &mut SimRng) {
        let cfg = &self.config;
        let n = cfg.neighborhood_size as i32;
        let last = per_side - 1;
        for placement in SPECIAL_PLACEMENTS {
            for &(nx, ny) in placement.cells {
                let (nx, ny) = (nx.min(last), ny.min(last));
                let pos = TilePos::new(
                    cfg.block_start(nx) + n - placement.inset.0,
                    cfg.block_start(ny) + n - placement.inset.1,
                );
                let variant = rng.choose(placement.variants).copied().unwrap_or(0);
                place(grid, pos, Tile::neighborhood(placement.kind, variant));
            }
        }
    }
}

/// `set_tile`, skipping positions outside the grid.
fn place(grid: &mut TileGrid, pos: TilePos, tile: Tile) {
    if let Err(e) = grid.set_tile(pos, tile) {
        debug!("map generation: skipped placement: {e}");
    }
}

/// Weighted pick from [`RANDOM_FILL`], with a uniform variant.
fn random_neighborhood(rng: &mut SimRng) -> (NeighborhoodType, u8) {
    let roll: f64 = rng.random();
    let mut sum = 0.0;
    for (kind, weight, variants) in RANDOM_FILL {
        sum += weight;
        if roll < sum {
            return (kind, rng.gen_range(0..variants));
        }
    }
    // Floating-point slack: the weights sum to 1.0 but may round below it.
    let (kind, _, variants) = RANDOM_FILL[RANDOM_FILL.len() - 1];
    (kind, rng.gen_range(0..variants))
}
