//! Sprite selection for the host renderer.

use std::collections::BTreeSet;

use cab_core::{CarKind, Direction, TilePos};

use crate::pattern::ImageMatcher;
use crate::{NeighborhoodType, TileGrid, TileType};

const GRASS: &str = "assets/tiles/grass.png";
const GRASS_ALT: &str = "assets/tiles/grass-alt.png";

/// Ground sprite for the tile at `pos`.
///
/// GRASS and NOTHING alternate between two grass sprites in a checkerboard.
/// Other tiles take the first matching image rule, falling back to the
/// type's default sprite.  Out-of-grid positions render as grass.
pub fn tile_image(matcher: &ImageMatcher, grid: &TileGrid, pos: TilePos) -> String {
    let tile_type = grid.tile_type(pos).unwrap_or(TileType::Grass);
    match tile_type {
        TileType::Grass | TileType::Nothing => {
            let sprite = if (pos.x + pos.y).rem_euclid(2) == 0 { GRASS } else { GRASS_ALT };
            sprite.to_owned()
        }
        other => matcher
            .classify(grid, pos)
            .cloned()
            .unwrap_or_else(|| other.default_image()),
    }
}

/// Every asset path the renderer must preload, sorted and deduplicated.
pub fn asset_manifest() -> Vec<String> {
    let mut assets: BTreeSet<String> = TileType::ALL.iter().map(|t| t.default_image()).collect();
    assets.insert(GRASS_ALT.to_owned());
    assets.extend(ImageMatcher::images().rules().iter().map(|r| r.value.clone()));
    for kind in NeighborhoodType::ALL {
        assets.extend((0..kind.variant_count()).map(|v| kind.object_image(v)));
    }
    for kind in CarKind::ALL {
        assets.extend(Direction::ALL.iter().map(|&d| kind.sprite(d)));
    }
    assets.into_iter().collect()
}
