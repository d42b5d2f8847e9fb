//! `cab-map`: tile grid, adjacency pattern matching, and map generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`tile`]      | `TileType`, `NeighborhoodType`, `Tile`, `TileProperties`  |
//! | [`grid`]      | `TileGrid` with its road index                            |
//! | [`pattern`]   | `PatternMatcher`, `PatternRule`, `TilePredicate`          |
//! | [`rules`]     | Built-in direction and sprite rule tables                 |
//! | [`generator`] | `MapGenerator` (layout, metadata, nearest road)           |
//! | [`snapshot`]  | `MapSnapshot` JSON persistence                            |
//! | [`render`]    | `tile_image`, `asset_manifest`                            |
//! | [`error`]     | `MapError`, `MapResult`                                   |

pub mod error;
pub mod generator;
pub mod grid;
pub mod pattern;
pub mod render;
pub mod rules;
pub mod snapshot;
pub mod tile;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use generator::MapGenerator;
pub use grid::TileGrid;
pub use pattern::{
    DirectionMatcher, ImageMatcher, OffsetPredicate, PatternMatcher, PatternRule, TilePredicate,
};
pub use render::{asset_manifest, tile_image};
pub use snapshot::MapSnapshot;
pub use tile::{NeighborhoodType, Tile, TileProperties, TileType};
