//! Tile types and per-tile properties.

use serde::{Deserialize, Serialize};

use cab_core::DirectionSet;

// ── TileType ──────────────────────────────────────────────────────────────────

/// The kind of ground a tile holds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Grass,
    Nothing,
    Sidewalk,
    Road,
    Neighborhood,
}

impl TileType {
    pub const ALL: [TileType; 5] = [
        TileType::Grass,
        TileType::Nothing,
        TileType::Sidewalk,
        TileType::Road,
        TileType::Neighborhood,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TileType::Grass        => "grass",
            TileType::Nothing      => "nothing",
            TileType::Sidewalk     => "sidewalk",
            TileType::Road         => "road",
            TileType::Neighborhood => "neighborhood",
        }
    }

    /// Default sprite for tiles of this type.
    pub fn default_image(self) -> String {
        format!("assets/tiles/{}.png", self.as_str())
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── NeighborhoodType ──────────────────────────────────────────────────────────

/// What stands on a NEIGHBORHOOD tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborhoodType {
    House,
    Parking,
    Park,
    Shop,
    Gas,
    Office,
    Factory,
    Garage,
}

impl NeighborhoodType {
    pub const ALL: [NeighborhoodType; 8] = [
        NeighborhoodType::House,
        NeighborhoodType::Parking,
        NeighborhoodType::Park,
        NeighborhoodType::Shop,
        NeighborhoodType::Gas,
        NeighborhoodType::Office,
        NeighborhoodType::Factory,
        NeighborhoodType::Garage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NeighborhoodType::House   => "house",
            NeighborhoodType::Parking => "parking",
            NeighborhoodType::Park    => "park",
            NeighborhoodType::Shop    => "shop",
            NeighborhoodType::Gas     => "gas",
            NeighborhoodType::Office  => "office",
            NeighborhoodType::Factory => "factory",
            NeighborhoodType::Garage  => "garage",
        }
    }

    /// Number of sprite variants available for this type.
    pub fn variant_count(self) -> u8 {
        match self {
            NeighborhoodType::House   => 7,
            NeighborhoodType::Parking => 3,
            NeighborhoodType::Park    => 3,
            NeighborhoodType::Factory => 2,
            NeighborhoodType::Shop
            | NeighborhoodType::Gas
            | NeighborhoodType::Office
            | NeighborhoodType::Garage => 1,
        }
    }

    /// Object sprite drawn on top of the tile.
    pub fn object_image(self, variant: u8) -> String {
        format!("assets/objects/{}-{}.png", self.as_str(), variant)
    }

    /// High-rise houses hide the roads behind them from the player.
    #[inline]
    pub fn is_high_rise(self, variant: u8) -> bool {
        self == NeighborhoodType::House && matches!(variant, 1 | 3 | 5)
    }
}

impl std::fmt::Display for NeighborhoodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tile ──────────────────────────────────────────────────────────────────────

/// Type-specific tile data.
///
/// `possible_directions` is empty unless the tile is a ROAD whose metadata
/// has been filled in.  `neighborhood_type`/`neighborhood_variant` are set
/// together, and only on NEIGHBORHOOD tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileProperties {
    #[serde(default)]
    pub possible_directions: DirectionSet,

    /// Sprite path drawn by the host renderer.
    pub image_src: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood_type: Option<NeighborhoodType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood_variant: Option<u8>,
}

/// One grid cell.
///
/// There is no way to change `tile_type` in place; replacing a tile goes
/// through [`TileGrid::set_tile`](crate::TileGrid::set_tile).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    tile_type: TileType,
    pub properties: TileProperties,
}

impl Tile {
    /// A plain tile of `tile_type` with its default sprite.
    ///
    /// For NEIGHBORHOOD tiles use [`Tile::neighborhood`] instead; a bare
    /// NEIGHBORHOOD tile built here carries no object and renders as the
    /// default neighborhood ground.
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            properties: TileProperties {
                possible_directions:  DirectionSet::EMPTY,
                image_src:            tile_type.default_image(),
                neighborhood_type:    None,
                neighborhood_variant: None,
            },
        }
    }

    /// A NEIGHBORHOOD tile holding `kind` drawn with sprite `variant`.
    pub fn neighborhood(kind: NeighborhoodType, variant: u8) -> Self {
        Self {
            tile_type: TileType::Neighborhood,
            properties: TileProperties {
                possible_directions:  DirectionSet::EMPTY,
                image_src:            kind.object_image(variant),
                neighborhood_type:    Some(kind),
                neighborhood_variant: Some(variant),
            },
        }
    }

    #[inline]
    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    #[inline]
    pub fn is(&self, tile_type: TileType) -> bool {
        self.tile_type == tile_type
    }

    #[inline]
    pub fn is_road(&self) -> bool {
        self.tile_type == TileType::Road
    }

    /// `(type, variant)` of the object on a NEIGHBORHOOD tile.
    pub fn neighborhood_kind(&self) -> Option<(NeighborhoodType, u8)> {
        match (self.properties.neighborhood_type, self.properties.neighborhood_variant) {
            (Some(kind), Some(variant)) => Some((kind, variant)),
            _ => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::new(TileType::Grass)
    }
}
