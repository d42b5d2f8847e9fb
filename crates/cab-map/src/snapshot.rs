//! Persisted map state.
//!
//! A [`MapSnapshot`] is the JSON document a host stores between sessions:
//!
//! ```json
//! { "size": 25, "map": [[{ "type": "grass", "properties": { ... } }, ...], ...],
//!   "roadTiles": [{ "x": 0, "y": 5 }, ...] }
//! ```
//!
//! `map` is indexed `[y][x]`.  On restore the road list is reconciled with
//! the tiles: listed coordinates that are not ROAD are dropped and ROAD
//! tiles missing from the list are added.

use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

use cab_core::TilePos;

use crate::{MapError, MapResult, Tile, TileGrid};

/// Serializable form of a [`TileGrid`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSnapshot {
    pub size:       usize,
    pub map:        Vec<Vec<Tile>>,
    pub road_tiles: Vec<TilePos>,
}

impl MapSnapshot {
    pub fn to_json(&self) -> MapResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> MapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TileGrid {
    /// Copy the grid into its persisted form.
    pub fn to_snapshot(&self) -> MapSnapshot {
        let map = (0..self.size())
            .filter_map(|y| self.row(y).map(<[Tile]>::to_vec))
            .collect();
        MapSnapshot {
            size: self.size(),
            map,
            road_tiles: self.road_tiles().iter().copied().collect(),
        }
    }

    /// Rebuild a grid from a snapshot.
    ///
    /// Fails with [`MapError::CorruptSnapshot`] when the tile rows do not
    /// form a `size × size` square.  A road list that disagrees with the
    /// tiles is repaired and logged, not rejected.
    pub fn from_snapshot(snapshot: MapSnapshot) -> MapResult<Self> {
        let MapSnapshot { size, map, road_tiles } = snapshot;
        if map.len() != size {
            return Err(MapError::CorruptSnapshot(format!(
                "expected {size} rows, found {}",
                map.len()
            )));
        }
        if let Some((y, row)) = map.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(MapError::CorruptSnapshot(format!(
                "row {y} has {} tiles, expected {size}",
                row.len()
            )));
        }

        let tiles: Vec<Tile> = map.into_iter().flatten().collect();
        let listed: BTreeSet<TilePos> = road_tiles.into_iter().collect();
        let mut grid = TileGrid::from_parts(size, tiles, listed);

        let listed_count = grid.road_tiles().len();
        let stale = grid.rebuild_road_index();
        let added = grid.road_tiles().len() + stale - listed_count;
        if stale > 0 || added > 0 {
            warn!(
                "map snapshot: road list out of sync with tiles \
                 ({stale} non-road entries dropped, {added} roads added)"
            );
        }
        Ok(grid)
    }

    pub fn to_json(&self) -> MapResult<String> {
        self.to_snapshot().to_json()
    }

    pub fn from_json(json: &str) -> MapResult<Self> {
        Self::from_snapshot(MapSnapshot::from_json(json)?)
    }
}
