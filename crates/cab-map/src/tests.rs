//! Unit tests for cab-map.

#[cfg(test)]
mod helpers {
    use cab_core::TilePos;

    use crate::{NeighborhoodType, Tile, TileGrid, TileType};

    /// Build a square grid from rows of `.` grass, `R` road, `S` sidewalk,
    /// `N` nothing, `H` high-rise house.
    pub fn grid_from(rows: &[&str]) -> TileGrid {
        let size = rows.len();
        let mut grid = TileGrid::new(size);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "row {y} must be {size} wide");
            for (x, c) in row.chars().enumerate() {
                let tile = match c {
                    'R' => Tile::new(TileType::Road),
                    'S' => Tile::new(TileType::Sidewalk),
                    'N' => Tile::new(TileType::Nothing),
                    'H' => Tile::neighborhood(NeighborhoodType::House, 1),
                    _ => continue,
                };
                grid.set_tile(TilePos::new(x as i32, y as i32), tile).unwrap();
            }
        }
        grid
    }

    /// A horizontal two-lane road across rows 2 and 3 of a 6×6 grid.
    pub fn horizontal_road() -> TileGrid {
        grid_from(&["......", "......", "RRRRRR", "RRRRRR", "......", "......"])
    }
}

#[cfg(test)]
mod grid {
    use cab_core::{SimRng, TilePos};

    use super::helpers::{grid_from, horizontal_road};
    use crate::{MapError, Tile, TileGrid, TileType};

    #[test]
    fn new_grid_is_grass_without_roads() {
        let grid = TileGrid::new(4);
        assert_eq!(grid.size(), 4);
        assert!(grid.iter().all(|(_, t)| t.is(TileType::Grass)));
        assert!(grid.road_tiles().is_empty());
        assert_eq!(grid.iter().count(), 16);
    }

    #[test]
    fn out_of_bounds_access() {
        let mut grid = TileGrid::new(3);
        assert!(grid.tile(TilePos::new(-1, 0)).is_none());
        assert!(grid.tile(TilePos::new(0, 3)).is_none());
        assert!(!grid.is_road(TilePos::new(5, 5)));
        let err = grid.set_tile(TilePos::new(3, 0), Tile::new(TileType::Road)).unwrap_err();
        assert!(matches!(err, MapError::OutOfBounds { size: 3, .. }));
        assert!(grid.road_tiles().is_empty());
    }

    #[test]
    fn set_tile_indexes_roads_and_rebuild_prunes() {
        let mut grid = horizontal_road();
        assert_eq!(grid.road_tiles().len(), 12);

        let pos = TilePos::new(0, 2);
        grid.set_tile(pos, Tile::new(TileType::Sidewalk)).unwrap();
        // Overwriting leaves a stale entry until the index is rebuilt.
        assert!(grid.road_tiles().contains(&pos));
        assert_eq!(grid.rebuild_road_index(), 1);
        assert!(!grid.road_tiles().contains(&pos));
        assert_eq!(grid.road_tiles().len(), 11);
    }

    #[test]
    fn row_view_matches_tile_access() {
        let grid = horizontal_road();
        let row = grid.row(2).unwrap();
        assert!(row.iter().all(Tile::is_road));
        assert!(grid.row(6).is_none());
    }

    #[test]
    fn random_road_tile_is_seeded() {
        let grid = horizontal_road();
        let a = grid.random_road_tile(&mut SimRng::new(9)).unwrap();
        let b = grid.random_road_tile(&mut SimRng::new(9)).unwrap();
        assert_eq!(a, b);
        assert!(grid.is_road(a));
        assert!(TileGrid::new(2).random_road_tile(&mut SimRng::new(9)).is_none());
    }

    #[test]
    fn high_rise_occludes_roads_behind_it() {
        let grid = grid_from(&[
            "R.....",
            ".R....",
            "......",
            "......",
            "...H..",
            "......",
        ]);
        // House at (3,4) sits at shift (2,3) from (1,1).
        let hidden = grid.occluded_roads();
        assert!(hidden.contains(&TilePos::new(1, 1)));
        assert!(!hidden.contains(&TilePos::new(0, 0)));
        assert_eq!(grid.visible_roads(), vec![TilePos::new(0, 0)]);
    }
}

#[cfg(test)]
mod pattern {
    use cab_core::TilePos;

    use super::helpers::horizontal_road;
    use crate::{DirectionMatcher, PatternMatcher, PatternRule, TilePredicate, TileType};

    #[test]
    fn first_matching_rule_wins() {
        let matcher = PatternMatcher::new(vec![
            PatternRule::new("first").at(0, 0, TilePredicate::Is(TileType::Road)),
            PatternRule::new("second").at(0, 0, TilePredicate::Is(TileType::Road)),
            PatternRule::new("fallback"),
        ]);
        let grid = horizontal_road();
        assert_eq!(matcher.classify(&grid, TilePos::new(1, 2)), Some(&"first"));
        assert_eq!(matcher.matching_rule(&grid, TilePos::new(1, 2)), Some(0));
        assert_eq!(matcher.classify(&grid, TilePos::new(1, 0)), Some(&"fallback"));
    }

    #[test]
    fn no_match_is_none() {
        let matcher = PatternMatcher::new(vec![
            PatternRule::new(1).at(0, 0, TilePredicate::Is(TileType::Sidewalk)),
        ]);
        assert_eq!(matcher.classify(&horizontal_road(), TilePos::new(0, 0)), None);
    }

    #[test]
    fn out_of_grid_neighbors_are_not_anything() {
        let grid = horizontal_road();
        let is_road = PatternMatcher::new(vec![
            PatternRule::new(()).at(-1, 0, TilePredicate::Is(TileType::Road)),
        ]);
        let not_road = PatternMatcher::new(vec![
            PatternRule::new(()).at(-1, 0, TilePredicate::IsNot(TileType::Road)),
        ]);
        let edge = TilePos::new(0, 2);
        assert!(is_road.classify(&grid, edge).is_none());
        assert!(not_road.classify(&grid, edge).is_some());
    }

    #[test]
    fn classification_is_pure() {
        let grid = horizontal_road();
        let before = grid.clone();
        let matcher = DirectionMatcher::directions();
        let a = matcher.directions_at(&grid, TilePos::new(2, 2));
        let b = matcher.directions_at(&grid, TilePos::new(2, 2));
        assert_eq!(a, b);
        assert_eq!(grid, before);
    }

    #[test]
    fn rules_round_trip_through_json() {
        let matcher = DirectionMatcher::directions();
        let json = serde_json::to_string(&matcher).unwrap();
        let back: DirectionMatcher = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matcher);
        assert_eq!(back.rules().len(), 13);
        assert!(back.rules()[0].offsets.iter().any(|o| o.dx == -1 && o.dy == -1));
    }
}

#[cfg(test)]
mod rules {
    use cab_core::{Direction, DirectionSet, TilePos};

    use super::helpers::{grid_from, horizontal_road};
    use crate::DirectionMatcher;

    use Direction::{Down, Left, Right, Up};

    fn dirs_at(grid: &crate::TileGrid, x: i32, y: i32) -> DirectionSet {
        DirectionMatcher::directions().directions_at(grid, TilePos::new(x, y))
    }

    #[test]
    fn horizontal_lanes_flow_right_hand() {
        let grid = horizontal_road();
        // Top lane flows left, bottom lane flows right.
        assert_eq!(dirs_at(&grid, 2, 2), DirectionSet::of(&[Left, Up]));
        assert_eq!(dirs_at(&grid, 2, 3), DirectionSet::of(&[Right, Down]));
    }

    #[test]
    fn vertical_lanes_flow_right_hand() {
        let grid = grid_from(&["..RR..", "..RR..", "..RR..", "..RR..", "..RR..", "..RR.."]);
        // Left lane flows down, right lane flows up.
        assert_eq!(dirs_at(&grid, 2, 2), DirectionSet::of(&[Down, Left]));
        assert_eq!(dirs_at(&grid, 3, 2), DirectionSet::of(&[Up, Right]));
    }

    #[test]
    fn map_edge_counts_as_not_road() {
        let grid = horizontal_road();
        // (0,2): up is grass, left is off the map.
        assert_eq!(dirs_at(&grid, 0, 2), DirectionSet::of(&[Down, Left]));
        // (5,3): down is grass, right is off the map.
        assert_eq!(dirs_at(&grid, 5, 3), DirectionSet::of(&[Right, Up]));
    }

    #[test]
    fn single_lane_crossing_takes_first_quadrant_rule() {
        let grid = grid_from(&["..R..", "..R..", "RRRRR", "..R..", "..R.."]);
        assert_eq!(dirs_at(&grid, 2, 2), DirectionSet::of(&[Down, Left]));
        assert_eq!(dirs_at(&grid, 1, 2), DirectionSet::ALL);
        assert_eq!(dirs_at(&grid, 2, 3), DirectionSet::ALL);
    }

    #[test]
    fn crossing_quadrants() {
        let grid = grid_from(&["..RR..", "..RR..", "RRRRRR", "RRRRRR", "..RR..", "..RR.."]);
        assert_eq!(dirs_at(&grid, 2, 2), DirectionSet::of(&[Down, Left]));
        assert_eq!(dirs_at(&grid, 3, 2), DirectionSet::of(&[Up, Left]));
        assert_eq!(dirs_at(&grid, 2, 3), DirectionSet::of(&[Down, Right]));
        assert_eq!(dirs_at(&grid, 3, 3), DirectionSet::of(&[Up, Right]));
    }

    #[test]
    fn isolated_road_is_fully_open() {
        let grid = grid_from(&["...", ".R.", "..."]);
        assert_eq!(dirs_at(&grid, 1, 1), DirectionSet::ALL);
    }

    #[test]
    fn non_road_tiles_have_no_directions() {
        let grid = horizontal_road();
        assert!(dirs_at(&grid, 0, 0).is_empty());
    }
}

#[cfg(test)]
mod generator {
    use cab_core::{MapConfig, SimRng, TilePos};

    use crate::{MapGenerator, NeighborhoodType, TileGrid, TileType};

    fn generator() -> MapGenerator {
        MapGenerator::with_default_rules(MapConfig::default()).unwrap()
    }

    fn count_kind(grid: &TileGrid, kind: NeighborhoodType) -> usize {
        grid.iter()
            .filter(|(_, t)| t.neighborhood_kind().is_some_and(|(k, _)| k == kind))
            .count()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = MapConfig { road_size: 0, ..MapConfig::default() };
        assert!(MapGenerator::with_default_rules(config).is_err());
    }

    #[test]
    fn grid_size_follows_layout_formula() {
        let generator = generator();
        let cfg = generator.config();
        for count in 1..=20 {
            let grid = generator.generate_base_map(count, &mut SimRng::new(1));
            assert_eq!(grid.size() as u32, cfg.grid_size_for(count), "count {count}");
        }
        let grid = generator.generate_base_map(16, &mut SimRng::new(1));
        assert_eq!(grid.size(), 48);
    }

    #[test]
    fn single_neighborhood_layout() {
        let grid = generator().generate_base_map(1, &mut SimRng::new(3));
        assert_eq!(grid.size(), 18);
        // Block spans 6..12; sidewalk ring at 5 and 12; roads at 3,4 and 13,14.
        assert!(grid.tile(TilePos::new(5, 5)).unwrap().is(TileType::Sidewalk));
        assert!(grid.tile(TilePos::new(12, 9)).unwrap().is(TileType::Sidewalk));
        for p in [(3, 3), (4, 4), (13, 13), (14, 14), (3, 9), (14, 9), (9, 3), (9, 14)] {
            assert!(grid.is_road(TilePos::new(p.0, p.1)), "{p:?}");
        }
        assert!(grid.tile(TilePos::new(2, 2)).unwrap().is(TileType::Grass));
        assert!(grid.tile(TilePos::new(15, 15)).unwrap().is(TileType::Grass));
        // Block tiles are never road or sidewalk.
        for y in 6..12 {
            for x in 6..12 {
                let t = grid.tile(TilePos::new(x, y)).unwrap();
                assert!(t.is(TileType::Nothing) || t.is(TileType::Neighborhood));
            }
        }
    }

    #[test]
    fn zero_neighborhoods_is_empty_grass() {
        let grid = generator().generate_base_map(0, &mut SimRng::new(3));
        assert_eq!(grid.size(), 8);
        assert!(grid.iter().all(|(_, t)| t.is(TileType::Grass)));
        assert!(grid.road_tiles().is_empty());
    }

    #[test]
    fn random_fill_uses_even_subgrid_and_catalogue() {
        let generator = generator();
        let cfg = generator.config().clone();
        let grid = generator.generate_base_map(400, &mut SimRng::new(9));
        let n = cfg.neighborhood_size as i32;

        // Special placements and park lines reach no further than cell 4.
        let (mut seeded, mut filled) = (0usize, 0usize);
        let mut counts = [0usize; 3];
        for ny in 5..20 {
            for nx in 5..20 {
                let origin = TilePos::new(cfg.block_start(nx), cfg.block_start(ny));
                for y in 0..n {
                    for x in 0..n {
                        let tile = grid.tile(origin.offset(x, y)).unwrap();
                        if x % 2 == 1 || y % 2 == 1 {
                            assert!(tile.is(TileType::Nothing), "odd offset ({x},{y}) in cell ({nx},{ny})");
                            continue;
                        }
                        seeded += 1;
                        let Some((kind, variant)) = tile.neighborhood_kind() else {
                            assert!(tile.is(TileType::Nothing));
                            continue;
                        };
                        filled += 1;
                        assert!(variant < kind.variant_count(), "{kind} variant {variant}");
                        match kind {
                            NeighborhoodType::House => counts[0] += 1,
                            NeighborhoodType::Parking => counts[1] += 1,
                            NeighborhoodType::Park => {
                                assert!(variant < 2, "random park variant {variant}");
                                counts[2] += 1;
                            }
                            other => panic!("{other} is not a random fill type"),
                        }
                    }
                }
            }
        }

        assert_eq!(seeded, 15 * 15 * 9);
        let rate = filled as f64 / seeded as f64;
        assert!((rate - 0.86).abs() < 0.03, "fill rate {rate}");
        let shares = counts.map(|c| c as f64 / filled as f64);
        for (share, expect) in shares.into_iter().zip([0.6, 0.3, 0.1]) {
            assert!((share - expect).abs() < 0.05, "share {share} vs {expect}");
        }
    }

    #[test]
    fn road_index_matches_tiles_after_generation() {
        let generator = generator();
        for count in [1, 2, 5, 9, 16] {
            let grid = generator.generate_base_map(count, &mut SimRng::new(count as u64));
            let actual: Vec<TilePos> = grid
                .iter()
                .filter(|(_, t)| t.is_road())
                .map(|(p, _)| p)
                .collect();
            let indexed: Vec<TilePos> = grid.road_tiles().iter().copied().collect();
            let mut actual_sorted = actual.clone();
            actual_sorted.sort();
            assert_eq!(indexed, actual_sorted, "count {count}");
            assert!(!indexed.is_empty());
        }
    }

    #[test]
    fn special_buildings_are_placed() {
        let cfg = MapConfig::default();
        let grid = generator().generate_base_map(16, &mut SimRng::new(5));
        for kind in [
            NeighborhoodType::Shop,
            NeighborhoodType::Gas,
            NeighborhoodType::Office,
            NeighborhoodType::Factory,
            NeighborhoodType::Garage,
        ] {
            assert!(count_kind(&grid, kind) >= 1, "{kind} missing");
        }
        // Garage at cell (2,2) inset (4,4).
        let garage = TilePos::new(cfg.block_start(2) + 2, cfg.block_start(2) + 2);
        let tile = grid.tile(garage).unwrap();
        assert_eq!(tile.neighborhood_kind(), Some((NeighborhoodType::Garage, 0)));
        // Decorative parks sit in the top border strip.
        let top_park = TilePos::new(cfg.block_start(0) + 6 - 4, cfg.block_start(-1) + 6 - 1);
        assert!(grid.tile(top_park).unwrap().neighborhood_kind().is_some());
    }

    #[test]
    fn small_maps_clamp_special_cells() {
        let generator = generator();
        for count in 1..=4 {
            let grid = generator.generate_base_map(count, &mut SimRng::new(11));
            assert!(count_kind(&grid, NeighborhoodType::Garage) >= 1, "count {count}");
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let generator = generator();
        let a = generator.generate(&mut SimRng::new(77));
        let b = generator.generate(&mut SimRng::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn metadata_fills_roads_and_objects() {
        let generator = generator();
        let mut grid = generator.generate_base_map(4, &mut SimRng::new(2));
        generator.fill_map_metadata(&mut grid);
        for (pos, tile) in grid.iter() {
            if tile.is_road() {
                assert!(!tile.properties.possible_directions.is_empty(), "road {pos}");
            } else {
                assert!(tile.properties.possible_directions.is_empty(), "{pos}");
            }
            if let Some((kind, variant)) = tile.neighborhood_kind() {
                assert_eq!(tile.properties.image_src, kind.object_image(variant));
            }
        }
    }

    #[test]
    fn metadata_is_idempotent() {
        let generator = generator();
        let mut once = generator.generate_base_map(4, &mut SimRng::new(2));
        generator.fill_map_metadata(&mut once);
        let mut twice = once.clone();
        generator.fill_map_metadata(&mut twice);
        assert_eq!(once, twice);
    }
}

#[cfg(test)]
mod nearest_road {
    use cab_core::{MapConfig, SimRng, TilePos};

    use super::helpers::grid_from;
    use crate::{MapGenerator, TileGrid};

    #[test]
    fn road_is_its_own_nearest() {
        let grid = grid_from(&["...", ".R.", "..."]);
        let pos = TilePos::new(1, 1);
        assert_eq!(MapGenerator::find_nearest_road(&grid, pos), Some(pos));
    }

    #[test]
    fn side_edges_scan_row_by_row() {
        // Left-edge road one row below, right-edge road one row above: the
        // right one is met first because rows are scanned top to bottom.
        let grid = grid_from(&[
            ".......",
            ".......",
            ".....R.",
            ".......",
            ".R.....",
            ".......",
            ".......",
        ]);
        let found = MapGenerator::find_nearest_road(&grid, TilePos::new(3, 3));
        assert_eq!(found, Some(TilePos::new(5, 2)));
    }

    #[test]
    fn side_edges_before_top_and_bottom() {
        let grid = grid_from(&[
            ".......",
            "...R...",
            ".......",
            ".......",
            ".......",
            ".R.....",
            ".......",
        ]);
        let found = MapGenerator::find_nearest_road(&grid, TilePos::new(3, 3));
        assert_eq!(found, Some(TilePos::new(1, 5)));
    }

    #[test]
    fn closer_ring_wins() {
        let grid = grid_from(&[
            "R......",
            ".......",
            ".......",
            "....R..",
            ".......",
            ".......",
            ".......",
        ]);
        let found = MapGenerator::find_nearest_road(&grid, TilePos::new(3, 3));
        assert_eq!(found, Some(TilePos::new(4, 3)));
    }

    #[test]
    fn no_road_is_none() {
        assert_eq!(MapGenerator::find_nearest_road(&TileGrid::new(5), TilePos::new(2, 2)), None);
    }

    #[test]
    fn every_block_tile_reaches_a_road() {
        let generator = MapGenerator::with_default_rules(MapConfig::default()).unwrap();
        let grid = generator.generate_base_map(4, &mut SimRng::new(8));
        for (pos, _) in grid.iter() {
            let road = MapGenerator::find_nearest_road(&grid, pos).unwrap();
            assert!(grid.is_road(road));
        }
    }
}

#[cfg(test)]
mod snapshot {
    use cab_core::{MapConfig, SimRng, TilePos};

    use super::helpers::horizontal_road;
    use crate::{MapError, MapGenerator, MapSnapshot, TileGrid};

    #[test]
    fn json_round_trip() {
        let generator = MapGenerator::with_default_rules(MapConfig::default()).unwrap();
        let grid = generator.generate(&mut SimRng::new(4));
        let json = grid.to_json().unwrap();
        let back = TileGrid::from_json(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn json_uses_host_field_names() {
        let json = horizontal_road().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["size"], 6);
        assert_eq!(value["map"][2][0]["type"], "road");
        assert!(value["map"][2][0]["properties"]["possibleDirections"].is_array());
        assert_eq!(value["roadTiles"][0]["x"], 0);
    }

    #[test]
    fn ragged_rows_are_corrupt() {
        let mut snapshot = horizontal_road().to_snapshot();
        snapshot.map[3].pop();
        let err = TileGrid::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, MapError::CorruptSnapshot(_)));
    }

    #[test]
    fn wrong_row_count_is_corrupt() {
        let mut snapshot = horizontal_road().to_snapshot();
        snapshot.size = 7;
        assert!(matches!(
            TileGrid::from_snapshot(snapshot),
            Err(MapError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(TileGrid::from_json("{\"size\": 2"), Err(MapError::Json(_))));
    }

    #[test]
    fn road_list_is_reconciled() {
        let mut snapshot = horizontal_road().to_snapshot();
        // A listed coordinate that is grass, and a road that is not listed.
        snapshot.road_tiles.push(TilePos::new(0, 0));
        snapshot.road_tiles.retain(|p| *p != TilePos::new(5, 3));
        let grid = TileGrid::from_snapshot(snapshot).unwrap();
        assert!(!grid.road_tiles().contains(&TilePos::new(0, 0)));
        assert!(grid.road_tiles().contains(&TilePos::new(5, 3)));
        assert_eq!(grid.road_tiles().len(), 12);
    }

    #[test]
    fn empty_snapshot_restores() {
        let snapshot = MapSnapshot { size: 0, map: Vec::new(), road_tiles: Vec::new() };
        let grid = TileGrid::from_snapshot(snapshot).unwrap();
        assert_eq!(grid.size(), 0);
    }
}

#[cfg(test)]
mod render {
    use cab_core::TilePos;

    use super::helpers::{grid_from, horizontal_road};
    use crate::{asset_manifest, tile_image, ImageMatcher};

    #[test]
    fn grass_is_checkered() {
        let grid = horizontal_road();
        let images = ImageMatcher::images();
        assert_eq!(tile_image(&images, &grid, TilePos::new(0, 0)), "assets/tiles/grass.png");
        assert_eq!(tile_image(&images, &grid, TilePos::new(1, 0)), "assets/tiles/grass-alt.png");
    }

    #[test]
    fn roads_use_lane_sprites() {
        let grid = horizontal_road();
        let images = ImageMatcher::images();
        assert_eq!(tile_image(&images, &grid, TilePos::new(2, 2)), "assets/tiles/road-top.png");
        assert_eq!(tile_image(&images, &grid, TilePos::new(2, 3)), "assets/tiles/road-bottom.png");
    }

    #[test]
    fn sidewalks_pick_edge_sprites_or_default() {
        let grid = grid_from(&["RRR", "SS.", "..S"]);
        let images = ImageMatcher::images();
        assert_eq!(tile_image(&images, &grid, TilePos::new(0, 1)), "assets/tiles/sidewalk-top.png");
        assert_eq!(tile_image(&images, &grid, TilePos::new(2, 2)), "assets/tiles/sidewalk.png");
    }

    #[test]
    fn manifest_is_sorted_and_complete() {
        let assets = asset_manifest();
        let mut sorted = assets.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(assets, sorted);
        for expected in [
            "assets/tiles/grass-alt.png",
            "assets/tiles/road-crossing-tl.png",
            "assets/objects/house-6.png",
            "assets/objects/garage-0.png",
            "assets/objects/taxi-car-left.png",
        ] {
            assert!(assets.iter().any(|a| a == expected), "{expected}");
        }
    }
}
