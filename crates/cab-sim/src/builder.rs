//! Fluent builder for constructing a [`SimContext`].

use log::{info, warn};

use cab_core::{SimConfig, SimRng};
use cab_map::{DirectionMatcher, MapGenerator, TileGrid};
use cab_route::{AStarRouter, Router};

use crate::{SimContext, SimResult};

/// Stream offset for map generation.  The map draws from its own child
/// stream so trip randomness is the same whether the map was generated or
/// restored.
const MAP_STREAM: u64 = 1;

/// Fluent builder for [`SimContext<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                            |
/// |------------------------|------------------------------------|
/// | `.router(r)`           | [`AStarRouter`]                    |
/// | `.direction_rules(m)`  | [`DirectionMatcher::directions`]   |
/// | `.restore_json(s)`     | Generate a fresh map from the seed |
///
/// # Example
///
/// ```rust,ignore
/// let mut ctx = SimBuilder::new(SimConfig::default())
///     .restore_json(saved)
///     .build()?;
/// ctx.spawn_random_trip(CarKind::Private)?;
/// ctx.calculation_tick(&mut NoopObserver);
/// ```
pub struct SimBuilder<R: Router = AStarRouter> {
    config:  SimConfig,
    router:  R,
    rules:   Option<DirectionMatcher>,
    restore: Option<String>,
}

impl SimBuilder<AStarRouter> {
    pub fn new(config: SimConfig) -> Self {
        Self { config, router: AStarRouter, rules: None, restore: None }
    }
}

impl<R: Router> SimBuilder<R> {
    /// Replace the routing engine.
    pub fn router<R2: Router>(self, router: R2) -> SimBuilder<R2> {
        SimBuilder {
            config:  self.config,
            router,
            rules:   self.rules,
            restore: self.restore,
        }
    }

    /// Replace the direction rule table used to annotate roads.
    pub fn direction_rules(mut self, rules: DirectionMatcher) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Restore the map from a saved snapshot instead of generating one.
    ///
    /// A snapshot that fails to parse or validate is not an error: `build`
    /// logs it and generates a fresh map.
    pub fn restore_json(mut self, json: impl Into<String>) -> Self {
        self.restore = Some(json.into());
        self
    }

    /// Validate the config, obtain the map, annotate its roads, and return a
    /// ready-to-run [`SimContext`].
    pub fn build(self) -> SimResult<SimContext<R>> {
        self.config.validate()?;
        let rules = self.rules.unwrap_or_else(DirectionMatcher::directions);
        let generator = MapGenerator::new(self.config.map.clone(), rules)?;
        let mut rng = SimRng::new(self.config.seed);
        let mut map_rng = rng.child(MAP_STREAM);

        let restored = self.restore.and_then(|json| match TileGrid::from_json(&json) {
            Ok(grid) => {
                info!("restored {0}x{0} map from snapshot", grid.size());
                Some(grid)
            }
            Err(e) => {
                warn!("discarding saved map ({e}), generating a fresh one");
                None
            }
        });
        let mut grid = match restored {
            Some(grid) => grid,
            None => generator.generate_base_map(self.config.map.neighborhood_count, &mut map_rng),
        };
        generator.fill_map_metadata(&mut grid);

        Ok(SimContext::new(self.config, grid, rng, self.router))
    }
}
