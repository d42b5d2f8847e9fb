//! Map and simulation configuration.
//!
//! # Map geometry
//!
//! The map is a square of `per_side × per_side` neighborhood cells, where
//! `per_side = ceil(sqrt(neighborhood_count))`.  Each cell is a block of
//! `neighborhood_size` tiles wrapped in a sidewalk ring and a road ring:
//!
//! ```text
//!   border | road | sidewalk | block | sidewalk | road | sidewalk | block | … | road | border
//! ```
//!
//! Adjacent cells share their road ring, so the cell pitch is
//! `neighborhood_size + 2 * sidewalk_size + road_size` and one extra road ring
//! closes the far edge:
//!
//!   grid_size = per_side * pitch + road_size + 2 * border_size

use crate::{CoreError, CoreResult};

// ── MapConfig ─────────────────────────────────────────────────────────────────

/// Procedural map layout parameters.  All values must be positive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MapConfig {
    pub neighborhood_count: u32,
    pub neighborhood_size:  u32,
    pub sidewalk_size:      u32,
    pub road_size:          u32,
    pub border_size:        u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            neighborhood_count: 16,
            neighborhood_size:  6,
            sidewalk_size:      1,
            road_size:          2,
            border_size:        3,
        }
    }
}

impl MapConfig {
    /// Largest grid side length `validate` accepts.
    pub const MAX_GRID_SIZE: u32 = 1 << 16;

    /// Reject zero-valued parameters and layouts whose grid side would
    /// exceed [`MapConfig::MAX_GRID_SIZE`].
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("neighborhood_count", self.neighborhood_count),
            ("neighborhood_size",  self.neighborhood_size),
            ("sidewalk_size",      self.sidewalk_size),
            ("road_size",          self.road_size),
            ("border_size",        self.border_size),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(CoreError::Config(format!("{name} must be positive")));
            }
        }
        match self.checked_grid_size_for(self.neighborhood_count) {
            Some(size) if size <= Self::MAX_GRID_SIZE => Ok(()),
            _ => Err(CoreError::Config(format!(
                "layout exceeds the maximum grid size of {}",
                Self::MAX_GRID_SIZE
            ))),
        }
    }

    /// Neighborhood cells along one side: `ceil(sqrt(count))`.
    pub fn neighborhoods_per_side(&self) -> u32 {
        per_side(self.neighborhood_count)
    }

    /// Distance between the origins of two adjacent neighborhood cells.
    #[inline]
    pub fn cell_pitch(&self) -> u32 {
        self.neighborhood_size
            .saturating_add(self.sidewalk_size.saturating_mul(2))
            .saturating_add(self.road_size)
    }

    /// Side length of the generated grid for the configured count.
    pub fn grid_size(&self) -> u32 {
        self.grid_size_for(self.neighborhood_count)
    }

    /// Side length of the grid generated for `neighborhood_count` cells.
    /// Saturates at `u32::MAX`; `validate` rejects such layouts.
    pub fn grid_size_for(&self, neighborhood_count: u32) -> u32 {
        self.checked_grid_size_for(neighborhood_count).unwrap_or(u32::MAX)
    }

    fn checked_grid_size_for(&self, neighborhood_count: u32) -> Option<u32> {
        let pitch = u64::from(self.neighborhood_size)
            + 2 * u64::from(self.sidewalk_size)
            + u64::from(self.road_size);
        let size = u64::from(per_side(neighborhood_count))
            .checked_mul(pitch)?
            .checked_add(u64::from(self.road_size))?
            .checked_add(2 * u64::from(self.border_size))?;
        u32::try_from(size).ok()
    }

    /// First block tile (top-left, inside the sidewalk) of cell `index`
    /// along one axis.  Negative indices address the border strip.
    #[inline]
    pub fn block_start(&self, index: i32) -> i32 {
        self.border_size as i32
            + index * self.cell_pitch() as i32
            + self.road_size as i32
            + self.sidewalk_size as i32
    }
}

/// Integer `ceil(sqrt(n))`.
fn per_side(n: u32) -> u32 {
    let n = u64::from(n);
    let mut side = (n as f64).sqrt() as u64;
    while side * side < n {
        side += 1;
    }
    while side > 0 && (side - 1) * (side - 1) >= n {
        side -= 1;
    }
    side as u32
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimConfig {
    /// Seed for the simulation RNG (map generation and trip endpoints).
    pub seed: u64,

    pub map: MapConfig,

    /// Stationary steps prepended to every trip path (vehicle idles before
    /// departing).
    pub from_idle_steps: usize,

    /// Stationary steps appended to every trip path (vehicle idles after
    /// arriving).
    pub to_idle_steps: usize,

    /// Attempts made by random trip creation before giving up.
    pub trip_retry_limit: u32,

    /// Rendering frames per second driven by the host.
    pub animation_ticks_per_sec: u32,

    /// Vehicle movement steps per second driven by the host.
    pub calculation_ticks_per_sec: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                      42,
            map:                       MapConfig::default(),
            from_idle_steps:           0,
            to_idle_steps:             0,
            trip_retry_limit:          10,
            animation_ticks_per_sec:   10,
            calculation_ticks_per_sec: 5,
        }
    }
}

impl SimConfig {
    /// Validate the map layout and the retry/tick parameters.
    pub fn validate(&self) -> CoreResult<()> {
        self.map.validate()?;
        if self.trip_retry_limit == 0 {
            return Err(CoreError::Config("trip_retry_limit must be positive".into()));
        }
        if self.animation_ticks_per_sec == 0 || self.calculation_ticks_per_sec == 0 {
            return Err(CoreError::Config("tick rates must be positive".into()));
        }
        Ok(())
    }
}
