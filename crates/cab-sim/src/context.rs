//! The simulation context: one map, its active trips, and the RNG.
//!
//! # Calculation tick
//!
//! ```text
//! on_tick_start(t)
//! on_trip_started(t, id)   for trips spawned since the last tick
//! advance every trip one step
//! drop finished trips      on_trip_finished(t, id) for each
//! on_tick_end(t, active)
//! t += 1
//! ```
//!
//! Every failure path leaves the context usable: a spawn that finds no route
//! schedules nothing, and a tick never fails.

use serde::Serialize;

use cab_core::{CarKind, Direction, SimConfig, SimRng, Tick, TilePos, TripId};
use cab_map::{MapGenerator, MapSnapshot, TileGrid};
use cab_route::{route_many, AStarRouter, PathOptions, RouteError, Router};

use crate::retry::with_retries;
use crate::{SimError, SimObserver, SimResult, Trip};

// ── VehicleView ───────────────────────────────────────────────────────────────

/// What the host renderer needs to draw one car.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    pub trip:           TripId,
    pub position:       TilePos,
    pub heading:        Direction,
    pub at_destination: bool,
    pub sprite:         String,
}

// ── SimContext ────────────────────────────────────────────────────────────────

/// Owns the [`TileGrid`], the active [`Trip`]s, and the [`SimRng`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct SimContext<R: Router = AStarRouter> {
    config:        SimConfig,
    grid:          TileGrid,
    trips:         Vec<Trip>,
    rng:           SimRng,
    router:        R,
    options:       PathOptions,
    tick:          Tick,
    next_trip_id:  TripId,
    /// Spawned since the last tick; reported through `on_trip_started`.
    started:       Vec<TripId>,
    /// Cached at build time; the grid does not change afterwards.
    visible_roads: Vec<TilePos>,
}

impl<R: Router> SimContext<R> {
    pub(crate) fn new(config: SimConfig, grid: TileGrid, rng: SimRng, router: R) -> Self {
        let visible_roads = grid.visible_roads();
        let options = PathOptions::from(&config);
        Self {
            config,
            grid,
            trips: Vec::new(),
            rng,
            router,
            options,
            tick: Tick::ZERO,
            next_trip_id: TripId(0),
            started: Vec::new(),
            visible_roads,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[inline]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id() == id)
    }

    #[inline]
    pub fn router(&self) -> &R {
        &self.router
    }

    /// The next calculation tick to run.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    // ── Trip creation ─────────────────────────────────────────────────────

    /// Route `from → to` and schedule a car on it.
    ///
    /// With no route nothing is scheduled and the routing error is returned.
    pub fn spawn_trip(&mut self, from: TilePos, to: TilePos, kind: CarKind) -> SimResult<TripId> {
        let trip = Trip::new(self.next_trip_id, from, to, kind, &self.grid, &self.router, &self.options)?;
        Ok(self.schedule(trip))
    }

    /// Route a batch of requests at once and schedule every success.
    ///
    /// Results are in request order.  With the `parallel` feature the
    /// routing runs on Rayon's thread pool; trips are scheduled afterwards
    /// in request order, so ids do not depend on thread timing.
    pub fn spawn_trips(
        &mut self,
        requests: &[(TilePos, TilePos)],
        kind: CarKind,
    ) -> Vec<SimResult<TripId>> {
        let paths = route_many(&self.router, &self.grid, requests, &self.options);
        paths
            .into_iter()
            .zip(requests)
            .map(|(routed, &(from, to))| {
                let trip = Trip::with_path(self.next_trip_id, from, to, kind, routed?)?;
                Ok(self.schedule(trip))
            })
            .collect()
    }

    fn schedule(&mut self, trip: Trip) -> TripId {
        let id = trip.id();
        self.next_trip_id = id.next();
        self.trips.push(trip);
        self.started.push(id);
        id
    }

    /// Trip between two distinct random roads, preferring roads not hidden
    /// behind high-rises.  Retries up to `trip_retry_limit` endpoint pairs; a
    /// pair that draws the same tile twice counts as a failed attempt.
    pub fn spawn_random_trip(&mut self, kind: CarKind) -> SimResult<TripId> {
        if self.grid.road_tiles().is_empty() {
            return Err(SimError::NoRoads);
        }
        let limit = self.config.trip_retry_limit;
        with_retries(limit, |_| {
            let from = self.random_endpoint()?;
            let to = self.random_endpoint()?;
            if from == to {
                return Err(SimError::Route(RouteError::NoRoute { from, to }));
            }
            self.spawn_trip(from, to, kind)
        })
    }

    /// Trip from the road nearest `pos` to the road nearest a random tile;
    /// what a click on the map does.  Retries the destination up to
    /// `trip_retry_limit` times.
    pub fn spawn_trip_near(&mut self, pos: TilePos, kind: CarKind) -> SimResult<TripId> {
        let from = MapGenerator::find_nearest_road(&self.grid, pos).ok_or(SimError::NoRoads)?;
        let limit = self.config.trip_retry_limit;
        with_retries(limit, |_| {
            let size = self.grid.size() as i32;
            let target = TilePos::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            let to = MapGenerator::find_nearest_road(&self.grid, target).ok_or(SimError::NoRoads)?;
            self.spawn_trip(from, to, kind)
        })
    }

    /// Remove a trip without finishing it.  Returns `false` if `id` is not
    /// active.
    pub fn cancel_trip(&mut self, id: TripId) -> bool {
        let before = self.trips.len();
        self.trips.retain(|t| t.id() != id);
        self.started.retain(|&s| s != id);
        self.trips.len() != before
    }

    fn random_endpoint(&mut self) -> SimResult<TilePos> {
        let pick = if self.visible_roads.is_empty() {
            self.rng.choose_iter(self.grid.road_tiles().iter()).copied()
        } else {
            self.rng.choose(&self.visible_roads).copied()
        };
        pick.ok_or(SimError::NoRoads)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Move every trip one step and retire the ones that arrived.
    pub fn calculation_tick<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.tick;
        observer.on_tick_start(now);
        for id in self.started.drain(..) {
            observer.on_trip_started(now, id);
        }

        for trip in &mut self.trips {
            trip.advance();
        }
        self.trips.retain(|trip| {
            let finished = trip.is_finished();
            if finished {
                observer.on_trip_finished(now, trip.id());
            }
            !finished
        });

        observer.on_tick_end(now, self.trips.len());
        self.tick = now + 1;
    }

    /// Run `n` calculation ticks.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.calculation_tick(observer);
        }
    }

    // ── Host queries ──────────────────────────────────────────────────────

    /// One view per active trip, in spawn order.
    pub fn vehicles(&self) -> Vec<VehicleView> {
        self.trips
            .iter()
            .map(|trip| {
                let car = trip.car();
                VehicleView {
                    trip:           trip.id(),
                    position:       car.position(),
                    heading:        car.heading(),
                    at_destination: car.is_at_destination(),
                    sprite:         car.sprite(),
                }
            })
            .collect()
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// The map in persisted form.  Trips are not persisted.
    pub fn snapshot(&self) -> MapSnapshot {
        self.grid.to_snapshot()
    }

    pub fn save_json(&self) -> SimResult<String> {
        Ok(self.grid.to_json()?)
    }
}
