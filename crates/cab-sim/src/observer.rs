//! Simulation observer trait for host callbacks.

use cab_core::{Tick, TripId};

/// Callbacks invoked by
/// [`SimContext::calculation_tick`][crate::SimContext::calculation_tick].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: arrival counter
///
/// ```rust,ignore
/// struct Arrivals(usize);
///
/// impl SimObserver for Arrivals {
///     fn on_trip_finished(&mut self, _tick: Tick, _trip: TripId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each calculation tick, before any movement.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per trip spawned since the previous tick, at the start
    /// of the tick that first moves it.
    fn on_trip_started(&mut self, _tick: Tick, _trip: TripId) {}

    /// Called when a trip reaches its destination and is removed.
    fn on_trip_finished(&mut self, _tick: Tick, _trip: TripId) {}

    /// Called at the end of each tick with the number of trips still active.
    fn on_tick_end(&mut self, _tick: Tick, _active_trips: usize) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
