//! One routed journey.

use cab_core::{CarKind, Direction, TilePos, TripId};
use cab_map::TileGrid;
use cab_route::{Path, PathOptions, RouteError, RouteResult, Router};

use crate::Car;

/// A `(from, to)` request bound to one routing call and one car.
#[derive(Clone, Debug)]
pub struct Trip {
    id:   TripId,
    from: TilePos,
    to:   TilePos,
    car:  Car,
}

impl Trip {
    /// Route `from → to` and put a car of `kind` on the result.
    ///
    /// An unreachable destination is an error; no trip exists without a
    /// route.
    pub fn new<R>(
        id: TripId,
        from: TilePos,
        to: TilePos,
        kind: CarKind,
        grid: &TileGrid,
        router: &R,
        options: &PathOptions,
    ) -> RouteResult<Self>
    where
        R: Router + ?Sized,
    {
        let path = router.route(grid, from, to, options)?;
        Self::with_path(id, from, to, kind, path)
    }

    /// Put a car of `kind` on an already computed `path`.
    pub fn with_path(
        id: TripId,
        from: TilePos,
        to: TilePos,
        kind: CarKind,
        path: Path,
    ) -> RouteResult<Self> {
        // Custom routers may signal failure with an empty path.
        if path.is_empty() {
            return Err(RouteError::NoRoute { from, to });
        }
        let mut car = Car::new(kind, from);
        car.set_path(path);
        Ok(Self { id, from, to, car })
    }

    /// Move the car one step unless it has arrived.
    pub fn advance(&mut self) {
        if !self.car.is_at_destination() {
            self.car.advance();
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.car.is_at_destination()
    }

    #[inline]
    pub fn id(&self) -> TripId {
        self.id
    }

    #[inline]
    pub fn from(&self) -> TilePos {
        self.from
    }

    #[inline]
    pub fn to(&self) -> TilePos {
        self.to
    }

    #[inline]
    pub fn car(&self) -> &Car {
        &self.car
    }

    #[inline]
    pub fn position(&self) -> TilePos {
        self.car.position()
    }

    #[inline]
    pub fn heading(&self) -> Direction {
        self.car.heading()
    }
}
