//! A vehicle following a [`Path`].

use log::{debug, warn};

use cab_core::{CarKind, Direction, TilePos};
use cab_route::Path;

/// A car and its step cursor.
///
/// `position` is always the position of the step under the cursor once a
/// path is set.  `current_step` stays within `0..path.len()`; the last index
/// means the car has arrived.
#[derive(Clone, Debug)]
pub struct Car {
    kind:         CarKind,
    position:     TilePos,
    path:         Path,
    current_step: usize,
}

impl Car {
    /// A parked car at `position` with no route.
    pub fn new(kind: CarKind, position: TilePos) -> Self {
        Self { kind, position, path: Path::empty(), current_step: 0 }
    }

    /// Replace the route and rewind the cursor.
    pub fn set_path(&mut self, path: Path) {
        if let Some(first) = path.first() {
            self.position = first.pos;
        }
        self.path = path;
        self.current_step = 0;
    }

    /// Advance one step.  Returns `false` when already at the destination.
    pub fn advance(&mut self) -> bool {
        if self.is_at_destination() {
            return false;
        }
        self.current_step += 1;
        if let Some(step) = self.path.get(self.current_step) {
            self.position = step.pos;
        }
        true
    }

    /// `true` once the cursor is on the last step.  A car without a route is
    /// always at its destination.
    #[inline]
    pub fn is_at_destination(&self) -> bool {
        self.current_step + 1 >= self.path.len()
    }

    /// Direction the car is facing: the direction of the step under the
    /// cursor, or `Up` when that step has none.
    pub fn heading(&self) -> Direction {
        match self.path.get(self.current_step) {
            Some(step) => step.direction.unwrap_or_else(|| {
                warn!("car at {}: step {} has no direction, facing up", self.position, self.current_step);
                Direction::Up
            }),
            None => {
                debug!("car at {} has no route, facing up", self.position);
                Direction::Up
            }
        }
    }

    /// Sprite for the current heading.
    pub fn sprite(&self) -> String {
        self.kind.sprite(self.heading())
    }

    #[inline]
    pub fn kind(&self) -> CarKind {
        self.kind
    }

    #[inline]
    pub fn position(&self) -> TilePos {
        self.position
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn current_step(&self) -> usize {
        self.current_step
    }
}
