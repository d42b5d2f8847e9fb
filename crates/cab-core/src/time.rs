//! Simulation time model.
//!
//! The game is driven by two external timers: a fast animation tick
//! (rendering only) and a slower calculation tick that advances vehicles.
//! Only the calculation tick is counted here; `Tick` is a monotonically
//! increasing counter of calculation ticks since the context was built.

use std::fmt;

/// An absolute calculation-tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
