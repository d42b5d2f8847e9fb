//! Bounded retry for randomized operations.

use log::debug;

use crate::{SimError, SimResult};

/// Call `attempt` with attempt numbers `1..=limit` until it succeeds.
///
/// Routing failures are retried; any other error is returned immediately.
/// Exhausting the budget yields [`SimError::NoRouteFound`].
pub fn with_retries<T, F>(limit: u32, mut attempt: F) -> SimResult<T>
where
    F: FnMut(u32) -> SimResult<T>,
{
    for n in 1..=limit {
        match attempt(n) {
            Ok(value) => return Ok(value),
            Err(SimError::Route(e)) => debug!("attempt {n}/{limit} failed: {e}"),
            Err(other) => return Err(other),
        }
    }
    Err(SimError::NoRouteFound { attempts: limit })
}
