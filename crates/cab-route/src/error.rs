//! Routing error type.

use thiserror::Error;

use cab_core::TilePos;

/// Errors produced by `cab-route`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: TilePos, to: TilePos },
}

pub type RouteResult<T> = Result<T, RouteError>;
