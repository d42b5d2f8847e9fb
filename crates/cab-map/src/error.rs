//! Map-subsystem error type.

use thiserror::Error;

use cab_core::{CoreError, TilePos};

/// Errors produced by `cab-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("tile {pos} is outside the {size}x{size} grid")]
    OutOfBounds { pos: TilePos, size: usize },

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("corrupt map snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MapResult<T> = Result<T, MapError>;
