use thiserror::Error;

use cab_core::CoreError;
use cab_map::MapError;
use cab_route::RouteError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("routing error: {0}")]
    Route(#[from] RouteError),

    #[error("no route found after {attempts} attempts")]
    NoRouteFound { attempts: u32 },

    #[error("the map has no road tiles")]
    NoRoads,
}

pub type SimResult<T> = Result<T, SimError>;
