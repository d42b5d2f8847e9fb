//! `cab-route`: direction-aware routing over the road grid.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`path`]   | `Path`, `PathStep`, `PathOptions` (idle padding)       |
//! | [`router`] | `Router` trait, `AStarRouter`, `route_many`            |
//! | [`error`]  | `RouteError`, `RouteResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | `route_many` runs on the Rayon thread pool.          |

pub mod error;
pub mod path;
pub mod router;


pub use error::{RouteError, RouteResult};
pub use path::{Path, PathOptions, PathStep};
pub use router::{route_many, AStarRouter, Router};
