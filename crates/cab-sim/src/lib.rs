//! `cab-sim`: trips, cars, and the tick-driven simulation context.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`car`]      | `Car`: step cursor, heading, sprite                   |
//! | [`trip`]     | `Trip`: one routed journey                            |
//! | [`context`]  | `SimContext`, `VehicleView`                           |
//! | [`builder`]  | `SimBuilder`                                          |
//! | [`observer`] | `SimObserver`, `NoopObserver`                         |
//! | [`retry`]    | `with_retries` bounded retry                          |
//! | [`error`]    | `SimError`, `SimResult<T>`                            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Enables `cab-route/parallel` for batch routing.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cab_core::{CarKind, SimConfig};
//! use cab_sim::{NoopObserver, SimBuilder};
//!
//! let mut ctx = SimBuilder::new(SimConfig::default()).build()?;
//! ctx.spawn_random_trip(CarKind::Taxi)?;
//! ctx.run_ticks(100, &mut NoopObserver);
//! ```

pub mod builder;
pub mod car;
pub mod context;
pub mod error;
pub mod observer;
pub mod retry;
pub mod trip;


pub use builder::SimBuilder;
pub use car::Car;
pub use context::{SimContext, VehicleView};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use retry::with_retries;
pub use trip::Trip;
