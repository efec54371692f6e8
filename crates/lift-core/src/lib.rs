//! `lift-core`: foundational types for the `rust_lift` elevator simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PassengerId`, `Floor`                                |
//! | [`time`]        | `Tick`                                                |
//! | [`direction`]   | `Direction` (`Neutral`, `Up`, `Down`)                 |
//! | [`config`]      | `SimConfig`, `Timing`                                 |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `LiftError`, `LiftResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, Timing};
pub use direction::Direction;
pub use error::{LiftError, LiftResult};
pub use ids::{Floor, PassengerId};
pub use rng::SimRng;
pub use time::Tick;
