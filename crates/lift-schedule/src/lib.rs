//! `lift-schedule`: continuations, the event queue, and passenger manifests.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`continuation`] | `ElevatorStep`, `UserStep`, `Continuation`                 |
//! | [`event_queue`]  | `EventQueue` (`BTreeMap<Tick, VecDeque<Continuation>>`)    |
//! | [`manifest`]     | `Passenger`, `ManifestEntry`, `PassengerManifest`          |
//! | [`loader`]       | `load_manifest_csv`, `load_manifest_reader`                |
//! | [`generator`]    | `ManifestSpec`, `generate_manifest`                        |
//! | [`error`]        | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Ordering model (summary)
//!
//! Every pending activity is a [`Continuation`] keyed by the tick it fires
//! at.  Entries are popped in tick order; entries sharing a tick come out in
//! the order they were scheduled:
//!
//! ```text
//! schedule(T5, a); schedule(T3, b); schedule(T5, c)
//! pop → (T3, b), (T5, a), (T5, c)
//! ```

pub mod continuation;
pub mod error;
pub mod event_queue;
pub mod generator;
pub mod loader;
pub mod manifest;


pub use continuation::{Continuation, ElevatorStep, UserStep};
pub use error::{ScheduleError, ScheduleResult};
pub use event_queue::EventQueue;
pub use generator::{ManifestSpec, generate_manifest};
pub use loader::{load_manifest_csv, load_manifest_reader};
pub use manifest::{ManifestEntry, Passenger, PassengerManifest, SENTINEL_NAME};
