//! `lift-sim`: the elevator controller, passenger agents, and the
//! discrete-event driver of the rust_lift simulator.
//!
//! # Event loop
//!
//! ```text
//! loop:
//!   ① Pop    : earliest (tick, continuation) from the EventQueue; the clock
//!              jumps to that tick.
//!   ② Observe: SimObserver::on_step sees the state before the step.
//!   ③ Step   : elevator::run_step or user::run_step mutates the shared
//!              SimulationState and emits Intents (schedule / cancel).
//!              The decision procedure and chained steps run inline.
//!   ④ Apply  : intents hit the queue in emission order.
//!   ⑤ Check  : optional invariant pass.
//! until the queue is empty.
//! ```
//!
//! Everything is single-threaded; ordering among same-tick events is the
//! queue's FIFO order, so a run is fully determined by its manifest and
//! configuration.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new().config(config).manifest(manifest).build()?;
//! let stats = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod decision;
pub mod elevator;
pub mod error;
pub mod intent;
pub mod invariants;
pub mod observer;
pub mod sim;
pub mod state;
pub mod stats;
pub mod user;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use decision::decide;
pub use error::{SimError, SimResult};
pub use intent::{Effects, Intent};
pub use observer::{NoopObserver, SimObserver, StepRecord};
pub use sim::Sim;
pub use state::{
    CallBoard, CarManifest, Controller, FloorQueues, PassengerRecord, PassengerTable,
    SimulationState, UserState,
};
pub use stats::SimStats;
