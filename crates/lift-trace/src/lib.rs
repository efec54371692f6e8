//! `lift-trace`: human-readable step trace for the rust_lift simulator.
//!
//! [`TraceWriter`] implements `lift_sim::SimObserver` and writes one line per
//! dispatched continuation to any `io::Write`, followed by a one-line summary
//! when the run ends:
//!
//! ```text
//! T0000  E1   elevator   NEUTRAL   floor 2  busy:0 armed:0 idle:0
//! T0000  U1   User 1     NEUTRAL   floor 2  busy:0 armed:0 idle:0
//! T0020  E6   elevator   GOINGDOWN floor 2  busy:0 armed:0 idle:0
//! ...
//! T0676  end  events 22  served 1  abandoned 0  dropped 0  wait 200.0  ride 196.0
//! ```
//!
//! The format is for people, not parsers; it may change between versions.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_trace::TraceWriter;
//!
//! let mut trace = TraceWriter::new(std::io::stdout().lock());
//! sim.run(&mut trace)?;
//! trace.take_error().map(|e| eprintln!("trace error: {e}"));
//! ```

pub mod error;
pub mod writer;


pub use error::{TraceError, TraceResult};
pub use writer::{TraceWriter, summary_line};
