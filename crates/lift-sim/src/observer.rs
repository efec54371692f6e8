//! Simulation observer trait and the per-step record it receives.

use std::fmt;

use lift_core::{Direction, Floor, Tick};
use lift_schedule::Continuation;

use crate::{SimStats, SimulationState};

/// Snapshot taken as a continuation is dispatched, before it runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord {
    pub time:               Tick,
    pub continuation:       Continuation,
    /// Name of the passenger a user step acts for.
    pub passenger:          Option<String>,
    pub direction:          Direction,
    pub floor:              Floor,
    pub doors_busy:         bool,
    pub idle_timeout_armed: bool,
    pub doors_open_idle:    bool,
}

impl StepRecord {
    pub fn capture(time: Tick, continuation: Continuation, state: &SimulationState) -> Self {
        let passenger = continuation
            .passenger()
            .and_then(|id| state.passengers.get(id).ok())
            .map(|r| r.passenger.name.clone());
        let board = &state.board;
        Self {
            time,
            continuation,
            passenger,
            direction:          board.direction,
            floor:              board.floor,
            doors_busy:         board.doors_busy,
            idle_timeout_armed: board.idle_timeout_armed,
            doors_open_idle:    board.doors_open_idle,
        }
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| if b { '1' } else { '0' };
        write!(
            f,
            "{}  {:<4} {:<10} {:<9} floor {}  busy:{} armed:{} idle:{}",
            self.time,
            self.continuation.label(),
            self.passenger.as_deref().unwrap_or("elevator"),
            self.direction,
            self.floor.0,
            flag(self.doors_busy),
            flag(self.idle_timeout_armed),
            flag(self.doors_open_idle),
        )
    }
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as the simulation
/// proceeds.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: count door openings
///
/// ```rust,ignore
/// struct DoorCounter(usize);
///
/// impl SimObserver for DoorCounter {
///     fn on_step(&mut self, record: &StepRecord) {
///         if record.continuation == ElevatorStep::OpenDoors.into() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called for every dispatched continuation, before it runs.
    fn on_step(&mut self, _record: &StepRecord) {}

    /// Called once when the event queue runs dry.
    fn on_sim_end(&mut self, _stats: &SimStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
