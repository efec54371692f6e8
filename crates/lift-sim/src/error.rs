use lift_core::{Direction, Floor, LiftError, PassengerId, Tick};
use lift_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Lift(#[from] LiftError),

    #[error("event queue error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("car cannot move {direction} from {from}: outside the served range")]
    FloorOutOfBounds { from: Floor, direction: Direction },

    #[error("passenger {0} is not in the manifest")]
    UnknownPassenger(PassengerId),

    #[error("invariant violated at {time}: {message}")]
    Invariant { time: Tick, message: String },
}

impl SimError {
    /// `true` if the run stopped because the event queue was full.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, SimError::Schedule(ScheduleError::CapacityExceeded { .. }))
    }
}

pub type SimResult<T> = Result<T, SimError>;
