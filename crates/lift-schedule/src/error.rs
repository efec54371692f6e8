use thiserror::Error;

use lift_core::Tick;

use crate::Continuation;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("manifest parse error: {0}")]
    Parse(String),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("event queue capacity of {capacity} exceeded while scheduling {continuation}")]
    CapacityExceeded { capacity: usize, continuation: Continuation },

    #[error("cannot cancel {continuation}: {count} matching entries queued")]
    AmbiguousCancel { continuation: Continuation, count: usize },

    #[error("{continuation} scheduled at {at}, before the current time {now}")]
    ScheduledInPast { continuation: Continuation, at: Tick, now: Tick },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
