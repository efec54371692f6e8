//! Scheduling effects produced by a step.
//!
//! Steps never touch the event queue directly.  They mutate the shared
//! [`SimulationState`][crate::SimulationState] and describe queue changes as
//! [`Intent`]s, which the driver applies in order once the step returns.
//! This keeps every transition testable without a running driver.

use lift_core::Tick;
use lift_schedule::{Continuation, ElevatorStep};

/// A requested change to the event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Insert `continuation` to fire at `at`.
    Schedule { at: Tick, continuation: Continuation },

    /// Remove the pending `continuation`, if any.
    Cancel(Continuation),
}

/// Collector handed to every step.
#[derive(Debug)]
pub struct Effects {
    now:           Tick,
    next_elevator: Option<ElevatorStep>,
    intents:       Vec<Intent>,
    inline:        Vec<Continuation>,
}

impl Effects {
    /// `next_elevator` is the first elevator step still pending after the
    /// one being dispatched.
    pub fn new(now: Tick, next_elevator: Option<ElevatorStep>) -> Self {
        Self { now, next_elevator, intents: Vec::new(), inline: Vec::new() }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    #[inline]
    pub fn next_elevator_step(&self) -> Option<ElevatorStep> {
        self.next_elevator
    }

    /// Schedule `continuation` `delay` ticks from now.
    pub fn after(&mut self, delay: u64, continuation: impl Into<Continuation>) {
        self.at(self.now + delay, continuation);
    }

    /// Schedule `continuation` at an absolute tick.
    pub fn at(&mut self, at: Tick, continuation: impl Into<Continuation>) {
        self.intents.push(Intent::Schedule { at, continuation: continuation.into() });
    }

    pub fn cancel(&mut self, continuation: impl Into<Continuation>) {
        self.intents.push(Intent::Cancel(continuation.into()));
    }

    /// Note that a step ran inline, without going through the queue.
    pub fn ran_inline(&mut self, continuation: impl Into<Continuation>) {
        self.inline.push(continuation.into());
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn inline_steps(&self) -> &[Continuation] {
        &self.inline
    }

    pub fn into_parts(self) -> (Vec<Intent>, Vec<Continuation>) {
        (self.intents, self.inline)
    }
}
