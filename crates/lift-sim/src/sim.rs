//! The `Sim` struct and its event loop.

use log::debug;

use lift_core::Tick;
use lift_schedule::{Continuation, ElevatorStep, EventQueue};

use crate::{
    Effects, Intent, SimObserver, SimResult, SimStats, SimulationState, StepRecord, elevator,
    invariants, user,
};

/// The discrete-event driver.
///
/// Each [`step`](Sim::step):
///
/// 1. pops the earliest continuation (advancing the clock to its tick);
/// 2. records the elevator's logical position;
/// 3. reports a [`StepRecord`] to the observer;
/// 4. runs the step against the shared state, collecting [`Intent`]s;
/// 5. applies the intents to the queue in the order they were produced;
/// 6. optionally checks the state invariants.
///
/// Any error stops the run before another event fires.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Call board, waiting lines, car, passengers, and controller position.
    pub state: SimulationState,

    /// Pending continuations.  Its clock is the simulation clock.
    pub queue: EventQueue,

    /// Counters accumulated so far.
    pub stats: SimStats,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> Tick {
        self.queue.now()
    }

    /// Run until the event queue is empty and return the final statistics.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimStats> {
        while self.step(observer)?.is_some() {}
        self.stats.tally(&self.state.passengers, self.now());
        debug!("[{}] event queue empty, simulation done", self.now());
        observer.on_sim_end(&self.stats);
        Ok(self.stats.clone())
    }

    /// Dispatch every event due at or before `until`.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_until<O: SimObserver>(&mut self, until: Tick, observer: &mut O) -> SimResult<()> {
        while self.queue.peek_time().is_some_and(|t| t <= until) {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Dispatch the earliest pending continuation.
    ///
    /// Returns `Ok(None)` once the queue is empty.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Option<(Tick, Continuation)>> {
        let Some((now, continuation)) = self.queue.pop_earliest() else {
            return Ok(None);
        };

        if let Continuation::Elevator(step) = continuation {
            if step != ElevatorStep::IdleTimeout {
                self.state.controller.position = step;
                self.state.controller.wake_pending = false;
            }
        }

        observer.on_step(&StepRecord::capture(now, continuation, &self.state));

        let next_elevator = self.queue.next_elevator_step().map(|(_, step)| step);
        let mut fx = Effects::new(now, next_elevator);
        match continuation {
            Continuation::Elevator(step) => elevator::run_step(&mut self.state, step, &mut fx)?,
            Continuation::User(step, id) => user::run_step(&mut self.state, step, id, &mut fx)?,
        }

        let (intents, inline) = fx.into_parts();
        self.stats.events_dispatched += 1;
        self.stats.record_step(continuation);
        for c in inline {
            self.stats.record_step(c);
        }
        self.apply(intents)?;
        self.stats.peak_pending = self.stats.peak_pending.max(self.queue.len());

        if self.state.config.check_invariants {
            invariants::check(&self.state, &self.queue, now)?;
        }
        Ok(Some((now, continuation)))
    }

    /// Statistics for the run so far, with passenger totals brought up to
    /// date.
    pub fn stats(&mut self) -> &SimStats {
        self.stats.tally(&self.state.passengers, self.now());
        &self.stats
    }

    // ── Apply phase ───────────────────────────────────────────────────────

    fn apply(&mut self, intents: Vec<Intent>) -> SimResult<()> {
        for intent in intents {
            match intent {
                Intent::Schedule { at, continuation } => self.queue.schedule(at, continuation)?,
                Intent::Cancel(continuation) => {
                    self.queue.cancel(&continuation)?;
                }
            }
        }
        Ok(())
    }
}
