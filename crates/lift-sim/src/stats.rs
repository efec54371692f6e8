//! Run statistics.

use std::collections::BTreeMap;

use lift_core::Tick;
use lift_schedule::Continuation;

use crate::{PassengerTable, UserState};

/// Counters gathered over one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Continuations popped from the event queue.
    pub events_dispatched: u64,
    /// Step invocations by label (`"E4"`, `"U2"`, …), queued or inline.
    pub step_counts: BTreeMap<&'static str, u64>,
    /// Largest number of simultaneously pending events.
    pub peak_pending: usize,
    pub boarded:   usize,
    pub served:    usize,
    pub abandoned: usize,
    pub dropped:   usize,
    /// Sum over boarded passengers of ticks spent waiting.
    pub total_wait: u64,
    /// Sum over served passengers of ticks spent riding.
    pub total_ride: u64,
    pub final_time: Tick,
}

impl SimStats {
    pub(crate) fn record_step(&mut self, continuation: Continuation) {
        *self.step_counts.entry(continuation.label()).or_default() += 1;
    }

    /// How many times the step labelled `label` ran.
    pub fn count(&self, label: &str) -> u64 {
        self.step_counts.get(label).copied().unwrap_or(0)
    }

    /// Recompute the per-passenger totals from the arena.
    pub(crate) fn tally(&mut self, passengers: &PassengerTable, now: Tick) {
        self.boarded = 0;
        self.served = 0;
        self.abandoned = 0;
        self.dropped = 0;
        self.total_wait = 0;
        self.total_ride = 0;
        for r in passengers.iter() {
            if let Some(b) = r.boarded_at {
                self.boarded += 1;
                self.total_wait += b.since(r.passenger.arrival);
            }
            match r.state {
                UserState::Alighted => {
                    self.served += 1;
                    if let (Some(b), Some(a)) = (r.boarded_at, r.alighted_at) {
                        self.total_ride += a.since(b);
                    }
                }
                UserState::Abandoned => self.abandoned += 1,
                UserState::Dropped   => self.dropped += 1,
                _ => {}
            }
        }
        self.final_time = now;
    }

    /// Mean wait of passengers who got in, in ticks.
    pub fn mean_wait(&self) -> Option<f64> {
        (self.boarded > 0).then(|| self.total_wait as f64 / self.boarded as f64)
    }

    /// Mean ride of passengers who got out, in ticks.
    pub fn mean_ride(&self) -> Option<f64> {
        (self.served > 0).then(|| self.total_ride as f64 / self.served as f64)
    }
}
