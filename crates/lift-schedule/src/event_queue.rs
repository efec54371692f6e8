//! `EventQueue`: the time-ordered list of pending continuations.
//!
//! The queue is the only thing that moves simulated time forward: popping
//! the earliest entry advances [`EventQueue::now`] to that entry's tick.
//!
//! # Ordering contract
//!
//! Entries fire in non-decreasing tick order.  Entries that share a tick
//! fire in the order they were scheduled, so a step that schedules two
//! same-tick continuations controls their relative order.
//!
//! # Cancellation
//!
//! [`cancel`](EventQueue::cancel) removes the single pending entry equal to a
//! continuation.  Zero matches is a no-op (the activity already fired or was
//! never scheduled).  More than one match means two copies of a cancellable
//! activity were scheduled, which the controller never does on purpose, so
//! it is reported as [`ScheduleError::AmbiguousCancel`] and nothing is removed.

use std::collections::{BTreeMap, VecDeque};

use log::debug;

use lift_core::Tick;

use crate::{Continuation, ElevatorStep, ScheduleError, ScheduleResult};

/// Pending continuations keyed by the tick they fire at.
#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<Tick, VecDeque<Continuation>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
    now: Tick,
    capacity: Option<usize>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue that refuses to hold more than `capacity` pending entries.
    pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
        Self { capacity, ..Self::default() }
    }

    /// Current simulated time: the tick of the most recently popped entry.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Schedule `continuation` to fire at `at`.
    ///
    /// `at` may equal [`now`](Self::now); the entry then fires after every
    /// entry already queued for the same tick.
    pub fn schedule(&mut self, at: Tick, continuation: Continuation) -> ScheduleResult<()> {
        if at < self.now {
            return Err(ScheduleError::ScheduledInPast { continuation, at, now: self.now });
        }
        if let Some(capacity) = self.capacity {
            if self.total >= capacity {
                return Err(ScheduleError::CapacityExceeded { capacity, continuation });
            }
        }
        self.inner.entry(at).or_default().push_back(continuation);
        self.total += 1;
        Ok(())
    }

    /// Remove the pending entry equal to `continuation`.
    ///
    /// Returns `Ok(true)` if an entry was removed, `Ok(false)` if none was
    /// queued.
    pub fn cancel(&mut self, continuation: &Continuation) -> ScheduleResult<bool> {
        let mut found: Option<(Tick, usize)> = None;
        let mut count = 0usize;
        for (tick, slot) in &self.inner {
            for (i, c) in slot.iter().enumerate() {
                if c == continuation {
                    count += 1;
                    found.get_or_insert((*tick, i));
                }
            }
        }

        match (count, found) {
            (0, _) | (_, None) => {
                debug!("[{}] cancel {continuation}: nothing pending", self.now);
                Ok(false)
            }
            (1, Some((tick, i))) => {
                if let Some(slot) = self.inner.get_mut(&tick) {
                    slot.remove(i);
                    if slot.is_empty() {
                        self.inner.remove(&tick);
                    }
                }
                self.total -= 1;
                debug!("[{}] cancel {continuation} (was due {tick})", self.now);
                Ok(true)
            }
            (count, Some(_)) => Err(ScheduleError::AmbiguousCancel { continuation: *continuation, count }),
        }
    }

    /// Remove and return the earliest entry, advancing `now` to its tick.
    pub fn pop_earliest(&mut self) -> Option<(Tick, Continuation)> {
        let mut entry = self.inner.first_entry()?;
        let tick = *entry.key();
        let continuation = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        self.now = tick;
        Some((tick, continuation))
    }

    /// The tick of the earliest pending entry.
    pub fn peek_time(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// The elevator step that will fire first, with its tick.
    pub fn next_elevator_step(&self) -> Option<(Tick, ElevatorStep)> {
        self.iter()
            .find_map(|(tick, c)| c.elevator_step().map(|step| (tick, step)))
    }

    /// Pending entries in firing order.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, Continuation)> + '_ {
        self.inner
            .iter()
            .flat_map(|(tick, slot)| slot.iter().map(move |c| (*tick, *c)))
    }

    /// Number of pending entries equal to `continuation`.
    pub fn count(&self, continuation: &Continuation) -> usize {
        self.iter().filter(|(_, c)| c == continuation).count()
    }

    pub fn contains(&self, continuation: &Continuation) -> bool {
        self.iter().any(|(_, c)| c == *continuation)
    }

    /// Tick at which `continuation` is pending, if it is.
    pub fn scheduled_at(&self, continuation: &Continuation) -> Option<Tick> {
        self.iter().find(|(_, c)| c == continuation).map(|(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
