//! Building geometry and timing configuration.
//!
//! Every fixed delay the controller uses lives in [`Timing`], so a run can
//! be retimed from a JSON file without touching the state machines.

use crate::{Floor, LiftError, LiftResult};

// ── Timing ────────────────────────────────────────────────────────────────────

/// Fixed delays, in ticks, between elevator steps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timing {
    /// Dormant car with a call at home: decision until doors open.
    pub wake_open: u64,
    /// Dormant car with a call elsewhere: decision until it prepares to move.
    pub wake_move: u64,
    /// Doors start opening until the first serve check.
    pub door_open: u64,
    /// Interval between successive alight/board transfers.
    pub transfer: u64,
    /// Doors opened until the automatic close attempt.
    pub auto_close: u64,
    /// Doors opened until the idle timeout returns the car home.
    pub idle_timeout: u64,
    /// Re-check interval while someone is still in the doorway.
    pub flutter: u64,
    /// Doors closed until the car prepares to move.
    pub close_to_move: u64,
    /// Quick close after a passenger picks a direction for a neutral car.
    pub quick_close: u64,
    /// Prepare-to-move until the car starts cruising.
    pub accelerate: u64,
    /// Travel time for one floor going up.
    pub ascend_travel: u64,
    /// Deceleration when stopping on the way up.
    pub ascend_decel: u64,
    /// Travel time for one floor going down.
    pub descend_travel: u64,
    /// Deceleration when stopping on the way down.
    pub descend_decel: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            wake_open:      20,
            wake_move:      20,
            door_open:      20,
            transfer:       25,
            auto_close:     76,
            idle_timeout:   300,
            flutter:        40,
            close_to_move:  20,
            quick_close:    25,
            accelerate:     15,
            ascend_travel:  51,
            ascend_decel:   14,
            descend_travel: 61,
            descend_decel:  23,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.  Missing fields fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Lowest floor served.  Default: 0.
    pub min_floor: Floor,

    /// Highest floor served.  Default: 4.
    pub max_floor: Floor,

    /// Floor the car rests at when dormant.  Default: 2.
    pub home_floor: Floor,

    pub timing: Timing,

    /// Maximum number of pending events.  `None` lets the queue grow freely;
    /// `Some(n)` turns the n+1th pending event into `CapacityExceeded`.
    pub event_capacity: Option<usize>,

    /// Run the state consistency checks after every dispatched step.
    pub check_invariants: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            min_floor:        Floor(0),
            max_floor:        Floor(4),
            home_floor:       Floor(2),
            timing:           Timing::default(),
            event_capacity:   None,
            check_invariants: false,
        }
    }
}

impl SimConfig {
    /// `true` if `floor` lies within `[min_floor, max_floor]`.
    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        self.min_floor <= floor && floor <= self.max_floor
    }

    /// Number of floors served.
    #[inline]
    pub fn floor_count(&self) -> usize {
        (self.max_floor.0 - self.min_floor.0) as usize + 1
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> LiftResult<()> {
        if self.min_floor > self.max_floor {
            return Err(LiftError::Config(format!(
                "floor range is inverted: min {} > max {}",
                self.min_floor.0, self.max_floor.0
            )));
        }
        if !self.contains(self.home_floor) {
            return Err(LiftError::Config(format!(
                "home floor {} outside [{}, {}]",
                self.home_floor.0, self.min_floor.0, self.max_floor.0
            )));
        }
        if self.event_capacity == Some(0) {
            return Err(LiftError::Config("event capacity must be at least 1".into()));
        }
        Ok(())
    }
}
