//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter in the abstract units
//! of the elevator timing table (one unit is a tenth of a second in the
//! classic formulation, but nothing here depends on that).  Integer ticks
//! keep all delay arithmetic exact and comparisons O(1).
//!
//! There is no wall clock: simulated time only advances when the event
//! queue pops its earliest entry.

use std::fmt;

/// An absolute simulation tick.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Units elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

/// Saturates at `u64::MAX`: a delay past the end of representable time
/// lands on the last tick instead of wrapping to the past.
impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{:04}", self.0)
    }
}
