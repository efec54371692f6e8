//! Elevator travel direction.

use std::fmt;

use crate::Floor;

/// The elevator's committed direction of travel.
///
/// `Neutral` means no direction has been chosen: the car is either dormant
/// or stopped with nothing to do in either direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Neutral,
    Up,
    Down,
}

impl Direction {
    /// Direction needed to travel from `from` to `to`.
    ///
    /// Returns `Neutral` when the floors are equal.
    pub fn toward(from: Floor, to: Floor) -> Direction {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less    => Direction::Down,
            std::cmp::Ordering::Equal   => Direction::Neutral,
        }
    }

    #[inline]
    pub fn is_neutral(self) -> bool {
        self == Direction::Neutral
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Neutral => "NEUTRAL",
            Direction::Up      => "GOINGUP",
            Direction::Down    => "GOINGDOWN",
        };
        f.pad(s)
    }
}
