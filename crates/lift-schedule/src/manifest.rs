//! Passengers and the manifest that feeds them to the simulation.
//!
//! A manifest is fixed input: the simulation reads it, never extends it.
//! Entries are kept in arrival order and each one's position becomes its
//! [`PassengerId`].

use lift_core::{Direction, Floor, PassengerId, Tick};

use crate::{ScheduleError, ScheduleResult};

/// Name of the terminating sentinel entry.  It and anything after it are
/// ignored.
pub const SENTINEL_NAME: &str = "DUMMY";

// ── ManifestEntry ─────────────────────────────────────────────────────────────

/// One raw row of a passenger feed, before ids are assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub origin:      u8,
    pub destination: u8,
    pub arrival:     u64,
    /// Ticks the passenger waits before giving up, counted from `arrival`.
    pub patience:    u64,
    pub name:        String,
}

impl ManifestEntry {
    pub fn new(origin: u8, destination: u8, arrival: u64, patience: u64, name: impl Into<String>) -> Self {
        Self { origin, destination, arrival, patience, name: name.into() }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name == SENTINEL_NAME
    }
}

// ── Passenger ─────────────────────────────────────────────────────────────────

/// Immutable facts about one passenger.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    pub id:          PassengerId,
    pub origin:      Floor,
    pub destination: Floor,
    pub arrival:     Tick,
    pub patience:    u64,
    pub name:        String,
}

impl Passenger {
    /// Direction of the call this passenger makes.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::toward(self.origin, self.destination)
    }

    /// Tick at which the passenger gives up if still waiting.
    #[inline]
    pub fn give_up_at(&self) -> Tick {
        self.arrival + self.patience
    }

    /// Origin equals destination: nothing to call for.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.origin == self.destination
    }
}

// ── PassengerManifest ─────────────────────────────────────────────────────────

/// The ordered set of passengers for one run.
#[derive(Clone, Debug, Default)]
pub struct PassengerManifest {
    passengers: Vec<Passenger>,
}

impl PassengerManifest {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a manifest from raw entries.
    ///
    /// Stops at the first sentinel entry.  Arrival times must not decrease.
    /// Degenerate entries (origin equals destination) are accepted; the
    /// simulation drops them when they signal.
    pub fn new(entries: impl IntoIterator<Item = ManifestEntry>) -> ScheduleResult<Self> {
        let mut passengers: Vec<Passenger> = Vec::new();
        for entry in entries {
            if entry.is_sentinel() {
                break;
            }
            if let Some(prev) = passengers.last() {
                if Tick(entry.arrival) < prev.arrival {
                    return Err(ScheduleError::InvalidManifest(format!(
                        "{:?} arrives at {} before {:?} at {}",
                        entry.name, entry.arrival, prev.name, prev.arrival.0
                    )));
                }
            }
            let id = PassengerId::try_from(passengers.len())
                .map_err(|_| ScheduleError::InvalidManifest("too many passengers".into()))?;
            passengers.push(Passenger {
                id,
                origin:      Floor(entry.origin),
                destination: Floor(entry.destination),
                arrival:     Tick(entry.arrival),
                patience:    entry.patience,
                name:        entry.name,
            });
        }
        Ok(Self { passengers })
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.iter()
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Lowest and highest floor any passenger mentions.
    pub fn floor_span(&self) -> Option<(Floor, Floor)> {
        let floors = self.passengers.iter().flat_map(|p| [p.origin, p.destination]);
        let lo = floors.clone().min()?;
        let hi = floors.max()?;
        Some((lo, hi))
    }
}

impl IntoIterator for PassengerManifest {
    type Item = Passenger;
    type IntoIter = std::vec::IntoIter<Passenger>;

    fn into_iter(self) -> Self::IntoIter {
        self.passengers.into_iter()
    }
}
