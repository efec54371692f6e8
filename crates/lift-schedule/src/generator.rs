//! Seeded synthetic manifests.
//!
//! Passengers arrive with uniform gaps, pick a uniform origin and a uniform
//! destination different from it, and wait a uniform number of ticks.

use lift_core::{Floor, SimRng};

use crate::{ManifestEntry, PassengerManifest, ScheduleError, ScheduleResult};

/// Shape of a generated manifest.
#[derive(Clone, Debug)]
pub struct ManifestSpec {
    pub count:        usize,
    pub min_floor:    Floor,
    pub max_floor:    Floor,
    /// Largest gap between consecutive arrivals (inclusive).
    pub max_gap:      u64,
    pub min_patience: u64,
    pub max_patience: u64,
}

impl Default for ManifestSpec {
    fn default() -> Self {
        Self {
            count:        20,
            min_floor:    Floor(0),
            max_floor:    Floor(4),
            max_gap:      400,
            min_patience: 100,
            max_patience: 1000,
        }
    }
}

/// Draw a manifest of `spec.count` passengers from `rng`.
pub fn generate_manifest(spec: &ManifestSpec, rng: &mut SimRng) -> ScheduleResult<PassengerManifest> {
    if spec.min_floor >= spec.max_floor {
        return Err(ScheduleError::InvalidManifest(format!(
            "need at least two floors to generate trips, got [{}, {}]",
            spec.min_floor.0, spec.max_floor.0
        )));
    }
    if spec.min_patience > spec.max_patience {
        return Err(ScheduleError::InvalidManifest("patience range is inverted".into()));
    }

    let (lo, hi) = (spec.min_floor.0, spec.max_floor.0);
    let mut arrival = 0u64;
    let mut entries = Vec::with_capacity(spec.count);
    for i in 0..spec.count {
        if i > 0 {
            arrival += rng.gen_range(0..=spec.max_gap);
        }
        let origin = rng.gen_range(lo..=hi);
        // Draw from the remaining floors and skip over the origin.
        let mut destination = rng.gen_range(lo..hi);
        if destination >= origin {
            destination += 1;
        }
        let patience = rng.gen_range(spec.min_patience..=spec.max_patience);
        entries.push(ManifestEntry::new(origin, destination, arrival, patience, format!("User {}", i + 1)));
    }
    PassengerManifest::new(entries)
}
