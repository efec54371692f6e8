//! Fluent builder for constructing a [`Sim`].

use log::debug;

use lift_core::{SimConfig, Tick};
use lift_schedule::{Continuation, ElevatorStep, EventQueue, PassengerManifest, UserStep};

use crate::{Sim, SimError, SimResult, SimStats, SimulationState};

/// Fluent builder for [`Sim`].
///
/// | Method          | Default                        |
/// |-----------------|--------------------------------|
/// | `.config(c)`    | `SimConfig::default()`         |
/// | `.manifest(m)`  | empty manifest (car stays put) |
///
/// # Example
///
/// ```rust,ignore
/// let manifest = load_manifest_csv(path)?;
/// let mut sim = SimBuilder::new().manifest(manifest).build()?;
/// let stats = sim.run(&mut NoopObserver)?;
/// ```
#[derive(Default)]
pub struct SimBuilder {
    config:   SimConfig,
    manifest: Option<PassengerManifest>,
}

impl SimBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn manifest(mut self, manifest: PassengerManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Validate inputs, seed the event queue, and return a ready-to-run
    /// [`Sim`].
    ///
    /// The queue starts with the car's dormant wait at tick 0 followed by
    /// each passenger's arrival in manifest order.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let manifest = self.manifest.unwrap_or_else(PassengerManifest::empty);

        for p in manifest.iter() {
            for floor in [p.origin, p.destination] {
                if !self.config.contains(floor) {
                    return Err(SimError::Config(format!(
                        "{} ({}) uses {floor}, outside [{}, {}]",
                        p.name, p.id, self.config.min_floor.0, self.config.max_floor.0
                    )));
                }
            }
        }

        let mut queue = EventQueue::with_capacity_limit(self.config.event_capacity);
        queue.schedule(Tick::ZERO, Continuation::Elevator(ElevatorStep::Idle))?;
        for p in manifest.iter() {
            queue.schedule(p.arrival, Continuation::User(UserStep::Arrive, p.id))?;
        }
        debug!("seeded {} events for {} passengers", queue.len(), manifest.len());

        let stats = SimStats { peak_pending: queue.len(), ..SimStats::default() };
        Ok(Sim {
            state: SimulationState::new(self.config, manifest),
            queue,
            stats,
        })
    }
}
