//! Shared simulation state: call buttons, waiting lines, the car, and the
//! passenger arena.
//!
//! Everything a step may read or write lives in one [`SimulationState`]
//! value owned by the driver.  Steps receive it by `&mut`, so two
//! independent runs never share anything.

use std::collections::VecDeque;

use lift_core::{Direction, Floor, PassengerId, SimConfig, Tick};
use lift_schedule::{ElevatorStep, Passenger, PassengerManifest};

use crate::{SimError, SimResult};

// ── CallBoard ─────────────────────────────────────────────────────────────────

/// Per-floor call buttons plus the car's position, direction and door flags.
///
/// Floors are stored relative to `min_floor`.  Reads of a floor outside the
/// served range return `false`; writes to one are ignored.  The builder
/// rejects out-of-range passengers, so neither happens in a valid run.
#[derive(Clone, Debug)]
pub struct CallBoard {
    min_floor: Floor,
    up:        Vec<bool>,
    down:      Vec<bool>,
    car:       Vec<bool>,

    /// Floor the car is at, or the floor it is travelling to between
    /// a cruise step and its arrival check.
    pub floor: Floor,
    pub direction: Direction,
    /// Someone is getting in or out.
    pub doors_busy: bool,
    /// An idle timeout has been started by the last door opening.
    pub idle_timeout_armed: bool,
    /// Doors are open and nobody is using them.
    pub doors_open_idle: bool,
}

impl CallBoard {
    pub fn new(config: &SimConfig) -> Self {
        let n = config.floor_count();
        Self {
            min_floor:          config.min_floor,
            up:                 vec![false; n],
            down:               vec![false; n],
            car:                vec![false; n],
            floor:              config.home_floor,
            direction:          Direction::Neutral,
            doors_busy:         false,
            idle_timeout_armed: false,
            doors_open_idle:    false,
        }
    }

    #[inline]
    fn slot(&self, floor: Floor) -> Option<usize> {
        let i = floor.0.checked_sub(self.min_floor.0)? as usize;
        (i < self.up.len()).then_some(i)
    }

    fn floor_at(&self, slot: usize) -> Floor {
        Floor(self.min_floor.0 + slot as u8)
    }

    pub fn up_call(&self, floor: Floor) -> bool {
        self.slot(floor).is_some_and(|i| self.up[i])
    }

    pub fn down_call(&self, floor: Floor) -> bool {
        self.slot(floor).is_some_and(|i| self.down[i])
    }

    pub fn car_call(&self, floor: Floor) -> bool {
        self.slot(floor).is_some_and(|i| self.car[i])
    }

    /// Any of the three buttons is lit for `floor`.
    pub fn has_call(&self, floor: Floor) -> bool {
        self.slot(floor).is_some_and(|i| self.up[i] || self.down[i] || self.car[i])
    }

    pub fn set_up_call(&mut self, floor: Floor, on: bool) {
        if let Some(i) = self.slot(floor) {
            self.up[i] = on;
        }
    }

    pub fn set_down_call(&mut self, floor: Floor, on: bool) {
        if let Some(i) = self.slot(floor) {
            self.down[i] = on;
        }
    }

    pub fn set_car_call(&mut self, floor: Floor, on: bool) {
        if let Some(i) = self.slot(floor) {
            self.car[i] = on;
        }
    }

    /// Light the hall button matching `direction`.  `Neutral` does nothing.
    pub fn press_hall(&mut self, floor: Floor, direction: Direction) {
        match direction {
            Direction::Up      => self.set_up_call(floor, true),
            Direction::Down    => self.set_down_call(floor, true),
            Direction::Neutral => {}
        }
    }

    /// Clear all three buttons for `floor`.
    pub fn clear_floor(&mut self, floor: Floor) {
        self.set_up_call(floor, false);
        self.set_down_call(floor, false);
        self.set_car_call(floor, false);
    }

    pub fn any_call(&self) -> bool {
        (0..self.up.len()).any(|i| self.up[i] || self.down[i] || self.car[i])
    }

    /// Any button lit strictly above `floor`.
    pub fn any_call_above(&self, floor: Floor) -> bool {
        self.floors_above(floor).any(|f| self.has_call(f))
    }

    /// Any button lit strictly below `floor`.
    pub fn any_call_below(&self, floor: Floor) -> bool {
        self.floors_below(floor).any(|f| self.has_call(f))
    }

    pub fn any_car_call_above(&self, floor: Floor) -> bool {
        self.floors_above(floor).any(|f| self.car_call(f))
    }

    pub fn any_car_call_below(&self, floor: Floor) -> bool {
        self.floors_below(floor).any(|f| self.car_call(f))
    }

    /// Lowest floor other than `except` with any button lit.
    pub fn lowest_call_except(&self, except: Floor) -> Option<Floor> {
        (0..self.up.len())
            .map(|i| self.floor_at(i))
            .find(|&f| f != except && self.has_call(f))
    }

    fn floors_above(&self, floor: Floor) -> impl Iterator<Item = Floor> + '_ {
        (0..self.up.len()).map(|i| self.floor_at(i)).filter(move |&f| f > floor)
    }

    fn floors_below(&self, floor: Floor) -> impl Iterator<Item = Floor> + '_ {
        (0..self.up.len()).map(|i| self.floor_at(i)).filter(move |&f| f < floor)
    }
}

// ── FloorQueues ───────────────────────────────────────────────────────────────

/// One FIFO waiting line per floor.
#[derive(Clone, Debug)]
pub struct FloorQueues {
    min_floor: Floor,
    lines:     Vec<VecDeque<PassengerId>>,
}

impl FloorQueues {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            min_floor: config.min_floor,
            lines:     vec![VecDeque::new(); config.floor_count()],
        }
    }

    fn line(&self, floor: Floor) -> Option<&VecDeque<PassengerId>> {
        self.lines.get(floor.0.checked_sub(self.min_floor.0)? as usize)
    }

    fn line_mut(&mut self, floor: Floor) -> Option<&mut VecDeque<PassengerId>> {
        self.lines.get_mut(floor.0.checked_sub(self.min_floor.0)? as usize)
    }

    /// Append `p` to the back of `floor`'s line.  Returns `false` if the
    /// floor is not served.
    pub fn push_back(&mut self, floor: Floor, p: PassengerId) -> bool {
        match self.line_mut(floor) {
            Some(line) => {
                line.push_back(p);
                true
            }
            None => false,
        }
    }

    pub fn front(&self, floor: Floor) -> Option<PassengerId> {
        self.line(floor)?.front().copied()
    }

    /// Remove `p` from `floor`'s line wherever it stands.
    pub fn remove(&mut self, floor: Floor, p: PassengerId) -> bool {
        let Some(line) = self.line_mut(floor) else { return false };
        match line.iter().position(|&q| q == p) {
            Some(i) => {
                line.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, floor: Floor, p: PassengerId) -> bool {
        self.line(floor).is_some_and(|line| line.contains(&p))
    }

    pub fn len(&self, floor: Floor) -> usize {
        self.line(floor).map_or(0, VecDeque::len)
    }

    /// Total number of waiting passengers on all floors.
    pub fn total(&self) -> usize {
        self.lines.iter().map(VecDeque::len).sum()
    }

    /// How many lines hold `p`.
    pub fn occurrences(&self, p: PassengerId) -> usize {
        self.lines.iter().map(|line| line.iter().filter(|&&q| q == p).count()).sum()
    }
}

// ── CarManifest ───────────────────────────────────────────────────────────────

/// Passengers aboard, in boarding order.
#[derive(Clone, Debug, Default)]
pub struct CarManifest {
    riders: Vec<PassengerId>,
}

impl CarManifest {
    pub fn board(&mut self, p: PassengerId) {
        self.riders.push(p);
    }

    pub fn remove(&mut self, p: PassengerId) -> bool {
        match self.riders.iter().position(|&q| q == p) {
            Some(i) => {
                self.riders.remove(i);
                true
            }
            None => false,
        }
    }

    /// The most recently boarded rider whose destination is `floor`.
    pub fn last_bound_for(&self, floor: Floor, passengers: &PassengerTable) -> Option<PassengerId> {
        self.riders
            .iter()
            .rev()
            .copied()
            .find(|&p| passengers.get(p).is_ok_and(|r| r.passenger.destination == floor))
    }

    pub fn contains(&self, p: PassengerId) -> bool {
        self.riders.contains(&p)
    }

    pub fn occurrences(&self, p: PassengerId) -> usize {
        self.riders.iter().filter(|&&q| q == p).count()
    }

    pub fn riders(&self) -> &[PassengerId] {
        &self.riders
    }

    pub fn len(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }
}

// ── Passenger arena ───────────────────────────────────────────────────────────

/// Where a passenger is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UserState {
    /// Not arrived yet.
    #[default]
    Pending,
    /// Waiting in its origin floor's line.
    Queued,
    /// Aboard the car.
    Riding,
    /// Got out at its destination.
    Alighted,
    /// Gave up waiting.
    Abandoned,
    /// Origin equals destination; never entered the system.
    Dropped,
}

impl UserState {
    /// The passenger has left the simulated system.
    pub fn is_finished(self) -> bool {
        matches!(self, UserState::Alighted | UserState::Abandoned | UserState::Dropped)
    }
}

/// A passenger and what has happened to it so far.
#[derive(Clone, Debug)]
pub struct PassengerRecord {
    pub passenger:   Passenger,
    pub state:       UserState,
    pub boarded_at:  Option<Tick>,
    pub alighted_at: Option<Tick>,
    /// When it abandoned or was dropped.
    pub left_at:     Option<Tick>,
}

/// Arena of passenger records indexed by [`PassengerId`].
#[derive(Clone, Debug, Default)]
pub struct PassengerTable {
    records: Vec<PassengerRecord>,
}

impl PassengerTable {
    pub fn from_manifest(manifest: PassengerManifest) -> Self {
        let records = manifest
            .into_iter()
            .map(|passenger| PassengerRecord {
                passenger,
                state:       UserState::Pending,
                boarded_at:  None,
                alighted_at: None,
                left_at:     None,
            })
            .collect();
        Self { records }
    }

    pub fn get(&self, id: PassengerId) -> SimResult<&PassengerRecord> {
        self.records.get(id.index()).ok_or(SimError::UnknownPassenger(id))
    }

    pub fn get_mut(&mut self, id: PassengerId) -> SimResult<&mut PassengerRecord> {
        self.records.get_mut(id.index()).ok_or(SimError::UnknownPassenger(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PassengerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Which step the elevator process is logically at.
#[derive(Copy, Clone, Debug)]
pub struct Controller {
    /// The last elevator step dispatched, or `Idle` once the car has gone
    /// dormant.  Idle timeouts do not move it.
    pub position: ElevatorStep,
    /// A wake-up step has been scheduled from `Idle` and not yet run.
    pub wake_pending: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self { position: ElevatorStep::Idle, wake_pending: false }
    }
}

impl Controller {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.position == ElevatorStep::Idle
    }
}

// ── SimulationState ───────────────────────────────────────────────────────────

/// Everything the steps share.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub config:     SimConfig,
    pub board:      CallBoard,
    pub queues:     FloorQueues,
    pub car:        CarManifest,
    pub passengers: PassengerTable,
    pub controller: Controller,
}

impl SimulationState {
    /// Car dormant at the home floor, nobody in the building.
    pub fn new(config: SimConfig, manifest: PassengerManifest) -> Self {
        Self {
            board:      CallBoard::new(&config),
            queues:     FloorQueues::new(&config),
            car:        CarManifest::default(),
            passengers: PassengerTable::from_manifest(manifest),
            controller: Controller::default(),
            config,
        }
    }
}
