//! Consistency checks run after every step when
//! [`SimConfig::check_invariants`][lift_core::SimConfig] is set.

use lift_core::{PassengerId, Tick};
use lift_schedule::{Continuation, ElevatorStep, EventQueue};

use crate::{SimError, SimResult, SimulationState, UserState};

/// Steps that are cancelled by tag alone, so at most one may be pending.
const SINGLETON_STEPS: [ElevatorStep; 3] =
    [ElevatorStep::CloseDoors, ElevatorStep::PrepareMove, ElevatorStep::IdleTimeout];

/// Check `state` and `queue` for consistency at time `now`.
pub fn check(state: &SimulationState, queue: &EventQueue, now: Tick) -> SimResult<()> {
    let fail = |message: String| Err(SimError::Invariant { time: now, message });
    let board = &state.board;
    let position = state.controller.position;

    if !state.config.contains(board.floor) {
        return fail(format!("car at unserved {}", board.floor));
    }

    if position == ElevatorStep::Idle && board.floor != state.config.home_floor {
        return fail(format!("car dormant at {} instead of home", board.floor));
    }

    if board.direction.is_neutral() && position.is_transit() {
        return fail(format!("no direction while at {}", position.label()));
    }

    let moving = position.is_transit() || position == ElevatorStep::PrepareMove;
    if !board.any_call() && !moving && !board.direction.is_neutral() {
        return fail(format!("heading {} with no calls", board.direction));
    }

    for step in SINGLETON_STEPS {
        let n = queue.count(&Continuation::Elevator(step));
        if n > 1 {
            return fail(format!("{n} copies of {} pending", step.label()));
        }
    }

    for (i, record) in state.passengers.iter().enumerate() {
        let id = PassengerId(i as u32);
        let waiting = state.queues.occurrences(id);
        let in_line = state.queues.contains(record.passenger.origin, id);
        let aboard = state.car.occurrences(id);
        let ok = match record.state {
            UserState::Queued => waiting == 1 && in_line && aboard == 0,
            UserState::Riding => waiting == 0 && aboard == 1,
            _                 => waiting == 0 && aboard == 0,
        };
        if !ok {
            return fail(format!(
                "{id} is {:?} but waits in {waiting} lines and is aboard {aboard} times",
                record.state
            ));
        }
    }

    Ok(())
}
