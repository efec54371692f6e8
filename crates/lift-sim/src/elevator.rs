//! Elevator controller steps.
//!
//! ```text
//! Idle ─D─▶ OpenDoors ─▶ Serve ⟲ ─▶ CloseDoors ⟲ ─▶ PrepareMove ─▶ Ascend/Descend ⟲ ─▶ Decide ─▶ OpenDoors
//!   ▲                                                    │
//!   └──────────────────── neutral ───────────────────────┘
//! ```
//!
//! `IdleTimeout` runs alongside: armed by every door opening, cancelled when
//! the car moves off, and otherwise fires to re-run the decision procedure.

use log::debug;

use lift_core::Direction;
use lift_schedule::{Continuation, ElevatorStep, UserStep};

use crate::{Effects, SimError, SimResult, SimulationState, decide, user};

/// Run one elevator step.
pub fn run_step(state: &mut SimulationState, step: ElevatorStep, fx: &mut Effects) -> SimResult<()> {
    match step {
        ElevatorStep::Idle          => idle(state, fx),
        ElevatorStep::Decide        => change_of_state(state, fx),
        ElevatorStep::OpenDoors     => open_doors(state, fx),
        ElevatorStep::Serve         => serve(state, fx)?,
        ElevatorStep::CloseDoors    => close_doors(state, fx),
        ElevatorStep::PrepareMove   => prepare_move(state, fx),
        ElevatorStep::AscendCruise  => cruise(state, fx, Direction::Up)?,
        ElevatorStep::AscendArrive  => arrive(state, fx, Direction::Up)?,
        ElevatorStep::DescendCruise => cruise(state, fx, Direction::Down)?,
        ElevatorStep::DescendArrive => arrive(state, fx, Direction::Down)?,
        ElevatorStep::IdleTimeout   => idle_timeout(state, fx),
    }
    Ok(())
}

// ── E1 ────────────────────────────────────────────────────────────────────────

fn idle(state: &mut SimulationState, fx: &mut Effects) {
    if state.board.any_call() {
        decide(state, fx);
    } else {
        debug!("[{}] car dormant at {}", fx.now(), state.board.floor);
    }
}

// ── E2 ────────────────────────────────────────────────────────────────────────

/// Stopped at a floor: keep going the same way only if there is something
/// beyond.  Reverse if a rider wants to go back, else go neutral.
fn change_of_state(state: &mut SimulationState, fx: &mut Effects) {
    let board = &mut state.board;
    let floor = board.floor;
    let before = board.direction;

    if board.direction == Direction::Up && !board.any_call_above(floor) {
        board.direction = if board.any_car_call_below(floor) { Direction::Down } else { Direction::Neutral };
        board.clear_floor(floor);
    }
    if board.direction == Direction::Down && !board.any_call_below(floor) {
        board.direction = if board.any_car_call_above(floor) { Direction::Up } else { Direction::Neutral };
        board.clear_floor(floor);
    }

    debug!("[{}] stopped at {floor}: {before} -> {}", fx.now(), board.direction);
    fx.after(0, ElevatorStep::OpenDoors);
}

// ── E3 ────────────────────────────────────────────────────────────────────────

fn open_doors(state: &mut SimulationState, fx: &mut Effects) {
    let timing = &state.config.timing;
    let board = &mut state.board;
    board.doors_busy = true;
    board.idle_timeout_armed = true;
    board.doors_open_idle = false;

    fx.after(timing.door_open, ElevatorStep::Serve);
    fx.cancel(ElevatorStep::CloseDoors);
    fx.after(timing.auto_close, ElevatorStep::CloseDoors);
    fx.cancel(ElevatorStep::IdleTimeout);
    fx.after(timing.idle_timeout, ElevatorStep::IdleTimeout);
    debug!("[{}] doors open at {}", fx.now(), board.floor);
}

// ── E4 ────────────────────────────────────────────────────────────────────────

/// Let one person out, else one in, else leave the doors idle.
fn serve(state: &mut SimulationState, fx: &mut Effects) -> SimResult<()> {
    let floor = state.board.floor;
    let transfer = state.config.timing.transfer;

    if let Some(rider) = state.car.last_bound_for(floor, &state.passengers) {
        fx.ran_inline(Continuation::User(UserStep::Alight, rider));
        user::alight(state, rider, fx)?;
        fx.after(transfer, ElevatorStep::Serve);
    } else if let Some(waiting) = state.queues.front(floor) {
        fx.cancel(Continuation::User(UserStep::Abandon, waiting));
        // The next transfer must be queued ahead of anything boarding schedules.
        fx.after(transfer, ElevatorStep::Serve);
        fx.ran_inline(Continuation::User(UserStep::Board, waiting));
        user::board(state, waiting, fx)?;
    } else {
        state.board.doors_busy = false;
        state.board.doors_open_idle = true;
        debug!("[{}] nobody at {}, doors idle", fx.now(), floor);
    }
    Ok(())
}

// ── E5 ────────────────────────────────────────────────────────────────────────

fn close_doors(state: &mut SimulationState, fx: &mut Effects) {
    let timing = &state.config.timing;
    if state.board.doors_busy {
        debug!("[{}] doors flutter", fx.now());
        fx.after(timing.flutter, ElevatorStep::CloseDoors);
        return;
    }
    state.board.doors_open_idle = false;
    fx.after(timing.close_to_move, ElevatorStep::PrepareMove);
    debug!("[{}] doors closed", fx.now());
}

// ── E6 ────────────────────────────────────────────────────────────────────────

fn prepare_move(state: &mut SimulationState, fx: &mut Effects) {
    let floor = state.board.floor;
    let direction = state.board.direction;
    state.board.set_car_call(floor, false);
    if direction != Direction::Down {
        state.board.set_up_call(floor, false);
    }
    if direction != Direction::Up {
        state.board.set_down_call(floor, false);
    }

    decide(state, fx);

    let accelerate = state.config.timing.accelerate;
    match state.board.direction {
        Direction::Neutral => {
            state.controller.position = ElevatorStep::Idle;
            fx.ran_inline(ElevatorStep::Idle);
            debug!("[{}] nothing to do, car dormant at {floor}", fx.now());
            return;
        }
        Direction::Up   => fx.after(accelerate, ElevatorStep::AscendCruise),
        Direction::Down => fx.after(accelerate, ElevatorStep::DescendCruise),
    }
    if state.board.idle_timeout_armed {
        fx.cancel(ElevatorStep::IdleTimeout);
    }
}

// ── E7 / E8 ───────────────────────────────────────────────────────────────────

/// Move one floor in `direction` and schedule the arrival check.
fn cruise(state: &mut SimulationState, fx: &mut Effects, direction: Direction) -> SimResult<()> {
    let from = state.board.floor;
    let next = match direction {
        Direction::Up   => from.above(),
        Direction::Down => from.below(),
        Direction::Neutral => None,
    };
    let next = next
        .filter(|&f| state.config.contains(f))
        .ok_or(SimError::FloorOutOfBounds { from, direction })?;
    state.board.floor = next;

    let timing = &state.config.timing;
    match direction {
        Direction::Up => fx.after(timing.ascend_travel, ElevatorStep::AscendArrive),
        _             => fx.after(timing.descend_travel, ElevatorStep::DescendArrive),
    }
    debug!("[{}] car moving {direction} {} -> {}", fx.now(), from.0, next.0);
    Ok(())
}

/// Decide whether to stop at the floor just reached.
fn arrive(state: &mut SimulationState, fx: &mut Effects, direction: Direction) -> SimResult<()> {
    let board = &state.board;
    let floor = board.floor;
    let (same_way, other_way, nothing_beyond) = match direction {
        Direction::Up => (board.up_call(floor), board.down_call(floor), !board.any_call_above(floor)),
        _             => (board.down_call(floor), board.up_call(floor), !board.any_call_below(floor)),
    };
    let at_home = floor == state.config.home_floor;
    let stop = board.car_call(floor) || same_way || ((at_home || other_way) && nothing_beyond);

    if stop {
        let timing = &state.config.timing;
        let decel = if direction == Direction::Up { timing.ascend_decel } else { timing.descend_decel };
        fx.after(decel, ElevatorStep::Decide);
        return Ok(());
    }

    let again = if direction == Direction::Up { ElevatorStep::AscendCruise } else { ElevatorStep::DescendCruise };
    fx.ran_inline(again);
    cruise(state, fx, direction)
}

// ── E9 ────────────────────────────────────────────────────────────────────────

fn idle_timeout(state: &mut SimulationState, fx: &mut Effects) {
    if !state.controller.is_idle() {
        debug!("[{}] idle timeout while at {}", fx.now(), state.controller.position.label());
    }
    state.board.idle_timeout_armed = false;
    decide(state, fx);
}
