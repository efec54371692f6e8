//! The decision procedure: picks a direction for a neutral car.
//!
//! Called synchronously from the idle, prepare-to-move and idle-timeout
//! steps and from a passenger signalling for the car.  It never runs as a
//! queued event.

use log::trace;

use lift_core::Direction;
use lift_schedule::ElevatorStep;

use crate::{Effects, SimulationState};

/// Choose a direction if the car has none.
///
/// 1. A car that already has a direction is left alone.
/// 2. A dormant car with a call at the home floor opens its doors there.
/// 3. Otherwise head for the lowest floor (other than the current one) with a
///    call.  With no calls, a car preparing to move heads home; any other
///    caller gives up.
/// 4. A dormant car that picked a direction gets going.
///
/// A dormant car that has already been woken ignores further calls until the
/// wake-up step runs, so repeated calls schedule nothing new.
pub fn decide(state: &mut SimulationState, fx: &mut Effects) {
    let board = &mut state.board;
    let controller = &mut state.controller;
    let home = state.config.home_floor;

    if !board.direction.is_neutral() {
        trace!("[{}] decide: already {}", fx.now(), board.direction);
        return;
    }

    let dormant = controller.is_idle();
    if dormant && controller.wake_pending {
        trace!("[{}] decide: wake-up already scheduled", fx.now());
        return;
    }

    if dormant && board.has_call(home) {
        trace!("[{}] decide: call at home, opening doors", fx.now());
        fx.after(state.config.timing.wake_open, ElevatorStep::OpenDoors);
        controller.wake_pending = true;
        return;
    }

    let target = match board.lowest_call_except(board.floor) {
        Some(floor) => floor,
        None if controller.position == ElevatorStep::PrepareMove => home,
        None => {
            trace!("[{}] decide: no calls", fx.now());
            return;
        }
    };

    board.direction = Direction::toward(board.floor, target);
    trace!("[{}] decide: target {target}, now {}", fx.now(), board.direction);

    if dormant && target != home {
        fx.after(state.config.timing.wake_move, ElevatorStep::PrepareMove);
        controller.wake_pending = true;
    }
}
