//! Passenger steps.
//!
//! `Arrive → Signal → Enqueue`, then either `Abandon` (patience ran out) or
//! `Board` (sent by the controller) and later `Alight`.  `Board` and `Alight`
//! are only ever run inline by the controller's serve step.

use log::debug;

use lift_core::{Direction, PassengerId};
use lift_schedule::{Continuation, ElevatorStep, UserStep};

use crate::{Effects, SimError, SimResult, SimulationState, UserState, decide};

/// Run one queued passenger step.
pub fn run_step(
    state: &mut SimulationState,
    step:  UserStep,
    id:    PassengerId,
    fx:    &mut Effects,
) -> SimResult<()> {
    match step {
        UserStep::Arrive  => arrive(state, id, fx),
        UserStep::Signal  => signal(state, id, fx),
        UserStep::Enqueue => enqueue(state, id, fx),
        UserStep::Abandon => abandon(state, id, fx),
        UserStep::Board   => board(state, id, fx),
        UserStep::Alight  => alight(state, id, fx),
    }
}

// ── U1 ────────────────────────────────────────────────────────────────────────

fn arrive(state: &mut SimulationState, id: PassengerId, fx: &mut Effects) -> SimResult<()> {
    let p = &state.passengers.get(id)?.passenger;
    debug!(
        "[{}] {} arrives at {}, going to {}",
        fx.now(), p.name, p.origin, p.destination
    );
    fx.ran_inline(Continuation::User(UserStep::Signal, id));
    signal(state, id, fx)
}

// ── U2 ────────────────────────────────────────────────────────────────────────

/// Call the car, or catch it if it is already here.
fn signal(state: &mut SimulationState, id: PassengerId, fx: &mut Effects) -> SimResult<()> {
    let (origin, direction) = {
        let record = state.passengers.get_mut(id)?;
        if record.passenger.is_degenerate() {
            record.state = UserState::Dropped;
            record.left_at = Some(fx.now());
            debug!("[{}] {} is already at {}, dropped", fx.now(), record.passenger.name, record.passenger.origin);
            return Ok(());
        }
        (record.passenger.origin, record.passenger.direction())
    };

    let board = &mut state.board;
    let here = board.floor == origin;
    // With someone in the doorway the running serve chain still picks this
    // passenger up; reopening would start a second chain and a second close.
    let closing = match fx.next_elevator_step() {
        Some(step @ (ElevatorStep::CloseDoors | ElevatorStep::PrepareMove)) if !board.doors_busy => Some(step),
        _ => None,
    };

    if let (true, Some(pending)) = (here, closing) {
        // Doors closing or just closed on this floor: open them again.
        fx.after(0, ElevatorStep::OpenDoors);
        fx.cancel(pending);
        debug!("[{}] doors reopen for {id}", fx.now());
    } else if here && board.doors_open_idle {
        board.doors_open_idle = false;
        board.doors_busy = true;
        fx.after(0, ElevatorStep::Serve);
        debug!("[{}] serve restarted for {id}", fx.now());
    } else {
        board.press_hall(origin, direction);
        if !board.idle_timeout_armed || state.controller.is_idle() {
            decide(state, fx);
        }
    }

    fx.ran_inline(Continuation::User(UserStep::Enqueue, id));
    enqueue(state, id, fx)
}

// ── U3 ────────────────────────────────────────────────────────────────────────

fn enqueue(state: &mut SimulationState, id: PassengerId, fx: &mut Effects) -> SimResult<()> {
    let record = state.passengers.get_mut(id)?;
    let origin = record.passenger.origin;
    if !state.queues.push_back(origin, id) {
        return Err(SimError::Invariant {
            time:    fx.now(),
            message: format!("{id} waits at unserved {origin}"),
        });
    }
    record.state = UserState::Queued;
    fx.at(record.passenger.give_up_at(), Continuation::User(UserStep::Abandon, id));
    Ok(())
}

// ── U4 ────────────────────────────────────────────────────────────────────────

/// Patience ran out.  Stay only if the car is here and loading.
fn abandon(state: &mut SimulationState, id: PassengerId, fx: &mut Effects) -> SimResult<()> {
    let record = state.passengers.get_mut(id)?;
    if record.state != UserState::Queued {
        debug!("[{}] {id} give-up ignored, state {:?}", fx.now(), record.state);
        return Ok(());
    }
    let origin = record.passenger.origin;
    if state.board.floor != origin || !state.board.doors_busy {
        state.queues.remove(origin, id);
        record.state = UserState::Abandoned;
        record.left_at = Some(fx.now());
        debug!("[{}] {} gives up at {origin}", fx.now(), record.passenger.name);
    } else {
        debug!("[{}] {} stays, the car is loading", fx.now(), record.passenger.name);
    }
    Ok(())
}

// ── U5 ────────────────────────────────────────────────────────────────────────

/// Step from the floor's line into the car and press the destination.
pub fn board(state: &mut SimulationState, id: PassengerId, fx: &mut Effects) -> SimResult<()> {
    let record = state.passengers.get_mut(id)?;
    let (origin, destination) = (record.passenger.origin, record.passenger.destination);
    if !state.queues.remove(origin, id) {
        return Err(SimError::Invariant {
            time:    fx.now(),
            message: format!("{id} boards but is not waiting at {origin}"),
        });
    }
    state.car.board(id);
    record.state = UserState::Riding;
    record.boarded_at = Some(fx.now());
    debug!("[{}] {} gets in at {origin}", fx.now(), record.passenger.name);

    let board = &mut state.board;
    board.set_car_call(destination, true);
    if board.direction.is_neutral() {
        board.direction = Direction::toward(origin, destination);
        fx.cancel(ElevatorStep::CloseDoors);
        fx.after(state.config.timing.quick_close, ElevatorStep::CloseDoors);
    }
    Ok(())
}

// ── U6 ────────────────────────────────────────────────────────────────────────

pub fn alight(state: &mut SimulationState, id: PassengerId, fx: &mut Effects) -> SimResult<()> {
    let record = state.passengers.get_mut(id)?;
    if !state.car.remove(id) {
        return Err(SimError::Invariant {
            time:    fx.now(),
            message: format!("{id} alights but is not aboard"),
        });
    }
    record.state = UserState::Alighted;
    record.alighted_at = Some(fx.now());
    debug!("[{}] {} gets out at {}", fx.now(), record.passenger.name, state.board.floor);
    Ok(())
}
