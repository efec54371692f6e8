//! Tests for lift-sim: single transitions, the decision procedure, and
//! whole-run scenarios.

use lift_core::{Direction, Floor, PassengerId, SimConfig, Tick};
use lift_schedule::{Continuation, ElevatorStep, ManifestEntry, PassengerManifest, UserStep};

use crate::{Effects, Intent, Sim, SimBuilder, SimObserver, SimStats, SimulationState, StepRecord};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn checked_config() -> SimConfig {
    SimConfig { check_invariants: true, ..SimConfig::default() }
}

fn manifest(entries: Vec<ManifestEntry>) -> PassengerManifest {
    PassengerManifest::new(entries).unwrap()
}

fn sim(entries: Vec<ManifestEntry>) -> Sim {
    SimBuilder::new()
        .config(checked_config())
        .manifest(manifest(entries))
        .build()
        .unwrap()
}

/// Bare state (no driver) with the given passengers, car dormant at home.
fn state(entries: Vec<ManifestEntry>) -> SimulationState {
    SimulationState::new(SimConfig::default(), manifest(entries))
}

fn elev(step: ElevatorStep) -> Continuation {
    Continuation::Elevator(step)
}

fn sched(at: u64, c: impl Into<Continuation>) -> Intent {
    Intent::Schedule { at: Tick(at), continuation: c.into() }
}

const P0: PassengerId = PassengerId(0);
const P1: PassengerId = PassengerId(1);

#[derive(Default)]
struct Recorder {
    steps: Vec<StepRecord>,
    ended: Option<SimStats>,
}

impl SimObserver for Recorder {
    fn on_step(&mut self, record: &StepRecord) {
        self.steps.push(record.clone());
    }

    fn on_sim_end(&mut self, stats: &SimStats) {
        self.ended = Some(stats.clone());
    }
}

/// The manifest the classic run uses.
fn knuth_entries() -> Vec<ManifestEntry> {
    const GIVE_UP: u64 = 1000;
    vec![
        ManifestEntry::new(0, 2, 0, 152, "User 1"),
        ManifestEntry::new(4, 1, 38, GIVE_UP, "User 2"),
        ManifestEntry::new(2, 1, 136, GIVE_UP, "User 3"),
        ManifestEntry::new(2, 1, 141, GIVE_UP, "User 4"),
        ManifestEntry::new(3, 1, 291, GIVE_UP, "User 5"),
        ManifestEntry::new(2, 1, 364, 540 - 364, "User 6"),
        ManifestEntry::new(1, 2, 602, GIVE_UP, "User 7"),
        ManifestEntry::new(1, 0, 827, GIVE_UP, "User 8"),
        ManifestEntry::new(1, 3, 876, GIVE_UP, "User 9"),
        ManifestEntry::new(0, 4, 1048, GIVE_UP, "User 10"),
        ManifestEntry::new(2, 2, 4384, GIVE_UP, "User 16"),
        ManifestEntry::new(2, 3, 4384, GIVE_UP, "User 17"),
        ManifestEntry::new(3, 2, 5100, GIVE_UP, "User 18"),
        ManifestEntry::new(3, 1, 5700, GIVE_UP, "User 19"),
        ManifestEntry::new(2, 0, 5710, GIVE_UP, "User 20"),
        ManifestEntry::new(3, 1, 7000, GIVE_UP, "User 21"),
        ManifestEntry::new(1, 3, 7000, 350, "User 22"),
        ManifestEntry::new(3, 2, 7620, GIVE_UP, "User 23"),
        ManifestEntry::new(0, 0, 9999, GIVE_UP, "DUMMY"),
    ]
}

// ── Decision procedure ────────────────────────────────────────────────────────

#[cfg(test)]
mod decision {
    use super::*;
    use crate::decide;

    #[test]
    fn dormant_car_heads_for_lowest_call() {
        let mut s = state(vec![]);
        s.board.set_up_call(Floor(3), true);
        s.board.set_up_call(Floor(0), true);
        let mut fx = Effects::new(Tick(10), None);
        decide(&mut s, &mut fx);
        assert_eq!(s.board.direction, Direction::Down);
        assert_eq!(fx.intents(), &[sched(30, ElevatorStep::PrepareMove)]);
    }

    #[test]
    fn dormant_car_opens_for_home_call() {
        let mut s = state(vec![]);
        s.board.set_down_call(Floor(2), true);
        let mut fx = Effects::new(Tick(0), None);
        decide(&mut s, &mut fx);
        assert_eq!(s.board.direction, Direction::Neutral);
        assert_eq!(fx.intents(), &[sched(20, ElevatorStep::OpenDoors)]);
    }

    #[test]
    fn second_call_schedules_nothing() {
        for floor in [Floor(2), Floor(4)] {
            let mut s = state(vec![]);
            s.board.set_down_call(floor, true);
            let mut first = Effects::new(Tick(0), None);
            decide(&mut s, &mut first);
            assert_eq!(first.intents().len(), 1);

            let mut second = Effects::new(Tick(0), None);
            decide(&mut s, &mut second);
            assert!(second.intents().is_empty(), "{floor}: {:?}", second.intents());
        }
    }

    #[test]
    fn committed_direction_is_left_alone() {
        let mut s = state(vec![]);
        s.board.direction = Direction::Up;
        s.board.set_up_call(Floor(0), true);
        let mut fx = Effects::new(Tick(0), None);
        decide(&mut s, &mut fx);
        assert_eq!(s.board.direction, Direction::Up);
        assert!(fx.intents().is_empty());
    }

    #[test]
    fn no_calls_sends_moving_car_home() {
        let mut s = state(vec![]);
        s.board.floor = Floor(4);
        s.controller.position = ElevatorStep::PrepareMove;
        let mut fx = Effects::new(Tick(0), None);
        decide(&mut s, &mut fx);
        assert_eq!(s.board.direction, Direction::Down);
        assert!(fx.intents().is_empty());
    }

    #[test]
    fn no_calls_elsewhere_is_noop() {
        let mut s = state(vec![]);
        s.board.floor = Floor(4);
        s.controller.position = ElevatorStep::Serve;
        let mut fx = Effects::new(Tick(0), None);
        decide(&mut s, &mut fx);
        assert_eq!(s.board.direction, Direction::Neutral);
    }
}

// ── Single elevator transitions ───────────────────────────────────────────────

#[cfg(test)]
mod transitions {
    use super::*;
    use crate::elevator::run_step;
    use crate::{SimError, UserState};

    #[test]
    fn open_doors_rearms_timers() {
        let mut s = state(vec![]);
        let mut fx = Effects::new(Tick(100), None);
        run_step(&mut s, ElevatorStep::OpenDoors, &mut fx).unwrap();
        assert!(s.board.doors_busy && s.board.idle_timeout_armed && !s.board.doors_open_idle);
        assert_eq!(
            fx.intents(),
            &[
                sched(120, ElevatorStep::Serve),
                Intent::Cancel(elev(ElevatorStep::CloseDoors)),
                sched(176, ElevatorStep::CloseDoors),
                Intent::Cancel(elev(ElevatorStep::IdleTimeout)),
                sched(400, ElevatorStep::IdleTimeout),
            ]
        );
    }

    #[test]
    fn serve_schedules_next_transfer_before_boarding_effects() {
        let mut s = state(vec![ManifestEntry::new(2, 4, 0, 1000, "rider")]);
        s.queues.push_back(Floor(2), P0);
        s.passengers.get_mut(P0).unwrap().state = UserState::Queued;

        let mut fx = Effects::new(Tick(100), None);
        run_step(&mut s, ElevatorStep::Serve, &mut fx).unwrap();
        assert_eq!(
            fx.intents(),
            &[
                Intent::Cancel(Continuation::User(UserStep::Abandon, P0)),
                sched(125, ElevatorStep::Serve),
                Intent::Cancel(elev(ElevatorStep::CloseDoors)),
                sched(125, ElevatorStep::CloseDoors),
            ]
        );
        assert_eq!(fx.inline_steps(), &[Continuation::User(UserStep::Board, P0)]);
        assert_eq!(s.board.direction, Direction::Up);
        assert!(s.board.car_call(Floor(4)));
        assert_eq!(s.car.riders(), &[P0]);
        assert_eq!(s.queues.len(Floor(2)), 0);
    }

    #[test]
    fn serve_lets_latest_rider_out_first() {
        let mut s = state(vec![
            ManifestEntry::new(0, 2, 0, 1000, "first"),
            ManifestEntry::new(0, 2, 0, 1000, "second"),
        ]);
        for p in [P0, P1] {
            s.car.board(p);
            s.passengers.get_mut(p).unwrap().state = UserState::Riding;
        }
        let mut fx = Effects::new(Tick(50), None);
        run_step(&mut s, ElevatorStep::Serve, &mut fx).unwrap();
        assert_eq!(s.car.riders(), &[P0]);
        assert_eq!(s.passengers.get(P1).unwrap().state, UserState::Alighted);
        assert_eq!(fx.intents(), &[sched(75, ElevatorStep::Serve)]);
    }

    #[test]
    fn serve_with_nobody_leaves_doors_idle() {
        let mut s = state(vec![]);
        s.board.doors_busy = true;
        let mut fx = Effects::new(Tick(50), None);
        run_step(&mut s, ElevatorStep::Serve, &mut fx).unwrap();
        assert!(!s.board.doors_busy);
        assert!(s.board.doors_open_idle);
        assert!(fx.intents().is_empty());
    }

    #[test]
    fn close_doors_flutters_while_busy() {
        let mut s = state(vec![]);
        s.board.doors_busy = true;
        let mut fx = Effects::new(Tick(10), None);
        run_step(&mut s, ElevatorStep::CloseDoors, &mut fx).unwrap();
        assert_eq!(fx.intents(), &[sched(50, ElevatorStep::CloseDoors)]);

        s.board.doors_busy = false;
        s.board.doors_open_idle = true;
        let mut fx = Effects::new(Tick(50), None);
        run_step(&mut s, ElevatorStep::CloseDoors, &mut fx).unwrap();
        assert_eq!(fx.intents(), &[sched(70, ElevatorStep::PrepareMove)]);
        assert!(!s.board.doors_open_idle);
    }

    #[test]
    fn prepare_move_keeps_opposite_hall_call() {
        let mut s = state(vec![]);
        s.board.floor = Floor(1);
        s.board.direction = Direction::Up;
        s.board.idle_timeout_armed = true;
        s.board.set_up_call(Floor(1), true);
        s.board.set_down_call(Floor(1), true);
        s.board.set_car_call(Floor(3), true);
        s.controller.position = ElevatorStep::PrepareMove;

        let mut fx = Effects::new(Tick(0), None);
        run_step(&mut s, ElevatorStep::PrepareMove, &mut fx).unwrap();
        assert!(!s.board.up_call(Floor(1)));
        assert!(s.board.down_call(Floor(1)));
        assert_eq!(
            fx.intents(),
            &[sched(15, ElevatorStep::AscendCruise), Intent::Cancel(elev(ElevatorStep::IdleTimeout))]
        );
    }

    #[test]
    fn prepare_move_at_home_with_nothing_goes_dormant() {
        let mut s = state(vec![]);
        s.controller.position = ElevatorStep::PrepareMove;
        let mut fx = Effects::new(Tick(0), None);
        run_step(&mut s, ElevatorStep::PrepareMove, &mut fx).unwrap();
        assert!(s.controller.is_idle());
        assert!(fx.intents().is_empty());
    }

    #[test]
    fn arrival_passes_floor_without_calls() {
        let mut s = state(vec![]);
        s.board.floor = Floor(3);
        s.board.direction = Direction::Up;
        s.board.set_car_call(Floor(4), true);
        let mut fx = Effects::new(Tick(100), None);
        run_step(&mut s, ElevatorStep::AscendArrive, &mut fx).unwrap();
        assert_eq!(s.board.floor, Floor(4));
        assert_eq!(fx.intents(), &[sched(151, ElevatorStep::AscendArrive)]);
        assert_eq!(fx.inline_steps(), &[elev(ElevatorStep::AscendCruise)]);
    }

    #[test]
    fn arrival_stops_for_opposite_call_at_the_end() {
        let mut s = state(vec![]);
        s.board.floor = Floor(1);
        s.board.direction = Direction::Down;
        s.board.set_up_call(Floor(1), true);
        let mut fx = Effects::new(Tick(100), None);
        run_step(&mut s, ElevatorStep::DescendArrive, &mut fx).unwrap();
        assert_eq!(fx.intents(), &[sched(123, ElevatorStep::Decide)]);
    }

    #[test]
    fn arrival_stops_at_home_when_nothing_beyond() {
        let mut s = state(vec![]);
        s.board.floor = Floor(2);
        s.board.direction = Direction::Up;
        let mut fx = Effects::new(Tick(0), None);
        run_step(&mut s, ElevatorStep::AscendArrive, &mut fx).unwrap();
        assert_eq!(fx.intents(), &[sched(14, ElevatorStep::Decide)]);
    }

    #[test]
    fn decide_reverses_for_riders_behind() {
        let mut s = state(vec![]);
        s.board.floor = Floor(3);
        s.board.direction = Direction::Up;
        s.board.set_car_call(Floor(0), true);
        s.board.set_down_call(Floor(3), true);
        let mut fx = Effects::new(Tick(7), None);
        run_step(&mut s, ElevatorStep::Decide, &mut fx).unwrap();
        assert_eq!(s.board.direction, Direction::Down);
        assert!(!s.board.has_call(Floor(3)));
        assert_eq!(fx.intents(), &[sched(7, ElevatorStep::OpenDoors)]);
    }

    #[test]
    fn decide_continues_with_calls_ahead() {
        let mut s = state(vec![]);
        s.board.floor = Floor(1);
        s.board.direction = Direction::Up;
        s.board.set_up_call(Floor(1), true);
        s.board.set_down_call(Floor(4), true);
        let mut fx = Effects::new(Tick(7), None);
        run_step(&mut s, ElevatorStep::Decide, &mut fx).unwrap();
        assert_eq!(s.board.direction, Direction::Up);
        assert!(s.board.up_call(Floor(1)));
    }

    #[test]
    fn cruising_off_the_top_is_an_error() {
        let mut s = state(vec![]);
        s.board.floor = Floor(4);
        s.board.direction = Direction::Up;
        let mut fx = Effects::new(Tick(0), None);
        let err = run_step(&mut s, ElevatorStep::AscendCruise, &mut fx).unwrap_err();
        assert!(matches!(err, SimError::FloorOutOfBounds { from: Floor(4), direction: Direction::Up }));
    }
}

// ── Passenger transitions ─────────────────────────────────────────────────────

#[cfg(test)]
mod passengers {
    use super::*;
    use crate::UserState;
    use crate::user::run_step;

    #[test]
    fn arrival_calls_and_queues() {
        let mut s = state(vec![ManifestEntry::new(4, 1, 38, 1000, "User 2")]);
        let mut fx = Effects::new(Tick(38), None);
        run_step(&mut s, UserStep::Arrive, P0, &mut fx).unwrap();
        assert!(s.board.down_call(Floor(4)));
        assert_eq!(s.board.direction, Direction::Up);
        assert_eq!(s.queues.front(Floor(4)), Some(P0));
        assert_eq!(s.passengers.get(P0).unwrap().state, UserState::Queued);
        assert_eq!(
            fx.intents(),
            &[
                sched(58, ElevatorStep::PrepareMove),
                sched(1038, Continuation::User(UserStep::Abandon, P0)),
            ]
        );
        assert_eq!(
            fx.inline_steps(),
            &[Continuation::User(UserStep::Signal, P0), Continuation::User(UserStep::Enqueue, P0)]
        );
    }

    #[test]
    fn degenerate_passenger_is_dropped() {
        let mut s = state(vec![ManifestEntry::new(2, 2, 0, 1000, "User 16")]);
        let mut fx = Effects::new(Tick(0), None);
        run_step(&mut s, UserStep::Arrive, P0, &mut fx).unwrap();
        let r = s.passengers.get(P0).unwrap();
        assert_eq!(r.state, UserState::Dropped);
        assert_eq!(r.left_at, Some(Tick(0)));
        assert!(!s.board.any_call());
        assert_eq!(s.queues.total(), 0);
        assert!(fx.intents().is_empty());
    }

    #[test]
    fn arrival_reopens_closing_doors() {
        let mut s = state(vec![ManifestEntry::new(2, 0, 30, 1000, "late")]);
        s.board.doors_open_idle = true;
        let mut fx = Effects::new(Tick(30), Some(ElevatorStep::CloseDoors));
        run_step(&mut s, UserStep::Arrive, P0, &mut fx).unwrap();
        assert_eq!(
            &fx.intents()[..2],
            &[sched(30, ElevatorStep::OpenDoors), Intent::Cancel(elev(ElevatorStep::CloseDoors))]
        );
        assert!(!s.board.any_call());
    }

    #[test]
    fn arrival_during_loading_joins_the_queue() {
        let mut s = state(vec![ManifestEntry::new(2, 0, 30, 1000, "late")]);
        s.board.doors_busy = true;
        s.board.idle_timeout_armed = true;
        let mut fx = Effects::new(Tick(30), Some(ElevatorStep::CloseDoors));
        run_step(&mut s, UserStep::Arrive, P0, &mut fx).unwrap();
        assert!(!fx.intents().contains(&sched(30, ElevatorStep::OpenDoors)));
        assert!(!fx.intents().iter().any(|i| matches!(i, Intent::Cancel(_))));
        assert!(s.queues.contains(Floor(2), P0));
        assert_eq!(s.passengers.get(P0).unwrap().state, UserState::Queued);
    }

    #[test]
    fn arrival_restarts_idle_doors() {
        let mut s = state(vec![ManifestEntry::new(2, 0, 30, 1000, "late")]);
        s.board.doors_open_idle = true;
        s.board.idle_timeout_armed = true;
        let mut fx = Effects::new(Tick(30), Some(ElevatorStep::IdleTimeout));
        run_step(&mut s, UserStep::Arrive, P0, &mut fx).unwrap();
        assert!(s.board.doors_busy);
        assert!(!s.board.doors_open_idle);
        assert_eq!(fx.intents()[0], sched(30, ElevatorStep::Serve));
    }

    #[test]
    fn abandon_leaves_unless_car_is_loading_here() {
        let mut s = state(vec![ManifestEntry::new(0, 2, 0, 152, "User 1")]);
        s.queues.push_back(Floor(0), P0);
        s.passengers.get_mut(P0).unwrap().state = UserState::Queued;

        s.board.floor = Floor(0);
        s.board.doors_busy = true;
        run_step(&mut s, UserStep::Abandon, P0, &mut Effects::new(Tick(152), None)).unwrap();
        assert_eq!(s.passengers.get(P0).unwrap().state, UserState::Queued);

        s.board.doors_busy = false;
        run_step(&mut s, UserStep::Abandon, P0, &mut Effects::new(Tick(152), None)).unwrap();
        assert_eq!(s.passengers.get(P0).unwrap().state, UserState::Abandoned);
        assert!(!s.queues.contains(Floor(0), P0));
    }

    #[test]
    fn board_without_waiting_is_an_error() {
        let mut s = state(vec![ManifestEntry::new(0, 2, 0, 152, "User 1")]);
        let err = run_step(&mut s, UserStep::Board, P0, &mut Effects::new(Tick(0), None));
        assert!(err.is_err());
    }

    #[test]
    fn unknown_passenger_is_an_error() {
        let mut s = state(vec![]);
        let err = run_step(&mut s, UserStep::Arrive, PassengerId(3), &mut Effects::new(Tick(0), None));
        assert!(matches!(err, Err(crate::SimError::UnknownPassenger(PassengerId(3)))));
    }
}

// ── Whole-run scenarios ───────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;
    use crate::{NoopObserver, UserState};

    /// One passenger from floor 0 to floor 2; the car fetches them from home.
    #[test]
    fn simple_service() {
        let mut sim = sim(vec![ManifestEntry::new(0, 2, 0, 1000, "User 1")]);
        let stats = sim.run(&mut NoopObserver).unwrap();

        let r = sim.state.passengers.get(P0).unwrap();
        assert_eq!(r.state, UserState::Alighted);
        assert_eq!(r.boarded_at, Some(Tick(200)));
        assert_eq!(r.alighted_at, Some(Tick(396)));
        assert_eq!(stats.served, 1);
        assert_eq!(stats.abandoned, 0);
        assert_eq!(stats.final_time, Tick(676));
        // One queued descent plus one inline, same going up.
        assert_eq!(stats.count("E8"), 2);
        assert_eq!(stats.count("E7"), 2);
        assert!(sim.state.controller.is_idle());
        assert_eq!(sim.state.board.floor, Floor(2));
        assert!(sim.queue.is_empty());
    }

    /// A passenger who never gives up is served like any other.
    #[test]
    fn unbounded_patience() {
        let mut sim = sim(vec![ManifestEntry::new(0, 2, 0, u64::MAX, "User 1")]);
        let stats = sim.run(&mut NoopObserver).unwrap();

        let r = sim.state.passengers.get(P0).unwrap();
        assert_eq!(r.state, UserState::Alighted);
        assert_eq!(r.boarded_at, Some(Tick(200)));
        assert_eq!(stats.served, 1);
        assert_eq!(stats.abandoned, 0);
        assert_eq!(stats.final_time, Tick(676));
        assert!(sim.queue.is_empty());
    }

    /// Patience runs out while the car is still on its way.
    #[test]
    fn abandonment() {
        let mut sim = sim(vec![ManifestEntry::new(0, 2, 0, 152, "User 1")]);
        sim.run_until(Tick(152), &mut NoopObserver).unwrap();
        let r = sim.state.passengers.get(P0).unwrap();
        assert_eq!(r.state, UserState::Abandoned);
        assert_eq!(r.left_at, Some(Tick(152)));
        assert!(!sim.state.queues.contains(Floor(0), P0));

        let stats = sim.run(&mut NoopObserver).unwrap();
        let r = sim.state.passengers.get(P0).unwrap();
        assert_eq!(r.boarded_at, None);
        assert!(!sim.state.car.contains(P0));
        assert_eq!((stats.boarded, stats.abandoned, stats.served), (0, 1, 0));
    }

    /// A passenger turns up at the car's floor just as the doors are about
    /// to close.
    #[test]
    fn reopening_doors() {
        let mut sim = sim(vec![
            ManifestEntry::new(0, 2, 0, 1000, "User 1"),
            ManifestEntry::new(2, 0, 430, 1000, "User 2"),
        ]);
        sim.run_until(Tick(429), &mut NoopObserver).unwrap();
        assert_eq!(sim.queue.next_elevator_step(), Some((Tick(452), ElevatorStep::CloseDoors)));

        let dispatched = sim.step(&mut NoopObserver).unwrap();
        assert_eq!(dispatched, Some((Tick(430), Continuation::User(UserStep::Arrive, P1))));
        assert_eq!(sim.queue.scheduled_at(&elev(ElevatorStep::OpenDoors)), Some(Tick(430)));
        assert!(!sim.queue.contains(&elev(ElevatorStep::CloseDoors)));

        let dispatched = sim.step(&mut NoopObserver).unwrap();
        assert_eq!(dispatched, Some((Tick(430), elev(ElevatorStep::OpenDoors))));
        assert!(sim.state.board.doors_busy);

        let stats = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(stats.served, 2);
        assert_eq!(sim.state.passengers.get(P1).unwrap().boarded_at, Some(Tick(450)));
    }

    /// Same, but the doors have already shut and the car is about to leave.
    #[test]
    fn reopening_after_doors_shut() {
        let mut sim = sim(vec![
            ManifestEntry::new(0, 2, 0, 1000, "User 1"),
            ManifestEntry::new(2, 0, 460, 1000, "User 2"),
        ]);
        sim.run_until(Tick(459), &mut NoopObserver).unwrap();
        assert_eq!(sim.queue.next_elevator_step(), Some((Tick(472), ElevatorStep::PrepareMove)));

        sim.step(&mut NoopObserver).unwrap();
        assert!(!sim.queue.contains(&elev(ElevatorStep::PrepareMove)));
        assert_eq!(sim.queue.scheduled_at(&elev(ElevatorStep::OpenDoors)), Some(Tick(460)));

        let stats = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(stats.served, 2);
    }

    /// Two passengers on one floor going opposite ways share one stop.
    #[test]
    fn opposite_calls_one_visit() {
        let mut sim = sim(vec![
            ManifestEntry::new(1, 3, 0, 1000, "up"),
            ManifestEntry::new(1, 0, 5, 1000, "down"),
        ]);
        let mut rec = Recorder::default();
        let stats = sim.run(&mut rec).unwrap();

        let openings_at_1 = rec
            .steps
            .iter()
            .filter(|r| r.continuation == elev(ElevatorStep::OpenDoors) && r.floor == Floor(1))
            .count();
        assert_eq!(openings_at_1, 1);

        let up = sim.state.passengers.get(P0).unwrap();
        let down = sim.state.passengers.get(P1).unwrap();
        assert_eq!(up.boarded_at, Some(Tick(139)));
        assert_eq!(down.boarded_at, Some(Tick(164)));
        assert_eq!(up.state, UserState::Alighted);
        assert_eq!(down.state, UserState::Alighted);
        assert_eq!(stats.abandoned, 0);
        // The second boarding kept the doors open past the quick close.
        assert!(stats.count("E5") >= 3);
    }

    #[test]
    fn empty_manifest_just_idles() {
        let mut sim = SimBuilder::new().build().unwrap();
        let stats = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(stats.events_dispatched, 1);
        assert_eq!(stats.count("E1"), 1);
        assert_eq!(stats.final_time, Tick::ZERO);
    }
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod runs {
    use super::*;
    use crate::UserState;
    use lift_core::SimRng;
    use lift_schedule::{ManifestSpec, generate_manifest};

    #[test]
    fn classic_manifest_runs_clean() {
        let mut sim = sim(knuth_entries());
        let mut rec = Recorder::default();
        let stats = sim.run(&mut rec).unwrap();

        assert_eq!(sim.state.passengers.len(), 18);
        assert!(sim.state.passengers.iter().all(|r| r.state.is_finished()));
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.served + stats.abandoned + stats.dropped, 18);
        assert_eq!(rec.steps.len() as u64, stats.events_dispatched);
        assert_eq!(rec.ended.as_ref(), Some(&stats));
        assert!(sim.state.car.is_empty());
        assert_eq!(sim.state.queues.total(), 0);
        assert!(sim.state.controller.is_idle());
    }

    #[test]
    fn trace_times_never_decrease() {
        let mut sim = sim(knuth_entries());
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.steps.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn runs_are_reproducible() {
        let run = || {
            let mut sim = sim(knuth_entries());
            let mut rec = Recorder::default();
            sim.run(&mut rec).unwrap();
            rec.steps
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn random_manifests_hold_invariants() {
        for seed in 0..25 {
            let spec = ManifestSpec { count: 40, max_gap: 150, ..ManifestSpec::default() };
            let m = generate_manifest(&spec, &mut SimRng::new(seed)).unwrap();
            let mut sim = SimBuilder::new().config(checked_config()).manifest(m).build().unwrap();
            let stats = sim
                .run(&mut crate::NoopObserver)
                .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
            assert_eq!(stats.served + stats.abandoned, 40, "seed {seed}");
            assert!(sim.state.passengers.iter().all(|r| r.state != UserState::Riding));
        }
    }
}

// ── Builder, errors, and limits ───────────────────────────────────────────────

#[cfg(test)]
mod failures {
    use super::*;
    use crate::{NoopObserver, SimError};
    use lift_schedule::ScheduleError;

    #[test]
    fn builder_rejects_unserved_floors() {
        let result = SimBuilder::new()
            .manifest(manifest(vec![ManifestEntry::new(0, 7, 0, 10, "roof")]))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn builder_rejects_bad_config() {
        let config = SimConfig { home_floor: Floor(6), ..SimConfig::default() };
        assert!(matches!(SimBuilder::new().config(config).build(), Err(SimError::Lift(_))));
    }

    #[test]
    fn capacity_exhaustion_is_reported() {
        let config = SimConfig { event_capacity: Some(3), ..checked_config() };
        let mut sim = SimBuilder::new()
            .config(config)
            .manifest(manifest(vec![ManifestEntry::new(0, 2, 0, 1000, "User 1")]))
            .build()
            .unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(err.is_capacity_exceeded(), "{err}");
        assert_eq!(sim.now(), Tick(180));
    }

    #[test]
    fn capacity_checked_while_seeding() {
        let config = SimConfig { event_capacity: Some(2), ..SimConfig::default() };
        let result = SimBuilder::new()
            .config(config)
            .manifest(manifest(vec![
                ManifestEntry::new(0, 2, 0, 10, "a"),
                ManifestEntry::new(0, 2, 1, 10, "b"),
            ]))
            .build();
        assert!(result.is_err_and(|e| e.is_capacity_exceeded()));
    }

    #[test]
    fn ambiguous_cancel_stops_the_run() {
        let mut sim = SimBuilder::new().build().unwrap();
        sim.queue.schedule(Tick(1), elev(ElevatorStep::OpenDoors)).unwrap();
        sim.queue.schedule(Tick(50), elev(ElevatorStep::CloseDoors)).unwrap();
        sim.queue.schedule(Tick(60), elev(ElevatorStep::CloseDoors)).unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Schedule(ScheduleError::AmbiguousCancel { count: 2, .. })));
        assert_eq!(sim.now(), Tick(1));
    }

    #[test]
    fn invariant_violation_stops_the_run() {
        let mut sim = sim(vec![]);
        sim.state.board.floor = Floor(3);
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Invariant { time: Tick(0), .. }));
    }
}
