//! Step tags and the continuation type the event queue stores.
//!
//! A continuation names the next step of one logical process.  Elevator
//! steps carry no argument; passenger steps carry the passenger they act
//! for.  The driver dispatches on the variant with a single `match`.

use std::fmt;

use lift_core::PassengerId;

/// Steps of the elevator controller.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElevatorStep {
    /// E1: dormant wait at the home floor.
    Idle,
    /// E2: re-evaluate direction after stopping at a floor.
    Decide,
    /// E3: open the doors.
    OpenDoors,
    /// E4: let one passenger out or in.
    Serve,
    /// E5: try to close the doors.
    CloseDoors,
    /// E6: doors shut, pick a direction and get going.
    PrepareMove,
    /// E7: move up one floor.
    AscendCruise,
    /// E7A: arrived one floor up, stop or keep going.
    AscendArrive,
    /// E8: move down one floor.
    DescendCruise,
    /// E8A: arrived one floor down, stop or keep going.
    DescendArrive,
    /// E9: doors have been open too long with nothing to do.
    IdleTimeout,
}

impl ElevatorStep {
    pub const ALL: [ElevatorStep; 11] = [
        ElevatorStep::Idle,
        ElevatorStep::Decide,
        ElevatorStep::OpenDoors,
        ElevatorStep::Serve,
        ElevatorStep::CloseDoors,
        ElevatorStep::PrepareMove,
        ElevatorStep::AscendCruise,
        ElevatorStep::AscendArrive,
        ElevatorStep::DescendCruise,
        ElevatorStep::DescendArrive,
        ElevatorStep::IdleTimeout,
    ];

    /// Short label used in trace lines.
    pub fn label(self) -> &'static str {
        match self {
            ElevatorStep::Idle          => "E1",
            ElevatorStep::Decide        => "E2",
            ElevatorStep::OpenDoors     => "E3",
            ElevatorStep::Serve         => "E4",
            ElevatorStep::CloseDoors    => "E5",
            ElevatorStep::PrepareMove   => "E6",
            ElevatorStep::AscendCruise  => "E7",
            ElevatorStep::AscendArrive  => "E7A",
            ElevatorStep::DescendCruise => "E8",
            ElevatorStep::DescendArrive => "E8A",
            ElevatorStep::IdleTimeout   => "E9",
        }
    }

    /// `true` for the four floor-transit steps.
    pub fn is_transit(self) -> bool {
        matches!(
            self,
            ElevatorStep::AscendCruise
                | ElevatorStep::AscendArrive
                | ElevatorStep::DescendCruise
                | ElevatorStep::DescendArrive
        )
    }
}

/// Steps of a passenger.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UserStep {
    /// U1: appear at the origin floor.
    Arrive,
    /// U2: press the call button (or catch the open doors).
    Signal,
    /// U3: join the floor's waiting line.
    Enqueue,
    /// U4: patience ran out.
    Abandon,
    /// U5: step into the car.
    Board,
    /// U6: step out at the destination.
    Alight,
}

impl UserStep {
    pub const ALL: [UserStep; 6] = [
        UserStep::Arrive,
        UserStep::Signal,
        UserStep::Enqueue,
        UserStep::Abandon,
        UserStep::Board,
        UserStep::Alight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UserStep::Arrive  => "U1",
            UserStep::Signal  => "U2",
            UserStep::Enqueue => "U3",
            UserStep::Abandon => "U4",
            UserStep::Board   => "U5",
            UserStep::Alight  => "U6",
        }
    }
}

/// A scheduled future invocation of one step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continuation {
    Elevator(ElevatorStep),
    User(UserStep, PassengerId),
}

impl Continuation {
    /// The elevator step, if this is an elevator continuation.
    #[inline]
    pub fn elevator_step(self) -> Option<ElevatorStep> {
        match self {
            Continuation::Elevator(step) => Some(step),
            Continuation::User(..)       => None,
        }
    }

    /// The passenger this continuation acts for, if any.
    #[inline]
    pub fn passenger(self) -> Option<PassengerId> {
        match self {
            Continuation::Elevator(_)   => None,
            Continuation::User(_, p)    => Some(p),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Continuation::Elevator(step) => step.label(),
            Continuation::User(step, _)  => step.label(),
        }
    }
}

impl From<ElevatorStep> for Continuation {
    fn from(step: ElevatorStep) -> Self {
        Continuation::Elevator(step)
    }
}

impl fmt::Display for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continuation::Elevator(step) => write!(f, "{}", step.label()),
            Continuation::User(step, p)  => write!(f, "{}({p})", step.label()),
        }
    }
}
