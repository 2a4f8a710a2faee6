//! Field state: where play currently stands
//!
//! A fresh value is built after every resolved instant; nothing is patched in place
//! except the crosser annotation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codes::{FieldX, FieldY, Pressure};
use super::tactics::TacticPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// Touchline the ball is on when play is on a flank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Lane used to pick a receiving player across the width of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Left,
    Right,
    Central,
}

impl Lane {
    pub fn from_side(side: Option<Side>) -> Self {
        match side {
            Some(Side::Left) => Lane::Left,
            Some(Side::Right) => Lane::Right,
            None => Lane::Central,
        }
    }

    /// Which sub-positions serve this lane.
    pub fn accepts(self, position: TacticPosition) -> bool {
        match self {
            Lane::Left => matches!(position, TacticPosition::Left | TacticPosition::LeftAxis),
            Lane::Right => matches!(position, TacticPosition::Right | TacticPosition::RightAxis),
            Lane::Central => matches!(
                position,
                TacticPosition::Axis | TacticPosition::LeftAxis | TacticPosition::RightAxis
            ),
        }
    }
}

/// Index of a player inside its team's squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub team: TeamSide,
    pub x: FieldX,
    pub y: FieldY,
    pub pressure: Pressure,
    pub player: PlayerId,
    /// Present iff `x` is flank-like.
    side: Option<Side>,
    pub crosser: Option<PlayerId>,
}

impl FieldState {
    /// Builds a state; `side` is dropped unless `x` is a flank zone.
    pub fn new(
        team: TeamSide,
        x: FieldX,
        y: FieldY,
        pressure: Pressure,
        side: Option<Side>,
        player: PlayerId,
    ) -> Self {
        let side = if x.is_flank_like() { side } else { None };
        Self { team, x, y, pressure, player, side, crosser: None }
    }

    /// Restart from the back: axis, own defence, free.
    pub fn restart(team: TeamSide, pressure: Pressure, player: PlayerId) -> Self {
        Self::new(team, FieldX::Axis, FieldY::Defence, pressure, None, player)
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn lane(&self) -> Lane {
        Lane::from_side(self.side)
    }

    pub fn is_on_flank(&self) -> bool {
        self.x.is_flank_like()
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?},{},{},{})",
            self.team,
            self.y.label(),
            self.x.label(),
            self.pressure.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_only_on_flank() {
        let axis = FieldState::new(
            TeamSide::Home,
            FieldX::Axis,
            FieldY::Centre,
            Pressure::Free,
            Some(Side::Left),
            PlayerId(3),
        );
        assert_eq!(axis.side(), None);
        assert_eq!(axis.lane(), Lane::Central);

        let corner = FieldState::new(
            TeamSide::Away,
            FieldX::CornerKick,
            FieldY::Attack,
            Pressure::Free,
            Some(Side::Right),
            PlayerId(7),
        );
        assert_eq!(corner.side(), Some(Side::Right));
        assert_eq!(corner.lane(), Lane::Right);
    }

    #[test]
    fn test_lane_acceptance() {
        assert!(Lane::Left.accepts(TacticPosition::LeftAxis));
        assert!(!Lane::Left.accepts(TacticPosition::Axis));
        assert!(Lane::Central.accepts(TacticPosition::RightAxis));
        assert!(!Lane::Central.accepts(TacticPosition::Right));
    }

    #[test]
    fn test_display() {
        let s = FieldState::restart(TeamSide::Home, Pressure::Free, PlayerId(0));
        assert_eq!(s.to_string(), "(Home,DEFENCE,AXIS,FREE)");
        assert_eq!(TeamSide::Home.opponent(), TeamSide::Away);
    }
}
