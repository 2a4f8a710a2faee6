//! Zone, pressure and result byte codes used by the probability corpus

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MatchError, Result};

/// Vertical field zone, seen from the possessing team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldY {
    Defence = 1,
    Centre = 2,
    Attack = 3,
}

impl FieldY {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(FieldY::Defence),
            2 => Ok(FieldY::Centre),
            3 => Ok(FieldY::Attack),
            value => Err(MatchError::UnknownCode { field: "Y", value, row: 0 }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldY::Defence => "DEFENCE",
            FieldY::Centre => "CENTRE",
            FieldY::Attack => "ATTACK",
        }
    }
}

/// Horizontal field zone. Throw-in and corner-kick are restart spots on a flank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldX {
    Axis = 1,
    Flank = 2,
    ThrowIn = 3,
    CornerKick = 4,
}

impl FieldX {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(FieldX::Axis),
            2 => Ok(FieldX::Flank),
            3 => Ok(FieldX::ThrowIn),
            4 => Ok(FieldX::CornerKick),
            value => Err(MatchError::UnknownCode { field: "X", value, row: 0 }),
        }
    }

    /// Zones where the ball sits on one side of the pitch.
    pub fn is_flank_like(self) -> bool {
        !matches!(self, FieldX::Axis)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldX::Axis => "AXIS",
            FieldX::Flank => "FLANK",
            FieldX::ThrowIn => "THROW_IN",
            FieldX::CornerKick => "CORNER_KICK",
        }
    }
}

/// Pressure byte as recorded in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureCode {
    Clear = 1,
    Under = 2,
    Avoid = 3,
}

impl PressureCode {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(PressureCode::Clear),
            2 => Ok(PressureCode::Under),
            3 => Ok(PressureCode::Avoid),
            value => Err(MatchError::UnknownCode { field: "Pressure", value, row: 0 }),
        }
    }

    /// Coarse view: "under" and "avoiding" pressure both count as pressed.
    pub fn coarse(self) -> Pressure {
        match self {
            PressureCode::Clear => Pressure::Free,
            PressureCode::Under | PressureCode::Avoid => Pressure::Pressed,
        }
    }
}

/// Pressure on the ball holder as the engine tracks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pressure {
    Free,
    Pressed,
}

impl Pressure {
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            Pressure::Pressed
        } else {
            Pressure::Free
        }
    }

    pub fn is_pressed(self) -> bool {
        matches!(self, Pressure::Pressed)
    }

    pub fn matches_code(self, code: PressureCode) -> bool {
        code.coarse() == self
    }

    pub fn label(self) -> &'static str {
        match self {
            Pressure::Free => "FREE",
            Pressure::Pressed => "PRESSED",
        }
    }
}

impl From<PressureCode> for Pressure {
    fn from(code: PressureCode) -> Self {
        code.coarse()
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// ResultDesc byte: how the outcome of a record is encoded.
pub mod result_desc {
    pub const CONDITION: u8 = 1;
    pub const CHALLENGE: u8 = 2;
    pub const OTHER: u8 = 3;
}

/// Team byte inside outcome and challenge fields, relative to the acting team.
pub mod team_code {
    pub const OWN: u8 = 1;
    pub const OPP: u8 = 0;
}

/// Outcome condition codes (also used as challenge endings).
pub mod result_code {
    pub const OFFSIDE: u8 = 1;
    pub const TEAMMATE: u8 = 2;
    pub const FOUL_TACKLING: u8 = 3;
    pub const BACK_PASS: u8 = 4;
    pub const SHOT_OFF: u8 = 5;
    pub const TACKLING: u8 = 6;
    pub const ADVANTAGE: u8 = 8;
    pub const OPPONENT: u8 = 10;
    pub const GOAL_KICK: u8 = 11;
    pub const DOMINANCE: u8 = 12;
    pub const GK_FOUL: u8 = 13;
    pub const THROW_IN: u8 = 14;
    pub const SHOT_OFF_CORNER: u8 = 15;
    pub const OFFENSIVE_FOUL: u8 = 16;
    pub const GOAL: u8 = 17;
    pub const SHOT_ON_DEFENDER: u8 = 18;
    pub const HANGING_PASS: u8 = 20;
    pub const REBOUNDING: u8 = 22;
    pub const FOUL: u8 = 24;
    pub const DRIBBLE: u8 = 26;
    pub const LOOSE_BALL: u8 = 28;
    pub const DEFENDER_SAVE: u8 = 36;
    pub const KICK_AWAY_LOW: u8 = 60;

    pub fn is_foul(code: u8) -> bool {
        code == FOUL_TACKLING || code == FOUL
    }

    /// Codes that put the attacking team in front of goal.
    pub fn is_goal_scoring(code: u8) -> bool {
        matches!(code, SHOT_OFF | SHOT_OFF_CORNER | SHOT_ON_DEFENDER | GOAL)
    }
}

/// Why possession switched teams.
pub mod possession_change {
    pub const NORMAL: u8 = 1;
    pub const PASS_INTERCEPTION: u8 = 2;
    pub const GK: u8 = 3;
    pub const MAN_CHALLENGE_LOST: u8 = 4;
    pub const LOOSE_BALL: u8 = 5;
    pub const LOST_BALL_CONTROL: u8 = 6;
    pub const BOUNCING_OFF: u8 = 7;
}

/// Kind of contested ball.
pub mod challenge_type {
    pub const NORMAL: u8 = 1;
    pub const AERIAL: u8 = 2;
    pub const EASY_HEADING: u8 = 3;
    pub const BOUNCING_OFF: u8 = 4;
    pub const KICK_AWAY: u8 = 5;
    pub const DEFENDER_SAVE: u8 = 6;
}
