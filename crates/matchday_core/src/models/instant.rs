//! Corpus instant: one recorded transition
//!
//! Source-side codes are validated when the corpus is transformed. Outcome-side zone
//! codes stay raw and are validated when a next state is built from them.

use serde::Serialize;
use std::fmt;

use super::action::Action;
use super::codes::{result_code, team_code, FieldX, FieldY, PressureCode};
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The acting team keeps the ball.
    Success { condition: u8 },
    /// The opponent gets the ball.
    Opponent { condition: u8, possession_change: u8 },
    /// Contested ball; `end_team` is relative to the acting team.
    Challenge {
        start_team: u8,
        start_y: u8,
        end_team: u8,
        end_y: u8,
        end_x: u8,
        ending: u8,
        kind: u8,
    },
}

impl Outcome {
    /// Outcome condition code. Challenges carry none; their `ending` plays that role.
    pub fn condition(&self) -> Option<u8> {
        match self {
            Outcome::Success { condition } | Outcome::Opponent { condition, .. } => Some(*condition),
            Outcome::Challenge { .. } => None,
        }
    }

    pub fn possession_change(&self) -> Option<u8> {
        match self {
            Outcome::Opponent { possession_change, .. } => Some(*possession_change),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_opponent(&self) -> bool {
        matches!(self, Outcome::Opponent { .. })
    }

    pub fn is_challenge(&self) -> bool {
        matches!(self, Outcome::Challenge { .. })
    }

    /// Whether the acting team still has the ball once this outcome is played out.
    pub fn possession_kept(&self) -> bool {
        match self {
            Outcome::Success { .. } => true,
            Outcome::Opponent { .. } => false,
            Outcome::Challenge { end_team, .. } => *end_team == team_code::OWN,
        }
    }

    /// A foul committed against the acting team.
    pub fn is_foul(&self) -> bool {
        match self {
            Outcome::Challenge { ending, .. } => result_code::is_foul(*ending),
            other => other.condition().map(result_code::is_foul).unwrap_or(false),
        }
    }

    /// A foul committed by the acting team.
    pub fn is_offensive_foul(&self) -> bool {
        match self {
            Outcome::Challenge { end_team, ending, .. } => {
                *end_team == team_code::OPP && *ending == result_code::FOUL
            }
            other => matches!(
                other.condition(),
                Some(result_code::OFFENSIVE_FOUL) | Some(result_code::GK_FOUL)
            ),
        }
    }

    pub fn is_goal_scoring_opportunity(&self) -> bool {
        self.condition().map(result_code::is_goal_scoring).unwrap_or(false)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { condition } => write!(f, "Success: {}", condition),
            Outcome::Opponent { condition, possession_change } => {
                write!(f, "Opponent: {} , {}", condition, possession_change)
            }
            Outcome::Challenge { start_team, start_y, end_team, end_y, end_x, ending, kind } => write!(
                f,
                "Challenge: {},{},{},{},{},{},{}",
                start_team, start_y, end_team, end_y, end_x, ending, kind
            ),
        }
    }
}

/// Raw outcome zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeState {
    pub y: u8,
    pub x: u8,
    pub pressure: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instant {
    pub y: FieldY,
    pub x: FieldX,
    pub pressure: PressureCode,
    pub action: Action,
    pub outcome: Outcome,
    pub outcome_state: OutcomeState,
    /// Row id from the corpus, kept for diagnostics.
    pub row_id: u8,
}

impl Instant {
    /// Same source zone and action; pressure is not compared.
    pub fn same_shape(&self, other: &Instant) -> bool {
        self.y == other.y && self.x == other.x && self.action == other.action
    }

    pub fn outcome_y(&self) -> Result<FieldY> {
        FieldY::from_code(self.outcome_state.y).map_err(|e| self.tag(e))
    }

    pub fn outcome_x(&self) -> Result<FieldX> {
        FieldX::from_code(self.outcome_state.x).map_err(|e| self.tag(e))
    }

    pub fn outcome_pressure(&self) -> Result<PressureCode> {
        PressureCode::from_code(self.outcome_state.pressure).map_err(|e| self.tag(e))
    }

    /// Challenge end zone, for challenge outcomes.
    pub fn challenge_end(&self) -> Result<Option<(FieldY, FieldX)>> {
        match self.outcome {
            Outcome::Challenge { end_y, end_x, .. } => {
                let y = FieldY::from_code(end_y).map_err(|e| self.tag(e))?;
                let x = FieldX::from_code(end_x).map_err(|e| self.tag(e))?;
                Ok(Some((y, x)))
            }
            _ => Ok(None),
        }
    }

    fn tag(&self, err: MatchError) -> MatchError {
        match err {
            MatchError::UnknownCode { field, value, .. } => {
                MatchError::UnknownCode { field, value, row: self.row_id }
            }
            other => other,
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Y: {} X: {} Pressure: {} Action: {} -> Y: {} X: {} Pressure: {} ({})",
            self.row_id,
            self.y as u8,
            self.x as u8,
            self.pressure as u8,
            self.action.description(),
            self.outcome_state.y,
            self.outcome_state.x,
            self.outcome_state.pressure,
            self.outcome
        )
    }
}
