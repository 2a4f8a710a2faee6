//! Formation and player placement

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MatchError, Result};

/// A player's broad role in the formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TacticLine {
    Gk,
    Defender,
    Midfielder,
    Forward,
}

impl TacticLine {
    pub const ALL: [TacticLine; 4] =
        [TacticLine::Gk, TacticLine::Defender, TacticLine::Midfielder, TacticLine::Forward];

    pub const OUTFIELD: [TacticLine; 3] =
        [TacticLine::Defender, TacticLine::Midfielder, TacticLine::Forward];

    pub fn label(self) -> &'static str {
        match self {
            TacticLine::Gk => "GK",
            TacticLine::Defender => "DEFENDER",
            TacticLine::Midfielder => "MIDFIELDER",
            TacticLine::Forward => "FORWARD",
        }
    }
}

impl fmt::Display for TacticLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sub-position across the width of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticPosition {
    Left,
    Right,
    Axis,
    LeftAxis,
    RightAxis,
}

impl TacticPosition {
    /// Full-width positions (L, R).
    pub fn is_flank(self) -> bool {
        matches!(self, TacticPosition::Left | TacticPosition::Right)
    }

    /// Half-width positions (LA, RA).
    pub fn is_half_flank(self) -> bool {
        matches!(self, TacticPosition::LeftAxis | TacticPosition::RightAxis)
    }
}

/// Formation as defenders-midfielders-forwards; the keeper is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tactics {
    defenders: u8,
    midfielders: u8,
    forwards: u8,
}

impl Tactics {
    pub fn new(defenders: u8, midfielders: u8, forwards: u8) -> Result<Self> {
        if defenders as u32 + midfielders as u32 + forwards as u32 != 10 {
            return Err(MatchError::InvalidTactics { defenders, midfielders, forwards });
        }
        Ok(Self { defenders, midfielders, forwards })
    }

    pub fn defenders(&self) -> u8 {
        self.defenders
    }

    pub fn midfielders(&self) -> u8 {
        self.midfielders
    }

    pub fn forwards(&self) -> u8 {
        self.forwards
    }

    pub fn count(&self, line: TacticLine) -> u8 {
        match line {
            TacticLine::Gk => 1,
            TacticLine::Defender => self.defenders,
            TacticLine::Midfielder => self.midfielders,
            TacticLine::Forward => self.forwards,
        }
    }
}

impl FromStr for Tactics {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(MatchError::MalformedTactics(s.to_string()));
        }
        let mut counts = [0u8; 3];
        for (slot, part) in counts.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| MatchError::MalformedTactics(s.to_string()))?;
        }
        Tactics::new(counts[0], counts[1], counts[2])
    }
}

impl TryFrom<String> for Tactics {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Tactics> for String {
    fn from(t: Tactics) -> Self {
        t.to_string()
    }
}

impl fmt::Display for Tactics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.defenders, self.midfielders, self.forwards)
    }
}
