//! Signals returned to the caller of `play`
//!
//! Each signal stamps the tick it happened at. The caller resumes play from the tick
//! after the returned signal (or from the half/full-time boundary).

use serde::Serialize;
use std::fmt;

/// What happened to a shot on target after the keeper got to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AfterShot {
    Defender = 0,
    Gk = 1,
    CornerKick = 2,
    Forward = 3,
    DefenderSaveThrowIn = 4,
    ThrowIn = 5,
    PostGoalKick = 6,
    PostDefender = 7,
    PostForward = 8,
    PostGk = 9,
    DefenderSaveForward = 10,
}

impl AfterShot {
    pub const ALL: [AfterShot; 11] = [
        AfterShot::Defender,
        AfterShot::Gk,
        AfterShot::CornerKick,
        AfterShot::Forward,
        AfterShot::DefenderSaveThrowIn,
        AfterShot::ThrowIn,
        AfterShot::PostGoalKick,
        AfterShot::PostDefender,
        AfterShot::PostForward,
        AfterShot::PostGk,
        AfterShot::DefenderSaveForward,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(AfterShot::Defender)
    }

    pub fn description(self) -> &'static str {
        match self {
            AfterShot::Defender => "Ball to defender",
            AfterShot::Gk => "Ball to Gk",
            AfterShot::CornerKick => "Corner kick",
            AfterShot::Forward => "Rebound",
            AfterShot::DefenderSaveThrowIn => "Defender saves: Throw in",
            AfterShot::ThrowIn => "Throw in",
            AfterShot::PostGoalKick => "Post: Goal kick",
            AfterShot::PostDefender => "Post: Defender",
            AfterShot::PostForward => "Post: Rebounder",
            AfterShot::PostGk => "Post: Goalkeeper",
            AfterShot::DefenderSaveForward => "Defender saves: Rebound",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShotOutcome {
    Goal,
    OnTarget(AfterShot),
    OffTarget { corner: bool },
}

impl ShotOutcome {
    pub fn basic_code(self) -> u8 {
        match self {
            ShotOutcome::Goal => 0,
            ShotOutcome::OnTarget(_) => 1,
            ShotOutcome::OffTarget { .. } => 2,
        }
    }

    /// Detail code; -1 for goals.
    pub fn detail_code(self) -> i32 {
        match self {
            ShotOutcome::Goal => -1,
            ShotOutcome::OnTarget(after) => after as i32,
            ShotOutcome::OffTarget { corner } => i32::from(corner),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PenaltyOutcome {
    Goal = 0,
    Saved = 1,
    Wide = 2,
}

impl PenaltyOutcome {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PenaltyOutcome::Goal),
            1 => Some(PenaltyOutcome::Saved),
            2 => Some(PenaltyOutcome::Wide),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PenaltyOutcome::Goal => "Goal",
            PenaltyOutcome::Saved => "Saved by Gk",
            PenaltyOutcome::Wide => "Goal kick",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Signal {
    BallPossessionUpdate {
        tick: u32,
        home_pct: u32,
        away_pct: u32,
        home_name: String,
        away_name: String,
    },
    CornerKick { tick: u32, team: String },
    FreeKick { tick: u32, team: String },
    Offside { tick: u32, team: String },
    PenaltyKick { tick: u32, taker: String, outcome: PenaltyOutcome, team: String },
    /// A shot or header; `crosser` is set for headers from crosses.
    Shot {
        tick: u32,
        outcome: ShotOutcome,
        shooter: String,
        crosser: Option<String>,
        team: String,
    },
    EndOfHalf { tick: u32 },
    EndOfMatch { tick: u32 },
}

impl Signal {
    pub fn tick(&self) -> u32 {
        match self {
            Signal::BallPossessionUpdate { tick, .. }
            | Signal::CornerKick { tick, .. }
            | Signal::FreeKick { tick, .. }
            | Signal::Offside { tick, .. }
            | Signal::PenaltyKick { tick, .. }
            | Signal::Shot { tick, .. }
            | Signal::EndOfHalf { tick }
            | Signal::EndOfMatch { tick } => *tick,
        }
    }

    pub fn is_end_of_half(&self) -> bool {
        matches!(self, Signal::EndOfHalf { .. })
    }

    pub fn is_end_of_match(&self) -> bool {
        matches!(self, Signal::EndOfMatch { .. })
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::BallPossessionUpdate { home_pct, away_pct, home_name, away_name, .. } => {
                write!(f, "{} : {}% {} : {}%", home_name, home_pct, away_name, away_pct)
            }
            Signal::CornerKick { team, .. } => write!(f, "Corner kick for {}", team),
            Signal::FreeKick { team, .. } => write!(f, "Free kick for {}", team),
            Signal::Offside { team, .. } => write!(f, "Offside by {}", team),
            Signal::PenaltyKick { taker, outcome, team, .. } => write!(
                f,
                "{} : Penalty taken from {} : {}",
                team,
                taker,
                outcome.description()
            ),
            Signal::Shot { outcome, shooter, crosser, team, .. } => {
                let (basic, details) = match outcome {
                    ShotOutcome::Goal => ("Goal scored with shot", ""),
                    ShotOutcome::OnTarget(after) => ("Shot On", after.description()),
                    ShotOutcome::OffTarget { corner: true } => ("Shot Off", "Corner kick"),
                    ShotOutcome::OffTarget { corner: false } => ("Shot Off", "Goal kick"),
                };
                write!(f, "{} : {} by {} -> {}", team, basic, shooter, details)?;
                if let Some(crosser) = crosser {
                    write!(f, "(Cross by {})", crosser)?;
                }
                Ok(())
            }
            Signal::EndOfHalf { .. } => f.write_str("End of first half"),
            Signal::EndOfMatch { .. } => f.write_str("End of match"),
        }
    }
}
