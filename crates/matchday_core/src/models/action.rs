//! Action catalogue
//!
//! The 44 on-ball actions recorded in the corpus, with their byte codes and
//! report descriptions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::player::Skill;
use super::tactics::TacticLine;
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    MoveForward = 1,
    GkLongPass = 2,
    LongPass = 3,
    BackPass = 4,
    HighPass = 5,
    Dribbling = 6,
    LongShot = 7,
    ForwardPass = 8,
    Pass = 9,
    Combination = 10,
    FlankPass = 11,
    BallControl = 12,
    LongThrowIn = 13,
    GkPass = 14,
    RunBall = 15,
    EasyPass = 16,
    HighDribble = 17,
    CounterAttack = 18,
    ForwardCirculation = 19,
    LongFlankPass = 20,
    LongCross = 21,
    FirstTouchPass = 22,
    StrongPass = 23,
    Cross = 24,
    LowCross = 25,
    MoveBack = 26,
    LowAreaCross = 27,
    AreaShot = 28,
    RunBallFlank = 29,
    LongAreaPass = 30,
    CirculationDelay = 31,
    FlankForwardPass = 32,
    AreaPass = 33,
    BackThrowIn = 34,
    LongOppositeFlankPass = 35,
    LongFlankForwardPass = 36,
    KickAway = 37,
    MoveFlankForward = 38,
    LooseForwardPass = 39,
    ThrowInPass = 40,
    HighFlankPass = 41,
    LameControl = 42,
    LamePass = 43,
    HighAreaPass = 44,
}

/// Who holds the ball after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderChange {
    /// The acting player keeps the ball.
    Same,
    /// The ball moves to a different teammate.
    Different,
    /// Either is fine.
    Irrelevant,
}

impl Action {
    pub const ALL: [Action; 44] = [
        Action::MoveForward,
        Action::GkLongPass,
        Action::LongPass,
        Action::BackPass,
        Action::HighPass,
        Action::Dribbling,
        Action::LongShot,
        Action::ForwardPass,
        Action::Pass,
        Action::Combination,
        Action::FlankPass,
        Action::BallControl,
        Action::LongThrowIn,
        Action::GkPass,
        Action::RunBall,
        Action::EasyPass,
        Action::HighDribble,
        Action::CounterAttack,
        Action::ForwardCirculation,
        Action::LongFlankPass,
        Action::LongCross,
        Action::FirstTouchPass,
        Action::StrongPass,
        Action::Cross,
        Action::LowCross,
        Action::MoveBack,
        Action::LowAreaCross,
        Action::AreaShot,
        Action::RunBallFlank,
        Action::LongAreaPass,
        Action::CirculationDelay,
        Action::FlankForwardPass,
        Action::AreaPass,
        Action::BackThrowIn,
        Action::LongOppositeFlankPass,
        Action::LongFlankForwardPass,
        Action::KickAway,
        Action::MoveFlankForward,
        Action::LooseForwardPass,
        Action::ThrowInPass,
        Action::HighFlankPass,
        Action::LameControl,
        Action::LamePass,
        Action::HighAreaPass,
    ];

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1..=44 => Ok(Self::ALL[(code - 1) as usize]),
            value => Err(MatchError::UnknownCode { field: "Action", value, row: 0 }),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            Action::MoveForward => "Move Forward",
            Action::GkLongPass => "Long Pass from GK",
            Action::LongPass => "Long Pass",
            Action::BackPass => "Back Pass",
            Action::HighPass => "High Pass",
            Action::Dribbling => "Dribbling",
            Action::LongShot => "Long Shot",
            Action::ForwardPass => "Forward Pass",
            Action::Pass => "Pass",
            Action::Combination => "Pass Combination",
            Action::FlankPass => "Pass to flank",
            Action::BallControl => "Ball control",
            Action::LongThrowIn => "Long throw in",
            Action::GkPass => "Pass to GK",
            Action::RunBall => "Run with Ball",
            Action::EasyPass => "Easy pass",
            Action::HighDribble => "High dribble",
            Action::CounterAttack => "Counter attack",
            Action::ForwardCirculation => "Pass forward under pressing",
            Action::LongFlankPass => "Long pass to flank",
            Action::LongCross => "Long cross",
            Action::FirstTouchPass => "First touch pass",
            Action::StrongPass => "Strong pass",
            Action::Cross => "Cross",
            Action::LowCross => "Low cross",
            Action::MoveBack => "Move back",
            Action::LowAreaCross => "Low area cross",
            Action::AreaShot => "Shot from penalty area",
            Action::RunBallFlank => "Run to flank with ball",
            Action::LongAreaPass => "Long pass to the area",
            Action::CirculationDelay => "Delay",
            Action::FlankForwardPass => "Pass forward to flank",
            Action::AreaPass => "Pass to area",
            Action::BackThrowIn => "Throw in back",
            Action::LongOppositeFlankPass => "Change of flank",
            Action::LongFlankForwardPass => "Pass forward long in flank",
            Action::KickAway => "Kick Away",
            Action::MoveFlankForward => "Move forward in flank",
            Action::LooseForwardPass => "Loose forward pass",
            Action::ThrowInPass => "Throw in",
            Action::HighFlankPass => "High flank pass",
            Action::LameControl => "Lame ball control",
            Action::LamePass => "Lame pass",
            Action::HighAreaPass => "High area pass",
        }
    }

    /// Skill a team average is taken over when judging this action.
    pub fn skill(self) -> Option<Skill> {
        match self {
            Action::GkLongPass
            | Action::Pass
            | Action::HighPass
            | Action::ForwardPass
            | Action::FlankPass
            | Action::LongFlankPass
            | Action::LongPass
            | Action::AreaPass => Some(Skill::Passing),
            Action::Combination => Some(Skill::Teamwork),
            Action::BallControl | Action::RunBall => Some(Skill::BallControl),
            Action::LongThrowIn => Some(Skill::ThrowIn),
            Action::Dribbling => Some(Skill::Dribbling),
            Action::Cross | Action::LowCross => Some(Skill::Crossing),
            _ => None,
        }
    }

    /// Goalkeepers may only distribute the ball; only goalkeepers may kick it long from hand.
    pub fn allowed_for(self, line: TacticLine) -> bool {
        match line {
            TacticLine::Gk => matches!(
                self,
                Action::GkLongPass | Action::Pass | Action::FlankPass | Action::KickAway
            ),
            _ => self != Action::GkLongPass,
        }
    }

    /// Holder classification for a successful action. `tackle_against` is true when
    /// the outcome condition says the action ended in a tackle (dribbles only).
    pub fn holder_change(self, tackle_against: bool) -> HolderChange {
        match self {
            Action::MoveForward
            | Action::BallControl
            | Action::RunBall
            | Action::HighDribble
            | Action::MoveBack
            | Action::RunBallFlank
            | Action::CirculationDelay
            | Action::MoveFlankForward => HolderChange::Same,
            Action::LongPass
            | Action::BackPass
            | Action::HighPass
            | Action::ForwardPass
            | Action::Pass
            | Action::FlankPass
            | Action::LongThrowIn
            | Action::EasyPass
            | Action::ForwardCirculation
            | Action::LongFlankPass
            | Action::FirstTouchPass
            | Action::LowCross
            | Action::LowAreaCross
            | Action::LongAreaPass
            | Action::FlankForwardPass
            | Action::AreaPass
            | Action::BackThrowIn
            | Action::LongOppositeFlankPass
            | Action::LongFlankForwardPass
            | Action::KickAway
            | Action::LooseForwardPass
            | Action::ThrowInPass
            | Action::HighFlankPass
            | Action::HighAreaPass
            | Action::Cross
            | Action::LongCross => HolderChange::Different,
            Action::Dribbling => {
                if tackle_against {
                    HolderChange::Different
                } else {
                    HolderChange::Same
                }
            }
            _ => HolderChange::Irrelevant,
        }
    }

    pub fn is_cross(self) -> bool {
        matches!(self, Action::Cross | Action::LongCross)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_catalogue_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.code() as usize, i + 1);
            assert_eq!(Action::from_code(action.code()).unwrap(), *action);
        }
        assert!(Action::from_code(0).is_err());
        assert!(Action::from_code(45).is_err());
    }

    #[test]
    fn test_goalkeeper_action_legality() {
        let gk_actions: Vec<Action> = Action::ALL
            .iter()
            .copied()
            .filter(|a| a.allowed_for(TacticLine::Gk))
            .collect();
        assert_eq!(
            gk_actions,
            vec![Action::GkLongPass, Action::Pass, Action::FlankPass, Action::KickAway]
        );
        assert!(!Action::GkLongPass.allowed_for(TacticLine::Defender));
        assert!(Action::LongShot.allowed_for(TacticLine::Forward));
    }

    #[test]
    fn test_dribble_holder_depends_on_tackle() {
        assert_eq!(Action::Dribbling.holder_change(true), HolderChange::Different);
        assert_eq!(Action::Dribbling.holder_change(false), HolderChange::Same);
        assert_eq!(Action::GkPass.holder_change(false), HolderChange::Irrelevant);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Action::GkLongPass.to_string(), "Long Pass from GK");
        assert_eq!(Action::LongOppositeFlankPass.description(), "Change of flank");
        assert_eq!(Action::Combination.skill(), Some(Skill::Teamwork));
        assert_eq!(Action::LongShot.skill(), None);
    }
}
