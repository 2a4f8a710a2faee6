//! Test Fixtures Module
//!
//! Shared helpers for engine and model tests: two 4-4-2 teams with flat skills, a
//! hand-built instant constructor and a synthetic corpus that covers every zone.

use super::{MatchEngine, DEFAULT_HALF_DURATION};
use crate::models::codes::{possession_change, result_code, team_code};
use crate::models::player::position;
use crate::models::{
    Action, FieldX, FieldY, Instant, Outcome, OutcomeState, Player, PlayerId, PressureCode,
    TacticLine, Team, TeamSheet, Teams,
};
use crate::rng::RandomSource;

// =============================================================================
// Teams
// =============================================================================

const GREECE: [(&str, &str, u8); 11] = [
    ("Antonios", "Nikopolidis", position::GK),
    ("Giourkas", "Seitaridis", position::DEFENDER | position::RIGHT),
    ("Traianos", "Dellas", position::DEFENDER | position::CENTRAL),
    ("Michalis", "Kapsis", position::DEFENDER | position::CENTRAL),
    ("Takis", "Fyssas", position::DEFENDER | position::LEFT),
    ("Angelos", "Basinas", position::MIDFIELDER | position::RIGHT),
    ("Theodoros", "Zagorakis", position::MIDFIELDER | position::CENTRAL),
    ("Kostas", "Katsouranis", position::MIDFIELDER | position::CENTRAL),
    ("Giorgos", "Karagounis", position::MIDFIELDER | position::LEFT),
    ("Angelos", "Charisteas", position::FORWARD),
    ("Zisis", "Vryzas", position::FORWARD),
];

const GERMANY: [(&str, &str, u8); 11] = [
    ("Oliver", "Kahn", position::GK),
    ("Arne", "Friedrich", position::DEFENDER | position::RIGHT),
    ("Per", "Mertesacker", position::DEFENDER | position::CENTRAL),
    ("Christoph", "Metzelder", position::DEFENDER | position::CENTRAL),
    ("Philipp", "Lahm", position::DEFENDER | position::LEFT),
    ("Bernd", "Schneider", position::MIDFIELDER | position::RIGHT),
    ("Michael", "Ballack", position::MIDFIELDER | position::CENTRAL),
    ("Torsten", "Frings", position::MIDFIELDER | position::CENTRAL),
    ("Bastian", "Schweinsteiger", position::MIDFIELDER | position::LEFT),
    ("Miroslav", "Klose", position::FORWARD),
    ("Lukas", "Podolski", position::FORWARD),
];

fn flat_team(name: &str, roster: &[(&str, &str, u8); 11], skill: f64) -> Team {
    let players = roster
        .iter()
        .enumerate()
        .map(|(i, (first, family, flags))| {
            Player::new(i as u8 + 1, first, family, *flags).with_uniform_skills(skill)
        })
        .collect();
    let sheet = TeamSheet {
        name: name.to_string(),
        tactics: "4-4-2".parse().unwrap(),
        players,
    };
    Team::from_sheet(sheet).unwrap()
}

/// 4-4-2, keeper first, every skill 5.
pub fn greece() -> Team {
    flat_team("Greece", &GREECE, 5.0)
}

pub fn germany() -> Team {
    flat_team("Germany", &GERMANY, 5.0)
}

pub fn greece_vs_germany() -> Teams {
    Teams::new(greece(), germany())
}

pub fn line_ids(team: &Team, line: TacticLine) -> Vec<PlayerId> {
    team.line_players(line).map(|s| s.player).collect()
}

// =============================================================================
// Instants
// =============================================================================

/// Instant whose outcome zone equals its own zone, clear of pressure.
pub fn instant(y: FieldY, x: FieldX, pressure: PressureCode, action: Action, outcome: Outcome) -> Instant {
    Instant {
        y,
        x,
        pressure,
        action,
        outcome,
        outcome_state: OutcomeState { y: y as u8, x: x as u8, pressure: PressureCode::Clear as u8 },
        row_id: 0,
    }
}

/// Same instant, ending in another zone.
pub fn ending_at(mut instant: Instant, y: FieldY, x: FieldX, pressure: PressureCode) -> Instant {
    instant.outcome_state = OutcomeState { y: y as u8, x: x as u8, pressure: pressure as u8 };
    instant
}

pub fn success(condition: u8) -> Outcome {
    Outcome::Success { condition }
}

pub fn opponent(condition: u8, change: u8) -> Outcome {
    Outcome::Opponent { condition, possession_change: change }
}

fn ahead(y: FieldY) -> FieldY {
    match y {
        FieldY::Defence => FieldY::Centre,
        FieldY::Centre | FieldY::Attack => FieldY::Attack,
    }
}

/// The same stretch of pitch seen from the other team.
fn mirrored(y: FieldY) -> FieldY {
    match y {
        FieldY::Defence => FieldY::Attack,
        FieldY::Centre => FieldY::Centre,
        FieldY::Attack => FieldY::Defence,
    }
}

/// Small corpus with playable instants in every zone and pressure, so a whole match
/// can run on it. Includes shots, crosses, fouls, challenges and restarts.
pub fn synthetic_corpus() -> Vec<Instant> {
    let mut corpus = Vec::new();
    for y in [FieldY::Defence, FieldY::Centre, FieldY::Attack] {
        for x in [FieldX::Axis, FieldX::Flank, FieldX::ThrowIn, FieldX::CornerKick] {
            for pressure in [PressureCode::Clear, PressureCode::Under] {
                let lane_x = if x == FieldX::Axis { FieldX::Axis } else { FieldX::Flank };
                let at = |action: Action, outcome: Outcome| instant(y, x, pressure, action, outcome);

                corpus.push(ending_at(at(Action::Pass, success(0)), ahead(y), lane_x, PressureCode::Clear));
                corpus.push(ending_at(
                    at(Action::Pass, opponent(0, possession_change::PASS_INTERCEPTION)),
                    mirrored(y),
                    lane_x,
                    PressureCode::Under,
                ));
                corpus.push(ending_at(
                    at(Action::Pass, opponent(0, possession_change::MAN_CHALLENGE_LOST)),
                    mirrored(y),
                    FieldX::Axis,
                    PressureCode::Under,
                ));
                corpus.push(ending_at(at(Action::FlankPass, success(0)), y, FieldX::Flank, PressureCode::Clear));
                corpus.push(ending_at(
                    at(Action::LongPass, opponent(0, possession_change::NORMAL)),
                    mirrored(ahead(y)),
                    FieldX::Axis,
                    PressureCode::Clear,
                ));
                corpus.push(at(Action::BallControl, success(0)));
                corpus.push(at(Action::Pass, success(result_code::FOUL)));
                corpus.push(ending_at(at(Action::KickAway, success(result_code::THROW_IN)), y, FieldX::ThrowIn, PressureCode::Clear));
                corpus.push(at(
                    Action::Dribbling,
                    Outcome::Challenge {
                        start_team: team_code::OWN,
                        start_y: y as u8,
                        end_team: team_code::OPP,
                        end_y: mirrored(y) as u8,
                        end_x: lane_x as u8,
                        ending: 0,
                        kind: 1,
                    },
                ));

                if y == FieldY::Defence {
                    corpus.push(ending_at(at(Action::GkLongPass, success(0)), FieldY::Centre, FieldX::Axis, PressureCode::Clear));
                    corpus.push(ending_at(at(Action::GkPass, success(0)), FieldY::Defence, FieldX::Axis, PressureCode::Clear));
                }
                if y == FieldY::Centre {
                    corpus.push(ending_at(at(Action::ForwardPass, success(result_code::OFFSIDE)), FieldY::Attack, FieldX::Axis, PressureCode::Clear));
                }
                if y == FieldY::Attack {
                    corpus.push(at(Action::AreaShot, success(result_code::GOAL)));
                    corpus.push(at(Action::LongShot, success(result_code::SHOT_OFF)));
                    corpus.push(ending_at(at(Action::AreaPass, opponent(0, possession_change::GK)), FieldY::Defence, FieldX::Axis, PressureCode::Clear));
                    corpus.push(ending_at(at(Action::Pass, opponent(result_code::GOAL_KICK, possession_change::NORMAL)), FieldY::Defence, FieldX::Axis, PressureCode::Clear));
                    if x != FieldX::Axis {
                        corpus.push(at(Action::Cross, success(result_code::GOAL)));
                        corpus.push(at(Action::Cross, opponent(0, possession_change::GK)));
                        corpus.push(ending_at(at(Action::LowCross, success(0)), FieldY::Attack, FieldX::Axis, PressureCode::Under));
                        corpus.push(at(Action::LongCross, success(result_code::SHOT_ON_DEFENDER)));
                    }
                }
            }
        }
    }
    corpus.iter_mut().enumerate().for_each(|(i, instant)| instant.row_id = (i % 250) as u8);
    corpus
}

// =============================================================================
// Engines
// =============================================================================

pub fn engine_with(corpus: Vec<Instant>, rng: impl RandomSource + 'static) -> MatchEngine {
    engine_with_half(corpus, rng, DEFAULT_HALF_DURATION)
}

pub fn engine_with_half(corpus: Vec<Instant>, rng: impl RandomSource + 'static, half: u32) -> MatchEngine {
    MatchEngine::with_rng(corpus, greece_vs_germany(), half, Box::new(rng)).unwrap()
}
