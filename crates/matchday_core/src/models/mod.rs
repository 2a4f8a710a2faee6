//! Data model: corpus codes, actions, instants, field state, players and teams

pub mod action;
pub mod codes;
pub mod field_state;
pub mod instant;
pub mod player;
pub mod selection;
pub mod squad;
pub mod tactics;
pub mod team;

pub use action::{Action, HolderChange};
pub use codes::{FieldX, FieldY, Pressure, PressureCode};
pub use field_state::{FieldState, Lane, PlayerId, Side, TeamSide};
pub use instant::{Instant, Outcome, OutcomeState};
pub use player::{Player, Skill};
pub use tactics::{TacticLine, TacticPosition, Tactics};
pub use team::{GoalDetails, LineupSlot, MatchEvents, MissedPenaltyDetails, Team, TeamSheet, TeamStats, Teams};
