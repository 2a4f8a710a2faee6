//! # matchday_core - Corpus-Driven Football Match Simulation
//!
//! A match is played tick by tick. At every tick the engine looks up the recorded
//! instants that match the current field state, weights their outcomes by the skills
//! of the players involved and moves play on to the next state.
//!
//! ## Features
//! - Reproducible matches from a fixed seed
//! - Goals, penalties, offsides, set pieces and player ratings
//! - Signals for the caller (shots, free kicks, possession updates) with a rewind log
//! - Match report, raw stats and stats summary files
//!
//! ## Quick start
//!
//! ```no_run
//! use matchday_core::{MatchConfig, MatchEngine, Teams};
//! # fn teams() -> Teams { unimplemented!() }
//!
//! let config = MatchConfig::load("match.cfg".as_ref())?;
//! let mut engine = MatchEngine::from_config(&config, teams())?;
//! engine.play_to_end(|signal| println!("{}", signal))?;
//! println!("{}", matchday_core::output::console_summary(engine.teams()));
//! # Ok::<(), matchday_core::MatchError>(())
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod calibration;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod models;
pub mod output;
pub mod rng;
pub mod stats;

pub use config::MatchConfig;
pub use engine::match_sim::DEFAULT_HALF_DURATION;
pub use engine::{MatchEngine, MatchReport, Signal};
pub use error::{MatchError, Result};
pub use models::{Team, TeamSheet, TeamSide, Teams};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
