//! Match engine: instant matching, outcome resolution and the match clock

pub mod match_sim;
pub mod matcher;
pub mod report;
pub mod rewind;
pub mod roulette;
pub mod signals;

pub use match_sim::{possession_pct, MatchEngine};
pub use matcher::OutcomeClass;
pub use report::{minute_of, MatchReport, ReportEntry, Special};
pub use rewind::MatchRewind;
pub use signals::{AfterShot, PenaltyOutcome, ShotOutcome, Signal};
