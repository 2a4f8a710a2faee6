//! Player statistics and ratings

pub mod perc;
pub mod player_stats;
pub mod unit;
pub mod wilson;

pub use perc::PercStats;
pub use player_stats::{adjust_threshold_to_time, PlayerStats};
pub use unit::UnitStats;
