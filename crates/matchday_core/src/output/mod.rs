//! Text outputs of a finished match
//!
//! - [`files`]: the report, raw stats and stats summary files named in the config
//! - [`console`]: the end-of-match summary printed by the CLI

pub mod console;
pub mod files;

pub use console::console_summary;
pub use files::{write_match_report, write_raw_stats, write_stats_summary};
