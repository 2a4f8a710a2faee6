//! Match configuration
//!
//! Paths of the probability corpus and of the three text outputs, plus the engine
//! settings a run may override. Read from a `key=value` text file (the format match
//! setups have always shipped with) or from JSON.
//!
//! ```text
//! # paths
//! probmodel = data/prob.dat
//! matchreport = out/report.txt
//! playerstats = out/stats.txt
//! statssummary = out/summary.txt
//! halfduration = 255
//! seed = 42
//! ```
//!
//! ## Environment Variables
//!
//! - `MATCHDAY_CONFIG_PATH`: config file used instead of the one passed to
//!   [`MatchConfig::from_env_or`]

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::match_sim::DEFAULT_HALF_DURATION;
use crate::error::{MatchError, Result};

pub const CONFIG_PATH_ENV: &str = "MATCHDAY_CONFIG_PATH";

pub const PROB_MODEL_KEY: &str = "probmodel";
pub const MATCH_REPORT_KEY: &str = "matchreport";
pub const PLAYER_STATS_KEY: &str = "playerstats";
pub const STATS_SUMMARY_KEY: &str = "statssummary";
const HALF_DURATION_KEY: &str = "halfduration";
const SEED_KEY: &str = "seed";

fn default_half_duration() -> u32 {
    DEFAULT_HALF_DURATION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(rename = "probmodel", default)]
    pub prob_model: Option<PathBuf>,
    #[serde(rename = "matchreport", default)]
    pub match_report: Option<PathBuf>,
    #[serde(rename = "playerstats", default)]
    pub player_stats: Option<PathBuf>,
    #[serde(rename = "statssummary", default)]
    pub stats_summary: Option<PathBuf>,
    /// Ticks per half.
    #[serde(rename = "halfduration", default = "default_half_duration")]
    pub half_duration: u32,
    /// Fixed seed for reproducible matches; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            prob_model: None,
            match_report: None,
            player_stats: None,
            stats_summary: None,
            half_duration: DEFAULT_HALF_DURATION,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Parses the `key=value` format. Blank lines and `#` comments are skipped, the
    /// value is everything after the first `=`, and the first occurrence of a key wins.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut seen: Vec<String> = Vec::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(MatchError::MalformedConfig { line: index + 1, content: raw.to_string() });
            };
            let (key, value) = (key.trim().to_ascii_lowercase(), value.trim());
            if seen.contains(&key) {
                continue;
            }
            seen.push(key.clone());

            let malformed = || MatchError::MalformedConfig { line: index + 1, content: raw.to_string() };
            match key.as_str() {
                PROB_MODEL_KEY => config.prob_model = non_empty(value),
                MATCH_REPORT_KEY => config.match_report = non_empty(value),
                PLAYER_STATS_KEY => config.player_stats = non_empty(value),
                STATS_SUMMARY_KEY => config.stats_summary = non_empty(value),
                HALF_DURATION_KEY => {
                    config.half_duration = value.parse().map_err(|_| malformed())?;
                }
                SEED_KEY => config.seed = Some(value.parse().map_err(|_| malformed())?),
                other => log::debug!("Ignoring unknown config key '{}'", other),
            }
        }
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a config file; `.json` files are parsed as JSON, anything else as `key=value`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::parse(&content)?,
        };
        log::debug!("Loaded match config from {}", path.display());
        Ok(config)
    }

    /// Loads the file named by `MATCHDAY_CONFIG_PATH` when set, `path` otherwise.
    pub fn from_env_or(path: &Path) -> Result<Self> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                let value = value.trim();
                log::info!("Using config from {}='{}'", CONFIG_PATH_ENV, value);
                Self::load(Path::new(value))
            }
            _ => Self::load(path),
        }
    }

    // ========================================================================
    // Required paths
    // ========================================================================

    pub fn prob_model(&self) -> Result<&Path> {
        required(&self.prob_model, PROB_MODEL_KEY)
    }

    pub fn match_report(&self) -> Result<&Path> {
        required(&self.match_report, MATCH_REPORT_KEY)
    }

    pub fn player_stats(&self) -> Result<&Path> {
        required(&self.player_stats, PLAYER_STATS_KEY)
    }

    pub fn stats_summary(&self) -> Result<&Path> {
        required(&self.stats_summary, STATS_SUMMARY_KEY)
    }
}

fn non_empty(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn required<'a>(path: &'a Option<PathBuf>, key: &str) -> Result<&'a Path> {
    path.as_deref().ok_or_else(|| MatchError::MissingConfig { key: key.to_string() })
}
