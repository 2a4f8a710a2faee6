//! Occurrence counters (saves, interceptions, ...) rated on cardinality alone

use serde::{Deserialize, Serialize};

use super::perc::{count_upto, filter_upto};
use super::wilson::{wilson_confidence, NORMAL_CONFIDENCE};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    record: Vec<u32>,
}

/// Rating of `occurrences` against an expected count of `qualifier`: full marks once
/// the expectation is met, scaled by the Wilson interval below it.
fn cardinality_rating(occurrences: u32, qualifier: u32) -> Option<f64> {
    if occurrences == 0 && qualifier == 0 {
        return None;
    }
    let (p, total) = if occurrences < qualifier {
        (occurrences as f64 / qualifier as f64, qualifier)
    } else {
        (1.0, occurrences)
    };
    Some(wilson_confidence(p, NORMAL_CONFIDENCE, total) * 10.0)
}

fn penalty_rating(occurrences: u32) -> Option<f64> {
    (occurrences > 0).then(|| wilson_confidence(0.0, NORMAL_CONFIDENCE, occurrences) * 10.0)
}

impl UnitStats {
    /// Counter with `n` occurrences, all at tick 0. Used for one-off ratings of
    /// derived quantities.
    pub fn from_count(n: u32) -> Self {
        Self { record: vec![0; n as usize] }
    }

    pub fn add(&mut self, tick: u32) {
        self.record.push(tick);
    }

    pub fn occurrences(&self) -> u32 {
        self.record.len() as u32
    }

    pub fn occurrences_upto(&self, tick: u32) -> u32 {
        count_upto(&self.record, tick)
    }

    pub fn rating(&self, qualifier: u32) -> Option<f64> {
        cardinality_rating(self.occurrences(), qualifier)
    }

    pub fn current_rating(&self, qualifier: u32, tick: u32) -> Option<f64> {
        cardinality_rating(self.occurrences_upto(tick), qualifier)
    }

    /// Rating for categories that count against the player (concedings, missed
    /// penalties): more occurrences drive it towards 0.
    pub fn negative_rating(&self) -> Option<f64> {
        penalty_rating(self.occurrences())
    }

    pub fn negative_rating_upto(&self, tick: u32) -> Option<f64> {
        penalty_rating(self.occurrences_upto(tick))
    }

    pub fn ticks(&self) -> &[u32] {
        &self.record
    }

    pub fn snapshot(&self, tick: u32) -> Self {
        Self { record: filter_upto(&self.record, tick) }
    }
}
