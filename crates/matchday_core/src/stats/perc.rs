//! Success/attempt counters with a tick record per event

use serde::{Deserialize, Serialize};

use super::wilson::{wilson_confidence, NORMAL_CONFIDENCE};
use crate::calibration::general::EXPECTED_RATING;

/// Ticks at or before `tick`.
pub(crate) fn count_upto(record: &[u32], tick: u32) -> u32 {
    record.iter().filter(|&&t| t <= tick).count() as u32
}

pub(crate) fn filter_upto(record: &[u32], tick: u32) -> Vec<u32> {
    record.iter().copied().filter(|&t| t <= tick).collect()
}

/// Maps a confidence against the expected rate onto the 0..10 rating scale.
/// Meeting expectations exactly scores [`EXPECTED_RATING`].
pub fn scale_rating(confidence: f64, expected_rate: f64) -> f64 {
    let rating = if confidence >= expected_rate {
        EXPECTED_RATING + (confidence - expected_rate) / (1.0 - expected_rate) * (10.0 - EXPECTED_RATING)
    } else {
        EXPECTED_RATING * confidence / expected_rate
    };
    rating.min(10.0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercStats {
    success_record: Vec<u32>,
    total_record: Vec<u32>,
}

impl PercStats {
    pub fn register_success(&mut self, tick: u32) {
        self.success_record.push(tick);
        self.total_record.push(tick);
    }

    pub fn register_failure(&mut self, tick: u32) {
        self.total_record.push(tick);
    }

    pub fn successes(&self) -> u32 {
        self.success_record.len() as u32
    }

    pub fn total(&self) -> u32 {
        self.total_record.len() as u32
    }

    pub fn successes_upto(&self, tick: u32) -> u32 {
        count_upto(&self.success_record, tick)
    }

    pub fn total_upto(&self, tick: u32) -> u32 {
        count_upto(&self.total_record, tick)
    }

    /// Success fraction; `None` with no attempts.
    pub fn succ_perc(&self) -> Option<f64> {
        (self.total() > 0).then(|| self.successes() as f64 / self.total() as f64)
    }

    pub fn succ_perc_upto(&self, tick: u32) -> Option<f64> {
        let total = self.total_upto(tick);
        (total > 0).then(|| self.successes_upto(tick) as f64 / total as f64)
    }

    /// Full-match rating. A player below `qualifier` attempts is treated as having made
    /// `qualifier` attempts with no extra successes.
    pub fn rating(&self, expected_rate: f64, qualifier: u32) -> Option<f64> {
        self.rating_with_surrogates(expected_rate, qualifier, 1)
    }

    /// Full-record rating where the missing attempts are shared among `surrogates`
    /// players: only `round((qualifier - total) / surrogates)` of them are added.
    /// Zero surrogates disables the inflation.
    pub fn rating_with_surrogates(&self, expected_rate: f64, qualifier: u32, surrogates: u32) -> Option<f64> {
        if self.total() == 0 {
            return None;
        }
        let mut total = self.total();
        if qualifier > total && surrogates > 0 {
            total += ((qualifier - total) as f64 / surrogates as f64).round() as u32;
        }
        let p = self.successes() as f64 / total as f64;
        let confidence = wilson_confidence(p, NORMAL_CONFIDENCE, total);
        Some(scale_rating(confidence, expected_rate))
    }

    /// Rating from events up to `tick`. Inflation widens the interval but keeps the
    /// observed success fraction.
    pub fn current_rating(&self, expected_rate: f64, qualifier: u32, tick: u32) -> Option<f64> {
        let observed = self.total_upto(tick);
        if observed == 0 {
            return None;
        }
        let p = self.successes_upto(tick) as f64 / observed as f64;
        let total = observed.max(qualifier);
        let confidence = wilson_confidence(p, NORMAL_CONFIDENCE, total);
        Some(scale_rating(confidence, expected_rate))
    }

    pub fn snapshot(&self, tick: u32) -> Self {
        Self {
            success_record: filter_upto(&self.success_record, tick),
            total_record: filter_upto(&self.total_record, tick),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_counts_and_percentages() {
        let mut s = PercStats::default();
        assert_eq!(s.succ_perc(), None);
        s.register_success(10);
        s.register_failure(20);
        s.register_success(30);
        assert_eq!(s.successes(), 2);
        assert_eq!(s.total(), 3);
        assert!((s.succ_perc().unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.successes_upto(20), 1);
        assert_eq!(s.total_upto(20), 2);
        assert!((s.succ_perc_upto(20).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_attempts_unrated() {
        let s = PercStats::default();
        assert_eq!(s.rating(0.5, 3), None);
        assert_eq!(s.current_rating(0.5, 3, 100), None);
    }

    #[test]
    fn test_expected_confidence_gives_expected_rating() {
        assert!((scale_rating(0.6, 0.6) - EXPECTED_RATING).abs() < 1e-12);
        assert!((scale_rating(1.0, 0.6) - 10.0).abs() < 1e-12);
        assert!((scale_rating(0.3, 0.6) - EXPECTED_RATING / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_inflation_dilutes_full_match_rating() {
        let mut s = PercStats::default();
        s.register_success(1);
        let plain = s.rating(0.5, 0).unwrap();
        let inflated = s.rating(0.5, 4).unwrap();
        assert!(inflated < plain);
        // timed rating keeps p = 1 and only widens the interval
        let timed = s.current_rating(0.5, 4, 10).unwrap();
        assert!(timed > inflated);
    }

    #[test]
    fn test_surrogates_share_the_missing_attempts() {
        let mut s = PercStats::default();
        s.register_success(1);
        // 3 missing attempts over 2 surrogates: round(1.5) = 2 added
        let shared = s.rating_with_surrogates(0.5, 4, 2).unwrap();
        let expected = scale_rating(wilson_confidence(1.0 / 3.0, NORMAL_CONFIDENCE, 3), 0.5);
        assert!((shared - expected).abs() < 1e-12);
        assert!(shared > s.rating(0.5, 4).unwrap());
        assert!((s.rating_with_surrogates(0.5, 4, 1).unwrap() - s.rating(0.5, 4).unwrap()).abs() < 1e-12);

        // many surrogates leave nothing to add
        let spread = s.rating_with_surrogates(0.5, 4, 100).unwrap();
        assert!((spread - s.rating(0.5, 0).unwrap()).abs() < 1e-12);
        assert!((s.rating_with_surrogates(0.5, 4, 0).unwrap() - spread).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_keeps_events_upto_tick() {
        let mut s = PercStats::default();
        s.register_success(5);
        s.register_failure(9);
        s.register_success(12);
        let snap = s.snapshot(9);
        assert_eq!(snap.successes(), 1);
        assert_eq!(snap.total(), 2);
    }

    proptest! {
        #[test]
        fn prop_rating_within_bounds(
            outcomes in proptest::collection::vec(any::<bool>(), 1..60),
            expected in 0.05f64..0.95,
            qualifier in 0u32..10,
        ) {
            let mut s = PercStats::default();
            for (tick, ok) in outcomes.iter().enumerate() {
                if *ok { s.register_success(tick as u32) } else { s.register_failure(tick as u32) }
            }
            prop_assert!(s.successes() <= s.total());
            let r = s.rating(expected, qualifier).unwrap();
            prop_assert!((0.0..=10.0).contains(&r));
            let c = s.current_rating(expected, qualifier, outcomes.len() as u32).unwrap();
            prop_assert!((0.0..=10.0).contains(&c));
        }

        #[test]
        fn prop_more_failures_never_raise_rating(
            successes in 1u32..20,
            failures in 0u32..20,
        ) {
            let mut s = PercStats::default();
            for t in 0..successes { s.register_success(t) }
            for t in 0..failures { s.register_failure(100 + t) }
            let before = s.rating(0.5, 0).unwrap();
            s.register_failure(500);
            let after = s.rating(0.5, 0).unwrap();
            prop_assert!(after <= before + 1e-12);
        }
    }
}
