//! Weighted-outcome sampling
//!
//! Both helpers draw one uniform `u` in `[0, sum)` and return the first index whose
//! cumulative weight exceeds it.

use crate::rng::RandomSource;

/// Samples an outcome index from `weights`. `None` when floating rounding lets the
/// draw run past the last weight (or every weight is 0).
pub fn action_result(weights: &[f64], rng: &mut dyn RandomSource) -> Option<usize> {
    let sum: f64 = weights.iter().sum();
    let u = rng.next_f64() * sum;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if u < cumulative {
            return Some(i);
        }
    }
    None
}

/// Samples over `stats[i] * ability[i]`. Falls through to `stats.len()`.
pub fn outcome(stats: &[f64], ability: &[f64], rng: &mut dyn RandomSource) -> usize {
    let merged: Vec<f64> = stats.iter().zip(ability).map(|(s, a)| s * a).collect();
    action_result(&merged, rng).unwrap_or(stats.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRandom, SeededRandom};
    use proptest::prelude::*;

    #[test]
    fn test_extremes_pick_first_and_last() {
        let weights = [6.0, 3.0, 1.0];
        assert_eq!(action_result(&weights, &mut ScriptedRandom::constant(0.0)), Some(0));
        assert_eq!(action_result(&weights, &mut ScriptedRandom::constant(0.99999)), Some(2));
        assert_eq!(action_result(&weights, &mut ScriptedRandom::constant(0.65)), Some(1));
    }

    #[test]
    fn test_all_zero_weights_yield_none() {
        assert_eq!(action_result(&[0.0, 0.0], &mut ScriptedRandom::constant(0.3)), None);
        assert_eq!(outcome(&[1.0, 1.0], &[0.0, 0.0], &mut ScriptedRandom::constant(0.3)), 2);
    }

    #[test]
    fn test_outcome_merges_ability() {
        // stats favour index 0, ability moves everything to index 1
        let stats = [0.9, 0.1];
        let ability = [0.0, 1.0];
        assert_eq!(outcome(&stats, &ability, &mut ScriptedRandom::constant(0.01)), 1);
    }

    #[test]
    fn test_penalty_vector_boundaries() {
        let stats = [0.8, 0.1, 0.1];
        let ones = [1.0; 3];
        assert_eq!(outcome(&stats, &ones, &mut ScriptedRandom::constant(0.5)), 0);
        assert_eq!(outcome(&stats, &ones, &mut ScriptedRandom::constant(0.85)), 1);
        assert_eq!(outcome(&stats, &ones, &mut ScriptedRandom::constant(0.95)), 2);
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let mut rng = SeededRandom::new(99);
        let mut counts = [0u32; 3];
        for _ in 0..20_000 {
            if let Some(i) = action_result(&[6.0, 3.0, 1.0], &mut rng) {
                counts[i] += 1;
            }
        }
        let share = counts[0] as f64 / 20_000.0;
        assert!((share - 0.6).abs() < 0.02, "share {}", share);
    }

    proptest! {
        #[test]
        fn prop_result_in_range(
            weights in proptest::collection::vec(0.0f64..10.0, 1..8),
            u in 0.0f64..1.0,
        ) {
            if let Some(i) = action_result(&weights, &mut ScriptedRandom::constant(u)) {
                prop_assert!(i < weights.len());
                prop_assert!(weights[i] > 0.0);
            }
        }
    }
}
