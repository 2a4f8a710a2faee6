//! Real-world calibration table
//!
//! Fixed fractions measured from real match footage. Resolver weights are built
//! as `skill * line_strength * fraction`, so only the ratios inside one action
//! matter. Rating thresholds (`THR_*`) are the expected number of attempts a
//! player on a given line makes in a full match.

// ============================================================================
// General
// ============================================================================

pub mod general {
    /// Rating given to a player who exactly meets expectations.
    pub const EXPECTED_RATING: f64 = 6.5;
    /// Skill value of an average player; used in place of "the unforced error skill".
    pub const AVG_SKILL: f64 = 3.0;
    /// Player count of a line that counts as full strength (tactics multiplier = count / this).
    pub const DEFAULT_LINE_CARDINALITY: f64 = 3.3;
    pub const AVG_FINISHING: f64 = 4.15;
    pub const AVG_SHOOTING: f64 = 3.81;
    pub const SHOT_OFF_GOAL_KICK: f64 = 0.8;
    pub const PENALTY_AWARD_FACTOR: f64 = 0.0125;
    /// Lowest skill a shot or header divides by.
    pub const SKILL_FLOOR: f64 = 0.1;
    /// Z value for the Wilson score interval (two-sided ~90%).
    pub const NORMAL_CONFIDENCE: f64 = 1.645;
}

// ============================================================================
// Per-action outcome fractions
// ============================================================================

pub mod pass {
    pub const INTERCEPTION: f64 = 0.2;
    pub const MARKING: f64 = 0.2;
    pub const SUCC: f64 = 0.6;
}

pub mod gk_long_pass {
    pub const UF: f64 = 0.33;
    pub const SUCC: f64 = 0.67;
}

pub mod long_pass {
    pub const UF: f64 = 0.33;
    pub const SUCC: f64 = 0.67;
}

pub mod forward_pass {
    pub const UF: f64 = 0.05;
    pub const MARKING: f64 = 0.05;
    pub const GK: f64 = 0.05;
    pub const GK_CENTRE: f64 = 0.1;
    pub const INTERCEPTION: f64 = 0.1;
    pub const SUCC: f64 = 0.73;
}

pub mod combination {
    pub const UF: f64 = 0.33;
    pub const SUCC: f64 = 0.67;
}

pub mod flank_pass {
    pub const UF: f64 = 0.04;
    pub const SUCC: f64 = 0.96;
    /// Share of the defence-zone pass played towards the midfield line.
    pub const D2C: f64 = 0.92;
    pub const D2D: f64 = 0.08;
    pub const C2C: f64 = 0.17;
    pub const C2A: f64 = 0.83;
}

pub mod run_ball {
    pub const MARKING: f64 = 0.25;
    pub const SUCC: f64 = 0.75;
    pub const D2C: f64 = 0.67;
    pub const D2D: f64 = 0.33;
}

pub mod long_throw_in {
    pub const UF: f64 = 0.17;
    pub const SUCC: f64 = 0.83;
}

pub mod dribbling {
    pub const UF: f64 = 0.2;
    pub const MAN_MARKING: f64 = 0.4;
    pub const SUCC: f64 = 0.4;
}

pub mod long_flank_pass {
    pub const UF: f64 = 0.2;
    pub const INTERCEPTION: f64 = 0.2;
    pub const SUCC: f64 = 0.6;
}

pub mod area_pass {
    pub const UF: f64 = 0.4;
    pub const GK: f64 = 0.2;
    pub const SUCC: f64 = 0.4;
}

pub mod ball_control {
    pub const MAN_MARKING: f64 = 0.25;
    pub const SUCC: f64 = 0.75;
}

pub mod cross {
    pub const UF: f64 = 0.16;
    pub const GOAL_SCORING: f64 = 0.08;
    pub const GK: f64 = 0.08;
    pub const SUCC: f64 = 0.68;
}

pub mod low_cross {
    pub const UF: f64 = 0.5;
    pub const SUCC: f64 = 0.5;
}

// ============================================================================
// Shot tables
// ============================================================================

pub mod shots {
    /// Goal / shot on target / shot off target, percent of long-range attempts.
    pub const LONG_SHOT_STATS: [f64; 3] = [13.8, 35.78, 43.52];
    pub const AREA_SHOT_STATS: [f64; 3] = [44.55, 23.86, 7.4];
    pub const CROSS_STATS: [f64; 3] = [30.69, 18.35, 12.99];
    pub const PENALTY_SHOT_STATS: [f64; 3] = [0.8, 0.1, 0.1];
    /// Aftermath of a shot on target, percent. Indexed by `ShotOnOutcome`.
    pub const SHOT_ON_STATS: [f64; 11] =
        [16.51, 57.8, 11.01, 4.59, 0.92, 2.75, 0.92, 2.75, 0.92, 0.92, 0.92];
}

// ============================================================================
// Rating: expected success rates
// ============================================================================

pub mod expected {
    use super::general::{AVG_FINISHING, AVG_SHOOTING};

    pub const GK_LONG_PASS: f64 = 0.64;
    pub const LONG_PASS: f64 = 0.56;
    pub const FORWARD_PASS: f64 = 0.59;
    pub const FLANK_PASS: f64 = 0.72;
    pub const RUN_BALL: f64 = 0.52;
    pub const DRIBBLING: f64 = 0.46;
    pub const LONG_FLANK_PASS: f64 = 0.53;
    pub const CROSS: f64 = 0.59;
    pub const LOW_CROSS: f64 = 0.5;
    pub const PASS: f64 = 0.53;
    pub const AREA_PASS: f64 = 0.47;
    pub const BALL_CONTROL: f64 = 0.58;

    /// Share of attempts that end as goals for an average finisher.
    pub fn shots() -> f64 {
        1.0 / (AVG_FINISHING + AVG_SHOOTING + 1.0)
    }
}

// ============================================================================
// Rating: category weights
// ============================================================================

pub mod eval {
    pub const GK_LONG_PASS: f64 = 0.95;
    pub const LONG_PASS: f64 = 0.6;
    pub const FORWARD_PASS: f64 = 1.71;
    pub const FLANK_PASS: f64 = 1.62;
    pub const BALL_CONTROL: f64 = 0.83;
    pub const PASS: f64 = 1.33;
    pub const RUN_BALL: f64 = 1.5;
    pub const LOW_CROSS: f64 = 0.75;
    pub const CROSS: f64 = 0.9;
    pub const SHOTS: f64 = 5.0;
    pub const HEADINGS: f64 = 5.0;
    pub const DRIBBLING: f64 = 1.0;
    pub const LONG_FLANK_PASS: f64 = 1.0;
    pub const AREA_PASS: f64 = 1.0;
    pub const PERSONAL_CHALLENGES: f64 = 1.0;
    pub const INTERCEPTIONS: f64 = 1.0;
    pub const SAVES: f64 = 2.0;
    pub const CONCEDINGS: f64 = 1.0;
    pub const PENALTIES_MISSED: f64 = 3.2;
    pub const PENALTIES_SAVED: f64 = 4.0;
    pub const PENALTY_GOALS: f64 = 0.4;
}

// ============================================================================
// Rating: expected attempts per line
// ============================================================================

/// Thresholds are `(line, value)` lookups; lines not listed expect nothing.
pub mod threshold {
    pub const LONG_PASS_DEF: f64 = 1.0;
    pub const LONG_PASS_MID: f64 = 2.0;
    pub const FORWARD_PASS_DEF: f64 = 1.0;
    pub const FORWARD_PASS_MID: f64 = 3.0;
    pub const FLANK_PASS_DEF: f64 = 2.0;
    pub const FLANK_PASS_MID: f64 = 3.0;
    pub const BALL_CONTROL_MID: f64 = 1.0;
    pub const BALL_CONTROL_FOR: f64 = 1.0;
    pub const PASS_MID: f64 = 1.0;
    pub const RUN_BALL_DEF: f64 = 1.0;
    pub const RUN_BALL_MID: f64 = 1.0;

    pub const LOW_CROSS_MID_HALF_FLANK: f64 = 1.0;
    pub const LOW_CROSS_MID_FLANK: f64 = 1.0;
    pub const LOW_CROSS_FOR_HALF_FLANK: f64 = 2.0;
    pub const LOW_CROSS_FOR_FLANK: f64 = 1.0;

    pub const CROSS_DEF_HALF_FLANK: f64 = 1.0;
    pub const CROSS_DEF_FLANK: f64 = 2.0;
    pub const CROSS_MID_AXIS: f64 = 1.0;
    pub const CROSS_MID_HALF_FLANK: f64 = 6.0;
    pub const CROSS_MID_FLANK: f64 = 6.0;
    pub const CROSS_FOR_HALF_FLANK: f64 = 5.0;
    pub const CROSS_FOR_FLANK: f64 = 6.0;

    pub const SHOTS_MID: f64 = 1.0;
    pub const SHOTS_FOR: f64 = 2.0;
    pub const HEADINGS_FOR_HALF_FLANK: f64 = 1.0;
    pub const HEADINGS_FOR_FLANK: f64 = 1.0;

    pub const DRIBBLING_DEF: f64 = 1.0;
    pub const DRIBBLING_MID: f64 = 4.0;
    pub const DRIBBLING_FOR: f64 = 1.0;
    pub const LONG_FLANK_PASS_MID: f64 = 1.0;
    pub const AREA_PASS_MID: f64 = 1.0;
    pub const AREA_PASS_FOR: f64 = 1.0;
    pub const PERSONAL_CHALLENGES_DEF: f64 = 1.0;
    pub const PERSONAL_CHALLENGES_MID: f64 = 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_fractions_sum_to_one() {
        let sums = [
            pass::SUCC + pass::INTERCEPTION + pass::MARKING,
            gk_long_pass::SUCC + gk_long_pass::UF,
            long_pass::SUCC + long_pass::UF,
            flank_pass::SUCC + flank_pass::UF,
            run_ball::SUCC + run_ball::MARKING,
            long_throw_in::SUCC + long_throw_in::UF,
            dribbling::SUCC + dribbling::MAN_MARKING + dribbling::UF,
            long_flank_pass::SUCC + long_flank_pass::INTERCEPTION + long_flank_pass::UF,
            area_pass::SUCC + area_pass::GK + area_pass::UF,
            ball_control::SUCC + ball_control::MAN_MARKING,
            cross::SUCC + cross::GOAL_SCORING + cross::GK + cross::UF,
            low_cross::SUCC + low_cross::UF,
        ];
        for s in sums {
            assert!((s - 1.0).abs() < 0.01, "fractions sum to {}", s);
        }
    }

    #[test]
    fn test_shot_on_table_is_percent() {
        let total: f64 = shots::SHOT_ON_STATS.iter().sum();
        assert!((total - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_expected_shot_rate() {
        assert!((expected::shots() - 1.0 / 8.96).abs() < 1e-9);
    }
}
