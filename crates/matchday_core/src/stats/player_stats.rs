//! Per-player match statistics and the 0..10 match rating
//!
//! Every category keeps the tick of each event so the same numbers can be read
//! "as of" any point in the match. The rating is a weighted mean of the per-category
//! ratings the player qualifies for; the per-category effort threshold depends on the
//! player's line and lateral position.

use serde::{Deserialize, Serialize};

use super::perc::PercStats;
use super::unit::UnitStats;
use crate::calibration::{eval, expected, threshold};
use crate::models::tactics::{TacticLine, TacticPosition};

/// Scales a full-match effort threshold down to the share of the match played by `tick`.
pub fn adjust_threshold_to_time(value: f64, tick: u32, half_duration: u32) -> u32 {
    if half_duration == 0 {
        return value.round() as u32;
    }
    let share = tick as f64 / (2.0 * half_duration as f64);
    (value * share).round() as u32
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub gk_long_pass: PercStats,
    pub long_pass: PercStats,
    pub forward_pass: PercStats,
    pub flank_pass: PercStats,
    pub ball_control: PercStats,
    pub dribbling: PercStats,
    pub long_flank_pass: PercStats,
    pub pass: PercStats,
    pub area_pass: PercStats,
    pub run_ball: PercStats,
    pub low_cross: PercStats,
    pub cross: PercStats,
    pub shots: PercStats,
    pub headings_on_target: PercStats,

    pub personal_challenges: UnitStats,
    pub interceptions: UnitStats,
    pub saves: UnitStats,
    pub concedings: UnitStats,

    goals: UnitStats,
    penalties_missed: UnitStats,
    penalties_saved: UnitStats,
}

// ============================================================================
// Effort thresholds
// ============================================================================

/// Effort threshold per category for one lineup slot.
///
/// A category whose line/position has no entry of its own inherits the threshold
/// of the category evaluated just before it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Qualifiers {
    long_pass: f64,
    forward_pass: f64,
    flank_pass: f64,
    ball_control: f64,
    pass: f64,
    run_ball: f64,
    low_cross: f64,
    cross: f64,
    shots: f64,
    headings: f64,
    dribbling: f64,
    long_flank_pass: f64,
    area_pass: f64,
    personal_challenges: f64,
}

impl Qualifiers {
    fn for_slot(
        line: Option<TacticLine>,
        position: Option<TacticPosition>,
        headings_need_forward: bool,
    ) -> Self {
        use TacticLine::{Defender as D, Forward as F, Midfielder as M};

        let half_flank = position.map_or(false, |p| p.is_half_flank());
        let flank = position.map_or(false, |p| p.is_flank());
        let axis = position == Some(TacticPosition::Axis);

        let mut current = 0.0;
        let mut next = |value: Option<f64>| {
            if let Some(v) = value {
                current = v;
            }
            current
        };

        let long_pass = next(match line {
            Some(D) => Some(threshold::LONG_PASS_DEF),
            Some(M) => Some(threshold::LONG_PASS_MID),
            _ => None,
        });
        let forward_pass = next(match line {
            Some(D) => Some(threshold::FORWARD_PASS_DEF),
            Some(M) => Some(threshold::FORWARD_PASS_MID),
            _ => None,
        });
        let flank_pass = next(match line {
            Some(D) => Some(threshold::FLANK_PASS_DEF),
            Some(M) => Some(threshold::FLANK_PASS_MID),
            _ => None,
        });
        let ball_control = next(match line {
            Some(M) => Some(threshold::BALL_CONTROL_MID),
            Some(F) => Some(threshold::BALL_CONTROL_FOR),
            _ => None,
        });
        let pass = next(match line {
            Some(M) => Some(threshold::PASS_MID),
            _ => None,
        });
        let run_ball = next(match line {
            Some(D) => Some(threshold::RUN_BALL_DEF),
            Some(M) => Some(threshold::RUN_BALL_MID),
            _ => None,
        });
        let low_cross = next(match line {
            Some(M) if half_flank => Some(threshold::LOW_CROSS_MID_HALF_FLANK),
            Some(M) if flank => Some(threshold::LOW_CROSS_MID_FLANK),
            Some(F) if half_flank => Some(threshold::LOW_CROSS_FOR_HALF_FLANK),
            Some(F) if flank => Some(threshold::LOW_CROSS_FOR_FLANK),
            _ => None,
        });
        let cross = next(match line {
            Some(D) if half_flank => Some(threshold::CROSS_DEF_HALF_FLANK),
            Some(D) if flank => Some(threshold::CROSS_DEF_FLANK),
            Some(M) if axis => Some(threshold::CROSS_MID_AXIS),
            Some(M) if half_flank => Some(threshold::CROSS_MID_HALF_FLANK),
            Some(M) if flank => Some(threshold::CROSS_MID_FLANK),
            Some(F) if half_flank => Some(threshold::CROSS_FOR_HALF_FLANK),
            Some(F) if flank => Some(threshold::CROSS_FOR_FLANK),
            _ => None,
        });
        let shots = next(match line {
            Some(M) => Some(threshold::SHOTS_MID),
            Some(F) => Some(threshold::SHOTS_FOR),
            _ => None,
        });
        let heading_line = !headings_need_forward || line == Some(F);
        let headings = next(if heading_line && half_flank {
            Some(threshold::HEADINGS_FOR_HALF_FLANK)
        } else if heading_line && flank {
            Some(threshold::HEADINGS_FOR_FLANK)
        } else {
            None
        });
        let dribbling = next(match line {
            Some(D) => Some(threshold::DRIBBLING_DEF),
            Some(M) => Some(threshold::DRIBBLING_MID),
            Some(F) => Some(threshold::DRIBBLING_FOR),
            _ => None,
        });
        let long_flank_pass = next(match line {
            Some(M) => Some(threshold::LONG_FLANK_PASS_MID),
            _ => None,
        });
        let area_pass = next(match line {
            Some(M) => Some(threshold::AREA_PASS_MID),
            Some(F) => Some(threshold::AREA_PASS_FOR),
            _ => None,
        });
        let personal_challenges = next(match line {
            Some(D) => Some(threshold::PERSONAL_CHALLENGES_DEF),
            Some(M) => Some(threshold::PERSONAL_CHALLENGES_MID),
            _ => None,
        });

        Self {
            long_pass,
            forward_pass,
            flank_pass,
            ball_control,
            pass,
            run_ball,
            low_cross,
            cross,
            shots,
            headings,
            dribbling,
            long_flank_pass,
            area_pass,
            personal_challenges,
        }
    }
}

/// Weighted mean of the categories that produced a rating.
#[derive(Debug, Default)]
struct Tally {
    total: f64,
    weight: f64,
}

impl Tally {
    fn add(&mut self, rating: Option<f64>, weight: f64) {
        if let Some(r) = rating {
            self.total += r * weight;
            self.weight += weight;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.weight > 0.0).then(|| self.total / self.weight)
    }
}

impl PlayerStats {
    pub fn add_goal(&mut self, tick: u32) {
        self.goals.add(tick);
    }

    pub fn add_penalty_missed(&mut self, tick: u32) {
        self.penalties_missed.add(tick);
    }

    pub fn add_penalty_saved(&mut self, tick: u32) {
        self.penalties_saved.add(tick);
    }

    pub fn goals(&self) -> u32 {
        self.goals.occurrences()
    }

    pub fn goal_ticks(&self) -> &[u32] {
        self.goals.ticks()
    }

    pub fn penalties_missed(&self) -> u32 {
        self.penalties_missed.occurrences()
    }

    pub fn penalties_saved(&self) -> u32 {
        self.penalties_saved.occurrences()
    }

    /// Copy holding only the events that happened at or before `tick`.
    pub fn snapshot(&self, tick: u32) -> Self {
        Self {
            gk_long_pass: self.gk_long_pass.snapshot(tick),
            long_pass: self.long_pass.snapshot(tick),
            forward_pass: self.forward_pass.snapshot(tick),
            flank_pass: self.flank_pass.snapshot(tick),
            ball_control: self.ball_control.snapshot(tick),
            dribbling: self.dribbling.snapshot(tick),
            long_flank_pass: self.long_flank_pass.snapshot(tick),
            pass: self.pass.snapshot(tick),
            area_pass: self.area_pass.snapshot(tick),
            run_ball: self.run_ball.snapshot(tick),
            low_cross: self.low_cross.snapshot(tick),
            cross: self.cross.snapshot(tick),
            shots: self.shots.snapshot(tick),
            headings_on_target: self.headings_on_target.snapshot(tick),
            personal_challenges: self.personal_challenges.snapshot(tick),
            interceptions: self.interceptions.snapshot(tick),
            saves: self.saves.snapshot(tick),
            concedings: self.concedings.snapshot(tick),
            goals: self.goals.snapshot(tick),
            penalties_missed: self.penalties_missed.snapshot(tick),
            penalties_saved: self.penalties_saved.snapshot(tick),
        }
    }

    // ------------------------------------------------------------------------
    // Aggregates
    // ------------------------------------------------------------------------

    fn passes(&self) -> [&PercStats; 7] {
        [
            &self.gk_long_pass,
            &self.long_pass,
            &self.forward_pass,
            &self.flank_pass,
            &self.long_flank_pass,
            &self.pass,
            &self.area_pass,
        ]
    }

    pub fn all_passes_succ(&self) -> u32 {
        self.passes().iter().map(|p| p.successes()).sum()
    }

    pub fn all_passes_total(&self) -> u32 {
        self.passes().iter().map(|p| p.total()).sum()
    }

    pub fn att_challenges_succ(&self) -> u32 {
        self.ball_control.successes() + self.dribbling.successes()
    }

    pub fn att_challenges_total(&self) -> u32 {
        self.ball_control.total() + self.dribbling.total()
    }

    pub fn crosses_succ(&self) -> u32 {
        self.cross.successes() + self.low_cross.successes()
    }

    pub fn crosses_total(&self) -> u32 {
        self.cross.total() + self.low_cross.total()
    }

    pub fn runs_succ(&self) -> u32 {
        self.run_ball.successes()
    }

    pub fn runs_total(&self) -> u32 {
        self.run_ball.total()
    }

    pub fn def_challenges_won(&self) -> u32 {
        self.personal_challenges.occurrences()
    }

    pub fn interceptions_made(&self) -> u32 {
        self.interceptions.occurrences()
    }

    pub fn saves_made(&self) -> u32 {
        self.saves.occurrences()
    }

    /// Shots and headers on target.
    pub fn all_shots_succ(&self) -> u32 {
        self.shots.successes() + self.headings_on_target.successes()
    }

    pub fn all_shots_succ_upto(&self, tick: u32) -> u32 {
        self.shots.successes_upto(tick) + self.headings_on_target.successes_upto(tick)
    }

    pub fn all_shots_total(&self) -> u32 {
        self.shots.total() + self.headings_on_target.total()
    }

    // ------------------------------------------------------------------------
    // Rating
    // ------------------------------------------------------------------------

    /// Full-match rating for a player in the given slot. `None` when no category
    /// produced a rating.
    pub fn rating(&self, line: Option<TacticLine>, position: Option<TacticPosition>) -> Option<f64> {
        let q = Qualifiers::for_slot(line, position, true);
        let at = |v: f64| v as u32;
        let mut tally = Tally::default();

        tally.add(self.gk_long_pass.rating(expected::GK_LONG_PASS, 0), eval::GK_LONG_PASS);
        tally.add(self.long_pass.rating(expected::LONG_PASS, at(q.long_pass)), eval::LONG_PASS);
        tally.add(self.forward_pass.rating(expected::FORWARD_PASS, at(q.forward_pass)), eval::FORWARD_PASS);
        tally.add(self.flank_pass.rating(expected::FLANK_PASS, at(q.flank_pass)), eval::FLANK_PASS);
        tally.add(self.ball_control.rating(expected::BALL_CONTROL, at(q.ball_control)), eval::BALL_CONTROL);
        tally.add(self.pass.rating(expected::PASS, at(q.pass)), eval::PASS);
        tally.add(self.run_ball.rating(expected::RUN_BALL, at(q.run_ball)), eval::RUN_BALL);
        tally.add(self.low_cross.rating(expected::LOW_CROSS, at(q.low_cross)), eval::LOW_CROSS);
        tally.add(self.cross.rating(expected::CROSS, at(q.cross)), eval::CROSS);
        tally.add(self.shots.rating(expected::shots(), at(q.shots)), eval::SHOTS);
        tally.add(self.headings_on_target.rating(expected::shots(), at(q.headings)), eval::HEADINGS);
        tally.add(self.dribbling.rating(expected::DRIBBLING, at(q.dribbling)), eval::DRIBBLING);
        tally.add(self.long_flank_pass.rating(expected::LONG_FLANK_PASS, at(q.long_flank_pass)), eval::LONG_FLANK_PASS);
        tally.add(self.area_pass.rating(expected::AREA_PASS, at(q.area_pass)), eval::AREA_PASS);
        tally.add(self.personal_challenges.rating(at(q.personal_challenges)), eval::PERSONAL_CHALLENGES);
        tally.add(self.interceptions.rating(0), eval::INTERCEPTIONS);
        tally.add(self.saves.rating(0), eval::SAVES);
        tally.add(self.concedings.negative_rating(), eval::CONCEDINGS);
        tally.add(self.penalties_missed.negative_rating(), eval::PENALTIES_MISSED);
        tally.add(self.penalties_saved.rating(0), eval::PENALTIES_SAVED);
        let penalty_goals = self.goals().saturating_sub(self.all_shots_succ());
        tally.add(UnitStats::from_count(penalty_goals).rating(0), eval::PENALTY_GOALS);

        tally.mean()
    }

    /// Rating from the events up to `tick`, with effort thresholds scaled to the
    /// share of the match played.
    ///
    /// Differs from [`PlayerStats::rating`] in three places: the header threshold is
    /// picked from the lateral position whatever the line, headers are rated on the
    /// whole record with the missing attempts shared over `tick` surrogates, and saved
    /// penalties count against the keeper.
    pub fn rating_at(
        &self,
        line: Option<TacticLine>,
        position: Option<TacticPosition>,
        tick: u32,
        half_duration: u32,
    ) -> Option<f64> {
        let q = Qualifiers::for_slot(line, position, false);
        let at = |v: f64| adjust_threshold_to_time(v, tick, half_duration);
        let mut tally = Tally::default();

        tally.add(self.gk_long_pass.current_rating(expected::GK_LONG_PASS, 0, tick), eval::GK_LONG_PASS);
        tally.add(self.long_pass.current_rating(expected::LONG_PASS, at(q.long_pass), tick), eval::LONG_PASS);
        tally.add(
            self.forward_pass.current_rating(expected::FORWARD_PASS, at(q.forward_pass), tick),
            eval::FORWARD_PASS,
        );
        tally.add(self.flank_pass.current_rating(expected::FLANK_PASS, at(q.flank_pass), tick), eval::FLANK_PASS);
        tally.add(
            self.ball_control.current_rating(expected::BALL_CONTROL, at(q.ball_control), tick),
            eval::BALL_CONTROL,
        );
        tally.add(self.pass.current_rating(expected::PASS, at(q.pass), tick), eval::PASS);
        tally.add(self.run_ball.current_rating(expected::RUN_BALL, at(q.run_ball), tick), eval::RUN_BALL);
        tally.add(self.low_cross.current_rating(expected::LOW_CROSS, at(q.low_cross), tick), eval::LOW_CROSS);
        tally.add(self.cross.current_rating(expected::CROSS, at(q.cross), tick), eval::CROSS);
        tally.add(self.shots.current_rating(expected::shots(), at(q.shots), tick), eval::SHOTS);
        tally.add(
            self.headings_on_target.rating_with_surrogates(expected::shots(), at(q.headings), tick),
            eval::HEADINGS,
        );
        tally.add(self.dribbling.current_rating(expected::DRIBBLING, at(q.dribbling), tick), eval::DRIBBLING);
        tally.add(
            self.long_flank_pass.current_rating(expected::LONG_FLANK_PASS, at(q.long_flank_pass), tick),
            eval::LONG_FLANK_PASS,
        );
        tally.add(self.area_pass.current_rating(expected::AREA_PASS, at(q.area_pass), tick), eval::AREA_PASS);
        tally.add(
            self.personal_challenges.current_rating(at(q.personal_challenges), tick),
            eval::PERSONAL_CHALLENGES,
        );
        tally.add(self.interceptions.current_rating(0, tick), eval::INTERCEPTIONS);
        tally.add(self.saves.current_rating(0, tick), eval::SAVES);
        tally.add(self.concedings.negative_rating_upto(tick), eval::CONCEDINGS);
        tally.add(self.penalties_missed.negative_rating_upto(tick), eval::PENALTIES_MISSED);
        tally.add(self.penalties_saved.negative_rating_upto(tick), eval::PENALTIES_SAVED);
        let penalty_goals = self
            .goals
            .occurrences_upto(tick)
            .saturating_sub(self.all_shots_succ_upto(tick));
        tally.add(UnitStats::from_count(penalty_goals).rating(0), eval::PENALTY_GOALS);

        tally.mean()
    }
}

// ========== Tests ==========
