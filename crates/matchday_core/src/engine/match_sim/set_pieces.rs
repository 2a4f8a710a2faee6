//! Restarts: penalties, offsides, goal kicks and throw-ins

use super::MatchEngine;
use crate::calibration::shots::PENALTY_SHOT_STATS;
use crate::engine::report::Special;
use crate::engine::roulette;
use crate::engine::signals::{PenaltyOutcome, Signal};
use crate::error::Result;
use crate::models::{
    FieldState, FieldX, FieldY, GoalDetails, Instant, Lane, MissedPenaltyDetails, PlayerId,
    Pressure, TacticLine, TeamSide,
};

impl MatchEngine {
    /// The ball holder's team was caught offside.
    pub(crate) fn offside_by_holder(&mut self) -> Result<FieldState> {
        let team = self.current()?.team;
        self.offside_against(team)
    }

    /// Flags `offender` offside and gives a free restart to a defender of the other team.
    pub(crate) fn offside_against(&mut self, offender: TeamSide) -> Result<FieldState> {
        self.teams.get_mut(offender).stats.add_offside();
        self.report.set_special(Special::Offside);
        let signal = Signal::Offside { tick: self.report.timer(), team: self.team_name(offender) };
        self.rewind.add_signal(signal);

        let team = offender.opponent();
        let player = self.pick_on_line(team, TacticLine::Defender)?;
        Ok(FieldState::restart(team, Pressure::Free, player))
    }

    pub(crate) fn goal_kick_against_holder(&mut self) -> Result<FieldState> {
        let team = self.current()?.team.opponent();
        self.goal_kick_for(team, true)
    }

    /// Keeper of `team` restarts from the back. `reported` marks the report entry.
    pub(crate) fn goal_kick_for(&mut self, team: TeamSide, reported: bool) -> Result<FieldState> {
        if reported {
            self.report.set_special(Special::GoalKick);
        }
        let keeper = self.gk_of(team)?;
        Ok(FieldState::restart(team, Pressure::Free, keeper))
    }

    /// Throw-in for the team the instant leaves with the ball, on the flank it went out.
    pub(crate) fn throw_in(&mut self, instant: &Instant) -> Result<FieldState> {
        let current = self.current()?.clone();
        let team = self.outcome_team(instant)?;
        self.report.set_special(Special::ThrowIn);

        let y = instant.outcome_y()?;
        let x = match instant.outcome_x()? {
            x if x.is_flank_like() => x,
            _ => FieldX::ThrowIn,
        };
        let pressure = Pressure::from(instant.outcome_pressure()?);
        let side = self.carry_side(&current, team != current.team);
        let lane = Lane::from_side(Some(side));

        let player = match y {
            FieldY::Defence => self.pick_defensive_at(team, lane)?,
            FieldY::Centre | FieldY::Attack => self.pick_in_lane(team, TacticLine::Midfielder, lane)?,
        };
        Ok(FieldState::new(team, x, y, pressure, Some(side), player))
    }

    /// Penalty for the ball holder's team. Counted as one of its free kicks.
    pub(crate) fn penalty(&mut self) -> Result<FieldState> {
        let team = self.current()?.team;
        let opponent = team.opponent();
        let taker = self.goal_scorer(team, None)?;
        let taker_name = self.family_name(team, taker);
        let (tick, minute) = (self.report.timer(), self.report.minute());

        self.highlight(format!("{}'", minute));
        self.highlight(format!("Penalty for {}!", self.team_name(team)));
        self.highlight(format!("{} is going to take it", taker_name));
        self.teams.get_mut(team).stats.add_free_kick();

        let index = roulette::outcome(&PENALTY_SHOT_STATS, &[1.0, 1.0, 1.0], &mut *self.rng);
        // a draw past the last slot is played as a wide miss
        let outcome = PenaltyOutcome::from_index(index).unwrap_or_else(|| {
            log::debug!("Penalty draw fell through the outcome table (index {}), playing it wide", index);
            PenaltyOutcome::Wide
        });
        log::debug!("Penalty by {}: {:?}", taker_name, outcome);
        let signal = Signal::PenaltyKick { tick, taker: taker_name.clone(), outcome, team: self.team_name(team) };
        self.rewind.add_signal(signal);

        match outcome {
            PenaltyOutcome::Goal => {
                let scoring = self.teams.get_mut(team);
                scoring.stats.score_goal();
                scoring.player_mut(taker).stats.add_goal(tick);
                scoring.register_goal(GoalDetails {
                    scorer: taker,
                    scorer_name: taker_name.clone(),
                    minute,
                    penalty: true,
                    tick,
                });
                self.highlight(format!("{} scores!", taker_name));
                self.highlight(self.report.score_line(&self.teams));
                self.report.set_special(Special::PenaltyGoal);

                let player = self.pick_defensive(opponent)?;
                Ok(FieldState::restart(opponent, Pressure::Free, player))
            }
            PenaltyOutcome::Saved => {
                let rebounder = self.defensive_rebounder(opponent)?;
                let keeper = self.gk_of(opponent)?;
                self.teams.get_mut(team).player_mut(taker).stats.add_penalty_missed(tick);
                self.teams.get_mut(opponent).player_mut(keeper).stats.add_penalty_saved(tick);

                self.highlight(format!("{} saves!", self.family_name(opponent, keeper)));
                self.highlight(format!("{} has the ball", self.family_name(opponent, rebounder)));
                self.register_miss(team, taker, taker_name, minute, tick);
                Ok(FieldState::restart(opponent, Pressure::Pressed, rebounder))
            }
            PenaltyOutcome::Wide => {
                self.teams.get_mut(team).player_mut(taker).stats.add_penalty_missed(tick);
                self.highlight("But he puts it wide");
                self.register_miss(team, taker, taker_name, minute, tick);
                self.goal_kick_for(opponent, false)
            }
        }
    }

    fn register_miss(&mut self, team: TeamSide, taker: PlayerId, taker_name: String, minute: u32, tick: u32) {
        self.teams
            .get_mut(team)
            .register_missed_penalty(MissedPenaltyDetails { taker, taker_name, minute, tick });
        self.report.set_special(Special::PenaltyMissed);
    }
}
