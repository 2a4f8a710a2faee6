//! Shots, headers and goals
//!
//! Shot outcomes are drawn from the real-world goal / on target / off target split,
//! reweighted by the shooter against the opposing keeper. Every shot writes its own
//! highlights and raises a `Shot` signal.

use super::MatchEngine;
use crate::calibration::general::{AVG_SKILL, SHOT_OFF_GOAL_KICK, SKILL_FLOOR};
use crate::calibration::shots::{AREA_SHOT_STATS, CROSS_STATS, LONG_SHOT_STATS, SHOT_ON_STATS};
use crate::engine::report::Special;
use crate::engine::roulette;
use crate::engine::signals::{AfterShot, ShotOutcome, Signal};
use crate::error::Result;
use crate::models::{
    Action, FieldState, FieldX, FieldY, GoalDetails, Instant, Lane, PlayerId, Pressure, Skill,
    TacticLine, TeamSide,
};

/// Aftermath of a shot on target for a draw in `[0, 100)`.
fn after_shot_index(u: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, share) in SHOT_ON_STATS.iter().enumerate() {
        cumulative += share;
        if u < cumulative {
            return i;
        }
    }
    0
}

impl MatchEngine {
    /// Ability weights `[keeper, on target, off target]` for `player` shooting with `skill`.
    fn shot_ability(&self, team: TeamSide, player: PlayerId, skill: Skill) -> [f64; 3] {
        let (us, them) = (self.teams.get(team), self.teams.get(team.opponent()));
        let handling = them.average_skill(TacticLine::Gk, Skill::Handling).max(SKILL_FLOOR);
        let own = us.player(player).skill(skill).max(SKILL_FLOOR);
        [AVG_SKILL / handling, us.finishing * AVG_SKILL / own, us.shooting * AVG_SKILL / own]
    }

    /// Long-range or in-area shot by the ball holder.
    pub(crate) fn assess_shot(&mut self, instant: &Instant) -> Result<FieldState> {
        let state = self.current()?.clone();
        let ability = self.shot_ability(state.team, state.player, Skill::Shooting);
        let stats = if instant.action == Action::LongShot { &LONG_SHOT_STATS } else { &AREA_SHOT_STATS };
        let index = roulette::outcome(stats, &ability, &mut *self.rng);

        let opponent = state.team.opponent();
        let keeper = self.gk_of(opponent)?;
        let tick = self.report.timer();
        match index {
            0 => {
                self.teams.get_mut(state.team).player_mut(state.player).stats.shots.register_success(tick);
                self.teams.get_mut(opponent).player_mut(keeper).stats.concedings.add(tick);
                self.goal(instant.action, false)
            }
            1 => {
                self.teams.get_mut(state.team).player_mut(state.player).stats.shots.register_failure(tick);
                self.teams.get_mut(opponent).player_mut(keeper).stats.saves.add(tick);
                self.shot_on(instant.action, false)
            }
            _ => {
                self.teams.get_mut(state.team).player_mut(state.player).stats.shots.register_failure(tick);
                self.shot_off(instant.action, false)
            }
        }
    }

    /// A cross that reached the box: a header when it made a chance, normal play otherwise.
    pub(crate) fn process_cross(&mut self, instant: &Instant) -> Result<FieldState> {
        if instant.outcome.is_goal_scoring_opportunity() {
            self.assess_header(instant)
        } else {
            self.simulate_next_state(instant, true)
        }
    }

    fn assess_header(&mut self, instant: &Instant) -> Result<FieldState> {
        let (team, crosser) = {
            let state = self.current()?;
            (state.team, state.player)
        };
        let header = self.goal_scorer(team, Some(crosser))?;
        if let Some(state) = self.state.as_mut() {
            state.crosser = Some(crosser);
            state.player = header;
        }
        log::debug!("Cross by {} met by {}", self.family_name(team, crosser), self.family_name(team, header));

        let ability = self.shot_ability(team, header, Skill::Heading);
        let index = roulette::outcome(&CROSS_STATS, &ability, &mut *self.rng);
        let opponent = team.opponent();
        let keeper = self.gk_of(opponent)?;
        let tick = self.report.timer();
        match index {
            0 => {
                self.teams.get_mut(team).player_mut(header).stats.headings_on_target.register_success(tick);
                self.teams.get_mut(opponent).player_mut(keeper).stats.concedings.add(tick);
                self.goal(instant.action, true)
            }
            1 => {
                self.teams.get_mut(team).player_mut(header).stats.headings_on_target.register_failure(tick);
                self.teams.get_mut(opponent).player_mut(keeper).stats.saves.add(tick);
                self.shot_on(instant.action, true)
            }
            _ => {
                self.teams.get_mut(team).player_mut(header).stats.headings_on_target.register_failure(tick);
                self.shot_off(instant.action, true)
            }
        }
    }

    // ========================================================================
    // Shot results
    // ========================================================================

    fn goal(&mut self, action: Action, cross: bool) -> Result<FieldState> {
        let state = self.current()?.clone();
        let (team, scorer) = (state.team, state.player);
        let name = self.family_name(team, scorer);
        let (tick, minute) = (self.report.timer(), self.report.minute());

        let scoring = self.teams.get_mut(team);
        scoring.stats.score_goal();
        scoring.stats.add_shot_on_target();
        scoring.player_mut(scorer).stats.add_goal(tick);
        scoring.register_goal(GoalDetails { scorer, scorer_name: name.clone(), minute, penalty: false, tick });

        self.highlight(format!("{}'", minute));
        self.describe_action(&state, &name, action);
        self.highlight(format!("{} scores!", name));
        self.highlight(self.report.score_line(&self.teams));
        self.report.set_special(Special::Goal);

        let opponent = team.opponent();
        let player = self.pick_defensive(opponent)?;
        let next = FieldState::restart(opponent, Pressure::Free, player);

        let signal = Signal::Shot {
            tick,
            outcome: ShotOutcome::Goal,
            shooter: name,
            crosser: self.crosser_name(&state, cross),
            team: self.team_name(team),
        };
        self.rewind.add_signal(signal);
        Ok(next)
    }

    fn shot_on(&mut self, action: Action, cross: bool) -> Result<FieldState> {
        let state = self.current()?.clone();
        let (team, opponent) = (state.team, state.team.opponent());
        let name = self.family_name(team, state.player);
        let minute = self.report.minute();

        let after = AfterShot::from_index(after_shot_index(self.rng.next_f64() * 100.0));
        self.teams.get_mut(team).stats.add_shot_on_target();

        let keeper = self.gk_of(opponent)?;
        let next = match after {
            AfterShot::Defender | AfterShot::PostDefender => {
                let rebounder = self.defensive_rebounder(opponent)?;
                FieldState::restart(opponent, Pressure::Pressed, rebounder)
            }
            AfterShot::Gk | AfterShot::PostGk | AfterShot::PostGoalKick => {
                FieldState::restart(opponent, Pressure::Free, keeper)
            }
            AfterShot::CornerKick => self.flank_restart(&state, FieldX::CornerKick, Pressure::Free)?,
            AfterShot::Forward | AfterShot::PostForward | AfterShot::DefenderSaveForward => {
                let rebounder = self.attacking_rebounder(team)?;
                FieldState::new(team, FieldX::Axis, FieldY::Attack, Pressure::Pressed, None, rebounder)
            }
            AfterShot::DefenderSaveThrowIn | AfterShot::ThrowIn => {
                self.flank_restart(&state, FieldX::ThrowIn, Pressure::Pressed)?
            }
        };

        self.highlight(format!("{}'", minute));
        self.describe_action(&state, &name, action);
        let keeper_name = self.family_name(opponent, keeper);
        let holder_name = self.family_name(next.team, next.player);
        match after {
            AfterShot::Defender | AfterShot::Forward => {
                self.highlight(format!("{} saves", keeper_name));
                self.highlight(format!("{} has the ball", holder_name));
            }
            AfterShot::PostDefender | AfterShot::PostForward => {
                self.highlight("Hits the post!");
                self.highlight(format!("{} has the ball", holder_name));
            }
            AfterShot::Gk => self.highlight(format!("{} saves and holds the ball", keeper_name)),
            AfterShot::PostGk => {
                self.highlight("Hits the post!");
                self.highlight(format!("{} holds the ball", keeper_name));
            }
            AfterShot::PostGoalKick => {
                self.highlight("Hits the post!");
                self.highlight("The ball is out for a goal kick");
            }
            AfterShot::CornerKick => {
                self.highlight(format!("{} saves", keeper_name));
                self.highlight("The ball is out for a corner");
            }
            AfterShot::DefenderSaveForward => {
                let defender = self.defensive_rebounder(opponent)?;
                self.highlight(format!("{} saves on the line!", self.family_name(opponent, defender)));
                self.highlight(format!("{} gets the ball", holder_name));
            }
            AfterShot::DefenderSaveThrowIn => {
                let defender = self.defensive_rebounder(opponent)?;
                self.highlight(format!("{} saves on the line!", self.family_name(opponent, defender)));
                self.highlight("The ball is out for a throw in");
            }
            AfterShot::ThrowIn => {
                self.highlight(format!("{} saves", keeper_name));
                self.highlight("The ball is out for a throw in");
            }
        }
        self.report.set_special(Special::ShotOn);

        let signal = Signal::Shot {
            tick: self.report.timer(),
            outcome: ShotOutcome::OnTarget(after),
            shooter: name,
            crosser: self.crosser_name(&state, cross),
            team: self.team_name(team),
        };
        self.rewind.add_signal(signal);
        Ok(next)
    }

    fn shot_off(&mut self, action: Action, cross: bool) -> Result<FieldState> {
        let state = self.current()?.clone();
        let (team, opponent) = (state.team, state.team.opponent());
        let name = self.family_name(team, state.player);
        let minute = self.report.minute();

        let corner = self.rng.next_f64() > SHOT_OFF_GOAL_KICK;
        self.teams.get_mut(team).stats.add_shot_off_target();
        let next = if corner {
            self.flank_restart(&state, FieldX::CornerKick, Pressure::Free)?
        } else {
            FieldState::restart(opponent, Pressure::Free, self.gk_of(opponent)?)
        };

        let signal = Signal::Shot {
            tick: self.report.timer(),
            outcome: ShotOutcome::OffTarget { corner },
            shooter: name.clone(),
            crosser: self.crosser_name(&state, cross),
            team: self.team_name(team),
        };
        self.rewind.add_signal(signal);

        self.highlight(format!("{}'", minute));
        self.describe_action(&state, &name, action);
        self.highlight("But he doesn't find target");
        if corner {
            self.highlight("The ball must have deflected somewhere...");
            self.highlight("It's a corner");
        }
        self.report.set_special(Special::ShotOff);
        Ok(next)
    }

    /// Corner or throw-in for the shooting team, on the shot's flank.
    fn flank_restart(&mut self, state: &FieldState, x: FieldX, pressure: Pressure) -> Result<FieldState> {
        let side = self.carry_side(state, false);
        let player = self.pick_in_lane(state.team, TacticLine::Midfielder, Lane::from_side(Some(side)))?;
        Ok(FieldState::new(state.team, x, FieldY::Attack, pressure, Some(side), player))
    }

    fn crosser_name(&self, state: &FieldState, cross: bool) -> Option<String> {
        if !cross {
            return None;
        }
        state.crosser.map(|crosser| self.family_name(state.team, crosser))
    }

    fn describe_action(&mut self, state: &FieldState, name: &str, action: Action) {
        let line = match action {
            Action::LongShot => format!("{} attempts a shot from long range", name),
            Action::AreaShot => format!("{} has the ball inside the penalty area", name),
            Action::Cross | Action::LongCross => {
                if let Some(crosser) = state.crosser {
                    self.highlight(format!("{} crosses the ball", self.family_name(state.team, crosser)));
                }
                format!("{} gets the ball from the cross!", name)
            }
            _ => format!("{} didn't expect the ball", name),
        };
        self.highlight(line);
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::{engine_with, instant, success, synthetic_corpus};
    use crate::models::codes::result_code;
    use crate::models::{PressureCode, Side};
    use crate::rng::ScriptedRandom;

    fn striker_engine(draw: f64) -> MatchEngine {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(draw));
        engine.set_timer(200);
        engine.set_state(FieldState::new(TeamSide::Home, FieldX::Axis, FieldY::Attack, Pressure::Free, None, PlayerId(9)));
        engine
    }

    fn highlight_texts(engine: &MatchEngine) -> Vec<String> {
        engine.report().highlights().map(|(_, text)| text.clone()).collect()
    }

    #[test]
    fn test_after_shot_index_bounds() {
        assert_eq!(after_shot_index(0.0), 0);
        assert_eq!(after_shot_index(20.0), 1);
        assert_eq!(after_shot_index(99.99), 10);
        // past the table
        assert_eq!(after_shot_index(150.0), 0);
    }

    #[test]
    fn test_zero_skill_shooter_still_has_finite_weights() {
        let mut engine = striker_engine(0.5);
        engine.teams.home.player_mut(PlayerId(9)).set_skill(Skill::Shooting, 0.0);
        let ability = engine.shot_ability(TeamSide::Home, PlayerId(9), Skill::Shooting);
        assert!(ability.iter().all(|w| w.is_finite() && *w > 0.0));
    }

    #[test]
    fn test_area_shot_goal() {
        let mut engine = striker_engine(0.0);
        let shot = instant(FieldY::Attack, FieldX::Axis, PressureCode::Clear, Action::AreaShot, success(result_code::GOAL));
        let next = engine.assess_shot(&shot).unwrap();

        let home = &engine.teams().home;
        assert_eq!(home.stats.goals, 1);
        assert_eq!(home.stats.shots_on_target, 1);
        assert_eq!(home.player(PlayerId(9)).stats.goals(), 1);
        assert_eq!(home.player(PlayerId(9)).stats.shots.successes(), 1);
        assert_eq!(engine.teams().away.player(PlayerId(0)).stats.concedings.occurrences(), 1);
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(
            engine.signals().last(),
            Some(&Signal::Shot {
                tick: 200,
                outcome: ShotOutcome::Goal,
                shooter: "Charisteas".into(),
                crosser: None,
                team: "Greece".into(),
            })
        );
        let texts = highlight_texts(&engine);
        assert!(texts.contains(&"Charisteas has the ball inside the penalty area".to_string()));
        assert!(texts.contains(&"Greece - Germany 1 - 0".to_string()));
    }

    #[test]
    fn test_shot_off_is_goal_kick() {
        let mut engine = striker_engine(0.5);
        let next = engine.shot_off(Action::LongShot, false).unwrap();
        assert_eq!(next, FieldState::restart(TeamSide::Away, Pressure::Free, PlayerId(0)));
        assert_eq!(engine.teams().home.stats.shots_off_target, 1);
        assert!(highlight_texts(&engine).contains(&"But he doesn't find target".to_string()));
        assert!(matches!(
            engine.signals().last(),
            Some(Signal::Shot { outcome: ShotOutcome::OffTarget { corner: false }, .. })
        ));
    }

    #[test]
    fn test_deflected_shot_off_is_corner() {
        let mut engine = striker_engine(0.9);
        let next = engine.shot_off(Action::LongShot, false).unwrap();
        assert_eq!(next.team, TeamSide::Home);
        assert_eq!(next.x, FieldX::CornerKick);
        assert_eq!(next.y, FieldY::Attack);
        assert!(next.side().is_some());
        assert!(highlight_texts(&engine).contains(&"It's a corner".to_string()));
    }

    #[test]
    fn test_shot_on_keeper_holds() {
        // 50 falls in the second band of the aftermath table
        let mut engine = striker_engine(0.5);
        let next = engine.shot_on(Action::AreaShot, false).unwrap();
        assert_eq!(next, FieldState::restart(TeamSide::Away, Pressure::Free, PlayerId(0)));
        assert_eq!(engine.teams().home.stats.shots_on_target, 1);
        assert!(highlight_texts(&engine).contains(&"Kahn saves and holds the ball".to_string()));
        assert_eq!(engine.report.current_entry().special, Some(Special::ShotOn));
    }

    #[test]
    fn test_shot_on_parried_to_defender() {
        let mut engine = striker_engine(0.1);
        let next = engine.shot_on(Action::LongShot, false).unwrap();
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(next.pressure, Pressure::Pressed);
        assert_eq!(engine.teams().away.line_of(next.player), Some(TacticLine::Defender));
        assert!(highlight_texts(&engine).contains(&"Kahn saves".to_string()));
    }

    #[test]
    fn test_header_is_never_taken_by_the_crosser() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.0));
        engine.set_timer(150);
        engine.set_state(FieldState::new(
            TeamSide::Home,
            FieldX::Flank,
            FieldY::Attack,
            Pressure::Free,
            Some(Side::Left),
            PlayerId(8),
        ));
        let cross = instant(FieldY::Attack, FieldX::Flank, PressureCode::Clear, Action::Cross, success(result_code::GOAL));
        engine.process_cross(&cross).unwrap();

        let Some(Signal::Shot { shooter, crosser, outcome, .. }) = engine.signals().last() else {
            panic!("expected a shot signal");
        };
        assert_eq!(*outcome, ShotOutcome::Goal);
        assert_eq!(crosser.as_deref(), Some("Karagounis"));
        assert_ne!(shooter, "Karagounis");
        assert!(highlight_texts(&engine).contains(&"Karagounis crosses the ball".to_string()));
    }

    #[test]
    fn test_cross_without_chance_plays_on() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.3));
        engine.set_state(FieldState::new(
            TeamSide::Home,
            FieldX::Flank,
            FieldY::Attack,
            Pressure::Free,
            Some(Side::Left),
            PlayerId(8),
        ));
        let cross = instant(FieldY::Attack, FieldX::Flank, PressureCode::Clear, Action::Cross, success(0));
        let next = engine.process_cross(&cross).unwrap();
        assert_eq!(next.team, TeamSide::Home);
        assert!(engine.signals().is_empty());
    }
}
