//! Next field state from a resolved instant

use super::MatchEngine;
use crate::engine::matcher::{find_matching_instant, pressure_matched, OutcomeClass};
use crate::error::Result;
use crate::models::codes::result_code;
use crate::models::{
    Action, FieldState, FieldX, FieldY, HolderChange, Instant, Lane, Outcome, PlayerId, Pressure,
    TacticLine, TeamSide,
};

/// Re-rolls allowed when a defensive pick must differ from the passer.
const MAX_REROLLS: usize = 16;

impl MatchEngine {
    /// Plays out a kept ball, from `instant` when it fits the holder's pressure.
    pub(crate) fn simulate_success(&mut self, instant: &Instant, pressed: bool) -> Result<FieldState> {
        let kept = instant.outcome.is_success() || instant.outcome.is_challenge();
        if kept && pressure_matched(instant, pressed) {
            return self.simulate_next_state(instant, true);
        }
        let matched = find_matching_instant(
            &self.corpus,
            instant,
            OutcomeClass::SuccessOrChallenge,
            pressed,
            &mut *self.rng,
        );
        self.simulate_next_state(&matched, true)
    }

    /// Plays out a lost ball of any kind.
    pub(crate) fn simulate_possession_change(&mut self, instant: &Instant, pressed: bool) -> Result<FieldState> {
        if instant.outcome.is_opponent() && pressure_matched(instant, pressed) {
            return self.simulate_next_state(instant, true);
        }
        let matched =
            find_matching_instant(&self.corpus, instant, OutcomeClass::Opposition, pressed, &mut *self.rng);
        self.simulate_next_state(&matched, true)
    }

    /// Plays out a lost ball of a given kind (interception, lost challenge...).
    pub(crate) fn simulate_caused_change(
        &mut self,
        instant: &Instant,
        class: OutcomeClass,
        pressed: bool,
    ) -> Result<FieldState> {
        let recorded = class.possession_change().is_some()
            && instant.outcome.possession_change() == class.possession_change();
        if recorded && pressure_matched(instant, pressed) {
            return self.simulate_next_state(instant, true);
        }
        let matched = find_matching_instant(&self.corpus, instant, class, pressed, &mut *self.rng);
        self.simulate_next_state(&matched, true)
    }

    /// Team holding the ball once `instant` is played out.
    pub(crate) fn outcome_team(&self, instant: &Instant) -> Result<TeamSide> {
        let team = self.current()?.team;
        Ok(if instant.outcome.possession_kept() { team } else { team.opponent() })
    }

    /// Next state as recorded by `instant`. With `fouls` set a foul in the outcome
    /// turns into a free kick or a penalty first.
    pub(crate) fn simulate_next_state(&mut self, instant: &Instant, fouls: bool) -> Result<FieldState> {
        if fouls {
            if let Some(next) = self.check_foul(instant)? {
                return Ok(next);
            }
        }

        match instant.outcome.condition() {
            Some(result_code::OFFSIDE) => return self.offside_by_holder(),
            Some(result_code::GOAL_KICK) => return self.goal_kick_against_holder(),
            Some(result_code::THROW_IN) => return self.throw_in(instant),
            _ => {}
        }

        match instant.outcome {
            Outcome::Success { condition } => self.next_after_success(instant, condition),
            Outcome::Opponent { .. } => self.next_after_loss(instant),
            Outcome::Challenge { ending, .. } => match ending {
                result_code::OFFSIDE => {
                    let team = self.outcome_team(instant)?;
                    self.offside_against(team.opponent())
                }
                result_code::GOAL_KICK => {
                    let team = self.outcome_team(instant)?;
                    self.goal_kick_for(team, false)
                }
                result_code::THROW_IN => self.throw_in(instant),
                _ => self.next_after_challenge(instant),
            },
        }
    }

    fn next_after_success(&mut self, instant: &Instant, condition: u8) -> Result<FieldState> {
        let current = self.current()?.clone();
        let team = current.team;
        let y = instant.outcome_y()?;
        let x = instant.outcome_x()?;
        let mut pressure = Pressure::from(instant.outcome_pressure()?);

        let side = if x.is_flank_like() {
            Some(self.carry_side(&current, instant.action == Action::LongOppositeFlankPass))
        } else {
            None
        };
        let lane = Lane::from_side(side);
        let holder = instant.action.holder_change(condition == result_code::TACKLING);

        let player = match y {
            FieldY::Defence if instant.action == Action::GkPass => {
                pressure = Pressure::Free;
                self.gk_of(team)?
            }
            FieldY::Defence => match holder {
                HolderChange::Same => current.player,
                HolderChange::Different => self.defensive_receiver(team, lane, current.player)?,
                HolderChange::Irrelevant => self.pick_defensive_at(team, lane)?,
            },
            FieldY::Centre => match holder {
                HolderChange::Same => current.player,
                _ => self.pick_in_lane_excluding(team, TacticLine::Midfielder, lane, current.player)?,
            },
            FieldY::Attack if x == FieldX::CornerKick => self.pick_on_line(team, TacticLine::Midfielder)?,
            FieldY::Attack => match holder {
                HolderChange::Same => current.player,
                _ => self.pick_in_lane_excluding(team, TacticLine::Forward, lane, current.player)?,
            },
        };
        Ok(FieldState::new(team, x, y, pressure, side, player))
    }

    /// Defender or midfielder other than the passer.
    fn defensive_receiver(&mut self, team: TeamSide, lane: Lane, passer: PlayerId) -> Result<PlayerId> {
        for _ in 0..MAX_REROLLS {
            let pick = self.teams.get(team).any_defensive_player_excluding(lane, passer, &mut *self.rng);
            match pick {
                Some(player) if player != passer => return Ok(player),
                Some(_) => continue,
                None => break,
            }
        }
        log::debug!("No receiver besides the passer in {:?}, picking from midfield", lane);
        self.pick_in_lane_excluding(team, TacticLine::Midfielder, lane, passer)
    }

    fn next_after_loss(&mut self, instant: &Instant) -> Result<FieldState> {
        let current = self.current()?.clone();
        let team = current.team.opponent();
        let y = instant.outcome_y()?;
        let x = instant.outcome_x()?;
        let pressure = Pressure::from(instant.outcome_pressure()?);

        // the flank seen from the other end of the pitch
        let side = if x.is_flank_like() { Some(self.carry_side(&current, true)) } else { None };
        let lane = Lane::from_side(side);
        let player = match y {
            FieldY::Defence => self.pick_defensive_at(team, lane)?,
            FieldY::Centre => self.pick_in_lane(team, TacticLine::Midfielder, lane)?,
            FieldY::Attack => self.pick_in_lane(team, TacticLine::Forward, lane)?,
        };
        Ok(FieldState::new(team, x, y, pressure, side, player))
    }

    fn next_after_challenge(&mut self, instant: &Instant) -> Result<FieldState> {
        let Some((y, x)) = instant.challenge_end()? else {
            return self.next_after_loss(instant);
        };
        let current = self.current()?.clone();
        let team = self.outcome_team(instant)?;
        let pressure = Pressure::from(instant.outcome_pressure()?);

        let side = if x.is_flank_like() {
            Some(self.carry_side(&current, team != current.team))
        } else {
            None
        };
        let lane = Lane::from_side(side);
        let corner = instant.outcome_state.x == FieldX::CornerKick as u8;
        let player = match y {
            FieldY::Defence => self.pick_defensive_at(team, lane)?,
            FieldY::Centre => self.pick_in_lane(team, TacticLine::Midfielder, lane)?,
            FieldY::Attack if corner => self.pick_in_lane(team, TacticLine::Midfielder, lane)?,
            FieldY::Attack => self.pick_in_lane(team, TacticLine::Forward, lane)?,
        };
        Ok(FieldState::new(team, x, y, pressure, side, player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::{ending_at, engine_with, instant, opponent, success, synthetic_corpus};
    use crate::engine::report::Special;
    use crate::engine::signals::Signal;
    use crate::models::codes::{possession_change, team_code};
    use crate::models::{PressureCode, Side};
    use crate::rng::{ScriptedRandom, SeededRandom};

    fn flank_state(team: TeamSide, y: FieldY, side: Side, player: usize) -> FieldState {
        FieldState::new(team, FieldX::Flank, y, Pressure::Free, Some(side), PlayerId(player))
    }

    #[test]
    fn test_success_keeps_flank_side() {
        let mut engine = engine_with(synthetic_corpus(), SeededRandom::new(2));
        engine.set_state(flank_state(TeamSide::Home, FieldY::Centre, Side::Left, 8));
        let pass = ending_at(
            instant(FieldY::Centre, FieldX::Flank, PressureCode::Clear, Action::FlankPass, success(0)),
            FieldY::Attack,
            FieldX::Flank,
            PressureCode::Under,
        );
        let next = engine.simulate_next_state(&pass, false).unwrap();
        assert_eq!(next.team, TeamSide::Home);
        assert_eq!(next.side(), Some(Side::Left));
        assert_eq!(next.pressure, Pressure::Pressed);
        assert_ne!(next.player, PlayerId(8));
    }

    #[test]
    fn test_opposite_flank_pass_switches_side() {
        let mut engine = engine_with(synthetic_corpus(), SeededRandom::new(2));
        engine.set_state(flank_state(TeamSide::Home, FieldY::Centre, Side::Left, 8));
        let pass = ending_at(
            instant(FieldY::Centre, FieldX::Flank, PressureCode::Clear, Action::LongOppositeFlankPass, success(0)),
            FieldY::Attack,
            FieldX::Flank,
            PressureCode::Clear,
        );
        let next = engine.simulate_next_state(&pass, false).unwrap();
        assert_eq!(next.side(), Some(Side::Right));
    }

    #[test]
    fn test_loss_mirrors_side_for_opponent() {
        let mut engine = engine_with(synthetic_corpus(), SeededRandom::new(4));
        engine.set_state(flank_state(TeamSide::Home, FieldY::Attack, Side::Right, 9));
        let lost = ending_at(
            instant(FieldY::Attack, FieldX::Flank, PressureCode::Clear, Action::Pass, opponent(0, possession_change::NORMAL)),
            FieldY::Defence,
            FieldX::Flank,
            PressureCode::Clear,
        );
        let next = engine.simulate_next_state(&lost, false).unwrap();
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(next.y, FieldY::Defence);
        assert_eq!(next.side(), Some(Side::Left));
        let line = engine.teams().away.line_of(next.player);
        assert!(matches!(line, Some(TacticLine::Defender) | Some(TacticLine::Midfielder)));
    }

    #[test]
    fn test_gk_pass_goes_to_keeper_free() {
        let mut engine = engine_with(synthetic_corpus(), SeededRandom::new(4));
        engine.set_state(FieldState::restart(TeamSide::Away, Pressure::Pressed, PlayerId(3)));
        let back = ending_at(
            instant(FieldY::Defence, FieldX::Axis, PressureCode::Under, Action::GkPass, success(0)),
            FieldY::Defence,
            FieldX::Axis,
            PressureCode::Under,
        );
        let next = engine.simulate_next_state(&back, false).unwrap();
        assert_eq!(next.player, PlayerId(0));
        assert_eq!(next.pressure, Pressure::Free);
    }

    #[test]
    fn test_defensive_pass_never_returns_to_passer() {
        let mut engine = engine_with(synthetic_corpus(), SeededRandom::new(17));
        for _ in 0..40 {
            engine.set_state(FieldState::restart(TeamSide::Home, Pressure::Free, PlayerId(2)));
            let square = instant(FieldY::Defence, FieldX::Axis, PressureCode::Clear, Action::Pass, success(0));
            let next = engine.simulate_next_state(&square, false).unwrap();
            assert_ne!(next.player, PlayerId(2));
        }
    }

    #[test]
    fn test_challenge_won_by_opponent() {
        let mut engine = engine_with(synthetic_corpus(), SeededRandom::new(6));
        engine.set_state(flank_state(TeamSide::Home, FieldY::Centre, Side::Left, 7));
        let duel = instant(
            FieldY::Centre,
            FieldX::Flank,
            PressureCode::Clear,
            Action::Dribbling,
            Outcome::Challenge {
                start_team: team_code::OWN,
                start_y: FieldY::Centre as u8,
                end_team: team_code::OPP,
                end_y: FieldY::Centre as u8,
                end_x: FieldX::Flank as u8,
                ending: 0,
                kind: 1,
            },
        );
        let next = engine.simulate_next_state(&duel, false).unwrap();
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(next.side(), Some(Side::Right));
        let line = engine.teams().away.line_of(next.player);
        assert!(matches!(line, Some(TacticLine::Midfielder) | Some(TacticLine::Defender)));
    }

    #[test]
    fn test_goal_kick_condition_restarts_with_opponent_keeper() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.5));
        engine.set_state(FieldState::new(TeamSide::Home, FieldX::Axis, FieldY::Attack, Pressure::Free, None, PlayerId(9)));
        let wide = instant(FieldY::Attack, FieldX::Axis, PressureCode::Clear, Action::LongPass, success(result_code::GOAL_KICK));
        let next = engine.simulate_next_state(&wide, false).unwrap();
        assert_eq!(next, FieldState::restart(TeamSide::Away, Pressure::Free, PlayerId(0)));
        assert_eq!(engine.report.current_entry().special, Some(Special::GoalKick));
    }

    #[test]
    fn test_offside_condition_flags_attacking_team() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.5));
        engine.set_timer(77);
        engine.set_state(FieldState::new(TeamSide::Away, FieldX::Axis, FieldY::Centre, Pressure::Free, None, PlayerId(6)));
        let through = instant(FieldY::Centre, FieldX::Axis, PressureCode::Clear, Action::ForwardPass, success(result_code::OFFSIDE));
        let next = engine.simulate_next_state(&through, true).unwrap();
        assert_eq!(next.team, TeamSide::Home);
        assert_eq!(engine.teams().home.line_of(next.player), Some(TacticLine::Defender));
        assert_eq!(engine.teams().away.stats.offsides, 1);
        assert_eq!(engine.signals().last(), Some(&Signal::Offside { tick: 77, team: "Germany".into() }));
    }
}
