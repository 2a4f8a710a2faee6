//! Outcome resolver
//!
//! Turns a matched instant into weighted outcome slots from the players involved, draws
//! one slot and plays it out. Skill weights compare the ball holder (or their line)
//! against the opponent line defending that zone.

use super::MatchEngine;
use crate::calibration::{
    area_pass, ball_control, combination, cross, dribbling, flank_pass, forward_pass, general,
    gk_long_pass, long_flank_pass, long_pass, long_throw_in, low_cross, pass, run_ball,
};
use crate::engine::matcher::{find_matching_cross, OutcomeClass};
use crate::engine::roulette;
use crate::engine::signals::Signal;
use crate::error::Result;
use crate::models::codes::possession_change;
use crate::models::{Action, FieldState, FieldX, FieldY, Instant, Side, Skill, TacticLine, Team, TeamSide};
use crate::stats::{PercStats, PlayerStats};

use TacticLine::{Defender as DEF, Forward as FOR, Gk as GK, Midfielder as MID};

/// Per-player counter an action is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attempt {
    Pass,
    GkLongPass,
    LongPass,
    ForwardPass,
    FlankPass,
    RunBall,
    Dribbling,
    LongFlankPass,
    AreaPass,
    BallControl,
    LowCross,
    Cross,
}

impl Attempt {
    fn stats(self, stats: &mut PlayerStats) -> &mut PercStats {
        match self {
            Attempt::Pass => &mut stats.pass,
            Attempt::GkLongPass => &mut stats.gk_long_pass,
            Attempt::LongPass => &mut stats.long_pass,
            Attempt::ForwardPass => &mut stats.forward_pass,
            Attempt::FlankPass => &mut stats.flank_pass,
            Attempt::RunBall => &mut stats.run_ball,
            Attempt::Dribbling => &mut stats.dribbling,
            Attempt::LongFlankPass => &mut stats.long_flank_pass,
            Attempt::AreaPass => &mut stats.area_pass,
            Attempt::BallControl => &mut stats.ball_control,
            Attempt::LowCross => &mut stats.low_cross,
            Attempt::Cross => &mut stats.cross,
        }
    }
}

/// How a drawn slot plays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Success,
    /// Possession lost, any way.
    Lost,
    /// Possession lost without pressure.
    Unforced,
    Intercepted,
    /// Beaten in a man-to-man challenge.
    Marked,
    /// Keeper comes out and takes the ball.
    Keeper,
}

impl MatchEngine {
    /// Resolves `instant` from the current state and returns the next state.
    pub(crate) fn process_instant(&mut self, instant: &Instant) -> Result<FieldState> {
        let state = self.current()?.clone();
        self.teams.get_mut(state.team).stats.add_possession();
        if state.x == FieldX::CornerKick {
            self.teams.get_mut(state.team).stats.add_corner_kick();
            let signal = Signal::CornerKick { tick: self.report.timer(), team: self.team_name(state.team) };
            self.rewind.add_signal(signal);
        }
        let pressed = self.roll_pressure(&state);
        self.report.current_entry().action = Some(instant.action);

        let (us, them) = (self.teams.get(state.team), self.teams.get(state.team.opponent()));
        let holder = us.player(state.player);
        let y = state.y;

        let (attempt, slots): (Option<Attempt>, Vec<(Slot, f64)>) = match instant.action {
            Action::LongShot | Action::AreaShot => return self.assess_shot(instant),
            Action::Cross => return self.resolve_cross(instant, &state),
            Action::LongCross => {
                self.tally(Some(Attempt::Cross), true)?;
                return self.process_cross(instant);
            }
            Action::LowCross => {
                let skill = holder.skill(Skill::Crossing);
                let defence = them.average_skill(DEF, Skill::ZonalMarking);
                let slots = vec![
                    (Slot::Success, low_cross::SUCC * skill),
                    (Slot::Lost, low_cross::UF * defence),
                ];
                return self.play_slots(instant, pressed, Some(Attempt::LowCross), &slots);
            }

            Action::Pass => {
                let target = if y == FieldY::Defence { MID } else { FOR };
                let marking = if y == FieldY::Attack { DEF } else { MID };
                let skill = holder.skill(Skill::Passing) * us.target_strength(target);
                (
                    Some(Attempt::Pass),
                    vec![
                        (Slot::Success, pass::SUCC * skill),
                        (Slot::Intercepted, pass::INTERCEPTION * tactics_filter(them, marking, Skill::ZonalMarking)),
                        (Slot::Marked, pass::MARKING * tactics_filter(them, marking, Skill::ManMarking)),
                    ],
                )
            }
            Action::GkLongPass => {
                let keeper = us.player(us.gk()?).skill(Skill::Passing);
                (
                    Some(Attempt::GkLongPass),
                    vec![
                        (Slot::Success, gk_long_pass::SUCC * keeper),
                        (Slot::Lost, gk_long_pass::UF * general::AVG_SKILL),
                    ],
                )
            }
            Action::LongPass => {
                let target = if y == FieldY::Defence { MID } else { FOR };
                let skill = holder.skill(Skill::Passing) * us.target_strength(target);
                (
                    Some(Attempt::LongPass),
                    vec![
                        (Slot::Success, long_pass::SUCC * skill),
                        (Slot::Lost, long_pass::UF * general::AVG_SKILL),
                    ],
                )
            }
            Action::ForwardPass => (Some(Attempt::ForwardPass), forward_pass_slots(us, them, holder.skill(Skill::Passing), y)),
            Action::Combination => {
                let (line, target) = match y {
                    FieldY::Defence => (MID, MID),
                    FieldY::Centre => (MID, FOR),
                    FieldY::Attack => (FOR, FOR),
                };
                let skill = us.average_for_action(line, Action::Combination) * us.target_strength(target);
                (
                    None,
                    vec![
                        (Slot::Success, combination::SUCC * skill),
                        (Slot::Lost, combination::UF * general::AVG_SKILL),
                    ],
                )
            }
            Action::FlankPass => {
                let filter = match y {
                    FieldY::Defence => {
                        us.target_strength(DEF) * flank_pass::D2D + us.target_strength(MID) * flank_pass::D2C
                    }
                    FieldY::Centre => {
                        us.target_strength(MID) * flank_pass::C2C + us.target_strength(FOR) * flank_pass::C2A
                    }
                    FieldY::Attack => us.target_strength(FOR),
                };
                let skill = holder.skill(Skill::Passing) * filter;
                (
                    Some(Attempt::FlankPass),
                    vec![
                        (Slot::Success, flank_pass::SUCC * skill),
                        (Slot::Lost, flank_pass::UF * general::AVG_SKILL),
                    ],
                )
            }
            Action::RunBall => {
                let (filter, marking) = match y {
                    FieldY::Defence => (
                        us.target_strength(DEF) * run_ball::D2D + us.target_strength(MID) * run_ball::D2C,
                        MID,
                    ),
                    FieldY::Centre => (us.target_strength(MID), MID),
                    FieldY::Attack => (us.target_strength(FOR), DEF),
                };
                let skill = holder.skill(Skill::BallControl) * filter;
                (
                    Some(Attempt::RunBall),
                    vec![
                        (Slot::Success, run_ball::SUCC * skill),
                        (Slot::Lost, run_ball::MARKING * tactics_filter(them, marking, Skill::ManMarking)),
                    ],
                )
            }
            Action::LongThrowIn => {
                let target = if y == FieldY::Attack { FOR } else { MID };
                let skill = holder.skill(Skill::ThrowIn) * us.target_strength(target);
                (
                    None,
                    vec![
                        (Slot::Success, long_throw_in::SUCC * skill),
                        (Slot::Lost, long_throw_in::UF * general::AVG_SKILL),
                    ],
                )
            }
            Action::Dribbling => {
                let marking = if y == FieldY::Attack { DEF } else { MID };
                (
                    Some(Attempt::Dribbling),
                    vec![
                        (Slot::Success, dribbling::SUCC * holder.skill(Skill::Dribbling)),
                        (Slot::Marked, dribbling::MAN_MARKING * tactics_filter(them, marking, Skill::ManMarking)),
                        (Slot::Unforced, dribbling::UF * general::AVG_SKILL),
                    ],
                )
            }
            Action::LongFlankPass => {
                // no receiving-line factor once in the attacking third
                let (factor, marking) = match y {
                    FieldY::Defence => (us.target_strength(MID), MID),
                    FieldY::Centre => (us.target_strength(FOR), DEF),
                    FieldY::Attack => (1.0, DEF),
                };
                let skill = holder.skill(Skill::Passing) * factor;
                (
                    Some(Attempt::LongFlankPass),
                    vec![
                        (Slot::Success, long_flank_pass::SUCC * skill),
                        (Slot::Intercepted, long_flank_pass::INTERCEPTION * tactics_filter(them, marking, Skill::ZonalMarking)),
                        (Slot::Unforced, long_flank_pass::UF * general::AVG_SKILL),
                    ],
                )
            }
            Action::AreaPass => {
                let skill = holder.skill(Skill::Passing) * us.target_strength(FOR);
                (
                    Some(Attempt::AreaPass),
                    vec![
                        (Slot::Success, area_pass::SUCC * skill),
                        (Slot::Keeper, area_pass::GK * them.average_skill(GK, Skill::RushingOut)),
                        (Slot::Unforced, area_pass::UF * general::AVG_SKILL),
                    ],
                )
            }
            Action::BallControl => {
                let marking = match y {
                    FieldY::Defence => FOR,
                    FieldY::Centre => MID,
                    FieldY::Attack => DEF,
                };
                (
                    Some(Attempt::BallControl),
                    vec![
                        (Slot::Success, ball_control::SUCC * holder.skill(Skill::BallControl)),
                        (Slot::Lost, ball_control::MAN_MARKING * tactics_filter(them, marking, Skill::ManMarking)),
                    ],
                )
            }
            _ => {
                return match self.check_foul(instant)? {
                    Some(next) => Ok(next),
                    None => self.simulate_next_state(instant, true),
                };
            }
        };

        if let Some(next) = self.check_foul(instant)? {
            self.tally(attempt, next.team == state.team)?;
            return Ok(next);
        }
        self.play_slots(instant, pressed, attempt, &slots)
    }

    /// Pace of the holder's line against the line facing it decides whether the holder
    /// is under pressure.
    fn roll_pressure(&mut self, state: &FieldState) -> bool {
        let (us, them) = (self.teams.get(state.team), self.teams.get(state.team.opponent()));
        let (own, opposing) = match state.y {
            FieldY::Defence | FieldY::Centre => (us.average_skill(MID, Skill::Pace), them.average_skill(MID, Skill::Pace)),
            FieldY::Attack => (us.average_skill(FOR, Skill::Pace), them.average_skill(DEF, Skill::Pace)),
        };
        let pressing = self.rng.next_f64() * (own + opposing);
        pressing >= own
    }

    fn play_slots(
        &mut self,
        instant: &Instant,
        pressed: bool,
        attempt: Option<Attempt>,
        slots: &[(Slot, f64)],
    ) -> Result<FieldState> {
        let weights: Vec<f64> = slots.iter().map(|(_, w)| *w).collect();
        let Some(index) = roulette::action_result(&weights, &mut *self.rng) else {
            log::debug!("No outcome drawn for {} (weights {:?}), playing the instant as recorded", instant.action, weights);
            return self.simulate_next_state(instant, true);
        };
        let team = self.current()?.team;

        match slots[index].0 {
            Slot::Success => {
                self.tally(attempt, true)?;
                self.simulate_success(instant, pressed)
            }
            Slot::Lost => {
                self.tally(attempt, false)?;
                self.simulate_possession_change(instant, pressed)
            }
            Slot::Unforced => {
                self.tally(attempt, false)?;
                self.simulate_caused_change(instant, OutcomeClass::Unforced, pressed)
            }
            Slot::Intercepted => {
                self.tally(attempt, false)?;
                let next = self.simulate_caused_change(instant, OutcomeClass::PassInterception, pressed)?;
                if next.team != team {
                    let tick = self.report.timer();
                    self.teams.get_mut(next.team).player_mut(next.player).stats.interceptions.add(tick);
                }
                Ok(next)
            }
            Slot::Marked => {
                self.tally(attempt, false)?;
                let next = self.simulate_caused_change(instant, OutcomeClass::ManChallengeLost, pressed)?;
                if next.team != team {
                    let tick = self.report.timer();
                    self.teams.get_mut(next.team).player_mut(next.player).stats.personal_challenges.add(tick);
                }
                Ok(next)
            }
            Slot::Keeper => {
                self.tally(attempt, false)?;
                self.credit_keeper_interception(team.opponent())?;
                self.simulate_caused_change(instant, OutcomeClass::GkInterception, pressed)
            }
        }
    }

    fn resolve_cross(&mut self, instant: &Instant, state: &FieldState) -> Result<FieldState> {
        let (us, them) = (self.teams.get(state.team), self.teams.get(state.team.opponent()));
        let holder = us.player(state.player);
        let crossing = holder.skill(Skill::Crossing);
        let foot = match state.side() {
            Some(Side::Left) => holder.skill(Skill::LeftFoot),
            Some(Side::Right) => holder.skill(Skill::RightFoot),
            None => 0.0,
        };
        let skill = if foot > 0.0 { (crossing + foot) / 2.0 } else { crossing };
        let weights = [
            cross::SUCC * skill,
            cross::GOAL_SCORING * (skill + us.average_skill(FOR, Skill::Heading)) / 2.0,
            cross::GK * them.average_skill(GK, Skill::RushingOut),
            cross::UF * them.average_skill(DEF, Skill::Heading),
        ];

        let outcome = &instant.outcome;
        match roulette::action_result(&weights, &mut *self.rng) {
            Some(0) => {
                self.tally(Some(Attempt::Cross), true)?;
                if !outcome.is_goal_scoring_opportunity() && (outcome.is_success() || outcome.is_challenge()) {
                    self.process_cross(instant)
                } else {
                    let matched = find_matching_cross(&self.corpus, instant, OutcomeClass::SuccessOrChallenge, &mut *self.rng);
                    self.process_cross(&matched)
                }
            }
            Some(1) => {
                self.tally(Some(Attempt::Cross), true)?;
                if outcome.is_goal_scoring_opportunity() {
                    self.process_cross(instant)
                } else {
                    let matched = find_matching_cross(&self.corpus, instant, OutcomeClass::GoalOpportunityCross, &mut *self.rng);
                    self.process_cross(&matched)
                }
            }
            Some(2) => {
                self.tally(Some(Attempt::Cross), false)?;
                self.credit_keeper_interception(state.team.opponent())?;
                if outcome.possession_change() == Some(possession_change::GK) {
                    self.process_cross(instant)
                } else {
                    let matched = find_matching_cross(&self.corpus, instant, OutcomeClass::GkInterception, &mut *self.rng);
                    self.process_cross(&matched)
                }
            }
            Some(_) => {
                self.tally(Some(Attempt::Cross), false)?;
                // a recorded chance still ends in a header, whoever won the ball
                if outcome.possession_change() == Some(possession_change::NORMAL) {
                    self.process_cross(instant)
                } else {
                    let matched = find_matching_cross(&self.corpus, instant, OutcomeClass::Opposition, &mut *self.rng);
                    self.process_cross(&matched)
                }
            }
            None => self.simulate_next_state(instant, true),
        }
    }

    fn credit_keeper_interception(&mut self, side: TeamSide) -> Result<()> {
        let keeper = self.gk_of(side)?;
        let tick = self.report.timer();
        self.teams.get_mut(side).player_mut(keeper).stats.interceptions.add(tick);
        Ok(())
    }

    /// Credits the holder (the keeper for long kicks from hand) with an attempt.
    pub(crate) fn tally(&mut self, attempt: Option<Attempt>, success: bool) -> Result<()> {
        let Some(attempt) = attempt else {
            return Ok(());
        };
        let state = self.current()?;
        let team = state.team;
        let player = if attempt == Attempt::GkLongPass { self.gk_of(team)? } else { state.player };
        let tick = self.report.timer();
        let counter = attempt.stats(&mut self.teams.get_mut(team).player_mut(player).stats);
        if success {
            counter.register_success(tick);
        } else {
            counter.register_failure(tick);
        }
        Ok(())
    }
}

/// Line skill scaled by how many players the line holds.
fn tactics_filter(team: &Team, line: TacticLine, skill: Skill) -> f64 {
    team.average_skill(line, skill) * team.target_strength(line)
}

/// Forward passes: the keeper only comes into play from the centre, where interceptions
/// and marking give up part of their share to him.
fn forward_pass_slots(
    us: &Team,
    them: &Team,
    passing: f64,
    y: FieldY,
) -> Vec<(Slot, f64)> {
    let (target, defending) = match y {
        FieldY::Defence => (MID, MID),
        FieldY::Centre | FieldY::Attack => (FOR, DEF),
    };
    let skill = passing * us.target_strength(target);
    let (keeper, shift) = if y == FieldY::Centre {
        (
            forward_pass::GK_CENTRE * them.average_skill(GK, Skill::RushingOut),
            (forward_pass::GK - forward_pass::GK_CENTRE) / 2.0,
        )
    } else {
        (0.0, (forward_pass::GK_CENTRE - forward_pass::GK) / 2.0)
    };
    vec![
        (Slot::Success, forward_pass::SUCC * skill),
        // forward passes reuse the long-pass unforced rate
        (Slot::Unforced, long_pass::UF * general::AVG_SKILL),
        (Slot::Keeper, keeper),
        (
            Slot::Intercepted,
            (forward_pass::INTERCEPTION + shift) * tactics_filter(them, defending, Skill::ZonalMarking),
        ),
        (Slot::Marked, (forward_pass::MARKING + shift) * tactics_filter(them, defending, Skill::ManMarking)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::{
        ending_at, engine_with, greece_vs_germany, instant, opponent, success, synthetic_corpus,
    };
    use crate::models::codes::result_code;
    use crate::models::{Outcome, PlayerId, Pressure, PressureCode};
    use crate::rng::ScriptedRandom;

    fn home_state(y: FieldY, x: FieldX, side: Option<Side>, player: usize) -> FieldState {
        FieldState::new(TeamSide::Home, x, y, Pressure::Free, side, PlayerId(player))
    }

    #[test]
    fn test_forward_pass_keeper_only_from_centre() {
        let teams = greece_vs_germany();
        let centre = forward_pass_slots(&teams.home, &teams.away, 5.0, FieldY::Centre);
        let defence = forward_pass_slots(&teams.home, &teams.away, 5.0, FieldY::Defence);
        assert!(centre[2].1 > 0.0);
        assert_eq!(defence[2].1, 0.0);
        // interception share grows when the keeper is out of reach
        assert!(defence[3].1 > centre[3].1);
    }

    #[test]
    fn test_successful_pass_is_credited() {
        // 0.0 everywhere: not pressed (0 < own pace), first slot wins, foul checks pass
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.0));
        engine.set_state(home_state(FieldY::Centre, FieldX::Axis, None, 6));
        let pass = ending_at(
            instant(FieldY::Centre, FieldX::Axis, PressureCode::Clear, Action::Pass, success(0)),
            FieldY::Attack,
            FieldX::Axis,
            PressureCode::Clear,
        );
        let next = engine.process_instant(&pass).unwrap();
        assert_eq!(next.team, TeamSide::Home);
        assert_eq!(next.y, FieldY::Attack);
        assert_ne!(next.player, PlayerId(6));
        let stats = &engine.teams().home.player(PlayerId(6)).stats;
        assert_eq!(stats.pass.successes(), 1);
        assert_eq!(engine.teams().home.stats.possession, 1);
    }

    #[test]
    fn test_interception_credits_the_new_holder() {
        // pressure roll, then 0.6 of the pass weights lands in the interception slot
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::new(vec![0.1, 0.6, 0.0]));
        engine.set_state(home_state(FieldY::Centre, FieldX::Axis, None, 6));
        let pass = instant(
            FieldY::Centre,
            FieldX::Axis,
            PressureCode::Clear,
            Action::Pass,
            opponent(0, possession_change::PASS_INTERCEPTION),
        );
        let next = engine.process_instant(&pass).unwrap();
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(engine.teams().home.player(PlayerId(6)).stats.pass.total(), 1);
        assert_eq!(engine.teams().away.player(next.player).stats.interceptions.occurrences(), 1);
    }

    #[test]
    fn test_corner_state_counts_a_corner() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.0));
        engine.set_timer(40);
        engine.set_state(home_state(FieldY::Attack, FieldX::CornerKick, Some(Side::Right), 7));
        let kick = instant(FieldY::Attack, FieldX::CornerKick, PressureCode::Clear, Action::KickAway, success(0));
        engine.process_instant(&kick).unwrap();
        assert_eq!(engine.teams().home.stats.corner_kicks, 1);
        assert!(matches!(engine.signals().first(), Some(Signal::CornerKick { tick: 40, .. })));
    }

    #[test]
    fn test_long_cross_goes_to_header() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.0));
        engine.set_timer(100);
        engine.set_state(home_state(FieldY::Attack, FieldX::Flank, Some(Side::Left), 8));
        let cross = instant(FieldY::Attack, FieldX::Flank, PressureCode::Clear, Action::LongCross, success(result_code::GOAL));
        let next = engine.process_instant(&cross).unwrap();
        // u = 0 picks the goal slot of the header roulette
        assert_eq!(engine.teams().home.stats.goals, 1);
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(engine.teams().home.player(PlayerId(8)).stats.cross.successes(), 1);
        match engine.signals().last() {
            Some(Signal::Shot { crosser, .. }) => assert_eq!(crosser.as_deref(), Some("Karagounis")),
            other => panic!("expected a shot, got {:?}", other),
        }
    }

    fn cross_from_left(rng: ScriptedRandom, outcome: Outcome) -> (MatchEngine, FieldState) {
        let mut engine = engine_with(synthetic_corpus(), rng);
        engine.set_timer(100);
        engine.set_state(home_state(FieldY::Attack, FieldX::Flank, Some(Side::Left), 8));
        let cross = instant(FieldY::Attack, FieldX::Flank, PressureCode::Clear, Action::Cross, outcome);
        let next = engine.process_instant(&cross).unwrap();
        (engine, next)
    }

    /// Shooter of the header that followed a cross, if any.
    fn header_by(engine: &MatchEngine) -> Option<String> {
        engine.signals().iter().find_map(|signal| match signal {
            Signal::Shot { shooter, crosser: Some(crosser), .. } if crosser == "Karagounis" => Some(shooter.clone()),
            _ => None,
        })
    }

    // With flat skills the cross slots split 0.68 / 0.08 / 0.08 / 0.16.

    #[test]
    fn test_cross_success_plays_on() {
        let (engine, next) = cross_from_left(ScriptedRandom::constant(0.0), success(0));
        assert_eq!(next.team, TeamSide::Home);
        assert_eq!(engine.teams().home.player(PlayerId(8)).stats.cross.successes(), 1);
        assert_eq!(header_by(&engine), None);
    }

    #[test]
    fn test_cross_goal_chance_finds_a_header() {
        let (engine, _) = cross_from_left(ScriptedRandom::constant(0.72), success(0));
        assert_eq!(engine.teams().home.player(PlayerId(8)).stats.cross.successes(), 1);
        let header = header_by(&engine).expect("no header taken");
        assert_ne!(header, "Karagounis");
    }

    #[test]
    fn test_cross_taken_by_keeper() {
        let (engine, next) = cross_from_left(ScriptedRandom::constant(0.80), success(0));
        assert_eq!(next.team, TeamSide::Away);
        let cross = &engine.teams().home.player(PlayerId(8)).stats.cross;
        assert_eq!((cross.successes(), cross.total()), (0, 1));
        let keeper = engine.teams().away.gk().unwrap();
        assert_eq!(engine.teams().away.player(keeper).stats.interceptions.occurrences(), 1);
        assert_eq!(header_by(&engine), None);
    }

    #[test]
    fn test_keeper_slot_keeps_recorded_chance() {
        let chance = opponent(result_code::SHOT_ON_DEFENDER, possession_change::GK);
        let (engine, _) = cross_from_left(ScriptedRandom::constant(0.80), chance);
        let keeper = engine.teams().away.gk().unwrap();
        assert_eq!(engine.teams().away.player(keeper).stats.interceptions.occurrences(), 1);
        assert!(header_by(&engine).is_some());
    }

    #[test]
    fn test_cross_lost_to_opposition() {
        let (engine, next) = cross_from_left(ScriptedRandom::constant(0.99999), success(0));
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(engine.teams().home.player(PlayerId(8)).stats.cross.total(), 1);
        assert_eq!(header_by(&engine), None);
    }

    #[test]
    fn test_opposition_slot_keeps_recorded_chance() {
        let chance = opponent(result_code::SHOT_ON_DEFENDER, possession_change::NORMAL);
        let (engine, _) = cross_from_left(ScriptedRandom::constant(0.99999), chance);
        let cross = &engine.teams().home.player(PlayerId(8)).stats.cross;
        assert_eq!((cross.successes(), cross.total()), (0, 1));
        let header = header_by(&engine).expect("no header taken");
        assert_ne!(header, "Karagounis");
    }

    #[test]
    fn test_cross_draw_past_last_slot_plays_recorded_outcome() {
        // u = sum runs past every cumulative weight
        let (engine, next) = cross_from_left(ScriptedRandom::constant(1.0), success(0));
        assert_eq!(next.team, TeamSide::Home);
        assert_eq!(engine.teams().home.player(PlayerId(8)).stats.cross.total(), 0);
        assert_eq!(header_by(&engine), None);
    }

    #[test]
    fn test_gk_long_pass_credits_the_keeper() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.0));
        engine.set_state(home_state(FieldY::Defence, FieldX::Axis, None, 3));
        let kick = ending_at(
            instant(FieldY::Defence, FieldX::Axis, PressureCode::Clear, Action::GkLongPass, success(0)),
            FieldY::Centre,
            FieldX::Axis,
            PressureCode::Clear,
        );
        let next = engine.process_instant(&kick).unwrap();
        assert_eq!(next.team, TeamSide::Home);
        let home = &engine.teams().home;
        assert_eq!(home.player(home.gk().unwrap()).stats.gk_long_pass.successes(), 1);
        assert_eq!(home.player(PlayerId(3)).stats.gk_long_pass.total(), 0);
    }

    #[test]
    fn test_flank_pass_lost_is_credited() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.99999));
        engine.set_state(home_state(FieldY::Defence, FieldX::Flank, Some(Side::Right), 2));
        let pass = ending_at(
            instant(FieldY::Defence, FieldX::Flank, PressureCode::Under, Action::FlankPass, opponent(0, possession_change::NORMAL)),
            FieldY::Attack,
            FieldX::Flank,
            PressureCode::Under,
        );
        let next = engine.process_instant(&pass).unwrap();
        assert_eq!(next.team, TeamSide::Away);
        let stats = &engine.teams().home.player(PlayerId(2)).stats.flank_pass;
        assert_eq!((stats.successes(), stats.total()), (0, 1));
    }

    #[test]
    fn test_low_cross_success_is_credited() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.0));
        engine.set_state(home_state(FieldY::Attack, FieldX::Flank, Some(Side::Left), 8));
        let low = ending_at(
            instant(FieldY::Attack, FieldX::Flank, PressureCode::Clear, Action::LowCross, success(0)),
            FieldY::Attack,
            FieldX::Axis,
            PressureCode::Clear,
        );
        let next = engine.process_instant(&low).unwrap();
        assert_eq!(next.team, TeamSide::Home);
        assert_eq!(next.x, FieldX::Axis);
        assert_eq!(engine.teams().home.player(PlayerId(8)).stats.low_cross.successes(), 1);
    }

    #[test]
    fn test_combination_lost_credits_nobody() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.99999));
        engine.set_state(home_state(FieldY::Centre, FieldX::Axis, None, 6));
        let combination = ending_at(
            instant(FieldY::Centre, FieldX::Axis, PressureCode::Under, Action::Combination, opponent(0, possession_change::NORMAL)),
            FieldY::Centre,
            FieldX::Axis,
            PressureCode::Under,
        );
        let next = engine.process_instant(&combination).unwrap();
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(engine.teams().home.player(PlayerId(6)).stats, PlayerStats::default());
    }

    #[test]
    fn test_long_throw_in_kept_credits_nobody() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.0));
        engine.set_state(home_state(FieldY::Attack, FieldX::ThrowIn, Some(Side::Right), 2));
        let throw = ending_at(
            instant(FieldY::Attack, FieldX::ThrowIn, PressureCode::Clear, Action::LongThrowIn, success(0)),
            FieldY::Attack,
            FieldX::Axis,
            PressureCode::Clear,
        );
        let next = engine.process_instant(&throw).unwrap();
        assert_eq!(next.team, TeamSide::Home);
        assert_eq!(next.y, FieldY::Attack);
        assert_eq!(engine.teams().home.player(PlayerId(2)).stats, PlayerStats::default());
    }

    #[test]
    fn test_unmatched_action_plays_recorded_outcome() {
        let mut engine = engine_with(synthetic_corpus(), ScriptedRandom::constant(0.0));
        engine.set_state(home_state(FieldY::Defence, FieldX::Axis, None, 2));
        let kick = ending_at(
            instant(FieldY::Defence, FieldX::Axis, PressureCode::Clear, Action::KickAway, opponent(0, possession_change::NORMAL)),
            FieldY::Attack,
            FieldX::Axis,
            PressureCode::Clear,
        );
        let next = engine.process_instant(&kick).unwrap();
        assert_eq!(next.team, TeamSide::Away);
        assert_eq!(next.y, FieldY::Attack);
        assert_eq!(engine.teams().away.line_of(next.player), Some(TacticLine::Forward));
    }
}
