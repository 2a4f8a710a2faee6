//! Player selection helpers
//!
//! Random picks of the next ball holder from a team's lineup. Every helper walks the
//! lineup in order, so with a seeded source the pick is reproducible.

use super::field_state::{Lane, PlayerId};
use super::tactics::TacticLine;
use super::team::Team;
use crate::rng::RandomSource;

/// Relative chance of each line to be the attacker who picks up a rebound.
fn rebounding_weight(line: TacticLine) -> f64 {
    match line {
        TacticLine::Midfielder => 0.5,
        TacticLine::Forward => 1.0,
        _ => 0.0,
    }
}

/// Relative chance of each line to be the one finishing a move.
fn scoring_weight(line: TacticLine) -> f64 {
    match line {
        TacticLine::Gk => 0.0,
        TacticLine::Defender => 1.0,
        TacticLine::Midfielder => 10.0,
        TacticLine::Forward => 18.0,
    }
}

fn pick(candidates: &[PlayerId], rng: &mut dyn RandomSource) -> Option<PlayerId> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.next_index(candidates.len())])
}

/// Roulette over `(player, weight)`; zero-weight players are never picked.
fn weighted_pick(weighted: &[(PlayerId, f64)], rng: &mut dyn RandomSource) -> Option<PlayerId> {
    let total: f64 = weighted.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }
    let target = rng.next_f64() * total;
    let mut covered = 0.0;
    let mut last = None;
    for &(player, weight) in weighted.iter().filter(|(_, w)| *w > 0.0) {
        covered += weight;
        last = Some(player);
        if target <= covered {
            return Some(player);
        }
    }
    last
}

impl Team {
    fn is_defensive_line(line: TacticLine) -> bool {
        matches!(line, TacticLine::Defender | TacticLine::Midfielder)
    }

    /// Uniform pick on a line.
    pub fn player_by_line(&self, line: TacticLine, rng: &mut dyn RandomSource) -> Option<PlayerId> {
        let candidates: Vec<PlayerId> = self.line_players(line).map(|s| s.player).collect();
        pick(&candidates, rng)
    }

    /// Uniform pick on a line and lane. An empty forward lane falls back to midfield,
    /// an empty midfield lane to defence.
    pub fn player_by_lane(
        &self,
        line: TacticLine,
        lane: Lane,
        rng: &mut dyn RandomSource,
    ) -> Option<PlayerId> {
        let candidates: Vec<PlayerId> = self
            .line_players(line)
            .filter(|s| lane.accepts(s.position))
            .map(|s| s.player)
            .collect();
        if candidates.is_empty() {
            return match line {
                TacticLine::Forward => self.player_by_lane(TacticLine::Midfielder, lane, rng),
                TacticLine::Midfielder => self.player_by_lane(TacticLine::Defender, lane, rng),
                _ => None,
            };
        }
        pick(&candidates, rng)
    }

    /// Like [`Team::player_by_lane`] but never returns `excluded`. When the defence
    /// lane runs dry the pick moves to central midfield.
    pub fn player_by_lane_excluding(
        &self,
        line: TacticLine,
        lane: Lane,
        excluded: PlayerId,
        rng: &mut dyn RandomSource,
    ) -> Option<PlayerId> {
        let candidates: Vec<PlayerId> = self
            .line_players(line)
            .filter(|s| s.player != excluded && lane.accepts(s.position))
            .map(|s| s.player)
            .collect();
        if candidates.is_empty() {
            return match line {
                TacticLine::Forward => {
                    self.player_by_lane_excluding(TacticLine::Midfielder, lane, excluded, rng)
                }
                TacticLine::Midfielder => {
                    self.player_by_lane_excluding(TacticLine::Defender, lane, excluded, rng)
                }
                _ => self.player_by_lane(TacticLine::Midfielder, Lane::Central, rng),
            };
        }
        pick(&candidates, rng)
    }

    /// Uniform pick among defenders and midfielders.
    pub fn any_defensive_player(&self, rng: &mut dyn RandomSource) -> Option<PlayerId> {
        let candidates: Vec<PlayerId> = self
            .lineup()
            .iter()
            .filter(|s| Self::is_defensive_line(s.line))
            .map(|s| s.player)
            .collect();
        pick(&candidates, rng)
    }

    /// Defender or midfielder in a lane. A flank lane with nobody on it yields `None`.
    pub fn any_defensive_player_at(&self, lane: Lane, rng: &mut dyn RandomSource) -> Option<PlayerId> {
        let candidates: Vec<PlayerId> = self
            .lineup()
            .iter()
            .filter(|s| Self::is_defensive_line(s.line) && lane.accepts(s.position))
            .map(|s| s.player)
            .collect();
        pick(&candidates, rng)
    }

    /// Defender or midfielder in a lane, topping up with central players while the
    /// flank has produced nobody but `excluded`. `excluded` itself may still be
    /// returned; callers re-roll.
    pub fn any_defensive_player_excluding(
        &self,
        lane: Lane,
        excluded: PlayerId,
        rng: &mut dyn RandomSource,
    ) -> Option<PlayerId> {
        let mut candidates: Vec<PlayerId> = Vec::new();
        for slot in self.lineup().iter().filter(|s| Self::is_defensive_line(s.line)) {
            if lane != Lane::Central && lane.accepts(slot.position) {
                candidates.push(slot.player);
            }
            let top_up = lane == Lane::Central
                || candidates.is_empty()
                || (candidates.len() == 1 && candidates[0] == excluded);
            if top_up && Lane::Central.accepts(slot.position) {
                candidates.push(slot.player);
            }
        }
        pick(&candidates, rng)
    }

    /// Defender who collects a saved or blocked shot.
    pub fn defensive_rebounder(&self, rng: &mut dyn RandomSource) -> Option<PlayerId> {
        self.player_by_line(TacticLine::Defender, rng)
    }

    /// Attacker who collects a rebound, weighted towards forwards.
    pub fn attacking_rebounder(&self, rng: &mut dyn RandomSource) -> Option<PlayerId> {
        let weighted: Vec<(PlayerId, f64)> = self
            .lineup()
            .iter()
            .map(|s| (s.player, rebounding_weight(s.line)))
            .collect();
        weighted_pick(&weighted, rng)
    }

    /// Player credited with an attempt decided independently of play (penalty, header).
    pub fn goal_scorer(&self, rng: &mut dyn RandomSource) -> Option<PlayerId> {
        self.goal_scorer_excluding(None, rng)
    }

    pub fn goal_scorer_excluding(
        &self,
        excluded: Option<PlayerId>,
        rng: &mut dyn RandomSource,
    ) -> Option<PlayerId> {
        let weighted: Vec<(PlayerId, f64)> = self
            .lineup()
            .iter()
            .filter(|s| Some(s.player) != excluded)
            .map(|s| (s.player, scoring_weight(s.line)))
            .collect();
        weighted_pick(&weighted, rng)
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::{greece, line_ids};
    use crate::rng::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_player_by_line_stays_on_line() {
        let team = greece();
        let mut rng = SeededRandom::new(3);
        for _ in 0..50 {
            let id = team.player_by_line(TacticLine::Forward, &mut rng).unwrap();
            assert_eq!(team.line_of(id), Some(TacticLine::Forward));
        }
    }

    #[test]
    fn test_lane_pick_matches_lane() {
        let team = greece();
        let mut rng = SeededRandom::new(11);
        for _ in 0..50 {
            let id = team.player_by_lane(TacticLine::Defender, Lane::Left, &mut rng).unwrap();
            assert!(Lane::Left.accepts(team.position_of(id).unwrap()));
        }
    }

    #[test]
    fn test_forward_lane_falls_back_to_midfield() {
        // two forwards are both central in a 4-4-2: nobody on the left
        let team = greece();
        let mut rng = SeededRandom::new(5);
        let id = team.player_by_lane(TacticLine::Forward, Lane::Left, &mut rng).unwrap();
        assert_eq!(team.line_of(id), Some(TacticLine::Midfielder));
    }

    #[test]
    fn test_excluding_never_returns_excluded() {
        let team = greece();
        let mut rng = SeededRandom::new(9);
        let forwards = line_ids(&team, TacticLine::Forward);
        for _ in 0..50 {
            let id = team
                .player_by_lane_excluding(TacticLine::Forward, Lane::Central, forwards[0], &mut rng)
                .unwrap();
            assert_ne!(id, forwards[0]);
        }
    }

    #[test]
    fn test_defensive_picks() {
        let team = greece();
        let mut rng = SeededRandom::new(21);
        for _ in 0..50 {
            let id = team.any_defensive_player(&mut rng).unwrap();
            let line = team.line_of(id).unwrap();
            assert!(line == TacticLine::Defender || line == TacticLine::Midfielder);
            let reb = team.defensive_rebounder(&mut rng).unwrap();
            assert_eq!(team.line_of(reb), Some(TacticLine::Defender));
        }
        let right = team.any_defensive_player_at(Lane::Right, &mut rng).unwrap();
        assert!(Lane::Right.accepts(team.position_of(right).unwrap()));
    }

    #[test]
    fn test_goal_scorer_never_goalkeeper() {
        let team = greece();
        let gk = team.gk().unwrap();
        // u = 0 would land on the keeper if zero weights were walked
        let mut rng = ScriptedRandom::constant(0.0);
        assert_ne!(team.goal_scorer(&mut rng), Some(gk));
        let mut rng = SeededRandom::new(77);
        for _ in 0..100 {
            assert_ne!(team.goal_scorer(&mut rng), Some(gk));
        }
    }

    #[test]
    fn test_header_taker_excludes_crosser() {
        let team = greece();
        let mut rng = SeededRandom::new(8);
        let crosser = line_ids(&team, TacticLine::Forward)[0];
        for _ in 0..100 {
            assert_ne!(team.goal_scorer_excluding(Some(crosser), &mut rng), Some(crosser));
        }
    }

    #[test]
    fn test_attacking_rebounder_is_mid_or_forward() {
        let team = greece();
        let mut rng = SeededRandom::new(13);
        for _ in 0..50 {
            let id = team.attacking_rebounder(&mut rng).unwrap();
            let line = team.line_of(id).unwrap();
            assert!(line == TacticLine::Midfielder || line == TacticLine::Forward);
        }
    }
}
