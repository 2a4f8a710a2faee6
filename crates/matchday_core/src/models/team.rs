//! Team model: squad, formation layout, running match stats and events

use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::Action;
use super::field_state::{PlayerId, TeamSide};
use super::player::{Player, Skill};
use super::tactics::{TacticLine, TacticPosition, Tactics};
use crate::calibration::general;
use crate::error::{MatchError, Result};

/// One lineup place: who, on which line, where across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub player: PlayerId,
    pub line: TacticLine,
    pub position: TacticPosition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Ticks spent in possession.
    pub possession: u32,
    pub goals: u32,
    pub shots_on_target: u32,
    pub shots_off_target: u32,
    pub corner_kicks: u32,
    pub offsides: u32,
    pub free_kicks: u32,
}

impl TeamStats {
    pub fn add_possession(&mut self) {
        self.possession += 1;
    }

    pub fn score_goal(&mut self) {
        self.goals += 1;
    }

    pub fn add_shot_on_target(&mut self) {
        self.shots_on_target += 1;
    }

    pub fn add_shot_off_target(&mut self) {
        self.shots_off_target += 1;
    }

    pub fn add_corner_kick(&mut self) {
        self.corner_kicks += 1;
    }

    pub fn add_offside(&mut self) {
        self.offsides += 1;
    }

    pub fn add_free_kick(&mut self) {
        self.free_kicks += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalDetails {
    pub scorer: PlayerId,
    pub scorer_name: String,
    pub minute: u32,
    pub penalty: bool,
    pub tick: u32,
}

impl fmt::Display for GoalDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pen = if self.penalty { "(pen)" } else { "" };
        write!(f, "{}' {}{}", self.minute, self.scorer_name, pen)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissedPenaltyDetails {
    pub taker: PlayerId,
    pub taker_name: String,
    pub minute: u32,
    pub tick: u32,
}

impl fmt::Display for MissedPenaltyDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}' {} missed penalty", self.minute, self.taker_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchEvents {
    pub goals: Vec<GoalDetails>,
    pub missed_penalties: Vec<MissedPenaltyDetails>,
}

/// JSON team sheet: the first eleven players in order are GK, then defenders,
/// midfielders and forwards as the tactics dictate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSheet {
    pub name: String,
    pub tactics: Tactics,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    tactics: Option<Tactics>,
    players: Vec<Player>,
    lineup: Vec<LineupSlot>,
    pub stats: TeamStats,
    pub events: MatchEvents,
    pub finishing: f64,
    pub shooting: f64,
}

impl Team {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tactics: None,
            players: Vec::new(),
            lineup: Vec::new(),
            stats: TeamStats::default(),
            events: MatchEvents::default(),
            finishing: general::AVG_FINISHING,
            shooting: general::AVG_SHOOTING,
        }
    }

    /// Builds a team from a sheet and lays it out in formation.
    pub fn from_sheet(sheet: TeamSheet) -> Result<Self> {
        let mut team = Team::new(&sheet.name);
        team.tactics = Some(sheet.tactics);
        team.players = sheet.players;
        team.align_formation()?;
        Ok(team)
    }

    /// Adds a player straight into the lineup on `line`; call an `align_*` afterwards.
    pub fn add_player(&mut self, player: Player, line: TacticLine) -> PlayerId {
        let id = PlayerId(self.players.len());
        self.players.push(player);
        self.lineup.push(LineupSlot { player: id, line, position: TacticPosition::Axis });
        id
    }

    /// Adds a squad member who is not (yet) in the lineup.
    pub fn add_squad_player(&mut self, player: Player) -> PlayerId {
        let id = PlayerId(self.players.len());
        self.players.push(player);
        id
    }

    pub fn set_tactics(&mut self, tactics: Tactics) {
        self.tactics = Some(tactics);
    }

    pub fn tactics(&self) -> Option<Tactics> {
        self.tactics
    }

    /// Derives the tactics from a hand-built lineup.
    pub fn define_tactics(&mut self) -> Result<Tactics> {
        let count = |line: TacticLine| self.lineup.iter().filter(|s| s.line == line).count() as u8;
        let tactics = Tactics::new(
            count(TacticLine::Defender),
            count(TacticLine::Midfielder),
            count(TacticLine::Forward),
        )?;
        self.tactics = Some(tactics);
        Ok(tactics)
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Sub-positions per line, taken in lineup order (left to right).
    pub fn align_desktop(&mut self) {
        for line in TacticLine::OUTFIELD {
            self.align_line(line, false);
        }
    }

    /// Sub-positions per line, taken in reverse lineup order (right to left).
    pub fn align_web(&mut self) {
        for line in TacticLine::OUTFIELD {
            self.align_line(line, true);
        }
    }

    /// Assigns lines from squad order (GK first, then by tactics counts) and aligns them.
    pub fn align_formation(&mut self) -> Result<()> {
        let tactics = self
            .tactics
            .ok_or_else(|| MatchError::InvalidTeam(format!("{} has no tactics", self.name)))?;
        if self.players.len() < 11 {
            return Err(MatchError::InvalidTeam(format!(
                "{} has {} players, needs 11",
                self.name,
                self.players.len()
            )));
        }

        let defenders = tactics.defenders() as usize;
        let midfielders = tactics.midfielders() as usize;
        self.lineup = (0..11)
            .map(|i| {
                let line = if i == 0 {
                    TacticLine::Gk
                } else if i <= defenders {
                    TacticLine::Defender
                } else if i <= defenders + midfielders {
                    TacticLine::Midfielder
                } else {
                    TacticLine::Forward
                };
                LineupSlot { player: PlayerId(i), line, position: TacticPosition::Axis }
            })
            .collect();
        self.align_web();
        Ok(())
    }

    fn align_line(&mut self, line: TacticLine, reversed: bool) {
        let mut slots: Vec<usize> = (0..self.lineup.len())
            .filter(|&i| self.lineup[i].line == line)
            .collect();
        if reversed {
            slots.reverse();
        }
        use TacticPosition::*;
        let layout: &[TacticPosition] = match slots.len() {
            5 => &[Left, LeftAxis, Axis, RightAxis, Right],
            4 => &[Left, Axis, Axis, Right],
            3 => &[LeftAxis, Axis, RightAxis],
            _ => &[Axis, Axis],
        };
        for (slot, position) in slots.iter().zip(layout.iter()) {
            self.lineup[*slot].position = *position;
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.0]
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn lineup(&self) -> &[LineupSlot] {
        &self.lineup
    }

    pub fn slot(&self, id: PlayerId) -> Option<&LineupSlot> {
        self.lineup.iter().find(|s| s.player == id)
    }

    pub fn line_of(&self, id: PlayerId) -> Option<TacticLine> {
        self.slot(id).map(|s| s.line)
    }

    pub fn position_of(&self, id: PlayerId) -> Option<TacticPosition> {
        self.slot(id).map(|s| s.position)
    }

    pub fn line_players(&self, line: TacticLine) -> impl Iterator<Item = &LineupSlot> + '_ {
        self.lineup.iter().filter(move |s| s.line == line)
    }

    /// Family names of every squad player, lineup first.
    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.family_name.clone()).collect()
    }

    pub fn gk(&self) -> Result<PlayerId> {
        self.line_players(TacticLine::Gk)
            .next()
            .map(|s| s.player)
            .ok_or_else(|| MatchError::NoEligiblePlayer { line: TacticLine::Gk.to_string() })
    }

    /// Player count on a line; the keeper line always counts one.
    pub fn number_in_line(&self, line: TacticLine) -> usize {
        if line == TacticLine::Gk {
            return 1;
        }
        self.line_players(line).count()
    }

    /// Line strength multiplier relative to a full-strength line.
    pub fn target_strength(&self, line: TacticLine) -> f64 {
        if line == TacticLine::Gk {
            return 1.0;
        }
        self.number_in_line(line) as f64 / general::DEFAULT_LINE_CARDINALITY
    }

    /// Mean skill over a line (the keeper's own value for the GK line). Empty lines read 0.
    pub fn average_skill(&self, line: TacticLine, skill: Skill) -> f64 {
        let values: Vec<f64> =
            self.line_players(line).map(|s| self.player(s.player).skill(skill)).collect();
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    pub fn average_for_action(&self, line: TacticLine, action: Action) -> f64 {
        action.skill().map(|skill| self.average_skill(line, skill)).unwrap_or(0.0)
    }

    /// Marks every lineup player as on the pitch from `tick`.
    pub fn start_lineup(&mut self, tick: u32) {
        let ids: Vec<PlayerId> = self.lineup.iter().map(|s| s.player).collect();
        for id in ids {
            self.players[id.0].enter_field(tick);
        }
    }

    pub fn register_goal(&mut self, goal: GoalDetails) {
        self.events.goals.push(goal);
    }

    pub fn register_missed_penalty(&mut self, missed: MissedPenaltyDetails) {
        self.events.missed_penalties.push(missed);
    }
}

/// Both sides of a match, addressable by [`TeamSide`].
#[derive(Debug, Clone)]
pub struct Teams {
    pub home: Team,
    pub away: Team,
}

impl Teams {
    pub fn new(home: Team, away: Team) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn name(&self, side: TeamSide) -> &str {
        &self.get(side).name
    }
}

// ========== Tests ==========
