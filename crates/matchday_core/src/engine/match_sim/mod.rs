//! Match Simulation Engine
//!
//! `MatchEngine` owns everything one match needs: the instant corpus, both teams, the
//! live field state, the single random source, the report and the rewind log.
//!
//! ## Architecture
//!
//! The `impl MatchEngine` is split by concern:
//! - `clock.rs` - `play`, tick loop, half time, full time, possession updates
//! - `resolver.rs` - per-action outcome weights and stat credits
//! - `transitions.rs` - next field state from a resolved instant
//! - `fouls.rs` - foul detection and free kicks
//! - `set_pieces.rs` - penalties, offsides, goal kicks, throw-ins
//! - `shooting.rs` - shots, headers, goals and their highlights
//!
//! ```text
//!   play(tick) ──► tick loop ──► find_candidates ──► pick instant
//!                                                        │
//!                      next FieldState ◄── resolver ◄────┘
//!                             │
//!                  report entry + signals (rewind log)
//! ```

mod clock;
mod fouls;
mod resolver;
mod set_pieces;
mod shooting;
mod transitions;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use clock::possession_pct;

use crate::config::MatchConfig;
use crate::corpus;
use crate::engine::report::MatchReport;
use crate::engine::rewind::MatchRewind;
use crate::engine::signals::Signal;
use crate::error::{MatchError, Result};
use crate::models::{FieldState, Instant, Lane, PlayerId, Side, TacticLine, TeamSide, Teams};
use crate::rng::{RandomSource, SeededRandom};

/// Default half length in ticks.
pub const DEFAULT_HALF_DURATION: u32 = 255;

pub struct MatchEngine {
    corpus: Vec<Instant>,
    teams: Teams,
    state: Option<FieldState>,
    rng: Box<dyn RandomSource>,
    half_duration: u32,
    report: MatchReport,
    rewind: MatchRewind,
    first_half_kickoff: Option<TeamSide>,
    /// Ticks until the next possession update; shrinks while signals hold play up.
    update_window: u32,
    outputs: Option<MatchConfig>,
    finished: bool,
}

impl MatchEngine {
    /// Engine with an unseeded random source.
    pub fn new(corpus: Vec<Instant>, teams: Teams, half_duration: u32) -> Result<Self> {
        Self::with_rng(corpus, teams, half_duration, Box::new(SeededRandom::from_entropy()))
    }

    pub fn with_rng(
        corpus: Vec<Instant>,
        teams: Teams,
        half_duration: u32,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        if corpus.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }
        if half_duration == 0 {
            return Err(MatchError::MalformedConfig {
                line: 0,
                content: "half_duration must be positive".to_string(),
            });
        }
        Ok(Self {
            corpus,
            teams,
            state: None,
            rng,
            half_duration,
            report: MatchReport::new(half_duration),
            rewind: MatchRewind::new(),
            first_half_kickoff: None,
            update_window: clock::UPDATE_TICKS,
            outputs: None,
            finished: false,
        })
    }

    /// Loads the corpus named by `probmodel` and seeds the match from the config.
    pub fn from_config(config: &MatchConfig, teams: Teams) -> Result<Self> {
        let corpus = corpus::load_instants(config.prob_model()?)?;
        log::info!("Loaded {} corpus instants", corpus.len());
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(SeededRandom::from_entropy()),
        };
        let engine = Self::with_rng(corpus, teams, config.half_duration, rng)?;
        Ok(engine.with_outputs(config.clone()))
    }

    /// Output paths used at full time.
    pub fn with_outputs(mut self, config: MatchConfig) -> Self {
        self.outputs = Some(config);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    pub fn report(&self) -> &MatchReport {
        &self.report
    }

    pub fn signals(&self) -> &[Signal] {
        self.rewind.signals()
    }

    pub fn rewind(&self) -> &MatchRewind {
        &self.rewind
    }

    pub fn state(&self) -> Option<&FieldState> {
        self.state.as_ref()
    }

    pub fn half_duration(&self) -> u32 {
        self.half_duration
    }

    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn current(&self) -> Result<&FieldState> {
        self.state.as_ref().ok_or(MatchError::NotStarted)
    }

    pub(crate) fn family_name(&self, side: TeamSide, player: PlayerId) -> String {
        self.teams.get(side).player(player).family_name.clone()
    }

    pub(crate) fn team_name(&self, side: TeamSide) -> String {
        self.teams.name(side).to_string()
    }

    /// Logs a highlight line and keeps it in the report unless the clock is at 0.
    pub(crate) fn highlight(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{}", text);
        let tick = self.report.timer();
        if tick > 0 {
            self.report.append_highlight(tick, text);
        }
    }

    /// Opens the next report entry from the state about to be played.
    pub(crate) fn open_entry(&mut self, state: &FieldState) {
        let name = self.family_name(state.team, state.player);
        let entry = self.report.current_entry();
        entry.action_state = Some(state.clone());
        entry.player_name = name;
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: FieldState) {
        self.open_entry(&state);
        self.state = Some(state);
    }

    #[cfg(test)]
    pub(crate) fn set_timer(&mut self, tick: u32) {
        self.report.set_timer(tick);
    }

    // ========================================================================
    // Player picks
    // ========================================================================

    fn require(pick: Option<PlayerId>, line: TacticLine) -> Result<PlayerId> {
        pick.ok_or_else(|| MatchError::NoEligiblePlayer { line: line.to_string() })
    }

    pub(crate) fn random_side(&mut self) -> Side {
        if self.rng.next_bool() {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Side of the next flank state: the current flank (mirrored when the ball changes
    /// direction) or a random one when play comes in from the axis.
    pub(crate) fn carry_side(&mut self, current: &FieldState, mirror: bool) -> Side {
        match current.side() {
            Some(side) if mirror => side.flipped(),
            Some(side) => side,
            None => self.random_side(),
        }
    }

    pub(crate) fn gk_of(&self, side: TeamSide) -> Result<PlayerId> {
        self.teams.get(side).gk()
    }

    pub(crate) fn pick_on_line(&mut self, side: TeamSide, line: TacticLine) -> Result<PlayerId> {
        let pick = self.teams.get(side).player_by_line(line, &mut *self.rng);
        Self::require(pick, line)
    }

    pub(crate) fn pick_in_lane(&mut self, side: TeamSide, line: TacticLine, lane: Lane) -> Result<PlayerId> {
        let pick = self.teams.get(side).player_by_lane(line, lane, &mut *self.rng);
        match pick {
            Some(player) => Ok(player),
            None => self.pick_on_line(side, line),
        }
    }

    pub(crate) fn pick_in_lane_excluding(
        &mut self,
        side: TeamSide,
        line: TacticLine,
        lane: Lane,
        excluded: PlayerId,
    ) -> Result<PlayerId> {
        let pick = self.teams.get(side).player_by_lane_excluding(line, lane, excluded, &mut *self.rng);
        match pick {
            Some(player) => Ok(player),
            None => self.pick_in_lane(side, line, lane),
        }
    }

    pub(crate) fn pick_defensive(&mut self, side: TeamSide) -> Result<PlayerId> {
        let pick = self.teams.get(side).any_defensive_player(&mut *self.rng);
        Self::require(pick, TacticLine::Defender)
    }

    /// Defensive player in a lane; an empty flank lane widens to any defensive player.
    pub(crate) fn pick_defensive_at(&mut self, side: TeamSide, lane: Lane) -> Result<PlayerId> {
        let pick = self.teams.get(side).any_defensive_player_at(lane, &mut *self.rng);
        match pick {
            Some(player) => Ok(player),
            None => self.pick_defensive(side),
        }
    }

    pub(crate) fn defensive_rebounder(&mut self, side: TeamSide) -> Result<PlayerId> {
        let pick = self.teams.get(side).defensive_rebounder(&mut *self.rng);
        Self::require(pick, TacticLine::Defender)
    }

    pub(crate) fn attacking_rebounder(&mut self, side: TeamSide) -> Result<PlayerId> {
        let pick = self.teams.get(side).attacking_rebounder(&mut *self.rng);
        Self::require(pick, TacticLine::Forward)
    }

    pub(crate) fn goal_scorer(&mut self, side: TeamSide, excluded: Option<PlayerId>) -> Result<PlayerId> {
        let pick = self.teams.get(side).goal_scorer_excluding(excluded, &mut *self.rng);
        Self::require(pick, TacticLine::Forward)
    }
}
