//! Match clock
//!
//! `play(start)` runs ticks until something the caller should see happens and returns
//! that signal. Tick 0 kicks off, `half` starts the second half and `2 * half` closes
//! the match.

use super::MatchEngine;
use crate::engine::matcher;
use crate::engine::signals::Signal;
use crate::error::{MatchError, Result};
use crate::models::{FieldState, Pressure, TeamSide};
use crate::output::files;

/// Possession update period in ticks.
pub(crate) const UPDATE_TICKS: u32 = 25;
/// How much the period shrinks each time a pending signal holds play up on an update tick.
const UPDATE_STEP: u32 = 5;

fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}

/// Rounded possession share of `count` out of `total` ticks. The dominant side rounds
/// normally; the other side rounds down when both rounded shares would exceed 100.
pub fn possession_pct(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let other = total.saturating_sub(count);
    let dominant = count >= other;
    let pct = count as f64 / total as f64 * 100.0;
    let rounded = round_half_up(pct);
    if dominant {
        return rounded;
    }
    let other_rounded = round_half_up(other as f64 / total as f64 * 100.0);
    if rounded + other_rounded <= 100 {
        rounded
    } else {
        round_half_up(pct - 0.5)
    }
}

impl MatchEngine {
    /// Plays from `start` until the next signal. `Ok(None)` once the match is over.
    pub fn play(&mut self, start: u32) -> Result<Option<Signal>> {
        let half = self.half_duration;
        if start == 0 {
            self.kick_off()?;
        } else if self.first_half_kickoff.is_none() {
            return Err(MatchError::NotStarted);
        }

        if start < half {
            return self.play_frame(start, half);
        }
        if start == half {
            self.half_time()?;
            return self.play_frame(half, 2 * half);
        }
        if start == 2 * half {
            self.full_time()?;
            return Ok(None);
        }
        self.play_frame(start, 2 * half)
    }

    /// Drives `play` to full time, handing every signal to `on_signal`.
    pub fn play_to_end(&mut self, mut on_signal: impl FnMut(&Signal)) -> Result<()> {
        let half = self.half_duration;
        let mut next = 0;
        loop {
            match self.play(next)? {
                Some(signal) => {
                    on_signal(&signal);
                    next = if signal.is_end_of_half() {
                        half
                    } else if signal.is_end_of_match() {
                        2 * half
                    } else {
                        signal.tick() + 1
                    };
                }
                None if self.finished => return Ok(()),
                None => next = 2 * half,
            }
        }
    }

    pub(crate) fn kick_off(&mut self) -> Result<()> {
        let team = if self.rng.next_bool() { TeamSide::Home } else { TeamSide::Away };
        self.first_half_kickoff = Some(team);
        self.teams.home.start_lineup(0);
        self.teams.away.start_lineup(0);
        log::info!("{} kick off", self.teams.name(team));
        self.restart_from_back(team)
    }

    fn half_time(&mut self) -> Result<()> {
        let kickoff = self.first_half_kickoff.ok_or(MatchError::NotStarted)?;
        log::info!("End of first half");
        log::info!("{}", self.report.score_line(&self.teams));
        log::info!("");
        self.restart_from_back(kickoff.opponent())
    }

    fn restart_from_back(&mut self, team: TeamSide) -> Result<()> {
        let player = self.pick_defensive(team)?;
        let state = FieldState::restart(team, Pressure::Free, player);
        self.open_entry(&state);
        self.state = Some(state);
        Ok(())
    }

    fn full_time(&mut self) -> Result<()> {
        if self.finished {
            log::warn!("Full time already played, ignoring");
            return Ok(());
        }
        self.finished = true;
        self.write_outputs()?;
        log::info!("End of match");
        log::info!("{}", self.report.score_line(&self.teams));
        log::info!("");
        Ok(())
    }

    /// Writes the report files named in the config. A missing key or an unwritable path
    /// only skips that file.
    fn write_outputs(&self) -> Result<()> {
        let Some(config) = self.outputs.as_ref() else {
            log::debug!("No output paths configured, skipping report files");
            return Ok(());
        };
        let writes = [
            (
                "match report",
                config
                    .match_report()
                    .and_then(|path| files::write_match_report(path, &self.report, &self.teams)),
            ),
            (
                "player stats",
                config.player_stats().and_then(|path| files::write_raw_stats(path, &self.teams)),
            ),
            (
                "stats summary",
                config
                    .stats_summary()
                    .and_then(|path| files::write_stats_summary(path, &self.teams)),
            ),
        ];
        for (what, result) in writes {
            match result {
                Ok(()) => log::info!("Wrote {}", what),
                Err(e) if e.is_recoverable() => log::warn!("Skipping {}: {}", what, e),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    // ========================================================================
    // Tick loop
    // ========================================================================

    fn play_frame(&mut self, start: u32, end: u32) -> Result<Option<Signal>> {
        let half = self.half_duration;
        let mut local_count = 0;
        self.rewind.reset();

        for timer in start..end {
            self.report.set_timer(timer);

            if let Some(pending) = self.rewind.current_signal().cloned() {
                if timer % self.update_window == 0 {
                    self.update_window = self.update_window.saturating_sub(UPDATE_STEP).max(1);
                }
                if timer == half {
                    self.rewind.add_signal(Signal::EndOfHalf { tick: timer });
                } else if timer == 2 * half {
                    self.rewind.add_signal(Signal::EndOfMatch { tick: timer });
                }
                return Ok(Some(pending));
            }

            if timer >= half && !self.rewind.is_second_half() {
                return Ok(Some(self.raise(Signal::EndOfHalf { tick: timer })));
            }
            if timer == 2 * half {
                return Ok(Some(self.raise(Signal::EndOfMatch { tick: timer })));
            }

            local_count += 1;
            if (local_count + start) % self.update_window == 0 {
                self.update_window = UPDATE_TICKS;
                let update = self.possession_update(start + local_count + 1);
                return Ok(Some(self.raise(update)));
            }

            self.step()?;
        }

        if end == half && !self.rewind.is_second_half() {
            return Ok(Some(self.raise(Signal::EndOfHalf { tick: end })));
        }
        if end == 2 * half {
            return Ok(Some(self.raise(Signal::EndOfMatch { tick: end })));
        }
        Ok(None)
    }

    fn raise(&mut self, signal: Signal) -> Signal {
        self.rewind.add_signal(signal.clone());
        signal
    }

    fn possession_update(&self, tick: u32) -> Signal {
        let home = self.teams.home.stats.possession;
        let away = self.teams.away.stats.possession;
        let total = home + away;
        Signal::BallPossessionUpdate {
            tick,
            home_pct: possession_pct(home, total),
            away_pct: possession_pct(away, total),
            home_name: self.teams.home.name.clone(),
            away_name: self.teams.away.name.clone(),
        }
    }

    /// One matcher + resolver cycle.
    fn step(&mut self) -> Result<()> {
        let state = self.current()?.clone();
        let team = self.teams.get(state.team);
        let line = team.line_of(state.player).ok_or_else(|| {
            MatchError::InvalidTeam(format!(
                "{} is not in the {} lineup",
                team.player(state.player).family_name,
                team.name
            ))
        })?;

        let instant = {
            let candidates = matcher::find_candidates(&self.corpus, &state, line);
            match candidates.len() {
                0 => return Err(MatchError::NoCandidates { state: state.to_string() }),
                1 => candidates[0].clone(),
                n => candidates[self.rng.next_index(n)].clone(),
            }
        };

        let next = self.process_instant(&instant)?;
        self.report.current_entry().result_state = Some(next.clone());
        self.report.submit_entry();
        self.open_entry(&next);
        self.state = Some(next);
        Ok(())
    }
}

// ========== Tests ==========
