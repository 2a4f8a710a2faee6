//! Fouls and free kicks

use super::MatchEngine;
use crate::calibration::general::PENALTY_AWARD_FACTOR;
use crate::engine::report::Special;
use crate::engine::signals::Signal;
use crate::error::Result;
use crate::models::{FieldState, FieldX, FieldY, Instant, PressureCode};

impl MatchEngine {
    /// Free kick or penalty when `instant` ends in a foul, `None` for normal play.
    pub(crate) fn check_foul(&mut self, instant: &Instant) -> Result<Option<FieldState>> {
        let outcome = &instant.outcome;
        if outcome.is_foul() && outcome.possession_kept() {
            if matches!(instant.y, FieldY::Attack | FieldY::Centre) && self.rng.next_f64() < PENALTY_AWARD_FACTOR {
                return self.penalty().map(Some);
            }
            return self.free_kick(instant, false).map(Some);
        }
        if outcome.is_offensive_foul() {
            return self.free_kick(instant, true).map(Some);
        }
        Ok(None)
    }

    /// Play restarts where the foul happened, clear of pressure. `offensive` credits the
    /// free kick to the defending team.
    fn free_kick(&mut self, instant: &Instant, offensive: bool) -> Result<FieldState> {
        let holder = self.current()?.team;
        let team = if offensive { holder.opponent() } else { holder };
        self.teams.get_mut(team).stats.add_free_kick();
        self.report.set_special(Special::Foul);
        let signal = Signal::FreeKick { tick: self.report.timer(), team: self.team_name(team) };
        self.rewind.add_signal(signal);

        let mut restart = instant.clone();
        let x = if instant.x == FieldX::ThrowIn { FieldX::Flank } else { instant.x };
        restart.outcome_state.x = x as u8;
        restart.outcome_state.y = instant.y as u8;
        restart.outcome_state.pressure = PressureCode::Clear as u8;
        self.simulate_next_state(&restart, false)
    }
}
