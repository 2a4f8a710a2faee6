//! Match report: per-step entries and the ordered highlight log

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Action, FieldState, Teams};

/// Notable result attached to a report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    Foul,
    PenaltyMissed,
    ShotOn,
    ShotOff,
    Goal,
    Offside,
    ThrowIn,
    GoalKick,
    PenaltyGoal,
}

impl Special {
    pub fn description(self) -> &'static str {
        match self {
            Special::Foul => "Foul",
            Special::PenaltyMissed => "Missed penalty",
            Special::ShotOn => "Shot on target",
            Special::ShotOff => "Shot off target",
            Special::Goal => "Goal",
            Special::Offside => "Offside",
            Special::ThrowIn => "Throw in",
            Special::GoalKick => "Goal kick",
            Special::PenaltyGoal => "Goal (pen)",
        }
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One simulated step as it ends up in the report file.
#[derive(Debug, Clone, Default)]
pub struct ReportEntry {
    pub action_state: Option<FieldState>,
    pub result_state: Option<FieldState>,
    pub action: Option<Action>,
    pub special: Option<Special>,
    pub player_name: String,
}

/// Highlight key: ticks first, then order of appearance within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HighlightOrdinal {
    pub tick: u32,
    pub sequence: u32,
}

impl fmt::Display for HighlightOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t: {} s: {}", self.tick, self.sequence)
    }
}

#[derive(Debug, Clone)]
pub struct MatchReport {
    half_duration: u32,
    timer: u32,
    entries: Vec<ReportEntry>,
    current: ReportEntry,
    highlights: BTreeMap<HighlightOrdinal, String>,
}

impl MatchReport {
    pub fn new(half_duration: u32) -> Self {
        Self {
            half_duration,
            timer: 0,
            entries: Vec::new(),
            current: ReportEntry::default(),
            highlights: BTreeMap::new(),
        }
    }

    pub fn set_timer(&mut self, tick: u32) {
        self.timer = tick;
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Match minute of the current tick.
    pub fn minute(&self) -> u32 {
        minute_of(self.timer, self.half_duration)
    }

    pub fn score_line(&self, teams: &Teams) -> String {
        format!(
            "{} - {} {} - {}",
            teams.home.name, teams.away.name, teams.home.stats.goals, teams.away.stats.goals
        )
    }

    // ========================================================================
    // Entries
    // ========================================================================

    pub fn current_entry(&mut self) -> &mut ReportEntry {
        &mut self.current
    }

    pub fn set_special(&mut self, special: Special) {
        self.current.special = Some(special);
    }

    pub fn submit_entry(&mut self) {
        let entry = std::mem::take(&mut self.current);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    // ========================================================================
    // Highlights
    // ========================================================================

    pub fn append_highlight(&mut self, tick: u32, text: impl Into<String>) {
        let sequence = self
            .highlights
            .range(HighlightOrdinal { tick, sequence: 0 }..=HighlightOrdinal { tick, sequence: u32::MAX })
            .next_back()
            .map(|(key, _)| key.sequence + 1)
            .unwrap_or(1);
        self.highlights.insert(HighlightOrdinal { tick, sequence }, text.into());
    }

    /// Keeps highlights up to and including `tick`.
    pub fn clear_later_highlights(&mut self, tick: u32) {
        self.highlights.retain(|key, _| key.tick <= tick);
    }

    /// Highlights strictly before `tick`.
    pub fn earlier_highlights(&self, tick: u32) -> Vec<(HighlightOrdinal, &str)> {
        self.highlights
            .iter()
            .take_while(|(key, _)| key.tick < tick)
            .map(|(key, text)| (*key, text.as_str()))
            .collect()
    }

    pub fn highlights(&self) -> impl Iterator<Item = (&HighlightOrdinal, &String)> {
        self.highlights.iter()
    }
}

pub fn minute_of(tick: u32, half_duration: u32) -> u32 {
    if half_duration == 0 {
        return 0;
    }
    (tick as f64 / half_duration as f64 * 45.0).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_rounds_up() {
        let mut report = MatchReport::new(255);
        assert_eq!(report.minute(), 0);
        report.set_timer(1);
        assert_eq!(report.minute(), 1);
        report.set_timer(255);
        assert_eq!(report.minute(), 45);
        report.set_timer(510);
        assert_eq!(report.minute(), 90);
    }

    #[test]
    fn test_simultaneous_highlights_are_sequenced() {
        let mut report = MatchReport::new(255);
        report.append_highlight(12, "a");
        report.append_highlight(12, "b");
        report.append_highlight(5, "c");
        report.append_highlight(12, "d");
        let keys: Vec<(u32, u32)> = report.highlights().map(|(k, _)| (k.tick, k.sequence)).collect();
        assert_eq!(keys, vec![(5, 1), (12, 1), (12, 2), (12, 3)]);
        let texts: Vec<&str> = report.highlights().map(|(_, v)| v.as_str()).collect();
        assert_eq!(texts, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_clear_and_earlier_highlights() {
        let mut report = MatchReport::new(255);
        for t in [1, 5, 5, 9, 20] {
            report.append_highlight(t, format!("at {}", t));
        }
        assert_eq!(report.earlier_highlights(5).len(), 1);
        assert_eq!(report.earlier_highlights(6).len(), 3);
        report.clear_later_highlights(9);
        assert_eq!(report.highlights().count(), 4);
    }

    #[test]
    fn test_entries_submit_resets_current() {
        let mut report = MatchReport::new(255);
        report.current_entry().player_name = "Dellas".into();
        report.current_entry().action = Some(Action::Pass);
        report.set_special(Special::Foul);
        report.submit_entry();
        assert_eq!(report.entries().len(), 1);
        assert_eq!(report.entries()[0].special, Some(Special::Foul));
        assert!(report.current_entry().player_name.is_empty());
        assert_eq!(Special::PenaltyGoal.to_string(), "Goal (pen)");
    }
}
