//! Append-only signal log for replaying and rewinding a match

use super::signals::Signal;

#[derive(Debug, Clone, Default)]
pub struct MatchRewind {
    signals: Vec<Signal>,
    current: Option<Signal>,
    second_half: bool,
}

impl MatchRewind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a signal and makes it the pending one. End of half flips the log into the
    /// second half.
    pub fn add_signal(&mut self, signal: Signal) {
        if signal.is_end_of_half() {
            self.second_half = true;
        }
        self.current = Some(signal.clone());
        self.signals.push(signal);
    }

    /// Signal raised during the current step and not yet handed to the caller.
    pub fn current_signal(&self) -> Option<&Signal> {
        self.current.as_ref()
    }

    pub fn take_current(&mut self) -> Option<Signal> {
        self.current.take()
    }

    /// Clears the pending signal.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn is_second_half(&self) -> bool {
        self.second_half
    }

    pub fn reset_half(&mut self) {
        self.second_half = false;
    }

    /// Drops every signal after `tick`. The log is in tick order, so the cut stops at the
    /// first later signal.
    pub fn remove_after(&mut self, tick: u32) {
        let keep = self.signals.iter().take_while(|s| s.tick() <= tick).count();
        self.signals.truncate(keep);
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(tick: u32) -> Signal {
        Signal::CornerKick { tick, team: "Greece".into() }
    }

    #[test]
    fn test_add_and_reset_current() {
        let mut rewind = MatchRewind::new();
        assert!(rewind.current_signal().is_none());
        rewind.add_signal(corner(5));
        assert_eq!(rewind.current_signal(), Some(&corner(5)));
        rewind.reset();
        assert!(rewind.current_signal().is_none());
        assert_eq!(rewind.signals().len(), 1);
    }

    #[test]
    fn test_end_of_half_marks_second_half() {
        let mut rewind = MatchRewind::new();
        rewind.add_signal(Signal::EndOfHalf { tick: 255 });
        assert!(rewind.is_second_half());
        rewind.reset_half();
        assert!(!rewind.is_second_half());
    }

    #[test]
    fn test_remove_after_truncates() {
        let mut rewind = MatchRewind::new();
        for t in [3, 10, 10, 40, 90] {
            rewind.add_signal(corner(t));
        }
        rewind.remove_after(10);
        let ticks: Vec<u32> = rewind.signals().iter().map(Signal::tick).collect();
        assert_eq!(ticks, vec![3, 10, 10]);
    }
}
