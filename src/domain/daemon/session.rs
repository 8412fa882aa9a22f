//! Daemon session bookkeeping

use std::fmt;

/// Daemon states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DaemonState {
    #[default]
    Idle,
    Acquiring,
}

impl DaemonState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Acquiring => "acquiring",
        }
    }
}

impl fmt::Display for DaemonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Daemon session counters.
///
/// Acquisitions for different destinations may overlap, so the session
/// counts requests in flight instead of enforcing a single busy state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DaemonSession {
    in_flight: usize,
    pasted: u64,
    failed: u64,
}

impl DaemonSession {
    /// Create a new idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state derived from requests in flight
    pub fn state(&self) -> DaemonState {
        if self.in_flight > 0 {
            DaemonState::Acquiring
        } else {
            DaemonState::Idle
        }
    }

    /// Record the start of an acquisition
    pub fn begin(&mut self) {
        self.in_flight += 1;
    }

    /// Record the end of an acquisition
    pub fn finish(&mut self, success: bool) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if success {
            self.pasted += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Number of acquisitions currently running
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Number of successful pastes served
    pub fn pasted(&self) -> u64 {
        self.pasted
    }

    /// Number of failed pastes served
    pub fn failed(&self) -> u64 {
        self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = DaemonSession::new();
        assert_eq!(session.state(), DaemonState::Idle);
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn begin_marks_acquiring() {
        let mut session = DaemonSession::new();
        session.begin();
        assert_eq!(session.state(), DaemonState::Acquiring);
    }

    #[test]
    fn overlapping_requests_stay_acquiring_until_last_finishes() {
        let mut session = DaemonSession::new();
        session.begin();
        session.begin();
        session.finish(true);
        assert_eq!(session.state(), DaemonState::Acquiring);
        session.finish(false);
        assert_eq!(session.state(), DaemonState::Idle);
        assert_eq!(session.pasted(), 1);
        assert_eq!(session.failed(), 1);
    }

    #[test]
    fn finish_without_begin_does_not_underflow() {
        let mut session = DaemonSession::new();
        session.finish(false);
        assert_eq!(session.in_flight(), 0);
        assert_eq!(session.state(), DaemonState::Idle);
    }

    #[test]
    fn state_display() {
        assert_eq!(DaemonState::Idle.to_string(), "idle");
        assert_eq!(DaemonState::Acquiring.to_string(), "acquiring");
    }
}
