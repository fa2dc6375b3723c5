//! Recording states of a dictation session.
//!
//! Valid transitions:
//! - Idle -> Recording (start)
//! - Stopped -> Recording (start again)
//! - Recording -> Recording (engine ended on its own and was restarted)
//! - Recording -> Stopping (stop requested or engine error)
//! - Stopping -> Stopped (engine confirmed the end of the stream)

use std::fmt;

/// Operational state of a recognition session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Never started.
    Idle,
    /// Capturing speech; spontaneous engine ends are restarted.
    Recording,
    /// Stop requested, waiting for the engine's end event.
    Stopping,
    /// Cycle finished and the transcript delivered.
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Recording => write!(f, "Recording"),
            SessionState::Stopping => write!(f, "Stopping"),
            SessionState::Stopped => write!(f, "Stopped"),
        }
    }
}

impl SessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Recording)
                | (SessionState::Stopped, SessionState::Recording)
                | (SessionState::Recording, SessionState::Recording)
                | (SessionState::Recording, SessionState::Stopping)
                | (SessionState::Stopping, SessionState::Stopped)
        )
    }

    /// Whether an engine handle is live in this state.
    pub fn has_engine(&self) -> bool {
        matches!(self, SessionState::Recording | SessionState::Stopping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "Idle");
        assert_eq!(SessionState::Recording.to_string(), "Recording");
        assert_eq!(SessionState::Stopping.to_string(), "Stopping");
        assert_eq!(SessionState::Stopped.to_string(), "Stopped");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(SessionState::Idle.can_transition_to(&SessionState::Recording));
        assert!(SessionState::Recording.can_transition_to(&SessionState::Stopping));
        assert!(SessionState::Stopping.can_transition_to(&SessionState::Stopped));
        assert!(SessionState::Stopped.can_transition_to(&SessionState::Recording));

        // Restart after a spontaneous end
        assert!(SessionState::Recording.can_transition_to(&SessionState::Recording));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!SessionState::Idle.can_transition_to(&SessionState::Stopping));
        assert!(!SessionState::Idle.can_transition_to(&SessionState::Stopped));
        assert!(!SessionState::Recording.can_transition_to(&SessionState::Stopped));
        assert!(!SessionState::Stopping.can_transition_to(&SessionState::Recording));
        assert!(!SessionState::Stopped.can_transition_to(&SessionState::Idle));
    }

    #[test]
    fn test_has_engine() {
        assert!(!SessionState::Idle.has_engine());
        assert!(SessionState::Recording.has_engine());
        assert!(SessionState::Stopping.has_engine());
        assert!(!SessionState::Stopped.has_engine());
    }
}
