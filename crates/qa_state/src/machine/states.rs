//! Session phases - the lifecycle of one question/answer exchange.

use serde::{Deserialize, Serialize};

/// Phase of the current exchange.
///
/// `Idle` is the only initial value and the value after a reset.
/// `Done` and `Error` are terminal for a given exchange: once either
/// is reached, no further events are processed for that exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No exchange in flight, awaiting a question.
    Idle,

    /// The question was sent; the server is working on it.
    Thinking,

    /// The server is searching the subject's materials.
    Searching,

    /// Answer text is arriving.
    Streaming,

    /// The exchange completed and received its server-side id.
    Done,

    /// The exchange ended in an error.
    Error,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

impl SessionPhase {
    /// Check if this is a terminal phase (no more events expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Check if an exchange is currently in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Thinking | Self::Searching | Self::Streaming)
    }

    /// Get a human-readable description of the current phase.
    pub fn description(&self) -> &str {
        match self {
            Self::Idle => "Ready for a question",
            Self::Thinking => "Working on the question",
            Self::Searching => "Searching course materials",
            Self::Streaming => "Receiving the answer",
            Self::Done => "Answer complete",
            Self::Error => "Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_is_idle() {
        assert_eq!(SessionPhase::default(), SessionPhase::Idle);
    }

    #[test]
    fn test_terminal_detection() {
        assert!(SessionPhase::Done.is_terminal());
        assert!(SessionPhase::Error.is_terminal());
        assert!(!SessionPhase::Idle.is_terminal());
        assert!(!SessionPhase::Streaming.is_terminal());
    }

    #[test]
    fn test_active_detection() {
        assert!(SessionPhase::Thinking.is_active());
        assert!(SessionPhase::Searching.is_active());
        assert!(SessionPhase::Streaming.is_active());
        assert!(!SessionPhase::Idle.is_active());
        assert!(!SessionPhase::Done.is_active());
    }

    #[test]
    fn test_wire_format_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&SessionPhase::Searching).unwrap(),
            "\"searching\""
        );
    }
}
