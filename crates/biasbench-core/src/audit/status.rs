//! Audit session lifecycle states.

use serde::{Deserialize, Serialize};

/// Lifecycle state of the current audit session.
///
/// Transitions are driven exclusively by the orchestrator:
/// Idle → Dispatching → Revealing → Complete, with Failed as the terminal
/// branch of a collaborator-level failure. A new audit or a history load
/// re-enters the machine from any state, including Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// No prompt submitted yet
    Idle,
    /// Inference request in flight
    Dispatching,
    /// Responses installed, channels revealing text
    Revealing,
    /// All reveals estimated finished; verdict panel eligible
    Complete,
    /// Collaborator-level failure
    Failed,
}

impl AuditStatus {
    /// True for states that accept no further automatic transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, AuditStatus::Complete | AuditStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(AuditStatus::Complete.is_terminal());
        assert!(AuditStatus::Failed.is_terminal());
        assert!(!AuditStatus::Revealing.is_terminal());
        assert!(!AuditStatus::Idle.is_terminal());
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AuditStatus::Dispatching).unwrap(),
            r#""dispatching""#
        );
    }
}
