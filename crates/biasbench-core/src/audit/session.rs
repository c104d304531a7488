//! Audit session entity and its state transitions.
//!
//! Exactly one `AuditSession` is current at a time. The orchestrator owns it
//! behind a single lock and applies every transition through the methods
//! below, so readers never observe a half-applied state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::AuditStatus;
use super::stream::StreamState;
use crate::resolver::ResolvedResponseSet;
use crate::selection::{ModelSelection, SELECTION_ARITY};
use crate::verdict::VerdictRecord;

/// Cosmetic slot-A text shown while the inference request is in flight.
pub const CONNECTING_PLACEHOLDER: &str = "Connecting to BiasBench AI Engine...";

/// Cosmetic text shown in the remaining slots while dispatching.
pub const WAITING_PLACEHOLDER: &str = "Waiting...";

/// Shared error text installed in all slots on a collaborator-level failure.
pub const BACKEND_FAILURE_TEXT: &str =
    "Error connecting to the BiasBench backend. Is it running?";

/// The orchestrator's unit of work: one prompt, three channels, one verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSession {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// The audited prompt (trimmed, non-empty once dispatched)
    pub prompt: String,
    /// Model ids frozen for the lifetime of this session
    pub selection: ModelSelection,
    /// Current lifecycle state
    pub status: AuditStatus,
    /// One reveal channel per slot
    pub channels: [StreamState; SELECTION_ARITY],
    /// Judge verdict, surfaced once the session completes
    pub verdict: Option<VerdictRecord>,
    /// Estimated reveal finish time (RFC 3339), set when revealing starts
    pub reveal_deadline: Option<String>,
    /// Timestamp when the session was created (RFC 3339)
    pub created_at: String,
}

impl AuditSession {
    /// A fresh Idle session with the default selection and empty channels.
    pub fn idle() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: String::new(),
            selection: ModelSelection::default(),
            status: AuditStatus::Idle,
            channels: [
                StreamState::empty(),
                StreamState::empty(),
                StreamState::empty(),
            ],
            verdict: None,
            reveal_deadline: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// A Dispatching session with cosmetic placeholder text per slot.
    ///
    /// The placeholders are fully revealed and never streamed; they are not
    /// resolved responses.
    pub fn dispatching(prompt: impl Into<String>, selection: ModelSelection) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            selection,
            status: AuditStatus::Dispatching,
            channels: [
                StreamState::fully_revealed(CONNECTING_PLACEHOLDER),
                StreamState::fully_revealed(WAITING_PLACEHOLDER),
                StreamState::fully_revealed(WAITING_PLACEHOLDER),
            ],
            verdict: None,
            reveal_deadline: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Installs resolved responses and moves to Revealing.
    ///
    /// Every channel's text is replaced and its reveal restarts from zero in
    /// the same transition, so a reader can never pair new text with stale
    /// progress.
    pub fn begin_reveal(
        &mut self,
        resolved: ResolvedResponseSet,
        verdict: Option<VerdictRecord>,
        reveal_deadline: Option<String>,
    ) {
        let [a, b, c] = resolved.into_texts();
        self.channels = [
            StreamState::streaming(a),
            StreamState::streaming(b),
            StreamState::streaming(c),
        ];
        self.verdict = verdict;
        self.reveal_deadline = reveal_deadline;
        self.status = AuditStatus::Revealing;
    }

    /// Moves to Failed, replicating one shared error text into all slots.
    pub fn fail(&mut self, message: &str) {
        self.channels = [
            StreamState::fully_revealed(message),
            StreamState::fully_revealed(message),
            StreamState::fully_revealed(message),
        ];
        self.verdict = None;
        self.reveal_deadline = None;
        self.status = AuditStatus::Failed;
    }

    /// Marks the session Complete. The verdict panel becomes eligible; any
    /// channel with characters left simply reads as full text from now on.
    pub fn complete(&mut self) {
        self.status = AuditStatus::Complete;
    }
}
