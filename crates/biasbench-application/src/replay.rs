//! Instant replay of persisted audit history.

use biasbench_core::audit::{AuditSession, AuditStatus, StreamState};
use biasbench_core::history::HistoryEntry;
use biasbench_core::resolver::FallbackResolver;
use biasbench_core::selection::ModelSelection;

/// Converts a persisted history record into a completed session without
/// invoking dispatch or streaming.
pub struct HistoryReplayAdapter;

impl HistoryReplayAdapter {
    /// Builds a Complete-state session from a history entry.
    ///
    /// Pure and synchronous: no timers are armed and no channel ever
    /// activates; every channel is installed fully revealed. Responses run
    /// through the same fallback resolution as a live session, so a record
    /// written under a since-deprecated model id degrades to per-slot
    /// fallback text instead of failing the whole replay.
    pub fn to_session(entry: &HistoryEntry) -> AuditSession {
        let selection = entry
            .selected_models
            .as_deref()
            .map(ModelSelection::from_ids)
            .unwrap_or_default();
        let resolved = FallbackResolver::resolve(&selection, &entry.raw_result());
        let [a, b, c] = resolved.into_texts();
        AuditSession {
            id: entry.id.to_string(),
            prompt: entry.prompt.clone(),
            selection,
            status: AuditStatus::Complete,
            channels: [
                StreamState::fully_revealed(a),
                StreamState::fully_revealed(b),
                StreamState::fully_revealed(c),
            ],
            verdict: entry.verdict.clone(),
            reveal_deadline: None,
            created_at: entry
                .created_at
                .clone()
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biasbench_core::selection::Slot;
    use biasbench_core::verdict::VerdictRecord;

    fn entry_from_json(json: &str) -> HistoryEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_replay_fills_missing_model_with_fallback() {
        let entry = entry_from_json(
            r#"{
                "id": 11,
                "prompt": "Compare the candidates",
                "selected_models": ["gemini", "llama_70b", "mixtral"],
                "responses": {"gemini": "hi", "mixtral": "yo"},
                "verdict": {"summary": "split", "subjectivity_score": 55.0}
            }"#,
        );
        let session = HistoryReplayAdapter::to_session(&entry);
        assert_eq!(session.status, AuditStatus::Complete);
        assert_eq!(session.channels[Slot::A.index()].full_text(), "hi");
        assert_eq!(
            session.channels[Slot::B.index()].full_text(),
            "llama_70b failed to respond."
        );
        assert_eq!(session.channels[Slot::C.index()].full_text(), "yo");
        // No channel may expect ticks after a replay.
        assert!(session.channels.iter().all(|c| !c.is_active()));
        assert!(session.channels.iter().all(|c| !c.cursor_visible()));
    }

    #[test]
    fn test_replay_missing_selection_uses_default() {
        let entry = entry_from_json(r#"{"id": 4, "responses": {"gemini": "old answer"}}"#);
        let session = HistoryReplayAdapter::to_session(&entry);
        assert_eq!(session.selection, ModelSelection::default());
        assert_eq!(session.channels[0].full_text(), "old answer");
        assert_eq!(
            session.channels[1].full_text(),
            "llama_70b failed to respond."
        );
    }

    #[test]
    fn test_replay_missing_responses_falls_back_everywhere() {
        let entry = entry_from_json(
            r#"{"id": 5, "selected_models": ["gemini", "llama", "mixtral"]}"#,
        );
        let session = HistoryReplayAdapter::to_session(&entry);
        assert_eq!(session.channels[0].full_text(), "gemini failed to respond.");
        assert_eq!(session.channels[1].full_text(), "llama failed to respond.");
        assert_eq!(session.channels[2].full_text(), "mixtral failed to respond.");
    }

    #[test]
    fn test_replay_carries_prompt_and_verdict() {
        let entry = entry_from_json(
            r#"{
                "id": 6,
                "prompt": "Is nuclear power safe?",
                "selected_models": ["gemini", "llama_70b", "llama_8b"],
                "responses": {"gemini": "a", "llama_70b": "b", "llama_8b": "c"},
                "verdict": {"summary": "agree", "subjectivity_score": 20.5, "confidence": 90.0},
                "created_at": "2026-07-30T08:00:00Z"
            }"#,
        );
        let session = HistoryReplayAdapter::to_session(&entry);
        assert_eq!(session.prompt, "Is nuclear power safe?");
        assert_eq!(session.created_at, "2026-07-30T08:00:00Z");
        let verdict: VerdictRecord = session.verdict.unwrap();
        assert_eq!(verdict.subjectivity_score, 20.5);
        assert_eq!(verdict.confidence, 90.0);
    }
}
