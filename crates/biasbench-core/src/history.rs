//! Persisted audit history entries.
//!
//! History records are owned by the external history collaborator; this core
//! only consumes them to rebuild a completed session. Every payload field
//! tolerates absence because rows may have been written under an older
//! schema.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::resolver::RawAuditResult;
use crate::verdict::VerdictRecord;

/// One recorded audit, as served by the history collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Row id assigned by the history store
    pub id: i64,
    /// The audited prompt
    #[serde(default)]
    pub prompt: String,
    /// Model ids selected when the audit ran (may be absent or wrong arity)
    #[serde(default)]
    pub selected_models: Option<Vec<String>>,
    /// Recorded per-model responses, same loose shape as a live payload
    #[serde(default)]
    pub responses: HashMap<String, serde_json::Value>,
    /// Recorded verdict, if one was computed
    #[serde(default)]
    pub verdict: Option<VerdictRecord>,
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
}

impl HistoryEntry {
    /// Views the recorded responses as a raw audit payload so replay can
    /// reuse the same fallback resolution as a live session.
    pub fn raw_result(&self) -> RawAuditResult {
        RawAuditResult {
            responses: self.responses.clone(),
            verdict: self.verdict.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_full_entry() {
        let json = r#"{
            "id": 7,
            "prompt": "Is AI dangerous?",
            "selected_models": ["gemini", "llama_70b", "mixtral"],
            "responses": {"gemini": "hi", "mixtral": "yo"},
            "verdict": {"summary": "split", "subjectivity_score": 41.0},
            "created_at": "2026-08-01T10:00:00Z"
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.selected_models.as_ref().unwrap().len(), 3);
        assert_eq!(entry.responses.len(), 2);
    }

    #[test]
    fn test_tolerates_missing_payload_fields() {
        let entry: HistoryEntry = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(entry.prompt.is_empty());
        assert!(entry.selected_models.is_none());
        assert!(entry.responses.is_empty());
        assert!(entry.verdict.is_none());
    }

    #[test]
    fn test_raw_result_carries_responses_and_verdict() {
        let json = r#"{
            "id": 2,
            "responses": {"gemini": "hello"},
            "verdict": {"summary": "calm"}
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        let raw = entry.raw_result();
        assert_eq!(raw.responses["gemini"], "hello");
        assert_eq!(raw.verdict.unwrap().summary, "calm");
    }
}
