//! Fallback resolution between backend payloads and the fixed slot arity.
//!
//! The inference backend is free to rename, drop, or add response keys
//! between versions. `FallbackResolver` is the single place where that loose
//! shape is coerced into exactly one string per slot; nothing past this
//! boundary ever sees a missing entry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::selection::{ModelSelection, SELECTION_ARITY, Slot};
use crate::verdict::VerdictRecord;

/// Untrusted audit payload as returned by the inference backend.
///
/// Response values are kept as raw JSON values: a backend that emits a
/// non-string (or omits the map entirely) must degrade to per-slot fallback
/// text, not fail the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAuditResult {
    /// Per-model response text keyed by arbitrary model id strings
    #[serde(default)]
    pub responses: HashMap<String, serde_json::Value>,
    /// Judge verdict, if the backend computed one
    #[serde(default)]
    pub verdict: Option<VerdictRecord>,
}

/// Exactly one response string per slot, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedResponseSet {
    texts: [String; SELECTION_ARITY],
}

impl ResolvedResponseSet {
    /// Returns the text resolved for a slot.
    pub fn get(&self, slot: Slot) -> &str {
        &self.texts[slot.index()]
    }

    /// Character count of the longest resolved text.
    pub fn max_char_len(&self) -> usize {
        self.texts
            .iter()
            .map(|t| t.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Consumes the set, yielding the three texts in slot order.
    pub fn into_texts(self) -> [String; SELECTION_ARITY] {
        self.texts
    }
}

/// Produces the deterministic placeholder for a model that did not respond.
pub fn fallback_message(model_id: &str) -> String {
    format!("{model_id} failed to respond.")
}

/// Coerces a raw backend payload into a guaranteed-complete response set.
pub struct FallbackResolver;

impl FallbackResolver {
    /// Resolves one text per slot.
    ///
    /// For each slot, the backend's value is used verbatim when it is a
    /// non-empty string; anything else (absent key, empty string, non-string
    /// value, missing map) yields the literal fallback message for that
    /// slot's id. Pure and total: never fails, never omits a slot.
    pub fn resolve(selection: &ModelSelection, raw: &RawAuditResult) -> ResolvedResponseSet {
        let texts = std::array::from_fn(|i| {
            let id = &selection.ids()[i];
            match raw.responses.get(id).and_then(|v| v.as_str()) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => {
                    tracing::debug!("[FallbackResolver] No usable response for '{}'", id);
                    fallback_message(id)
                }
            }
        });
        ResolvedResponseSet { texts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(entries: &[(&str, serde_json::Value)]) -> RawAuditResult {
        RawAuditResult {
            responses: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            verdict: None,
        }
    }

    #[test]
    fn test_all_slots_present() {
        let selection = ModelSelection::default();
        let raw = raw(&[
            ("gemini", json!("alpha")),
            ("llama_70b", json!("beta")),
            ("llama_8b", json!("gamma")),
        ]);
        let resolved = FallbackResolver::resolve(&selection, &raw);
        assert_eq!(resolved.get(Slot::A), "alpha");
        assert_eq!(resolved.get(Slot::B), "beta");
        assert_eq!(resolved.get(Slot::C), "gamma");
    }

    #[test]
    fn test_empty_payload_falls_back_everywhere() {
        let selection = ModelSelection::default();
        let resolved = FallbackResolver::resolve(&selection, &RawAuditResult::default());
        assert_eq!(resolved.get(Slot::A), "gemini failed to respond.");
        assert_eq!(resolved.get(Slot::B), "llama_70b failed to respond.");
        assert_eq!(resolved.get(Slot::C), "llama_8b failed to respond.");
    }

    #[test]
    fn test_irrelevant_extra_keys_are_ignored() {
        let selection = ModelSelection::default();
        let raw = raw(&[
            ("gemini", json!("alpha")),
            ("claude", json!("should never surface")),
            ("debug_info", json!({"elapsed_ms": 12})),
        ]);
        let resolved = FallbackResolver::resolve(&selection, &raw);
        assert_eq!(resolved.get(Slot::A), "alpha");
        assert_eq!(resolved.get(Slot::B), "llama_70b failed to respond.");
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let selection = ModelSelection::default();
        let raw = raw(&[("gemini", json!(""))]);
        let resolved = FallbackResolver::resolve(&selection, &raw);
        assert_eq!(resolved.get(Slot::A), "gemini failed to respond.");
    }

    #[test]
    fn test_non_string_value_counts_as_missing() {
        let selection = ModelSelection::default();
        let raw = raw(&[("gemini", json!({"text": "nested"}))]);
        let resolved = FallbackResolver::resolve(&selection, &raw);
        assert_eq!(resolved.get(Slot::A), "gemini failed to respond.");
    }

    #[test]
    fn test_max_char_len() {
        let selection = ModelSelection::default();
        let raw = raw(&[
            ("gemini", json!("0123456789")),
            ("llama_70b", json!("x".repeat(40))),
            ("llama_8b", json!("abcde")),
        ]);
        let resolved = FallbackResolver::resolve(&selection, &raw);
        assert_eq!(resolved.max_char_len(), 40);
    }
}
