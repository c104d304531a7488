//! Model selection for the three audit slots.
//!
//! A selection is a fixed-arity ordered tuple of model ids, one per UI slot.
//! It is mutable only while a session is Idle; the orchestrator freezes it
//! for the lifetime of an in-flight or completed session.

use serde::{Deserialize, Serialize};

/// Number of audit slots. The UI renders exactly this many model columns.
pub const SELECTION_ARITY: usize = 3;

/// One of the three audit slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    A,
    B,
    C,
}

impl Slot {
    /// All slots in display order.
    pub const ALL: [Slot; SELECTION_ARITY] = [Slot::A, Slot::B, Slot::C];

    /// Zero-based index of this slot.
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
            Slot::C => 2,
        }
    }
}

/// An ordered tuple of exactly three model ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSelection {
    slots: [String; SELECTION_ARITY],
}

impl ModelSelection {
    /// Creates a selection from three explicit ids.
    pub fn new(slots: [String; SELECTION_ARITY]) -> Self {
        Self { slots }
    }

    /// Builds a selection from an id list of arbitrary length.
    ///
    /// History records may carry fewer or more ids than the slot arity if
    /// they were written under an older schema. Missing slots fall back to
    /// the default selection for that slot; extra ids are dropped.
    pub fn from_ids(ids: &[String]) -> Self {
        let defaults = Self::default();
        if ids.len() != SELECTION_ARITY {
            tracing::warn!(
                "[ModelSelection] Expected {} ids, got {}; padding from defaults",
                SELECTION_ARITY,
                ids.len()
            );
        }
        let slots = std::array::from_fn(|i| {
            ids.get(i)
                .cloned()
                .unwrap_or_else(|| defaults.slots[i].clone())
        });
        Self { slots }
    }

    /// Returns the id selected for a slot.
    pub fn get(&self, slot: Slot) -> &str {
        &self.slots[slot.index()]
    }

    /// Replaces the id selected for a slot.
    pub fn set(&mut self, slot: Slot, model_id: impl Into<String>) {
        self.slots[slot.index()] = model_id.into();
    }

    /// All three ids in slot order.
    pub fn ids(&self) -> &[String; SELECTION_ARITY] {
        &self.slots
    }
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            slots: [
                "gemini".to_string(),
                "llama_70b".to_string(),
                "llama_8b".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = ModelSelection::default();
        assert_eq!(selection.get(Slot::A), "gemini");
        assert_eq!(selection.get(Slot::B), "llama_70b");
        assert_eq!(selection.get(Slot::C), "llama_8b");
    }

    #[test]
    fn test_set_and_get() {
        let mut selection = ModelSelection::default();
        selection.set(Slot::B, "mixtral");
        assert_eq!(selection.get(Slot::B), "mixtral");
        assert_eq!(selection.get(Slot::A), "gemini");
    }

    #[test]
    fn test_from_ids_exact_arity() {
        let ids = vec![
            "gemini".to_string(),
            "llama_70b".to_string(),
            "mixtral".to_string(),
        ];
        let selection = ModelSelection::from_ids(&ids);
        assert_eq!(selection.get(Slot::C), "mixtral");
    }

    #[test]
    fn test_from_ids_pads_missing_slots() {
        let ids = vec!["mixtral".to_string()];
        let selection = ModelSelection::from_ids(&ids);
        assert_eq!(selection.get(Slot::A), "mixtral");
        assert_eq!(selection.get(Slot::B), "llama_70b");
        assert_eq!(selection.get(Slot::C), "llama_8b");
    }

    #[test]
    fn test_from_ids_drops_extras() {
        let ids = vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ];
        let selection = ModelSelection::from_ids(&ids);
        assert_eq!(selection.ids(), &["a", "b", "c"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let selection = ModelSelection::default();
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"["gemini","llama_70b","llama_8b"]"#);
    }
}
