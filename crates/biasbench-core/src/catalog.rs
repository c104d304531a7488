//! Static registry of selectable model identities.
//!
//! The catalog is built once at process start and never mutated. Slot
//! selections and history replays are validated against it; ids that were
//! recorded by earlier backend versions (`llama`, `mixtral`) stay listed so
//! old audits remain replayable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Icon tag rendered next to a model column by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconTag {
    Bot,
    Cpu,
    Brain,
}

/// An immutable, selectable model identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIdentity {
    /// Stable key used on the wire (e.g. "gemini")
    pub id: String,
    /// Human-readable name shown in the column header
    pub display_name: String,
    /// Accent color as a hex string (e.g. "#38bdf8")
    pub accent_color: String,
    /// Icon tag for the column header
    pub icon: IconTag,
}

impl ModelIdentity {
    fn new(id: &str, display_name: &str, accent_color: &str, icon: IconTag) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            accent_color: accent_color.to_string(),
            icon,
        }
    }
}

static CATALOG: Lazy<ModelCatalog> = Lazy::new(|| {
    ModelCatalog {
        identities: vec![
            ModelIdentity::new("gemini", "Google Gemini 2.5 Flash", "#38bdf8", IconTag::Bot),
            ModelIdentity::new("llama_70b", "Meta Llama 3.3 (70B)", "#e879a8", IconTag::Cpu),
            ModelIdentity::new("llama_8b", "Meta Llama 3.1 (8B)", "#4ade80", IconTag::Brain),
            // Legacy ids still present in recorded history
            ModelIdentity::new("llama", "Meta Llama 3", "#e879a8", IconTag::Cpu),
            ModelIdentity::new("mixtral", "Mixtral 8x7B", "#facc15", IconTag::Cpu),
        ],
    }
});

/// The fixed lookup table of model identities.
pub struct ModelCatalog {
    identities: Vec<ModelIdentity>,
}

impl ModelCatalog {
    /// Returns the process-wide catalog instance.
    pub fn global() -> &'static ModelCatalog {
        &CATALOG
    }

    /// Looks up an identity by its stable id.
    pub fn get(&self, id: &str) -> Option<&ModelIdentity> {
        self.identities.iter().find(|m| m.id == id)
    }

    /// Returns true if the id names a known identity.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All identities in stable declaration order.
    pub fn all(&self) -> &[ModelIdentity] {
        &self.identities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let catalog = ModelCatalog::global();
        let gemini = catalog.get("gemini").expect("gemini should be listed");
        assert_eq!(gemini.display_name, "Google Gemini 2.5 Flash");
        assert_eq!(gemini.icon, IconTag::Bot);
    }

    #[test]
    fn test_unknown_id_is_absent() {
        assert!(!ModelCatalog::global().contains("gpt_17"));
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = ModelCatalog::global();
        for identity in catalog.all() {
            let count = catalog.all().iter().filter(|m| m.id == identity.id).count();
            assert_eq!(count, 1, "duplicate id: {}", identity.id);
        }
    }

    #[test]
    fn test_legacy_ids_stay_listed() {
        let catalog = ModelCatalog::global();
        assert!(catalog.contains("llama"));
        assert!(catalog.contains("mixtral"));
    }
}
