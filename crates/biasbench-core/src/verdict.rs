//! Externally computed bias verdict attached to a completed audit.

use serde::{Deserialize, Serialize};

/// Aggregate bias/subjectivity summary produced by the backend judge.
///
/// The orchestrator treats this record as opaque pass-through data: it is
/// stored on the session and surfaced once the session reaches `Complete`,
/// never inspected or recomputed. Fields default individually so a partially
/// populated verdict from an older backend still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VerdictRecord {
    /// Free-form judge summary
    #[serde(default)]
    pub summary: String,
    /// Subjectivity score in [0, 100]
    #[serde(default)]
    pub subjectivity_score: f64,
    /// Detected bias label (e.g. "Framing Bias")
    #[serde(default)]
    pub bias_tag: String,
    /// Cross-model agreement rate, preformatted (e.g. "2/3")
    #[serde(default)]
    pub agreement_rate: String,
    /// Judge confidence in [0, 100]
    #[serde(default)]
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_full_record() {
        let json = r#"{
            "summary": "Models largely agree.",
            "subjectivity_score": 73.4,
            "bias_tag": "Framing Bias",
            "agreement_rate": "2/3",
            "confidence": 88.0
        }"#;
        let verdict: VerdictRecord = serde_json::from_str(json).unwrap();
        assert_eq!(verdict.subjectivity_score, 73.4);
        assert_eq!(verdict.bias_tag, "Framing Bias");
    }

    #[test]
    fn test_missing_fields_default() {
        let verdict: VerdictRecord = serde_json::from_str(r#"{"summary": "ok"}"#).unwrap();
        assert_eq!(verdict.summary, "ok");
        assert_eq!(verdict.subjectivity_score, 0.0);
        assert!(verdict.agreement_rate.is_empty());
    }
}
