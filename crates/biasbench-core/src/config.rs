//! Client configuration for backend endpoints and reveal pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root configuration for the BiasBench client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BiasBenchConfig {
    pub backend: BackendConfig,
    pub reveal: RevealConfig,
}

impl BiasBenchConfig {
    /// Parses a configuration from TOML text. Missing sections and fields
    /// keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Endpoint configuration for the external collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the audit/history backend
    pub base_url: String,
    /// Request timeout in seconds (model inference can be slow)
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl BackendConfig {
    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Pacing configuration for the character reveal and the verdict gate.
///
/// The verdict budget is an estimate, not a protocol requirement: observed
/// upstream variants used 15 or 25 ms per character, so the constant is a
/// configuration choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Inclusive lower bound of the per-character tick delay, in milliseconds
    pub tick_floor_ms: u64,
    /// Exclusive upper bound of the per-character tick delay, in milliseconds
    pub tick_ceiling_ms: u64,
    /// Per-character budget used to estimate when all reveals finish
    pub verdict_budget_ms_per_char: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            tick_floor_ms: 10,
            tick_ceiling_ms: 30,
            verdict_budget_ms_per_char: 15,
        }
    }
}

impl RevealConfig {
    /// Half-open range the per-tick delay is drawn from.
    ///
    /// A ceiling at or below the floor degenerates to a single-value range
    /// rather than panicking on an empty one.
    pub fn tick_range_ms(&self) -> std::ops::Range<u64> {
        let floor = self.tick_floor_ms;
        let ceiling = self.tick_ceiling_ms.max(floor + 1);
        floor..ceiling
    }

    /// Total reveal budget for the longest resolved text.
    ///
    /// The deadline for revealing the verdict panel is the dispatch
    /// completion time plus this duration, independent of per-tick jitter.
    pub fn verdict_budget(&self, max_chars: usize) -> Duration {
        Duration::from_millis(self.verdict_budget_ms_per_char * max_chars as u64)
    }
}
