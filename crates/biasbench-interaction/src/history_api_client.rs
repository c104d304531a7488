//! HistoryApiClient - REST client for the persisted audit history.

use async_trait::async_trait;
use biasbench_core::collaborator::HistoryProvider;
use biasbench_core::config::BackendConfig;
use biasbench_core::error::{BiasBenchError, Result};
use biasbench_core::history::HistoryEntry;
use reqwest::Client;
use serde::Deserialize;

const HISTORY_PATH: &str = "/api/history";

/// HTTP client implementation of the history collaborator.
#[derive(Clone)]
pub struct HistoryApiClient {
    client: Client,
    base_url: String,
}

impl HistoryApiClient {
    /// Creates a client against the given base URL with default transport
    /// settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client from backend configuration, applying the configured
    /// request timeout.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| BiasBenchError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn history_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), HISTORY_PATH)
    }
}

#[async_trait]
impl HistoryProvider for HistoryApiClient {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.history_url())
            .send()
            .await
            .map_err(|err| BiasBenchError::transport(format!("History request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(BiasBenchError::backend(status, body));
        }

        let envelope: HistoryEnvelope = response.json().await.map_err(|err| {
            BiasBenchError::collaborator(format!("Failed to parse history response: {err}"))
        })?;

        let entries = parse_envelope(envelope)?;
        tracing::info!("[HistoryApiClient] Fetched {} history entries", entries.len());
        Ok(entries)
    }
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<Vec<HistoryEntry>>,
}

/// Validates the collaborator's envelope. Order of entries is preserved
/// exactly as received (most recent first, per the collaborator contract).
fn parse_envelope(envelope: HistoryEnvelope) -> Result<Vec<HistoryEntry>> {
    match envelope.status.as_deref() {
        Some("success") => Ok(envelope.data.unwrap_or_default()),
        other => Err(BiasBenchError::collaborator(format!(
            "History collaborator reported status {:?}",
            other
        ))),
    }
}
