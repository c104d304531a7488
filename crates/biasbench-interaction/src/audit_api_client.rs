//! AuditApiClient - REST client for the audit inference backend.
//!
//! Sends one prompt plus the selected model ids and returns the backend's
//! loose payload untouched; coercion into the fixed slot arity happens in
//! `FallbackResolver`, not here.

use async_trait::async_trait;
use biasbench_core::collaborator::InferenceBackend;
use biasbench_core::config::BackendConfig;
use biasbench_core::error::{BiasBenchError, Result};
use biasbench_core::resolver::RawAuditResult;
use biasbench_core::selection::ModelSelection;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const AUDIT_PATH: &str = "/api/audit";

/// HTTP client implementation of the inference collaborator.
#[derive(Clone)]
pub struct AuditApiClient {
    client: Client,
    base_url: String,
}

impl AuditApiClient {
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

    fn audit_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), AUDIT_PATH)
    }

    async fn send_request(&self, body: &AuditRequest<'_>) -> Result<RawAuditResult> {
        let response = self
            .client
            .post(self.audit_url())
            .json(body)
            .send()
            .await
            .map_err(|err| BiasBenchError::transport(format!("Audit request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let envelope: AuditEnvelope = response
            .json()
            .await
            .map_err(|err| {
                BiasBenchError::collaborator(format!("Failed to parse audit response: {err}"))
            })?;

        // A 2xx with no data block still renders: every slot falls back.
        Ok(envelope.data.unwrap_or_default())
    }
}

#[async_trait]
impl InferenceBackend for AuditApiClient {
    async fn run_audit(&self, prompt: &str, selection: &ModelSelection) -> Result<RawAuditResult> {
        let request = AuditRequest {
            prompt,
            models: selection.ids().clone(),
        };
        tracing::info!(
            "[AuditApiClient] Dispatching audit for models {:?}",
            request.models
        );
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct AuditRequest<'a> {
    prompt: &'a str,
    models: [String; 3],
}

#[derive(Deserialize)]
struct AuditEnvelope {
    #[allow(dead_code)]
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<RawAuditResult>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Maps a non-success response to a typed error, preferring the backend's
/// structured `detail` message when the body carries one.
fn map_http_error(status: StatusCode, body: String) -> BiasBenchError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|e| e.detail)
        .unwrap_or(body);
    BiasBenchError::backend(status.as_u16(), message)
}
