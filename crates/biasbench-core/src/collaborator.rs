//! Collaborator traits for the external inference backend and history store.
//!
//! Defines the interfaces the orchestration layer depends on, decoupling it
//! from the concrete HTTP transport (see `biasbench-interaction`) and keeping
//! it testable against in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::history::HistoryEntry;
use crate::resolver::RawAuditResult;
use crate::selection::ModelSelection;

/// An abstract inference backend that audits one prompt against the
/// selected models.
///
/// # Implementation Notes
///
/// Implementations must treat the returned payload as untrusted: any or all
/// of the requested model ids may be absent from `responses`, and `verdict`
/// may be missing. A collaborator-level failure (connection refused,
/// non-success HTTP status) is an `Err`; per-model absence is not.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Runs one audit.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The trimmed, non-empty prompt to audit
    /// * `selection` - The three model ids to audit against
    ///
    /// # Returns
    ///
    /// - `Ok(RawAuditResult)`: The backend answered; completeness not guaranteed
    /// - `Err(_)`: Transport failure or non-success status
    async fn run_audit(&self, prompt: &str, selection: &ModelSelection) -> Result<RawAuditResult>;
}

/// An abstract read-only view of the persisted audit history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetches all recorded audits, most recent first.
    ///
    /// Order is preserved exactly as the collaborator returned it.
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>>;
}
