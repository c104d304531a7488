//! HTTP collaborators for the BiasBench client.
//!
//! Implements the `biasbench-core` collaborator traits against the REST
//! backend: one client for audit dispatch, one for history retrieval.

pub mod audit_api_client;
pub mod history_api_client;

pub use audit_api_client::AuditApiClient;
pub use history_api_client::HistoryApiClient;
