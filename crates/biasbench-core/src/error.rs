//! Error types for the BiasBench client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the BiasBench client crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Errors never cross the
/// orchestrator's presentation boundary; they are converted into a `Failed`
/// session before a snapshot is taken.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BiasBenchError {
    /// Network-level failure reaching a collaborator (connect, timeout, DNS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Collaborator answered with a non-success HTTP status
    #[error("Backend error ({status_code}): {message}")]
    Backend { status_code: u16, message: String },

    /// Collaborator answered 2xx but the envelope was unusable
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Prompt rejected before dispatch
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BiasBenchError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Backend error
    pub fn backend(status_code: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a Collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a Backend error
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }
}

impl From<serde_json::Error> for BiasBenchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BiasBenchError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BiasBenchError>`.
pub type Result<T> = std::result::Result<T, BiasBenchError>;
