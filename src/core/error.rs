//! Error types and handling for the server.
//!
//! Startup fails either on configuration or on building the Azure DevOps
//! client; request-time failures are [`ToolError`](crate::domains::tools::ToolError)s.

use thiserror::Error;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the Azure DevOps executor.
    #[error("Azure DevOps error: {0}")]
    Ado(#[from] crate::domains::ado::AdoError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
