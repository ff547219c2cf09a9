//! Tool-specific error types.

use thiserror::Error;

use crate::domains::ado::AdoError;

/// Errors that can occur during tool dispatch.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A required argument is absent or empty.
    #[error("{0} is required")]
    MissingArgument(&'static str),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Azure DevOps call failed.
    #[error(transparent)]
    Upstream(#[from] AdoError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller's input caused this error (detected before any
    /// network call).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingArgument(_) | Self::InvalidArguments(_))
    }
}
