//! Error types for the Azure DevOps request executor.

use thiserror::Error;

/// Result type for executor and work item operations.
pub type AdoResult<T> = Result<T, AdoError>;

/// Terminal failures surfaced by [`AdoClient`](super::AdoClient).
///
/// Transient conditions (rate limiting, 5xx, transport errors) are retried
/// inside the executor and only show up here once retrying stops.
#[derive(Debug, Error)]
pub enum AdoError {
    /// The client could not be constructed from the given settings.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// A non-retryable failure, or a transport failure that outlived the budget.
    #[error("Request failed: {0}")]
    RequestFailed(#[source] RequestFailure),

    /// The retry budget ran out while the outcome was still retryable.
    #[error("Max retries exceeded after {attempts} attempts{}", fmt_last_status(.last_status))]
    RetryBudgetExhausted {
        attempts: u32,
        last_status: Option<u16>,
    },
}

/// Underlying cause of [`AdoError::RequestFailed`].
#[derive(Debug, Error)]
pub enum RequestFailure {
    /// No response was received.
    #[error("transport error after {retries} retries: {source}")]
    Transport {
        retries: u32,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-retryable status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx body that is not valid JSON.
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn fmt_last_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (last status {code})"),
        None => String::new(),
    }
}

impl AdoError {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap a non-retryable HTTP status.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::RequestFailed(RequestFailure::Status {
            status,
            body: body.into(),
        })
    }

    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RequestFailed(RequestFailure::Status { status, .. }) => Some(*status),
            Self::RetryBudgetExhausted { last_status, .. } => *last_status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AdoError {
    fn from(err: serde_json::Error) -> Self {
        Self::RequestFailed(RequestFailure::Decode(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_exhausted_message_includes_status() {
        let err = AdoError::RetryBudgetExhausted {
            attempts: 4,
            last_status: Some(503),
        };
        assert_eq!(
            err.to_string(),
            "Max retries exceeded after 4 attempts (last status 503)"
        );
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_status_error_message() {
        let err = AdoError::status(404, "not found");
        assert_eq!(err.to_string(), "Request failed: HTTP 404: not found");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_decode_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AdoError = json_err.into();
        assert!(matches!(
            err,
            AdoError::RequestFailed(RequestFailure::Decode(_))
        ));
    }
}
