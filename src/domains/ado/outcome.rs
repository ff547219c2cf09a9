//! Classification of a single HTTP attempt.

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::blocking::Response;
use reqwest::header::{HeaderMap, RETRY_AFTER};

/// What one attempt against the service produced.
///
/// Drives the retry decision of the executor; never stored.
#[derive(Debug)]
pub enum Outcome {
    /// 2xx response with its raw body.
    Success(Bytes),

    /// 429 response, with the `Retry-After` seconds when the header parses.
    RateLimited { retry_after: Option<u64> },

    /// Status 500 or above.
    ServerError { status: u16 },

    /// Any other non-2xx status. Never retried.
    ClientError { status: u16, body: String },

    /// No usable response was received.
    TransportFailure(reqwest::Error),
}

impl Outcome {
    /// Classify the result of sending a request.
    pub fn classify(result: Result<Response, reqwest::Error>) -> Self {
        match result {
            Ok(response) => Self::from_response(response),
            Err(err) => Self::TransportFailure(err),
        }
    }

    /// Classify a received response, reading its body where needed.
    pub fn from_response(response: Response) -> Self {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Self::RateLimited {
                retry_after: parse_retry_after(response.headers()),
            };
        }

        if status.as_u16() >= 500 {
            return Self::ServerError {
                status: status.as_u16(),
            };
        }

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Self::ClientError {
                status: status.as_u16(),
                body,
            };
        }

        match response.bytes() {
            Ok(body) => Self::Success(body),
            Err(err) => Self::TransportFailure(err),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::RateLimited { .. } => "rate_limited",
            Self::ServerError { .. } => "server_error",
            Self::ClientError { .. } => "client_error",
            Self::TransportFailure(_) => "transport_failure",
        }
    }
}

/// Read `Retry-After` as whole seconds. HTTP-date values are not supported.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
