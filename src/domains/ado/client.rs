//! Authenticated request executor for the Azure DevOps REST API.
//!
//! Every logical operation goes through [`AdoClient::execute`], which issues
//! the call, classifies what came back and applies the retry policy:
//!
//! - transport failures and 5xx responses are retried with `base * 2^n`
//!   backoff, at most [`MAX_RETRIES`](super::retry::MAX_RETRIES) times;
//! - 429 responses are retried after `Retry-After` (or the computed backoff)
//!   and are only bounded when a rate-limit cap is configured;
//! - any other non-2xx status fails immediately.
//!
//! The loop is synchronous and sleeps the calling thread. Async callers must
//! run it on a blocking thread.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{AdoError, AdoResult, RequestFailure};
use super::outcome::Outcome;
use super::retry::RetryPolicy;
use crate::core::config::AdoConfig;

/// Function used to wait between attempts.
pub type Sleeper = Arc<dyn Fn(Duration) + Send + Sync>;

/// Query string parameters of a call. Repeat a key to send a list.
pub type QueryParams<'a> = &'a [(&'a str, String)];

/// Client for the Azure DevOps REST API with bounded retry.
///
/// Holds no per-call state; share it behind an `Arc` across handlers.
#[derive(Clone)]
pub struct AdoClient {
    http: Client,
    base_url: String,
    pat: String,
    policy: RetryPolicy,
    sleeper: Sleeper,
}

impl fmt::Debug for AdoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdoClient")
            .field("base_url", &self.base_url)
            .field("pat", &"[REDACTED]")
            .field("policy", &self.policy)
            .finish()
    }
}

impl AdoClient {
    /// Create a client with the default retry policy.
    ///
    /// The rate-limit cap, if any, is taken from the configuration.
    pub fn new(config: &AdoConfig) -> AdoResult<Self> {
        let policy = RetryPolicy {
            max_rate_limit_retries: config.max_rate_limit_retries,
            ..RetryPolicy::default()
        };
        Self::with_policy(config, policy)
    }

    /// Create a client with an explicit retry policy.
    pub fn with_policy(config: &AdoConfig, policy: RetryPolicy) -> AdoResult<Self> {
        let accept = format!("application/json;api-version={}", config.api_version);
        let accept = HeaderValue::from_str(&accept).map_err(|e| {
            AdoError::config(format!("invalid API version {:?}: {e}", config.api_version))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, accept);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AdoError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            pat: config.pat.clone(),
            policy,
            sleeper: Arc::new(std::thread::sleep),
        })
    }

    /// Replace the function used to wait between attempts.
    pub fn with_sleeper(mut self, sleeper: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Execute one logical API operation and decode its JSON response.
    ///
    /// # Errors
    ///
    /// - `RetryBudgetExhausted` when 5xx responses (or 429s past a configured
    ///   cap) outlast the retry budget.
    /// - `RequestFailed` on any other non-2xx status, on a transport failure
    ///   that outlasts the budget, or on an undecodable 2xx body.
    #[instrument(skip(self, query, body))]
    pub fn execute(
        &self,
        method: Method,
        endpoint: &str,
        query: QueryParams<'_>,
        body: Option<&Value>,
    ) -> AdoResult<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut attempt: u32 = 0;

        loop {
            debug!(attempt, "Sending request");
            let sent = self.request(method.clone(), &url, query, body).send();
            let outcome = Outcome::classify(sent);
            debug!(attempt, outcome = outcome.kind(), "Attempt finished");

            let delay = match outcome {
                Outcome::Success(bytes) => return decode_body(&bytes),

                Outcome::ClientError { status, body } => {
                    warn!("Request rejected with status {}", status);
                    return Err(AdoError::status(status, body));
                }

                Outcome::RateLimited { retry_after } => {
                    if !self.policy.allows_rate_limit_retry(attempt) {
                        return Err(AdoError::RetryBudgetExhausted {
                            attempts: attempt + 1,
                            last_status: Some(429),
                        });
                    }
                    let delay = self.policy.rate_limit_delay(attempt, retry_after);
                    warn!("Rate limited. Retrying after {:?}.", delay);
                    delay
                }

                Outcome::ServerError { status } => {
                    if !self.policy.allows_retry(attempt) {
                        return Err(AdoError::RetryBudgetExhausted {
                            attempts: attempt + 1,
                            last_status: Some(status),
                        });
                    }
                    let delay = self.policy.backoff(attempt);
                    warn!("Server error {}. Retrying in {:?}.", status, delay);
                    delay
                }

                Outcome::TransportFailure(source) => {
                    if !self.policy.allows_retry(attempt) {
                        return Err(AdoError::RequestFailed(RequestFailure::Transport {
                            retries: attempt,
                            source,
                        }));
                    }
                    let delay = self.policy.backoff(attempt);
                    warn!("Request error: {}. Retrying in {:?}.", source, delay);
                    delay
                }
            };

            (self.sleeper)(delay);
            attempt = attempt.saturating_add(1);
        }
    }

    /// Build one authenticated attempt.
    fn request(
        &self,
        method: Method,
        url: &str,
        query: QueryParams<'_>,
        body: Option<&Value>,
    ) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .basic_auth("", Some(&self.pat));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request
    }
}

/// Decode a 2xx body. An empty body decodes to `null`.
fn decode_body(bytes: &[u8]) -> AdoResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(bytes)?)
}
