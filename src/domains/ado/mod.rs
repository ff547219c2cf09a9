//! Azure DevOps domain module.
//!
//! ## Architecture
//!
//! - `client.rs` - Authenticated request executor with retry/backoff
//! - `outcome.rs` - Classification of a single attempt
//! - `retry.rs` - Retry budget and backoff policy
//! - `work_items.rs` - WIQL query and work item fetch operations
//! - `endpoints.rs` - REST endpoint paths
//! - `error.rs` - Executor error types

mod client;
pub mod endpoints;
mod error;
mod outcome;
mod retry;
mod work_items;

pub use client::{AdoClient, QueryParams, Sleeper};
pub use error::{AdoError, AdoResult, RequestFailure};
pub use outcome::{Outcome, parse_retry_after};
pub use retry::{MAX_RETRIES, RETRY_BACKOFF_BASE, RetryPolicy};
pub use work_items::{DEFAULT_TOP, WorkItemQueryResult, WorkItemRef};
