//! Azure DevOps tool server library.
//!
//! Exposes work item search and fetch as HTTP "tools" backed by the Azure
//! DevOps REST API, with a retrying request executor at its core.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server facade and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **ado**: Request executor with retry/backoff and work item operations
//!   - **tools**: Tool definitions, manifest and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use ado_mcp_server::domains::ado::AdoClient;
//! use ado_mcp_server::core::config::AdoConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AdoConfig::new("https://dev.azure.com/contoso", "Fabrikam", "my-pat")?;
//!     let client = AdoClient::new(&config)?;
//!     let result = client.wiql("SELECT [System.Id] FROM WorkItems", Some(10))?;
//!     println!("{} work items", result.count);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{AdoServer, Config, Error, Result};
