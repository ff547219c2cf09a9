//! Domains module containing business logic organized by bounded contexts.
//!
//! - `ado` talks to the Azure DevOps REST API.
//! - `tools` turns tool calls into `ado` operations and back into JSON.

pub mod ado;
pub mod tools;
