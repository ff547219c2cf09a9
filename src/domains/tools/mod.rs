//! Tools domain module.
//!
//! Tools are the operations callers invoke over HTTP. Each one validates its
//! arguments, calls the Azure DevOps client and returns plain JSON.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool manifest and dispatch by name
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, `parse_params()`, `http_handler()` and `to_tool()`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs` (manifest and dispatch)
//! 5. Add a route in `core/transport/http.rs`

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::{ToolManifest, ToolRegistry};
