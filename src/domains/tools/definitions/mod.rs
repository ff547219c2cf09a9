//! Tool definitions module.
//!
//! Each tool is defined in its own file and exposes `NAME`, `DESCRIPTION`,
//! `to_tool()` for the manifest and `http_handler()` for dispatch.

pub mod get_work_item;
pub mod search_work_items;

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

pub use get_work_item::{GetWorkItemParams, GetWorkItemTool};
pub use search_work_items::{SearchWorkItemsParams, SearchWorkItemsTool};

/// Manifest entry describing one tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// JSON schema of `T` as a plain JSON value.
pub(crate) fn schema_of<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}
