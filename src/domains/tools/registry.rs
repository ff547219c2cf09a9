//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The static tool manifest
//! - Dispatch of tool calls by name

use std::sync::{Arc, LazyLock};

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::ToolError;
use super::definitions::{GetWorkItemTool, SearchWorkItemsTool, ToolDescriptor};
use crate::domains::ado::AdoClient;

/// Catalog of available tools, as served by `GET /tools`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolManifest {
    pub tools: Vec<ToolDescriptor>,
}

static MANIFEST: LazyLock<ToolManifest> = LazyLock::new(|| ToolManifest {
    tools: vec![SearchWorkItemsTool::to_tool(), GetWorkItemTool::to_tool()],
});

/// Tool registry - dispatches tool calls to the Azure DevOps client.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: Arc<AdoClient>,
}

impl ToolRegistry {
    /// Create a new tool registry around a shared client.
    pub fn new(client: Arc<AdoClient>) -> Self {
        Self { client }
    }

    /// The tool manifest. Built on first use, never mutated.
    pub fn manifest() -> &'static ToolManifest {
        &MANIFEST
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Blocks for the full duration of the upstream call, retries included.
    pub fn call_tool(&self, name: &str, arguments: &Value) -> Result<Value, ToolError> {
        info!("Calling tool: {}", name);

        let result = match name {
            SearchWorkItemsTool::NAME => SearchWorkItemsTool::http_handler(arguments, &self.client),
            GetWorkItemTool::NAME => GetWorkItemTool::http_handler(arguments, &self.client),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        };

        if let Err(e) = &result {
            error!("Error calling tool {}: {}", name, e);
        }
        result
    }
}
