//! WIQL work item search tool.
//!
//! Runs a WIQL query and returns the matching work item references.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{ToolDescriptor, schema_of};
use crate::domains::ado::{AdoClient, DEFAULT_TOP, WorkItemQueryResult};
use crate::domains::tools::ToolError;

fn default_top() -> u32 {
    DEFAULT_TOP
}

/// Parameters for a work item search.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct SearchWorkItemsParams {
    /// WIQL query to execute.
    #[schemars(description = "WIQL query to execute")]
    pub wiql: String,

    /// Maximum number of results. Zero sends no cap.
    #[schemars(description = "Maximum number of results to return")]
    #[serde(default = "default_top")]
    pub top: u32,
}

/// Work item search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchWorkItemsTool;

impl SearchWorkItemsTool {
    /// Tool name as exposed in the manifest and the route.
    pub const NAME: &'static str = "ado.search_work_items";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search for Azure DevOps work items using WIQL query";

    /// Extract parameters from raw tool arguments.
    pub fn parse_params(arguments: &Value) -> Result<SearchWorkItemsParams, ToolError> {
        let wiql = arguments
            .get("wiql")
            .and_then(Value::as_str)
            .filter(|q| !q.is_empty())
            .ok_or(ToolError::MissingArgument("wiql"))?
            .to_string();

        let top = match arguments.get("top") {
            None | Some(Value::Null) => DEFAULT_TOP,
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    ToolError::invalid_arguments("top must be a non-negative integer")
                })?,
        };

        Ok(SearchWorkItemsParams { wiql, top })
    }

    /// Execute the search.
    pub fn execute(
        params: &SearchWorkItemsParams,
        client: &AdoClient,
    ) -> Result<WorkItemQueryResult, ToolError> {
        info!("Searching work items (top = {})", params.top);
        Ok(client.wiql(&params.wiql, Some(params.top))?)
    }

    /// HTTP handler for this tool.
    pub fn http_handler(arguments: &Value, client: &AdoClient) -> Result<Value, ToolError> {
        let params = Self::parse_params(arguments)?;
        let result = Self::execute(&params, client)?;
        serde_json::to_value(result)
            .map_err(|e| ToolError::internal(format!("failed to encode result: {e}")))
    }

    /// Manifest entry for this tool.
    pub fn to_tool() -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            description: Self::DESCRIPTION,
            input_schema: schema_of::<SearchWorkItemsParams>(),
            output_schema: schema_of::<WorkItemQueryResult>(),
        }
    }
}
