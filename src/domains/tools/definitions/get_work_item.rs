//! Single work item fetch tool.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::{ToolDescriptor, schema_of};
use crate::domains::ado::AdoClient;
use crate::domains::tools::ToolError;

/// Parameters for fetching one work item.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct GetWorkItemParams {
    /// Work item id.
    #[schemars(description = "The work item ID")]
    pub id: u32,

    /// Fields to retrieve; all fields when absent.
    #[schemars(description = "Optional list of fields to retrieve")]
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

/// Work item fetch tool implementation.
#[derive(Debug, Clone)]
pub struct GetWorkItemTool;

impl GetWorkItemTool {
    /// Tool name as exposed in the manifest and the route.
    pub const NAME: &'static str = "ado.get_work_item";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a specific Azure DevOps work item by ID";

    /// Extract parameters from raw tool arguments.
    ///
    /// `fields` may be an array of names or a comma-separated string.
    pub fn parse_params(arguments: &Value) -> Result<GetWorkItemParams, ToolError> {
        let id = match arguments.get("id") {
            None | Some(Value::Null) => return Err(ToolError::MissingArgument("id")),
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ToolError::invalid_arguments("id must be a positive integer"))?,
        };

        let fields = match arguments.get("fields") {
            None | Some(Value::Null) => None,
            Some(Value::String(list)) => Some(split_fields(list)),
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            ToolError::invalid_arguments("fields must be strings")
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(_) => {
                return Err(ToolError::invalid_arguments(
                    "fields must be an array or a comma-separated string",
                ));
            }
        };

        Ok(GetWorkItemParams { id, fields })
    }

    /// Fetch the work item.
    pub fn execute(params: &GetWorkItemParams, client: &AdoClient) -> Result<Value, ToolError> {
        info!("Fetching work item {}", params.id);
        Ok(client.get_work_item(params.id, params.fields.as_deref())?)
    }

    /// HTTP handler for this tool.
    pub fn http_handler(arguments: &Value, client: &AdoClient) -> Result<Value, ToolError> {
        let params = Self::parse_params(arguments)?;
        Self::execute(&params, client)
    }

    /// Manifest entry for this tool.
    pub fn to_tool() -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            description: Self::DESCRIPTION,
            input_schema: schema_of::<GetWorkItemParams>(),
            output_schema: json!({
                "type": "object",
                "description": "Full Azure DevOps work item JSON"
            }),
        }
    }
}

/// Split a comma-separated field list, dropping blanks.
pub fn split_fields(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id() {
        let err = GetWorkItemTool::parse_params(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), "id is required");
    }

    #[test]
    fn test_invalid_id() {
        let err = GetWorkItemTool::parse_params(&json!({"id": "abc"})).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_fields_from_string() {
        let params =
            GetWorkItemTool::parse_params(&json!({"id": 5, "fields": "System.Title, ,System.State"}))
                .unwrap();
        assert_eq!(
            params.fields,
            Some(vec!["System.Title".to_string(), "System.State".to_string()])
        );
    }

    #[test]
    fn test_fields_from_array() {
        let params =
            GetWorkItemTool::parse_params(&json!({"id": 5, "fields": ["System.Tags"]})).unwrap();
        assert_eq!(params.id, 5);
        assert_eq!(params.fields, Some(vec!["System.Tags".to_string()]));
    }

    #[test]
    fn test_input_schema_requires_id() {
        let tool = GetWorkItemTool::to_tool();
        assert_eq!(tool.input_schema["required"], json!(["id"]));
        assert!(tool.input_schema["properties"].get("fields").is_some());
    }
}
