//! Work item operations built on the request executor.
//!
//! These only shape request payloads and pick fields out of responses;
//! retry and error classification stay in [`AdoClient::execute`].

use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::client::AdoClient;
use super::endpoints;
use super::error::AdoResult;

/// Result cap applied to WIQL queries when the caller gives none.
pub const DEFAULT_TOP: u32 = 100;

/// Reference to a work item returned by a WIQL query.
///
/// Entries are passed through as the service sent them; a missing `id`
/// stays `null` rather than failing the whole query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkItemRef {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub url: String,
}

/// Shaped result of a WIQL query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkItemQueryResult {
    #[serde(rename = "workItems")]
    pub items: Vec<WorkItemRef>,
    pub count: usize,
}

impl WorkItemQueryResult {
    fn new(items: Vec<WorkItemRef>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

#[derive(Deserialize)]
struct WiqlResponse {
    #[serde(rename = "workItems")]
    work_items: Option<Vec<WorkItemRef>>,
}

/// Query parameters for a WIQL call. A cap of zero is left out entirely.
pub fn wiql_query_params(top: u32) -> Vec<(&'static str, String)> {
    if top == 0 {
        Vec::new()
    } else {
        vec![("$top", top.to_string())]
    }
}

/// Query parameters for a single work item fetch.
pub fn fields_query_params(fields: Option<&[String]>) -> Vec<(&'static str, String)> {
    match fields {
        Some(fields) if !fields.is_empty() => vec![("fields", fields.join(","))],
        _ => Vec::new(),
    }
}

/// Body of a batch fetch. `fields` is only sent when non-empty.
pub fn batch_body(ids: &[u32], fields: Option<&[String]>) -> Value {
    let mut body = json!({ "ids": ids });
    if let Some(fields) = fields.filter(|f| !f.is_empty()) {
        body["fields"] = json!(fields);
    }
    body
}

/// Extract `{id, url}` pairs from a raw WIQL response.
pub fn shape_query_result(raw: Value) -> AdoResult<WorkItemQueryResult> {
    if raw.is_null() {
        return Ok(WorkItemQueryResult::new(Vec::new()));
    }
    let response: WiqlResponse = serde_json::from_value(raw)?;
    Ok(WorkItemQueryResult::new(
        response.work_items.unwrap_or_default(),
    ))
}

impl AdoClient {
    /// Run a WIQL query. `None` applies [`DEFAULT_TOP`].
    pub fn wiql(&self, query: &str, top: Option<u32>) -> AdoResult<WorkItemQueryResult> {
        let top = top.unwrap_or(DEFAULT_TOP);
        let params = wiql_query_params(top);
        let body = json!({ "query": query });

        let raw = self.execute(Method::POST, endpoints::WIQL, &params, Some(&body))?;
        let result = shape_query_result(raw)?;

        info!("WIQL query returned {} work item(s)", result.count);
        Ok(result)
    }

    /// Fetch one work item, optionally limited to `fields`.
    pub fn get_work_item(&self, id: u32, fields: Option<&[String]>) -> AdoResult<Value> {
        let params = fields_query_params(fields);
        self.execute(Method::GET, &endpoints::work_item(id), &params, None)
    }

    /// Fetch several work items in one call.
    pub fn get_work_items_batch(&self, ids: &[u32], fields: Option<&[String]>) -> AdoResult<Value> {
        let body = batch_body(ids, fields);
        self.execute(Method::POST, endpoints::WORK_ITEMS_BATCH, &[], Some(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ado::client::tests::recording_client;
    use crate::domains::ado::retry::RetryPolicy;
    use mockito::{Matcher, Server};

    #[test]
    fn test_wiql_params_omit_zero_top() {
        assert!(wiql_query_params(0).is_empty());
        assert_eq!(wiql_query_params(5), vec![("$top", "5".to_string())]);
    }

    #[test]
    fn test_fields_params() {
        let fields = vec!["System.Id".to_string(), "System.Title".to_string()];
        assert_eq!(
            fields_query_params(Some(fields.as_slice())),
            vec![("fields", "System.Id,System.Title".to_string())]
        );
        assert!(fields_query_params(Some(&[] as &[String])).is_empty());
        assert!(fields_query_params(None).is_empty());
    }

    #[test]
    fn test_batch_body_skips_empty_fields() {
        assert_eq!(batch_body(&[1, 2], None), json!({"ids": [1, 2]}));
        assert_eq!(batch_body(&[1], Some(&[] as &[String])), json!({"ids": [1]}));
        let fields = vec!["System.State".to_string()];
        assert_eq!(
            batch_body(&[3], Some(fields.as_slice())),
            json!({"ids": [3], "fields": ["System.State"]})
        );
    }

    #[test]
    fn test_shape_missing_work_items() {
        let result = shape_query_result(json!({"queryType": "flat"})).unwrap();
        assert_eq!(result.items, Vec::new());
        assert_eq!(result.count, 0);

        let result = shape_query_result(json!({"workItems": null})).unwrap();
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_shape_keeps_order() {
        let raw = json!({
            "workItems": [
                {"id": 3, "url": "https://x/3"},
                {"id": 1, "url": "https://x/1"}
            ]
        });
        let result = shape_query_result(raw).unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.items[0].id, Some(3));
        assert_eq!(result.items[1].url, "https://x/1");
    }

    #[test]
    fn test_shape_tolerates_entry_without_id() {
        let raw = json!({
            "workItems": [
                {"url": "https://x/orphan"},
                {"id": 8, "url": "https://x/8"}
            ]
        });
        let result = shape_query_result(raw).unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.items[0].id, None);
        assert_eq!(result.items[0].url, "https://x/orphan");
        assert_eq!(result.items[1].id, Some(8));
        assert_eq!(
            serde_json::to_value(&result).unwrap()["workItems"][0],
            json!({"id": null, "url": "https://x/orphan"})
        );
    }

    #[test]
    fn test_query_result_serializes_with_work_items_key() {
        let result = WorkItemQueryResult::new(vec![WorkItemRef {
            id: Some(1),
            url: "u".into(),
        }]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"workItems": [{"id": 1, "url": "u"}], "count": 1})
        );
    }

    #[test]
    fn test_wiql_call() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/proj/_apis/wit/wiql")
            .match_query(Matcher::UrlEncoded("$top".into(), "100".into()))
            .match_body(Matcher::Json(json!({"query": "SELECT [System.Id] FROM WorkItems"})))
            .with_status(200)
            .with_body(r#"{"workItems": [{"id": 42, "url": "https://dev.azure.com/_apis/wit/workItems/42"}]}"#)
            .create();

        let (client, _) = recording_client(&server.url(), RetryPolicy::default());
        let result = client
            .wiql("SELECT [System.Id] FROM WorkItems", None)
            .unwrap();

        assert_eq!(result.count, 1);
        assert_eq!(result.items[0].id, Some(42));
        mock.assert();
    }

    #[test]
    fn test_get_work_item_with_fields() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/proj/_apis/wit/workitems/42")
            .match_query(Matcher::UrlEncoded(
                "fields".into(),
                "System.Title,System.State".into(),
            ))
            .with_status(200)
            .with_body(r#"{"id": 42, "fields": {"System.Title": "Fix it"}}"#)
            .create();

        let (client, _) = recording_client(&server.url(), RetryPolicy::default());
        let fields = vec!["System.Title".to_string(), "System.State".to_string()];
        let item = client.get_work_item(42, Some(fields.as_slice())).unwrap();

        assert_eq!(item["fields"]["System.Title"], "Fix it");
        mock.assert();
    }

    #[test]
    fn test_get_work_items_batch() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/proj/_apis/wit/workitemsbatch")
            .match_body(Matcher::Json(json!({"ids": [1, 2]})))
            .with_status(200)
            .with_body(r#"{"count": 2, "value": [{"id": 1}, {"id": 2}]}"#)
            .create();

        let (client, _) = recording_client(&server.url(), RetryPolicy::default());
        let raw = client.get_work_items_batch(&[1, 2], None).unwrap();

        assert_eq!(raw["count"], 2);
        mock.assert();
    }

    #[test]
    fn test_errors_propagate_unchanged() {
        let mut server = Server::new();
        server
            .mock("GET", "/proj/_apis/wit/workitems/9")
            .with_status(401)
            .create();

        let (client, _) = recording_client(&server.url(), RetryPolicy::default());
        let err = client.get_work_item(9, None).unwrap_err();
        assert_eq!(err.status_code(), Some(401));
    }
}
