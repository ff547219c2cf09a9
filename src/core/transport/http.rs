//! HTTP transport implementation.
//!
//! Plain JSON routes: a health check, the tool manifest, and one route per
//! tool. Tool failures are rendered as `{"error": "<message>"}` with 400 for
//! bad input, 404 for unknown tools and 500 for everything from upstream.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::AdoServer;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::{GetWorkItemTool, SearchWorkItemsTool};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: AdoServer,
}

/// Query string of the work item fetch route.
#[derive(Debug, Default, Deserialize)]
pub struct FieldsQuery {
    pub fields: Option<String>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until the server stops.
    pub async fn run(self, server: AdoServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());
        let addr = self.address();
        let app = build_router(server, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Health: GET  /health");
        info!("  → Tools:  GET  /tools");
        info!("  → Search: POST {}", search_route());
        info!("  → Fetch:  GET  {}", get_work_item_route());

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

fn search_route() -> String {
    format!("/tool/{}", SearchWorkItemsTool::NAME)
}

fn get_work_item_route() -> String {
    format!("/tool/{}/{{id}}", GetWorkItemTool::NAME)
}

/// Build the router with all routes and layers.
pub fn build_router(server: AdoServer, enable_cors: bool) -> Router {
    let state = AppState { server };

    let mut app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/tools", get(list_tools))
        .route(&search_route(), post(search_work_items))
        .route(&get_work_item_route(), get(get_work_item))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "endpoints": {
            "health": "/health",
            "tools": "/tools",
            "search": search_route(),
            "get_work_item": get_work_item_route()
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Tool manifest endpoint.
async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.server.list_tools())
}

/// Search work items with a WIQL query.
///
/// An empty body counts as `{}`.
#[instrument(skip_all)]
async fn search_work_items(State(state): State<AppState>, body: Bytes) -> Response {
    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        json!({})
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => value,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}"));
            }
        }
    };

    render(
        state
            .server
            .call_tool(SearchWorkItemsTool::NAME, arguments)
            .await,
    )
}

/// Fetch a single work item.
#[instrument(skip(state, query))]
async fn get_work_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<FieldsQuery>,
) -> Response {
    let Ok(id) = id.parse::<u32>() else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("work item id must be an integer, got {id:?}"),
        );
    };

    let mut arguments = json!({ "id": id });
    if let Some(fields) = query.fields.filter(|f| !f.is_empty()) {
        arguments["fields"] = Value::String(fields);
    }

    render(state.server.call_tool(GetWorkItemTool::NAME, arguments).await)
}

/// Render a tool result as the response contract.
fn render(result: Result<Value, ToolError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(status_for(&e), e.to_string()),
    }
}

fn status_for(err: &ToolError) -> StatusCode {
    match err {
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        ToolError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
