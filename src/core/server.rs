//! Server facade shared by the HTTP handlers.
//!
//! Owns the configuration and the tool registry. The Azure DevOps client is
//! constructed once at startup and injected here; handlers never build one.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use super::config::Config;
use super::error::Result;
use crate::domains::ado::AdoClient;
use crate::domains::tools::{ToolError, ToolManifest, ToolRegistry};

/// The main server handler.
#[derive(Debug, Clone)]
pub struct AdoServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry dispatching tool calls to the client.
    registry: ToolRegistry,
}

impl AdoServer {
    /// Create a server around an already constructed client.
    pub fn new(config: Config, client: AdoClient) -> Self {
        Self {
            config: Arc::new(config),
            registry: ToolRegistry::new(Arc::new(client)),
        }
    }

    /// Create a server and its client from configuration.
    ///
    /// Builds a blocking HTTP client, so call it from a blocking context.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = AdoClient::new(&config.ado)?;
        Ok(Self::new(config, client))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// List all available tools.
    pub fn list_tools(&self) -> &'static ToolManifest {
        ToolRegistry::manifest()
    }

    /// Call a tool by name.
    ///
    /// The call runs on the blocking pool since the client sleeps between
    /// retries.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Value) -> std::result::Result<Value, ToolError> {
        let registry = self.registry.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || registry.call_tool(&name, &arguments))
            .await
            .map_err(|e| ToolError::internal(format!("tool task failed: {e}")))?
    }
}
