//! Server Entry Point
//!
//! Loads configuration, initializes logging, builds the Azure DevOps client
//! and serves the HTTP routes.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use ado_mcp_server::core::{AdoServer, Config, HttpTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("failed to load configuration")?;

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Azure DevOps project: {}", config.ado.base_url());
    if let Some(limit) = config.ado.max_rate_limit_retries {
        info!("Rate-limited requests capped at {} retries", limit);
    }

    let transport = HttpTransport::new(config.transport.clone());

    // The blocking HTTP client must not be built on a runtime thread
    let server = tokio::task::spawn_blocking(move || AdoServer::from_config(config))
        .await
        .context("client setup task failed")??;

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" | "critical" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
