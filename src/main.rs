//! Post Proxy Server
//!
//! HTTP facade that proxies a blog post/comment API, configured via a JSON file

use anyhow::{Context, Result};
use postproxy::{create_router, version_info, AppConfig, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging()?;
    info!("{}", version_info());

    // Load server and upstream API configuration from JSON file (required)
    let app_config = AppConfig::load_default()
        .context("Failed to load configuration")?;

    info!("📁 Upstream API: {}", app_config.api.base_url);

    // Load additional settings from environment (logging, CORS)
    let settings = Settings::new().context("Failed to load server settings")?;
    info!("Server settings loaded");

    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);

    // Create router
    let app = create_router(settings, app_config).await?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Post proxy server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Posts endpoint: http://{}/posts", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging() -> Result<()> {
    // Get log level from environment variable, default to info
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Check if JSON format should be used
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if log_format == "json" {
        // JSON format logs (production environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .finish())
    } else {
        // Human readable format (development environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish())
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}
