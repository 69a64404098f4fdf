//! specview - documentation server entry point

use anyhow::{Context, Result};
use axum::Router;
use specview_common::config::{Config, LoggingConfig};
use specview_ui::SwaggerUi;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting specview...");

    // Load the OpenAPI document
    let spec_yml = tokio::fs::read(&config.docs.spec_path)
        .await
        .with_context(|| format!("Failed to read spec {}", config.docs.spec_path.display()))?;
    let ui = SwaggerUi::from_config(&spec_yml, &config.docs)?;
    info!(
        "Loaded spec \"{}\" from {}",
        ui.title(),
        config.docs.spec_path.display()
    );

    let prefix = normalize_prefix(&config.docs.prefix);
    let app = build_app(ui.router()?, prefix.as_deref());

    let addr = config.server.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(
        "Serving docs on http://{}{}/swagger-ui/",
        addr,
        prefix.as_deref().unwrap_or_default()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("specview shutdown complete");

    Ok(())
}

/// Mount the documentation routes, nested under `prefix` when one is set
fn build_app(docs: Router, prefix: Option<&str>) -> Router {
    let app = match prefix {
        Some(prefix) => Router::new().nest(prefix, docs),
        None => docs,
    };

    app.layer(TraceLayer::new_for_http())
}

/// Nest prefix with a leading and no trailing slash; `None` for the root
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Filter used when `RUST_LOG` is unset: the configured level, with debug
/// output from our own crates
fn default_filter(level: &str) -> String {
    format!("{},specview=debug", level)
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
