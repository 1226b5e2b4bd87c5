//! boxoffice-api - Box office aggregation service
//!
//! Fetches movie records from the upstream provider on every request and
//! serves derived views over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use boxoffice_api::pipeline::Pipeline;
use boxoffice_api::upstream::UpstreamClient;
use boxoffice_api::{build_router, AppState};
use boxoffice_common::config::{load_toml_config, ConfigOverrides, ServiceConfig};
use boxoffice_common::TracingObserver;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for boxoffice-api
#[derive(Parser, Debug)]
#[command(name = "boxoffice-api")]
#[command(about = "Box office aggregation service")]
#[command(version)]
struct Args {
    /// Upstream provider API key
    #[arg(long, env = "RAPID_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Upstream endpoint URL
    #[arg(long, env = "BOXOFFICE_UPSTREAM_URL")]
    upstream_url: Option<String>,

    /// Value of the x-rapidapi-host header
    #[arg(long, env = "BOXOFFICE_UPSTREAM_HOST")]
    upstream_host: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "BOXOFFICE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Address to bind
    #[arg(short, long, env = "BOXOFFICE_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "BOXOFFICE_PORT")]
    port: Option<u16>,

    /// Path to config.toml (also BOXOFFICE_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            upstream_url: self.upstream_url.clone(),
            upstream_host: self.upstream_host.clone(),
            timeout_secs: self.timeout_secs,
            bind: self.bind.clone(),
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxoffice_api=info,boxoffice_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting boxoffice-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let file_config =
        load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let config = ServiceConfig::resolve(args.overrides(), file_config)
        .context("Invalid configuration")?;
    info!("Upstream: {} (timeout {:?})", config.upstream.base_url, config.upstream.timeout);

    let client = UpstreamClient::new(config.upstream.clone())
        .context("Failed to initialize upstream client")?;
    let pipeline = Pipeline::new(client, Arc::new(TracingObserver));
    let app = build_router(AppState::new(pipeline));

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("boxoffice-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
