mod config;
mod errors;
mod generation;
mod llm_client;
mod render;
mod routes;
mod state;

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{DeepSeekClient, FallbackGenerator, TextGenerator};
use crate::render::{find_browser, ChromePdfRenderer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{crate_name}={level},tower_http={level}",
                crate_name = env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Panics are logged; the panicking request gets a 500 from CatchPanicLayer
    std::panic::set_hook(Box::new(|panic| {
        error!("Uncaught panic: {panic}");
    }));

    info!("Starting Resume Builder API v{}", env!("CARGO_PKG_VERSION"));

    let generator = build_generator(&config);

    // PDF renderer: browser is located per request, warn early if none exists
    match find_browser(config.chrome_path.as_deref()) {
        Some(path) => info!("Chrome found at {}", path.display()),
        None => warn!("No Chrome executable found; /generate-pdf will fail until one is installed"),
    }
    let renderer = Arc::new(ChromePdfRenderer::new(config.chrome_path.clone()));

    let state = AppState {
        generator,
        renderer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = bind_with_retry(config.port).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Binds `port`, retrying once on `port + 1` if it is already taken.
async fn bind_with_retry(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            let next = port
                .checked_add(1)
                .with_context(|| format!("port {port} is in use and has no successor"))?;
            warn!("Port {port} is already in use. Trying {next}...");
            TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], next)))
                .await
                .with_context(|| format!("failed to bind port {next}"))
        }
        Err(e) => Err(e).with_context(|| format!("failed to bind port {port}")),
    }
}

/// Builds the completion gateway, degrading to `FallbackGenerator` if the
/// HTTP client cannot be constructed.
fn build_generator(config: &Config) -> Arc<dyn TextGenerator> {
    match DeepSeekClient::new(config) {
        Ok(client) => {
            if client.has_credential() {
                info!("LLM client initialized (model: {})", client.model());
            } else {
                warn!("DEEPSEEK_API_KEY not set; AI endpoints will return fallback text");
            }
            Arc::new(client)
        }
        Err(e) => {
            error!("Failed to build LLM client, using fallback generator: {e}");
            Arc::new(FallbackGenerator)
        }
    }
}
