//! REST Cache - cache-aside helpers over a REST key-value store
//!
//! # Startup Sequence
//! 1. Load `.env` (if present) and initialize tracing
//! 2. Load configuration from environment variables
//! 3. Build the store client and wrap it in the cache helpers
//! 4. Start the expiry sweep when running on the memory store
//! 5. Serve the Axum router until SIGINT/SIGTERM

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rest_cache::{api::create_router, AppState, Config, ConfiguredStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rest_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting REST cache service");
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    // The store can only be built from a loaded Config
    let config = Config::from_env().context("loading configuration")?;
    info!(
        "Configuration loaded: backend={:?}, default_ttl={}s, port={}, request_timeout={}s",
        config.backend, config.default_ttl, config.server_port, config.request_timeout
    );

    let store = ConfiguredStore::from_config(&config).context("building store client")?;
    let cleanup_handle = match &store {
        ConfiguredStore::Memory(memory) => {
            info!("Using in-memory store");
            Some(rest_cache::spawn_cleanup_task(
                memory.clone(),
                config.cleanup_interval,
            ))
        }
        ConfiguredStore::Rest(rest) => {
            info!("Using REST store at {}", rest.url());
            None
        }
    };

    let state = AppState::from_config(&config, store.shared());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    // REST transport is stateless; nothing to disconnect
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
