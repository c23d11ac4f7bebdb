//! HTTP server initialization and runtime setup.
//!
//! Handles session store setup and the Axum server lifecycle.

use crate::config::Config;
use crate::routes::app_router;
use crate::session::{MemoryStore, RedisStore, SessionBackend};
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Interval of the background sweep of expired in-memory sessions.
const MEMORY_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Builds the session store selected by the configuration.
///
/// Falls back to [`MemoryStore`] when Redis is configured but unreachable.
pub async fn build_session_store(config: &Config) -> SessionBackend {
    if let Some(redis_url) = &config.redis_url {
        match RedisStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Session store: Redis");
                return SessionBackend::Redis(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory sessions.", e);
            }
        }
    } else {
        tracing::info!("Session store: in-memory");
    }

    SessionBackend::Memory(MemoryStore::new())
}

/// Periodically drops expired sessions from an in-memory store.
///
/// Redis expires keys by itself, so nothing is spawned for it.
fn spawn_session_sweeper(store: &SessionBackend) {
    let SessionBackend::Memory(memory) = store else {
        return;
    };
    let memory = memory.clone();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(MEMORY_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            memory.delete_expired().await;
        }
    });
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Session store (Redis or in-memory fallback with a sweep task)
/// - Axum HTTP server with connect info for client IP resolution
///
/// Returns after a graceful shutdown on Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let sessions = build_session_store(&config).await;
    spawn_session_sweeper(&sessions);

    let state = AppState::new(Arc::new(sessions.clone()), config.session_settings());
    let app = app_router(state, sessions);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on the first Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received, draining connections");
}
