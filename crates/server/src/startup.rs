use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{storage::JsonFileBackend, TeacherStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::{StartupError, StatusPolicy};
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {raw}: {e}")))
}

/// Open the configured JSON file and build the router around it.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let data_file = Path::new(&cfg.storage.path);
    // creates the parent directory
    let backend = JsonFileBackend::new(data_file, cfg.storage.pretty).await?;
    common::env::ensure_env(data_file).await?;

    let store = TeacherStore::new(Arc::new(backend));
    // fail at startup rather than on the first request if the file is unreadable
    let existing = store.list().await?;

    let policy = StatusPolicy::from_legacy_flag(cfg.server.legacy_status_codes);
    info!(path = %data_file.display(), teachers = existing.len(), ?policy, "teacher store ready");

    Ok(routes::build_router(AppState::new(store, policy), build_cors()))
}

/// Build the app and serve it until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;

    info!(%addr, "starting teacher registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server drained");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}
