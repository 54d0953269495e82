//! Pageshot HTTP service: configuration, routes and error mapping.
mod audit;
mod config;
mod error;
mod routes;

use anyhow::Context;
use pageshot_engine::CaptureService;
use pageshot_logging::shot_info;

pub use config::{Args, ServerConfig};
pub use error::ApiError;
pub use routes::{router, AppState};

/// Bind, serve until Ctrl-C, then return.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let images_dir = config.engine.images_dir.clone();
    let service = CaptureService::new(config.engine.clone())
        .with_context(|| format!("failed to prepare images directory {images_dir:?}"))?;

    let app = router(AppState::new(service, config.addr.to_string()), config.audit);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    shot_info!("listening on {}", config.addr);
    shot_info!("saving screenshots to {:?}", images_dir);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    shot_info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
