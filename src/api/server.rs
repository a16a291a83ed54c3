//! Server lifecycle — bind, serve, shut down on ctrl-c.

use std::net::SocketAddr;

use crate::config::Config;
use crate::report::InteractionChecker;

use super::router::{api_router, ApiContext};

/// Bind and serve the API until interrupted.
pub async fn run(config: Config) -> Result<(), String> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    // Blocking HTTP clients must not be constructed on the async runtime.
    let checker_config = config.clone();
    let checker = tokio::task::spawn_blocking(move || {
        InteractionChecker::from_config(&checker_config)
    })
    .await
    .map_err(|e| format!("Failed to initialize pipeline: {e}"))?;

    let app = api_router(ApiContext::new(checker, config.clone()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    tracing::info!(
        %addr,
        model = %config.model,
        api_configured = config.api_configured(),
        "DrugSafe server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
