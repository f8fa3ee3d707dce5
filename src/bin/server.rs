//! HTTP server for the WACC calculator
//!
//! Serves `GET /api/wacc/` and `POST /api/wacc/payload`.
//! Configured through environment variables, see `AdapterConfig`.

use anyhow::Context;
use wacc_calculator::api::{build_router, AdapterConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AdapterConfig::from_env()?;
    log::info!(
        "CORS policy: {:?}, security headers: {:?}",
        config.cors,
        config.security_headers
    );

    let router = build_router(&config);
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    log::info!("Server running on {}", config.listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
