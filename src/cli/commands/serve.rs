use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::app::{app, cors_layer, AppState};
use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::database::{connect_pool, PgPostStore};

pub async fn handle(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = port {
        config.api.port = port;
    }
    info!("Starting Posts API in {:?} mode", config.environment);

    let pool = connect_pool(&config.database)
        .await
        .context("failed to connect to database")?;

    let state = AppState::new(
        Arc::new(PgPostStore::new(pool.clone())),
        TokenVerifier::from_config(&config.security),
    );
    let router = app(state, &config.api, cors_layer(&config.security));

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Posts API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Closed database pool");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
