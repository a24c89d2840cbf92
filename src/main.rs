use std::sync::Arc;

use noteful_server::{AppState, app, config, repository::PgRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });

    // Repository creation and migration
    let repo = PgRepository::connect(&cfg.pg_dsn, cfg.pool_size).unwrap_or_else(|e| {
        tracing::error!("Failed to create database pool: {e}");
        panic!("failed to create database pool: {e}");
    });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Router config
    let router = app(AppState::new(Arc::new(repo)), &cfg.api_prefix);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .expect("failed to bind to address");
    let addr = listener
        .local_addr()
        .expect("listener has no local address");

    tracing::info!("REST server starting, listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}
