use std::sync::Arc;

use api_rest::AppState;
use arogya_core::config::{
    catalog_file_from_env_value, namaste_system_uri_from_env_value,
    seed_demo_data_from_env_value,
};
use arogya_core::{
    CoreConfig, DEFAULT_REST_ADDR, ENV_CATALOG_FILE, ENV_NAMASTE_SYSTEM_URI, ENV_REST_ADDR,
    ENV_SEED_DEMO_DATA,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the Arogya portal
///
/// Starts the REST server (default `0.0.0.0:3000`) with the coding catalog and patient store
/// held in process memory. Everything resets on restart.
///
/// # Environment Variables
/// - `AROGYA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `AROGYA_CATALOG_FILE`: YAML catalog to load instead of the built-in table
/// - `AROGYA_SEED_DEMO_DATA`: seed demo patients and appointments (default: true)
/// - `NAMASTE_SYSTEM_URI`: FHIR system URI for the published CodeSystem
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - configuration values are invalid or the catalog file cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("arogya_run=info".parse()?)
                .add_directive("arogya_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var(ENV_REST_ADDR).unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let cfg = Arc::new(CoreConfig::new(
        catalog_file_from_env_value(std::env::var(ENV_CATALOG_FILE).ok()),
        seed_demo_data_from_env_value(std::env::var(ENV_SEED_DEMO_DATA).ok())?,
        namaste_system_uri_from_env_value(std::env::var(ENV_NAMASTE_SYSTEM_URI).ok()),
    )?);

    let catalog = Arc::new(cfg.load_catalog()?);
    let store = Arc::new(cfg.build_store(catalog.clone()));

    tracing::info!(
        "++ Catalog ready with {} entries, {} patients seeded",
        catalog.len(),
        store.list_patients()?.len()
    );
    tracing::info!("++ Starting Arogya REST on {}", rest_addr);

    let app = api_rest::router(AppState::new(cfg, store));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Arogya REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
