//! Medibot API server binary.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use medibot::adapters::{app_router, AppState, GeminiConfig, GeminiProvider, PostgresStore};
use medibot::config::{AppConfig, ConfigError, ValidationError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    init_tracing(&config);

    let addr = config.server.socket_addr()?;
    info!(
        environment = ?config.server.environment,
        model = %config.ai.model,
        "Starting medibot"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let api_key = config
        .ai
        .gemini_api_key
        .as_ref()
        .ok_or(ValidationError::MissingRequired("MEDIBOT__AI__GEMINI_API_KEY"))?;
    let gemini = GeminiProvider::new(
        GeminiConfig::new(api_key.expose_secret().clone())
            .with_base_url(config.ai.base_url.clone())
            .with_model(config.ai.model.clone())
            .with_timeout(config.ai.timeout())
            .with_generation(config.ai.generation_config()),
    )?;

    let state = AppState::new(Arc::new(PostgresStore::new(pool)), Arc::new(gemini));
    let app = app_router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `server.log_level`;
/// production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
