use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use sp_api::middleware::create_cors;
use sp_api::telemetry::init_tracing;
use sp_api::{configure, DefaultAppState};
use sp_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    tracing::info!(environment = %config.environment, "Starting SkyPark API server");

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("Using the default development JWT secret; set JWT_SECRET before deploying");
    }

    let state = web::Data::new(DefaultAppState::from_config(&config));
    tracing::info!(
        sms_provider = %config.sms.provider,
        "Authentication services initialised"
    );

    let _sweeper = Arc::new(state.cleanup_service()).start_background_task();

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Binding HTTP server");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors())
            .wrap(TracingLogger::default())
            .configure(configure(state.clone()))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
