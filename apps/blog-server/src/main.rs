//! # Simple Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use blog_core::ports::TokenService;
use blog_infra::DatabaseConnections;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;
mod views;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;
use views::Views;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logging first, so configuration warnings are not lost
    telemetry::init_telemetry(&TelemetryConfig::from_env());
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Simple Blog on {}:{}",
        config.host,
        config.port
    );

    let views = Views::load(&config.views_dir)
        .with_context(|| format!("loading templates from {}", config.views_dir))?;

    let connections = DatabaseConnections::init(&config.database)
        .await
        .context("connecting to the database")?;

    let state = AppState::from_config(&config, &connections, views);
    let tokens: Arc<dyn TokenService> = state.tokens.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(handlers::form_config())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("binding {}:{}", config.host, config.port))?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
