//! Seeding CLI tool. Safe to run repeatedly.

use std::sync::Arc;

use anyhow::Context;
use blog_core::services::Seeder;
use blog_infra::database::{SeaCommentRepository, SeaPostRepository, SeaUserRepository};
use blog_infra::{Argon2PasswordService, DatabaseConfig, DatabaseConnections};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DatabaseConfig::from_env();
    let connections = DatabaseConnections::init(&config)
        .await
        .context("connecting to the database")?;
    let db = connections.main;

    let seeder = Seeder::new(
        Arc::new(SeaUserRepository::new(db.clone())),
        Arc::new(SeaPostRepository::new(db.clone())),
        Arc::new(SeaCommentRepository::new(db)),
        Arc::new(Argon2PasswordService::new()),
    );

    let report = seeder.run().await.context("seeding the database")?;
    tracing::info!(?report, "Seeding finished");
    Ok(())
}
