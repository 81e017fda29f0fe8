//! Sangha Server Library
//!
//! Community club portal backend: membership application workflow,
//! role-gated back office, treasury ledger, notices, events, and a photo
//! gallery. This module exposes the server components for testing and
//! embedding.

pub mod api;
pub mod auth;
pub mod db;
pub mod error;
pub mod mail;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

use anyhow::Result;

/// Create and configure the server application
pub async fn create_app(config: state::Config) -> Result<(axum::Router, sqlx::SqlitePool)> {
    let db_pool = db::init_pool(&config.database_url).await?;
    db::run_migrations(&db_pool).await?;

    let mailer = mail::Mailer::new(config.mailer_config())?;
    let storage = storage::ObjectStorage::new(
        config.storage_bucket.clone(),
        config.storage_public_url.clone(),
    )
    .await;

    let app_state = state::AppState::new(config, db_pool.clone(), mailer, storage);
    let router = api::create_router(app_state);
    Ok((router, db_pool))
}
