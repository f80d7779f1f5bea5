pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use sqlx::Connection;

use crate::core::config::{Role, Settings};
use crate::core::{state::AppState, telemetry};
use crate::services::ai_analysis::GeminiAnalysisService;
use crate::services::questions::PgQuestionStore;

/// Runs the question server until a shutdown signal arrives.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load(Role::Server)?;
    telemetry::init_tracing(&settings, "server")?;

    let db_pool = db::init_pool(&settings).await.context("Failed to connect to database")?;
    let analyzer = GeminiAnalysisService::from_settings(&settings)?;
    let state = AppState::new(
        settings,
        Arc::new(PgQuestionStore::new(db_pool.clone())),
        Arc::new(analyzer),
    );

    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "API ready"
    );

    let result =
        axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await;

    db_pool.close().await;
    tracing::info!("Database pool closed");

    result?;

    Ok(())
}

/// Replaces the question table with the contents of the configured data directory.
pub async fn run_loader() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load(Role::Loader)?;
    telemetry::init_tracing(&settings, "loader")?;

    let data_dir = settings.loader().data_dir.clone();
    tracing::info!(dir = %data_dir.display(), "Connecting to database");
    let mut conn = db::connect(&settings).await.context("Failed to connect to database")?;
    tracing::info!("Connected to database, starting to add data");

    let result = services::question_import::import_directory(&mut conn, &data_dir).await;

    if let Err(err) = conn.close().await {
        tracing::warn!(error = %err, "Failed to close database connection");
    }

    let summary = result.with_context(|| format!("Loading {} failed", data_dir.display()))?;
    tracing::info!(
        files = summary.files,
        inserted_rows = summary.inserted_rows,
        skipped_records = summary.skipped_records,
        "Done loading questions"
    );

    Ok(())
}
