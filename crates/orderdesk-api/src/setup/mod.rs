//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;
use orderdesk_core::Config;
use orderdesk_db::PgOrderStore;
use orderdesk_storage::LocalStorage;

use crate::services::notifications::OrderNotifier;
use crate::state::AppState;

/// Public URL prefix uploaded images are served under.
pub const UPLOADS_PUBLIC_PREFIX: &str = "/uploads";

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first
    crate::telemetry::init_telemetry()?;

    tracing::info!("Configuration loaded");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup upload storage
    let storage = Arc::new(LocalStorage::new(&config.uploads_dir, UPLOADS_PUBLIC_PREFIX).await?);

    // Notification dispatch is optional; without SMTP the submit flow still
    // persists orders and responds normally.
    let notifier = OrderNotifier::from_config(&config);
    if notifier.is_none() {
        tracing::warn!("SMTP not fully configured, order notifications are disabled");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        orders: Arc::new(PgOrderStore::new(pool)),
        storage,
        notifier,
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
