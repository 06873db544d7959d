//! Invoice Desk
//!
//! A single-page form that renders a one-page PDF invoice, records it in
//! SQLite and streams the document back to the browser.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod clock;
pub mod config;
pub mod db;
pub mod download;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod rendering;
pub mod services;
pub mod tracing;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::Utc;
use clock::{Clock, SystemClock};
use rendering::InvoiceRenderer;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use services::{InvoiceRecordStore, InvoiceService};
use std::sync::Arc;

/// Process-wide resources, created once at startup and closed at shutdown.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub invoices: InvoiceService,
}

impl AppState {
    /// Creates the output directory, opens the database and ensures the table exists.
    pub async fn initialize(config: config::AppConfig) -> Result<Self, errors::ServiceError> {
        Self::initialize_with_clock(config, Arc::new(SystemClock)).await
    }

    pub async fn initialize_with_clock(
        config: config::AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, errors::ServiceError> {
        tokio::fs::create_dir_all(&config.output_dir).await?;

        let pool = db::establish_connection_from_app_config(&config).await?;
        db::run_migrations(&pool).await?;
        let db = Arc::new(pool);

        let invoices = InvoiceService::new(
            InvoiceRenderer::new(config.invoice_path()),
            InvoiceRecordStore::new(db.clone()),
            clock,
        );

        ::tracing::info!(
            output = %config.invoice_path().display(),
            "application state initialized"
        );

        Ok(Self {
            db,
            config,
            invoices,
        })
    }

    /// Closes the database pool. Call after the server has stopped.
    ///
    /// Closing shuts the shared pool, so any clone of this state still held
    /// elsewhere loses its connection too.
    pub async fn close(self) -> Result<(), errors::ServiceError> {
        let Self { db, invoices, .. } = self;
        drop(invoices);
        db::close_pool((*db).clone()).await
    }
}

// Common response wrappers
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Full HTTP surface: the form, the generate-and-download action, and health.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::form::invoice_form))
        .route("/invoices", post(handlers::invoices::generate_invoice))
        .route("/health", get(handlers::health::health_check))
        .route("/status", get(handlers::health::api_status))
        .layer(crate::tracing::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
