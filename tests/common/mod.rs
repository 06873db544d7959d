#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use invoice_desk::{
    app_router,
    clock::FixedClock,
    config::AppConfig,
    entities::invoice,
    AppState,
};
use lopdf::{content::Content, Document, Object};
use sea_orm::{EntityTrait, QueryOrder};
use tempfile::TempDir;
use tower::ServiceExt;

/// The instant every test invoice is stamped with.
pub fn fixed_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(14, 7, 9))
        .expect("valid fixed instant")
}

/// Helper harness: a temp output directory, a file-backed SQLite database and a frozen clock.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub config: AppConfig,
    dir: Arc<TempDir>,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = Arc::new(tempfile::tempdir().expect("create temp dir"));
        Self::start(dir).await
    }

    async fn start(dir: Arc<TempDir>) -> Self {
        let db_path = dir.path().join("invoices.db");
        let mut config = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            dir.path().join("static"),
        );
        config.environment = "test".to_string();
        config.db_max_connections = 1;
        config.db_min_connections = 1;

        let state = AppState::initialize_with_clock(
            config.clone(),
            Arc::new(FixedClock(fixed_instant())),
        )
        .await
        .expect("initialize application state");

        Self {
            router: app_router(state.clone()),
            state,
            config,
            dir,
        }
    }

    /// Stops the app, closes the database and starts again over the same files.
    pub async fn restart(self) -> Self {
        let Self {
            router, state, dir, ..
        } = self;
        drop(router);
        state.close().await.expect("close application state");
        Self::start(dir).await
    }

    pub fn invoice_path(&self) -> PathBuf {
        self.config.invoice_path()
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    pub async fn request(&self, method: Method, uri: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    /// Submits the invoice form as the browser would.
    pub async fn submit_form(&self, form_body: &str) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/invoices")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body.to_string()))
            .expect("build form request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    /// Posts to `/invoices` with an arbitrary (or missing) content type.
    pub async fn submit_raw(&self, content_type: Option<&str>, body: &str) -> Response {
        let mut builder = Request::builder().method(Method::POST).uri("/invoices");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("build raw request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    pub async fn stored_invoices(&self) -> Vec<invoice::Model> {
        invoice::Entity::find()
            .order_by_asc(invoice::Column::Id)
            .all(self.state.db.as_ref())
            .await
            .expect("query invoices")
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}

/// Text lines drawn on the single page of a PDF, in drawing order.
pub fn pdf_lines(pdf: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(pdf).expect("parse pdf");
    assert_eq!(doc.get_pages().len(), 1, "invoice should be one page");
    let page_id = *doc.get_pages().get(&1).expect("first page");
    let content = Content::decode(&doc.get_page_content(page_id).expect("page content"))
        .expect("decode content");
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}
