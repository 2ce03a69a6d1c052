pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Router,
};
use kanji_core::{Document, DocumentError, EligibilityCache};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::sessions::SessionStore;

/// Shared application state
///
/// The document is read-only and shared by every session; session state
/// lives in the store, one record per session.
#[derive(Clone)]
pub struct AppState {
    pub document: Arc<Document>,
    pub eligibility: Arc<EligibilityCache>,
    pub sessions: Arc<SessionStore>,
    pub fingerprint: Arc<str>,
}

impl AppState {
    pub fn new(document: Document, cache_capacity: usize) -> Result<Self, DocumentError> {
        let fingerprint: Arc<str> = document.fingerprint()?.into();
        let document = Arc::new(document);
        Ok(Self {
            eligibility: Arc::new(EligibilityCache::new(document.clone(), cache_capacity)),
            document,
            sessions: Arc::new(SessionStore::new()),
            fingerprint,
        })
    }
}

/// All API routes bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Document routes
        .route("/api/document", get(routes::document::get))
        .route("/api/document/summary", get(routes::document::summary))
        .route("/api/eligible", post(routes::eligible::eligible))
        // Session routes
        .route("/api/sessions", post(routes::sessions::create))
        .route(
            "/api/sessions/{id}",
            get(routes::sessions::get).delete(routes::sessions::end),
        )
        .route(
            "/api/sessions/{id}/selection",
            put(routes::sessions::update_selection),
        )
        .route("/api/sessions/{id}/mode", put(routes::sessions::update_mode))
        .route("/api/sessions/{id}/next", post(routes::sessions::next))
        .route("/api/sessions/{id}/card", get(routes::sessions::card))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading document from {}...", config.document_path.display());
    let document = Document::load(&config.document_path)
        .with_context(|| format!("failed to load {}", config.document_path.display()))?;

    let state = AppState::new(document, config.cache_capacity)?;
    tracing::info!(
        entries = state.document.entries.len(),
        fingerprint = %state.fingerprint,
        "Document loaded"
    );

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
