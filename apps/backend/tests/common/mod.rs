//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping an in-memory document and the API router
//! - Helpers for creating sessions through the API

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;

use kanji_core::Document;
use kanji_flashcards_backend::{router, AppState};

/// Test context holding application state built from a fixture document.
pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    /// Context over the standard fixture document.
    pub fn new() -> Self {
        Self::with_document(fixtures::sample_document())
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            state: AppState::new(document, 16).unwrap(),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Start a session and return its id as a string.
    pub async fn create_session(server: &TestServer, body: serde_json::Value) -> String {
        let response = server.post("/api/sessions").json(&body).await;
        response.assert_status_ok();
        let view: serde_json::Value = response.json();
        view["session_id"].as_str().unwrap().to_string()
    }
}
