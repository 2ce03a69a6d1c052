//! Document endpoints

use axum::{extract::State, Json};

use crate::models::*;
use crate::AppState;
use kanji_core::Document;

/// GET /api/document
pub async fn get(State(state): State<AppState>) -> Json<Document> {
    Json(state.document.as_ref().clone())
}

/// GET /api/document/summary
pub async fn summary(State(state): State<AppState>) -> Json<DocumentSummaryResponse> {
    let document = &state.document;
    Json(DocumentSummaryResponse {
        source: document.source.clone(),
        fingerprint: state.fingerprint.to_string(),
        entry_count: document.entries.len(),
        modes: document.modes.keys().cloned().collect(),
        filters: document
            .filters
            .iter()
            .map(|(name, filter)| NamedFilter {
                name: name.clone(),
                field: filter.field.clone(),
                values: filter.values.clone(),
            })
            .collect(),
    })
}
