//! Stateless eligibility endpoint

use axum::{extract::State, Json};
use kanji_core::{Document, Eligibility};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/eligible
pub async fn eligible(
    State(state): State<AppState>,
    Json(payload): Json<EligibleRequest>,
) -> Result<Json<EligibleResponse>> {
    check_selection(&state.document, &payload.selection)?;

    let ids = state.eligibility.eligible_ids(&payload.selection);
    Ok(Json(EligibleResponse {
        count: ids.len(),
        ids: ids.to_vec(),
    }))
}

/// Reject selections naming filters the document does not define.
pub(crate) fn check_selection(document: &Document, selection: &FilterSelection) -> Result<()> {
    match selection
        .filter_names()
        .find(|name| !document.filters.contains_key(*name))
    {
        Some(name) => Err(ApiError::BadRequest(format!("Unknown filter: {}", name))),
        None => Ok(()),
    }
}
