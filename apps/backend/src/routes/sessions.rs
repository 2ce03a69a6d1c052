//! Study session endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use kanji_core::{map_for_display, SessionError};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::eligible::check_selection;
use crate::AppState;

fn view(state: &AppState, record: &SessionRecord) -> SessionView {
    let session = &record.session;
    SessionView {
        session_id: record.id,
        mode: session.mode.clone(),
        selection: session.selection.clone(),
        current: session.current,
        current_card_id: session.current.card_id(),
        eligible_count: session.eligible_count(state.eligibility.as_ref()),
        fingerprint: state.fingerprint.to_string(),
        started_at: record.started_at,
    }
}

/// POST /api/sessions
/// Starts a session and draws its first card
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Option<CreateSessionRequest>>,
) -> Result<Json<SessionView>> {
    let payload = payload.unwrap_or_default();

    let selection = match payload.selection {
        Some(selection) => {
            check_selection(&state.document, &selection)?;
            selection
        }
        None => FilterSelection::all_included(&state.document),
    };

    let session = StudySession::start(
        state.eligibility.as_ref(),
        selection,
        payload.mode,
        &mut rand::rng(),
    )?;
    let record = state.sessions.insert(session).await;

    Ok(Json(view(&state, &record)))
}

/// GET /api/sessions/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let record = state.sessions.get(id).await?;
    Ok(Json(view(&state, &record)))
}

/// PUT /api/sessions/{id}/selection
/// Replaces the filter selection; takes effect on the next draw
pub async fn update_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSelectionRequest>,
) -> Result<Json<SessionView>> {
    check_selection(&state.document, &payload.selection)?;

    let record = state
        .sessions
        .update(id, |session| Ok(session.with_selection(payload.selection)))
        .await?;
    Ok(Json(view(&state, &record)))
}

/// PUT /api/sessions/{id}/mode
pub async fn update_mode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateModeRequest>,
) -> Result<Json<SessionView>> {
    let eligibility = state.eligibility.as_ref();
    let record = state
        .sessions
        .update(id, |session| {
            session
                .with_mode(eligibility, payload.mode)
                .map_err(ApiError::from)
        })
        .await?;
    Ok(Json(view(&state, &record)))
}

/// POST /api/sessions/{id}/next
/// Recomputes eligibility and draws a new card
pub async fn next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let eligibility = state.eligibility.as_ref();
    let record = state
        .sessions
        .update(id, |session| {
            Ok(session.request_next_card(eligibility, &mut rand::rng()))
        })
        .await?;

    tracing::debug!(
        "Session {} now at card {:?}",
        id,
        record.session.current.card_id()
    );
    Ok(Json(view(&state, &record)))
}

/// GET /api/sessions/{id}/card
/// Current card laid out for the session's mode; all fields null when no
/// card is selected
pub async fn card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CardResponse>> {
    let record = state.sessions.get(id).await?;
    let session = &record.session;

    let Some(card_id) = session.current.card_id() else {
        return Ok(Json(CardResponse {
            card_id: None,
            entry: None,
            faces: None,
        }));
    };

    let entry = state
        .document
        .entry(card_id)
        .ok_or(SessionError::UnknownCard { id: card_id })?;
    let faces = map_for_display(&state.document, &session.mode, entry)?;

    Ok(Json(CardResponse {
        card_id: Some(card_id),
        entry: Some(entry.clone()),
        faces: Some(faces),
    }))
}

/// DELETE /api/sessions/{id}
pub async fn end(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EndSessionResponse>> {
    let record = state.sessions.remove(id).await?;
    Ok(Json(EndSessionResponse {
        session_id: record.id,
    }))
}
