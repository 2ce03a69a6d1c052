//! API request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from kanji-core
pub use kanji_core::{
    CardFaces, CurrentCard, Entry, FilterSelection, FilterValue, Source, StudySession,
};

/// A live session as held by the server.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: Uuid,
    pub session: StudySession,
    pub started_at: DateTime<Utc>,
}

// Document types
#[derive(Debug, Serialize, Deserialize)]
pub struct NamedFilter {
    pub name: String,
    pub field: String,
    pub values: Vec<Option<FilterValue>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentSummaryResponse {
    pub source: Source,
    pub fingerprint: String,
    pub entry_count: usize,
    pub modes: Vec<String>,
    pub filters: Vec<NamedFilter>,
}

// Eligibility types
#[derive(Debug, Serialize, Deserialize)]
pub struct EligibleRequest {
    #[serde(default)]
    pub selection: FilterSelection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EligibleResponse {
    pub count: usize,
    pub ids: Vec<usize>,
}

// Session types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub mode: Option<String>,
    pub selection: Option<FilterSelection>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSelectionRequest {
    pub selection: FilterSelection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateModeRequest {
    pub mode: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub mode: String,
    pub selection: FilterSelection,
    pub current: CurrentCard,
    pub current_card_id: Option<usize>,
    pub eligible_count: usize,
    pub fingerprint: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    pub card_id: Option<usize>,
    pub entry: Option<Entry>,
    pub faces: Option<CardFaces>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub session_id: Uuid,
}
