//! Core kanji flashcard library shared by the builder and the backend.
//!
//! Provides:
//! - TSV parser and document builder for kanjidic tables
//! - The study document model (entries, groups, modes, filters)
//! - Filter engine deciding which entries are eligible
//! - Random card selection and per-session study state
//! - Mapping of entries onto card faces

pub mod builder;
pub mod document;
pub mod error;
pub mod filter;
pub mod parser;
pub mod presentation;
pub mod session;
pub mod types;

pub use builder::{build_document, sort_entries, BuildOptions, KANJIDIC_SOURCE_URL};
pub use document::Document;
pub use error::{BuildError, DocumentError, Result, SchemaMismatch, SessionError};
pub use filter::{
    eligible_entries, eligible_ids, Eligibility, EligibilityCache, FilterSelection, ValueChoices,
};
pub use parser::parse;
pub use presentation::{map_for_display, CardFaces, DisplayField, DisplayGroup};
pub use session::{pick_card, pick_id, CurrentCard, StudySession};
pub use types::{
    DisplayMode, Entry, Field, FieldGroup, FieldKind, FieldValue, FilterDefinition, FilterValue,
    KanjiRecord, Source,
};
