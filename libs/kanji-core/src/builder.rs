//! Builds a [`Document`] from a kanjidic TSV table.
//!
//! The transform is pure: identical input and options give an identical
//! document. Only the provenance timestamp comes from outside.

use std::cmp::Reverse;

use crate::document::Document;
use crate::error::Result;
use crate::parser::parse;
use crate::types::{DisplayMode, Entry, FieldGroup, FilterDefinition, FilterValue, KanjiRecord, Source};
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

/// Where the kanjidic data comes from.
pub const KANJIDIC_SOURCE_URL: &str = "http://www.edrdg.org/wiki/index.php/KANJIDIC_Project";

/// Provenance recorded in the built document.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub source_url: String,
    pub built_at: DateTime<Utc>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            source_url: KANJIDIC_SOURCE_URL.to_string(),
            built_at: Utc::now(),
        }
    }
}

/// Parse TSV content, sort it, assign ids and attach the static metadata.
pub fn build_document(content: &str, options: &BuildOptions) -> Result<Document> {
    let records = parse(content)?;
    tracing::debug!(rows = records.len(), "parsed kanjidic table");

    let entries = sort_entries(records);

    Ok(Document {
        source: Source {
            url: options.source_url.clone(),
            time: options.built_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        },
        groups: default_groups(),
        modes: default_modes(),
        filters: default_filters(),
        entries,
    })
}

/// Stable sort by study priority, then ids by final position.
///
/// Higher JLPT level first (missing counts as 0), then lower grade, then
/// lower SH KK reference; a missing grade or reference sorts last.
pub fn sort_entries(mut records: Vec<KanjiRecord>) -> Vec<Entry> {
    records.sort_by_key(sort_key);
    records
        .into_iter()
        .enumerate()
        .map(|(id, record)| Entry { id, record })
        .collect()
}

fn sort_key(record: &KanjiRecord) -> (Reverse<i64>, (bool, Option<i64>), (bool, Option<i64>)) {
    let last_if_missing = |v: Option<i64>| (v.is_none(), v);
    (
        Reverse(record.jlpt.unwrap_or(0)),
        last_if_missing(record.grade),
        last_if_missing(record.ref_sh_kk),
    )
}

fn labels(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(field, label)| (field.to_string(), label.to_string()))
        .collect()
}

fn names(groups: &[&str]) -> Vec<String> {
    groups.iter().map(|g| g.to_string()).collect()
}

/// Field groups shown on card faces.
pub fn default_groups() -> IndexMap<String, FieldGroup> {
    let mut groups = IndexMap::new();
    groups.insert(
        "Kanji".to_string(),
        FieldGroup {
            info: labels(&[("kanji", "Kanji")]),
            extra: labels(&[
                ("jlpt", "JLPT"),
                ("grade", "Grade"),
                ("freq", "Rank"),
                ("ref_sh_kk", "SH KK #"),
                ("strokes", "Strokes"),
            ]),
        },
    );
    groups.insert(
        "On Reading".to_string(),
        FieldGroup {
            info: labels(&[("on'yomi", "On")]),
            extra: IndexMap::new(),
        },
    );
    groups.insert(
        "Kun Reading".to_string(),
        FieldGroup {
            info: labels(&[("kun'yomi", "Kun")]),
            extra: IndexMap::new(),
        },
    );
    groups.insert(
        "Meanings".to_string(),
        FieldGroup {
            info: labels(&[("meanings", "Meanings")]),
            extra: IndexMap::new(),
        },
    );
    groups
}

/// Display modes; the first one is the default.
pub fn default_modes() -> IndexMap<String, DisplayMode> {
    let mut modes = IndexMap::new();
    modes.insert(
        "Kanji".to_string(),
        DisplayMode {
            front: names(&["Kanji"]),
            back: names(&["On Reading", "Kun Reading", "Meanings"]),
        },
    );
    modes.insert(
        "On Reading".to_string(),
        DisplayMode {
            front: names(&["On Reading"]),
            back: names(&["Kanji", "On Reading", "Kun Reading", "Meanings"]),
        },
    );
    modes.insert(
        "Kun Reading".to_string(),
        DisplayMode {
            front: names(&["Kun Reading"]),
            back: names(&["Kanji", "On Reading", "Kun Reading", "Meanings"]),
        },
    );
    modes.insert(
        "Meanings".to_string(),
        DisplayMode {
            front: names(&["Meanings"]),
            back: names(&["Kanji", "On Reading", "Kun Reading"]),
        },
    );
    modes
}

/// Checkbox filters offered to the user.
pub fn default_filters() -> IndexMap<String, FilterDefinition> {
    let mut filters = IndexMap::new();
    filters.insert(
        "JLPT".to_string(),
        FilterDefinition {
            field: "jlpt".to_string(),
            values: [4, 3, 2, 1]
                .into_iter()
                .map(|level| Some(FilterValue::Integer(level)))
                .chain(std::iter::once(None))
                .collect(),
        },
    );
    filters
}
