//! Core types for the kanji dictionary.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// One column of the fixed kanjidic schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Kanji,
    Strokes,
    Grade,
    Jlpt,
    Freq,
    RefShKk,
    OnYomi,
    KunYomi,
    Meanings,
}

impl Field {
    /// All schema fields in column order.
    pub const ALL: [Field; 9] = [
        Self::Kanji,
        Self::Strokes,
        Self::Grade,
        Self::Jlpt,
        Self::Freq,
        Self::RefShKk,
        Self::OnYomi,
        Self::KunYomi,
        Self::Meanings,
    ];

    /// Column / JSON key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kanji => "kanji",
            Self::Strokes => "strokes",
            Self::Grade => "grade",
            Self::Jlpt => "jlpt",
            Self::Freq => "freq",
            Self::RefShKk => "ref_sh_kk",
            Self::OnYomi => "on'yomi",
            Self::KunYomi => "kun'yomi",
            Self::Meanings => "meanings",
        }
    }

    /// Look up a field by its column name.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Kanji | Self::OnYomi | Self::KunYomi | Self::Meanings => FieldKind::Text,
            Self::Strokes | Self::Grade | Self::Jlpt | Self::Freq | Self::RefShKk => {
                FieldKind::Integer
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed, typed value of one field of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Missing,
}

impl FieldValue<'_> {
    /// True when there is nothing to show: no value, or empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Integer(_) => false,
            Self::Missing => true,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Missing => Ok(()),
        }
    }
}

/// One dictionary row as parsed from the source table (no id yet).
///
/// Text fields are kept verbatim; integer fields are `None` when the
/// source cell was empty, which is distinct from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiRecord {
    pub kanji: String,
    pub strokes: Option<i64>,
    pub grade: Option<i64>,
    pub jlpt: Option<i64>,
    pub freq: Option<i64>,
    pub ref_sh_kk: Option<i64>,
    #[serde(rename = "on'yomi")]
    pub on_yomi: String,
    #[serde(rename = "kun'yomi")]
    pub kun_yomi: String,
    pub meanings: String,
}

impl KanjiRecord {
    /// Typed value of a schema field.
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        let int = |v: Option<i64>| v.map_or(FieldValue::Missing, FieldValue::Integer);
        match field {
            Field::Kanji => FieldValue::Text(&self.kanji),
            Field::Strokes => int(self.strokes),
            Field::Grade => int(self.grade),
            Field::Jlpt => int(self.jlpt),
            Field::Freq => int(self.freq),
            Field::RefShKk => int(self.ref_sh_kk),
            Field::OnYomi => FieldValue::Text(&self.on_yomi),
            Field::KunYomi => FieldValue::Text(&self.kun_yomi),
            Field::Meanings => FieldValue::Text(&self.meanings),
        }
    }
}

/// Dictionary entry with its document-assigned id.
///
/// Ids are dense (0..N-1) and only meaningful relative to the document
/// that assigned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: usize,
    #[serde(flatten)]
    pub record: KanjiRecord,
}

impl Entry {
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        self.record.value(field)
    }
}

/// Named set of fields shown together on a card face.
///
/// Keys are field names, values are display labels; order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub info: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// Front/back arrangement of field groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMode {
    pub front: Vec<String>,
    pub back: Vec<String>,
}

/// A recognized filter value. `None` in a value list is the "other" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
}

impl FilterValue {
    /// Whether an entry's field value is this exact value.
    pub fn matches(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Self::Integer(a), FieldValue::Integer(b)) => a == b,
            (Self::Text(a), FieldValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Filter bound to one field, with the values offered as checkboxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub field: String,
    pub values: Vec<Option<FilterValue>>,
}

impl FilterDefinition {
    /// Recognized value an entry's field value falls under, if any.
    pub fn recognize(&self, value: &FieldValue<'_>) -> Option<&FilterValue> {
        self.values.iter().flatten().find(|v| v.matches(value))
    }
}

/// Build provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub time: String,
}
