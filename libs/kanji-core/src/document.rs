//! The static study document: entries plus display and filter metadata.

use crate::error::DocumentError;
use crate::types::{DisplayMode, Entry, Field, FieldGroup, FilterDefinition, Source};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Self-describing document produced by the builder and read at query time.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub source: Source,
    pub groups: IndexMap<String, FieldGroup>,
    pub modes: IndexMap<String, DisplayMode>,
    pub filters: IndexMap<String, FilterDefinition>,
    pub entries: Vec<Entry>,
}

impl Document {
    /// Parse and validate a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Read, parse and validate a document file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize with one-space indentation, non-ASCII kept verbatim.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Check metadata against the schema and ids against entry positions.
    pub fn validate(&self) -> Result<(), DocumentError> {
        for (name, filter) in &self.filters {
            if Field::from_str(&filter.field).is_none() {
                return Err(DocumentError::UnknownFilterField {
                    filter: name.clone(),
                    field: filter.field.clone(),
                });
            }
        }

        for (name, group) in &self.groups {
            if let Some(field) = group
                .info
                .keys()
                .chain(group.extra.keys())
                .find(|f| Field::from_str(f).is_none())
            {
                return Err(DocumentError::UnknownGroupField {
                    group: name.clone(),
                    field: field.clone(),
                });
            }
        }

        for (name, mode) in &self.modes {
            if let Some(group) = mode
                .front
                .iter()
                .chain(&mode.back)
                .find(|g| !self.groups.contains_key(*g))
            {
                return Err(DocumentError::UnknownGroup {
                    mode: name.clone(),
                    group: group.clone(),
                });
            }
        }

        if let Some((position, entry)) = self
            .entries
            .iter()
            .enumerate()
            .find(|(position, entry)| entry.id != *position)
        {
            return Err(DocumentError::InvalidEntryIds {
                position,
                id: entry.id,
            });
        }

        Ok(())
    }

    /// Entry by id. Ids equal positions in a validated document.
    pub fn entry(&self, id: usize) -> Option<&Entry> {
        self.entries.get(id).filter(|e| e.id == id)
    }

    /// The mode a new session starts in.
    pub fn default_mode(&self) -> Option<&str> {
        self.modes.keys().next().map(String::as_str)
    }

    /// SHA-256 of the serialized entries, hex encoded.
    ///
    /// Identical for two builds of the same input; ids are only portable
    /// between documents with equal fingerprints.
    pub fn fingerprint(&self) -> Result<String, DocumentError> {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            serde_json::to_writer(&mut hasher, entry)?;
            hasher.update(b"\n");
        }
        Ok(format!("{:x}", hasher.finalize()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{FilterValue, KanjiRecord};
    use pretty_assertions::assert_eq;

    pub(crate) fn record(kanji: &str, jlpt: Option<i64>, grade: Option<i64>) -> KanjiRecord {
        KanjiRecord {
            kanji: kanji.to_string(),
            jlpt,
            grade,
            ..Default::default()
        }
    }

    /// Small document with the JLPT filter and a single display mode.
    pub(crate) fn sample_document(jlpts: &[Option<i64>]) -> Document {
        let entries = jlpts
            .iter()
            .enumerate()
            .map(|(id, jlpt)| Entry {
                id,
                record: record(&format!("k{}", id), *jlpt, None),
            })
            .collect();

        let mut groups = IndexMap::new();
        groups.insert(
            "Kanji".to_string(),
            FieldGroup {
                info: [("kanji".to_string(), "Kanji".to_string())].into_iter().collect(),
                extra: [("jlpt".to_string(), "JLPT".to_string())].into_iter().collect(),
            },
        );
        let mut modes = IndexMap::new();
        modes.insert(
            "Kanji".to_string(),
            DisplayMode {
                front: vec!["Kanji".to_string()],
                back: vec!["Kanji".to_string()],
            },
        );
        let mut filters = IndexMap::new();
        filters.insert(
            "JLPT".to_string(),
            FilterDefinition {
                field: "jlpt".to_string(),
                values: vec![
                    Some(FilterValue::Integer(4)),
                    Some(FilterValue::Integer(3)),
                    Some(FilterValue::Integer(2)),
                    Some(FilterValue::Integer(1)),
                    None,
                ],
            },
        );

        Document {
            source: Source {
                url: "test".to_string(),
                time: "2024-01-01T00:00:00Z".to_string(),
            },
            groups,
            modes,
            filters,
            entries,
        }
    }

    #[test]
    fn json_round_trip_preserves_metadata_order() {
        let mut doc = sample_document(&[Some(4), None]);
        doc.modes.insert(
            "Another".to_string(),
            DisplayMode {
                front: vec!["Kanji".to_string()],
                back: vec![],
            },
        );
        let json = doc.to_json_pretty().unwrap();
        let parsed = Document::from_json(&json).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(
            parsed.modes.keys().collect::<Vec<_>>(),
            vec!["Kanji", "Another"]
        );
    }

    #[test]
    fn pretty_json_uses_one_space_and_raw_unicode() {
        let mut doc = sample_document(&[Some(4)]);
        doc.entries[0].record.kanji = "日".to_string();
        let json = doc.to_json_pretty().unwrap();
        assert!(json.starts_with("{\n \"source\""));
        assert!(json.contains("\"kanji\": \"日\""));
    }

    #[test]
    fn reject_unknown_filter_field() {
        let mut doc = sample_document(&[Some(4)]);
        doc.filters.get_mut("JLPT").unwrap().field = "level".to_string();
        let json = serde_json::to_string(&doc).unwrap();
        let result = Document::from_json(&json);
        assert!(matches!(
            result,
            Err(DocumentError::UnknownFilterField { ref field, .. }) if field == "level"
        ));
    }

    #[test]
    fn reject_unknown_group_field() {
        let mut doc = sample_document(&[Some(4)]);
        doc.groups
            .get_mut("Kanji")
            .unwrap()
            .extra
            .insert("radical".to_string(), "Radical".to_string());
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::UnknownGroupField { .. })
        ));
    }

    #[test]
    fn reject_mode_with_unknown_group() {
        let mut doc = sample_document(&[Some(4)]);
        doc.modes.get_mut("Kanji").unwrap().back.push("Nanori".to_string());
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::UnknownGroup { ref group, .. }) if group == "Nanori"
        ));
    }

    #[test]
    fn reject_non_dense_ids() {
        let mut doc = sample_document(&[Some(4), Some(3)]);
        doc.entries[1].id = 5;
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::InvalidEntryIds { position: 1, id: 5 })
        ));
    }

    #[test]
    fn entry_lookup_by_id() {
        let doc = sample_document(&[Some(4), Some(3)]);
        assert_eq!(doc.entry(1).map(|e| e.record.jlpt), Some(Some(3)));
        assert!(doc.entry(2).is_none());
    }

    #[test]
    fn fingerprint_ignores_provenance() {
        let a = sample_document(&[Some(4), None]);
        let mut b = a.clone();
        b.source.time = "2030-01-01T00:00:00Z".to_string();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        b.entries.swap(0, 1);
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn fingerprint_covers_every_entry_line() {
        let doc = sample_document(&[Some(4), None, Some(1)]);
        let mut expected = Sha256::new();
        for entry in &doc.entries {
            expected.update(serde_json::to_vec(entry).unwrap());
            expected.update(b"\n");
        }
        assert_eq!(
            doc.fingerprint().unwrap(),
            format!("{:x}", expected.finalize())
        );
    }
}
