//! Maps an entry onto the front and back faces of a card.

use crate::document::Document;
use crate::error::SessionError;
use crate::types::{Entry, Field, FieldGroup, FieldValue};
use serde::{Deserialize, Serialize};

/// Shown for a primary field with nothing to display.
pub const MISSING_PRIMARY: &str = "[N/A]";

/// Shown for a secondary field with no value.
pub const MISSING_SECONDARY: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayField {
    pub field: String,
    pub label: String,
    pub value: String,
    /// `value` is a placeholder, not source text.
    pub missing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGroup {
    pub name: String,
    pub info: Vec<DisplayField>,
    pub extra: Vec<DisplayField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFaces {
    pub front: Vec<DisplayGroup>,
    pub back: Vec<DisplayGroup>,
}

/// Lay out an entry for the given display mode.
pub fn map_for_display(
    document: &Document,
    mode: &str,
    entry: &Entry,
) -> Result<CardFaces, SessionError> {
    let faces = document
        .modes
        .get(mode)
        .ok_or_else(|| SessionError::UnknownMode {
            mode: mode.to_string(),
        })?;

    let face = |groups: &[String]| -> Vec<DisplayGroup> {
        groups
            .iter()
            .filter_map(|name| {
                document
                    .groups
                    .get(name)
                    .map(|group| display_group(name, group, entry))
            })
            .collect()
    };

    Ok(CardFaces {
        front: face(&faces.front),
        back: face(&faces.back),
    })
}

fn display_group(name: &str, group: &FieldGroup, entry: &Entry) -> DisplayGroup {
    DisplayGroup {
        name: name.to_string(),
        info: group
            .info
            .iter()
            .map(|(field, label)| primary_field(field, label, entry))
            .collect(),
        extra: group
            .extra
            .iter()
            .map(|(field, label)| secondary_field(field, label, entry))
            .collect(),
    }
}

fn field_value<'a>(field: &str, entry: &'a Entry) -> FieldValue<'a> {
    Field::from_str(field).map_or(FieldValue::Missing, |f| entry.value(f))
}

fn primary_field(field: &str, label: &str, entry: &Entry) -> DisplayField {
    let value = field_value(field, entry);
    let missing = value.is_blank();
    DisplayField {
        field: field.to_string(),
        label: label.to_string(),
        value: if missing {
            MISSING_PRIMARY.to_string()
        } else {
            value.to_string()
        },
        missing,
    }
}

fn secondary_field(field: &str, label: &str, entry: &Entry) -> DisplayField {
    let value = field_value(field, entry);
    let missing = value == FieldValue::Missing;
    DisplayField {
        field: field.to_string(),
        label: label.to_string(),
        value: if missing {
            MISSING_SECONDARY.to_string()
        } else {
            value.to_string()
        },
        missing,
    }
}
