//! Filter engine: which entries are eligible for study.
//!
//! An entry is eligible when it passes every filter the selection names.
//! Filters absent from the selection impose no constraint.

use crate::document::Document;
use crate::types::{Entry, Field, FilterDefinition, FilterValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

/// Key used for the "other / no value" sentinel in serialized selections.
pub const OTHER_KEY: &str = "null";

/// Per-value inclusion choices for one filter.
///
/// `other` is the sentinel choice: it applies to entries with no value and
/// to values the filter does not list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct ValueChoices {
    values: BTreeMap<FilterValue, bool>,
    other: Option<bool>,
}

impl ValueChoices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the choice for a value, or for the sentinel when `value` is `None`.
    pub fn set(&mut self, value: Option<FilterValue>, include: bool) {
        match value {
            Some(v) => {
                self.values.insert(v, include);
            }
            None => self.other = Some(include),
        }
    }

    /// Explicit choice for a value, if one was made.
    pub fn get(&self, value: Option<&FilterValue>) -> Option<bool> {
        match value {
            Some(v) => self.values.get(v).copied(),
            None => self.other,
        }
    }

    /// Whether an entry passes this filter.
    pub fn admits(&self, definition: &FilterDefinition, entry: &Entry) -> bool {
        let Some(field) = Field::from_str(&definition.field) else {
            // Entries carry no such field; nothing to constrain.
            return true;
        };
        let value = entry.value(field);
        definition
            .recognize(&value)
            .and_then(|v| self.values.get(v).copied())
            .unwrap_or_else(|| self.other.unwrap_or(false))
    }
}

impl From<BTreeMap<String, bool>> for ValueChoices {
    fn from(map: BTreeMap<String, bool>) -> Self {
        let mut choices = Self::new();
        for (key, include) in map {
            choices.set(parse_key(&key), include);
        }
        choices
    }
}

impl From<ValueChoices> for BTreeMap<String, bool> {
    fn from(choices: ValueChoices) -> Self {
        let mut map: BTreeMap<String, bool> = choices
            .values
            .into_iter()
            .map(|(v, include)| (value_key(&v), include))
            .collect();
        if let Some(include) = choices.other {
            map.insert(OTHER_KEY.to_string(), include);
        }
        map
    }
}

/// Prefix marking a key as text when it would otherwise read as the
/// sentinel, an integer, or an escaped key.
const TEXT_ESCAPE: char = '~';

fn value_key(value: &FilterValue) -> String {
    match value {
        FilterValue::Integer(n) => n.to_string(),
        FilterValue::Text(text) => {
            let ambiguous = text == OTHER_KEY
                || text.starts_with(TEXT_ESCAPE)
                || text.parse::<i64>().is_ok();
            if ambiguous {
                format!("{TEXT_ESCAPE}{text}")
            } else {
                text.clone()
            }
        }
    }
}

/// Inverse of [`value_key`]: `"null"` is the sentinel, a `~` prefix forces
/// text, integers parse as integers, anything else is text.
fn parse_key(key: &str) -> Option<FilterValue> {
    if key == OTHER_KEY {
        return None;
    }
    if let Some(text) = key.strip_prefix(TEXT_ESCAPE) {
        return Some(FilterValue::Text(text.to_string()));
    }
    Some(
        key.parse::<i64>()
            .map(FilterValue::Integer)
            .unwrap_or_else(|_| FilterValue::Text(key.to_string())),
    )
}

/// Session-level filter choices, keyed by filter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(BTreeMap<String, ValueChoices>);

impl FilterSelection {
    /// A selection with no active filters: everything is eligible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recognized value of every filter included, sentinel too.
    pub fn all_included(document: &Document) -> Self {
        let mut selection = Self::new();
        for (name, definition) in &document.filters {
            for value in &definition.values {
                selection.set(name, value.clone(), true);
            }
        }
        selection
    }

    pub fn set(&mut self, filter: &str, value: Option<FilterValue>, include: bool) {
        self.0
            .entry(filter.to_string())
            .or_default()
            .set(value, include);
    }

    /// Chainable form of [`FilterSelection::set`].
    pub fn with(mut self, filter: &str, value: Option<FilterValue>, include: bool) -> Self {
        self.set(filter, value, include);
        self
    }

    pub fn get(&self, filter: &str) -> Option<&ValueChoices> {
        self.0.get(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the filters this selection constrains.
    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Whether an entry passes every filter this selection names.
    pub fn admits(&self, document: &Document, entry: &Entry) -> bool {
        document
            .filters
            .iter()
            .all(|(name, definition)| match self.0.get(name) {
                Some(choices) => choices.admits(definition, entry),
                None => true,
            })
    }
}

/// Entries passing all active filters, in document order.
pub fn eligible_entries<'a>(document: &'a Document, selection: &FilterSelection) -> Vec<&'a Entry> {
    document
        .entries
        .iter()
        .filter(|entry| selection.admits(document, entry))
        .collect()
}

/// Ids of [`eligible_entries`].
pub fn eligible_ids(document: &Document, selection: &FilterSelection) -> Vec<usize> {
    eligible_entries(document, selection)
        .into_iter()
        .map(|e| e.id)
        .collect()
}

/// Source of eligible ids for a fixed document.
pub trait Eligibility {
    /// The document the ids refer to.
    fn document(&self) -> &Document;

    /// Ids of eligible entries, in document order.
    fn eligible_ids(&self, selection: &FilterSelection) -> Arc<[usize]>;
}

impl Eligibility for Document {
    fn document(&self) -> &Document {
        self
    }

    fn eligible_ids(&self, selection: &FilterSelection) -> Arc<[usize]> {
        eligible_ids(self, selection).into()
    }
}

/// Memoizes eligible ids per exact selection for one shared document.
///
/// Bounded: once `capacity` distinct selections are cached the cache is
/// emptied before inserting the next one.
pub struct EligibilityCache {
    document: Arc<Document>,
    capacity: usize,
    cached: Mutex<HashMap<FilterSelection, Arc<[usize]>>>,
}

impl EligibilityCache {
    pub fn new(document: Arc<Document>, capacity: usize) -> Self {
        Self {
            document,
            capacity: capacity.max(1),
            cached: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Eligibility for EligibilityCache {
    fn document(&self) -> &Document {
        &self.document
    }

    fn eligible_ids(&self, selection: &FilterSelection) -> Arc<[usize]> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(ids) = cached.get(selection) {
            return Arc::clone(ids);
        }

        let ids: Arc<[usize]> = eligible_ids(&self.document, selection).into();
        if cached.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "eligibility cache full, clearing");
            cached.clear();
        }
        cached.insert(selection.clone(), Arc::clone(&ids));
        ids
    }
}
