//! Card selection and the per-session study state.
//!
//! Randomness enters only through [`pick_card`] / [`pick_id`]. Session
//! operations consume a [`StudySession`] and return the next one.

use crate::error::SessionError;
use crate::filter::{Eligibility, FilterSelection};
use crate::types::Entry;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Uniformly pick one eligible entry's id; `None` when nothing is eligible.
pub fn pick_card<R: Rng + ?Sized>(eligible: &[&Entry], rng: &mut R) -> Option<usize> {
    eligible.choose(rng).map(|entry| entry.id)
}

/// [`pick_card`] over a list of ids.
pub fn pick_id<R: Rng + ?Sized>(eligible: &[usize], rng: &mut R) -> Option<usize> {
    eligible.choose(rng).copied()
}

/// Which card, if any, the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum CurrentCard {
    #[default]
    NoCardSelected,
    CardSelected(usize),
}

impl CurrentCard {
    pub fn card_id(&self) -> Option<usize> {
        match self {
            Self::NoCardSelected => None,
            Self::CardSelected(id) => Some(*id),
        }
    }
}

impl From<Option<usize>> for CurrentCard {
    fn from(id: Option<usize>) -> Self {
        id.map_or(Self::NoCardSelected, Self::CardSelected)
    }
}

/// Study state owned by one session: filter choices, mode, current card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub selection: FilterSelection,
    pub mode: String,
    pub current: CurrentCard,
}

impl StudySession {
    /// Start a session and draw its first card.
    ///
    /// `mode` defaults to the document's first mode.
    pub fn start<E, R>(
        eligibility: &E,
        selection: FilterSelection,
        mode: Option<String>,
        rng: &mut R,
    ) -> Result<Self, SessionError>
    where
        E: Eligibility + ?Sized,
        R: Rng + ?Sized,
    {
        let mode = resolve_mode(eligibility, mode)?;
        let session = Self {
            selection,
            mode,
            current: CurrentCard::NoCardSelected,
        };
        Ok(session.request_next_card(eligibility, rng))
    }

    /// Recompute eligibility from the current selection and draw a card.
    pub fn request_next_card<E, R>(self, eligibility: &E, rng: &mut R) -> Self
    where
        E: Eligibility + ?Sized,
        R: Rng + ?Sized,
    {
        let eligible = eligibility.eligible_ids(&self.selection);
        let current = CurrentCard::from(pick_id(&eligible, rng));
        tracing::debug!(eligible = eligible.len(), ?current, "drew card");
        Self { current, ..self }
    }

    /// Replace the filter selection. The current card is kept until the
    /// next draw.
    pub fn with_selection(self, selection: FilterSelection) -> Self {
        Self { selection, ..self }
    }

    /// Switch display mode.
    pub fn with_mode<E>(self, eligibility: &E, mode: String) -> Result<Self, SessionError>
    where
        E: Eligibility + ?Sized,
    {
        let mode = resolve_mode(eligibility, Some(mode))?;
        Ok(Self { mode, ..self })
    }

    /// Number of entries the current selection admits.
    pub fn eligible_count<E>(&self, eligibility: &E) -> usize
    where
        E: Eligibility + ?Sized,
    {
        eligibility.eligible_ids(&self.selection).len()
    }

    /// The entry being shown, if any.
    pub fn current_entry<'a, E>(&self, eligibility: &'a E) -> Option<&'a Entry>
    where
        E: Eligibility + ?Sized,
    {
        self.current
            .card_id()
            .and_then(|id| eligibility.document().entry(id))
    }
}

fn resolve_mode<E>(eligibility: &E, mode: Option<String>) -> Result<String, SessionError>
where
    E: Eligibility + ?Sized,
{
    let document = eligibility.document();
    match mode {
        Some(mode) if document.modes.contains_key(&mode) => Ok(mode),
        Some(mode) => Err(SessionError::UnknownMode { mode }),
        None => document
            .default_mode()
            .map(str::to_string)
            .ok_or(SessionError::NoModes),
    }
}
