//! In-memory store of study sessions.
//!
//! Sessions never share state: each record is replaced wholesale by the
//! state returned from a core session operation. Each session has its own
//! lock, so work on one session never waits on another.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{SessionRecord, StudySession};

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<SessionRecord>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a started session under a fresh id.
    pub async fn insert(&self, session: StudySession) -> SessionRecord {
        let record = SessionRecord {
            id: Uuid::new_v4(),
            session,
            started_at: Utc::now(),
        };
        self.sessions
            .write()
            .await
            .insert(record.id, Arc::new(Mutex::new(record.clone())));
        tracing::info!("Started session {}", record.id);
        record
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionRecord> {
        let entry = self.entry(id).await?;
        let record = entry.lock().await.clone();
        Ok(record)
    }

    async fn entry(&self, id: Uuid) -> Result<Arc<Mutex<SessionRecord>>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Run `f` on the session's state and store the state it returns.
    ///
    /// If `f` fails the stored state is left untouched.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Result<SessionRecord>
    where
        F: FnOnce(StudySession) -> Result<StudySession>,
    {
        let entry = self.entry(id).await?;
        let mut record = entry.lock().await;
        record.session = f(record.session.clone())?;
        Ok(record.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<SessionRecord> {
        let entry = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Ended session {}", id);
        let record = entry.lock().await.clone();
        Ok(record)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {} not found", id))
}
