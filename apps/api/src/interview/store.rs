//! Injectable storage for in-progress interviews.
//!
//! `AppState` carries an `Arc<dyn SessionStore>` built once at startup.
//! Default: `InMemorySessionStore`, process-lifetime only.
//!
//! Every session also owns a turn lock. Callers hold it across a whole
//! read-modify-write cycle so two submissions for the same id serialize.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::interview::models::InterviewSession;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session {0} already exists")]
    AlreadyExists(Uuid),

    #[error("Session {0} not found")]
    NotFound(Uuid),
}

/// Held for the duration of one turn on a session.
pub type SessionTurn = OwnedMutexGuard<()>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, id: Uuid, session: InterviewSession) -> Result<(), StoreError>;

    /// Snapshot of the stored session.
    async fn get(&self, id: Uuid) -> Option<InterviewSession>;

    async fn update(&self, id: Uuid, session: InterviewSession) -> Result<(), StoreError>;

    /// Removes the session. Only the first call for an id returns it.
    async fn remove(&self, id: Uuid) -> Option<InterviewSession>;

    /// Waits for exclusive access to the session. `None` if the id is unknown.
    async fn lock(&self, id: Uuid) -> Option<SessionTurn>;

    /// Removes every session untouched since `cutoff` that nobody is working on.
    async fn take_idle(&self, cutoff: DateTime<Utc>) -> Vec<InterviewSession>;

    async fn len(&self) -> usize;
}

struct Entry {
    session: InterviewSession,
    turn: Arc<Mutex<()>>,
    last_active: DateTime<Utc>,
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, id: Uuid, session: InterviewSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        sessions.insert(
            id,
            Entry {
                session,
                turn: Arc::new(Mutex::new(())),
                last_active: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Option<InterviewSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|entry| entry.session.clone())
    }

    async fn update(&self, id: Uuid, session: InterviewSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        entry.session = session;
        entry.last_active = Utc::now();
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Option<InterviewSession> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|entry| entry.session)
    }

    async fn lock(&self, id: Uuid) -> Option<SessionTurn> {
        // Clone the mutex out so the map lock is not held while waiting.
        let turn = self.sessions.read().await.get(&id)?.turn.clone();
        Some(turn.lock_owned().await)
    }

    async fn take_idle(&self, cutoff: DateTime<Utc>) -> Vec<InterviewSession> {
        let mut sessions = self.sessions.write().await;
        let idle: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, entry)| entry.last_active < cutoff && entry.turn.try_lock().is_ok())
            .map(|(id, _)| *id)
            .collect();

        idle.into_iter()
            .filter_map(|id| sessions.remove(&id).map(|entry| entry.session))
            .collect()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
