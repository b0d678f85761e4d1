//! In-memory session registry

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::SessionError;
use crate::session::state::Session;
use crate::session::store::SessionStore;

/// Process-local [`SessionStore`]. Sessions are lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(e: impl std::fmt::Display) -> SessionError {
    SessionError::Storage(format!("Failed to acquire session lock: {}", e))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self, id: String) -> Result<Session, SessionError> {
        let session = Session::new(id.clone());

        let mut sessions = self.sessions.write().map_err(lock_error)?;
        sessions.insert(id, session.clone());
        debug!("Created session: {}", session.id);

        Ok(session)
    }

    async fn get_session(&self, id: &str) -> Result<Session, SessionError> {
        let session = {
            let sessions = self.sessions.read().map_err(lock_error)?;
            sessions
                .get(id)
                .cloned()
                .ok_or_else(|| SessionError::NotFound(id.to_string()))?
        };

        if session.is_expired() {
            let mut sessions = self.sessions.write().map_err(lock_error)?;
            sessions.remove(id);
            debug!("Dropped expired session: {}", id);
            return Err(SessionError::NotFound(id.to_string()));
        }

        Ok(session)
    }

    async fn save_session(&self, session: Session) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn touch_session(
        &self,
        id: &str,
        ttl: Duration,
    ) -> Result<Option<Session>, SessionError> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;

        let Some(session) = sessions.get_mut(id) else {
            return Ok(None);
        };

        if session.is_expired() {
            sessions.remove(id);
            debug!("Dropped expired session: {}", id);
            return Ok(None);
        }

        session.touch(ttl);
        Ok(Some(session.clone()))
    }

    async fn delete_session(&self, id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;

        if sessions.remove(id).is_none() {
            return Err(SessionError::NotFound(id.to_string()));
        }

        debug!("Deleted session: {}", id);
        Ok(())
    }

    async fn cleanup_expired_sessions(&self) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;

        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        let count = before - sessions.len();

        if count > 0 {
            debug!("Cleaned up {} expired sessions", count);
        }

        Ok(count)
    }
}
