//! Session repository interface
//!
//! Request handlers only see this trait, so the in-memory map can be
//! swapped for a shared store when running several instances.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::SessionError;
use crate::session::state::Session;

#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    /// Create and store a fresh session under `id`
    async fn create_session(&self, id: String) -> Result<Session, SessionError>;

    /// Get a live session; expired sessions are reported as not found
    async fn get_session(&self, id: &str) -> Result<Session, SessionError>;

    /// Insert or replace a session
    async fn save_session(&self, session: Session) -> Result<(), SessionError>;

    /// Push a live session's expiry to `ttl` from now.
    ///
    /// Returns `None` when the session is gone or expired; never inserts.
    async fn touch_session(
        &self,
        id: &str,
        ttl: chrono::Duration,
    ) -> Result<Option<Session>, SessionError>;

    async fn delete_session(&self, id: &str) -> Result<(), SessionError>;

    /// Delete expired sessions, returning how many were removed
    async fn cleanup_expired_sessions(&self) -> Result<usize, SessionError>;
}

pub type SessionStoreRef = Arc<dyn SessionStore>;
