//! Session state
//!
//! A [`Session`] is the server-side record behind a session cookie. A
//! [`Viewer`] is what a single request sees: either nobody, or the identity
//! of a live session.

use chrono::{DateTime, Duration, Utc};

/// Server-side session record keyed by its opaque token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque token, also the cookie value
    pub id: String,
    /// Identity given at login; `None` until authenticated
    identity: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Last time the session was accessed or modified
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            identity: None,
            created_at: now,
            updated_at: now,
            expires_at: None,
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Marks the session as belonging to `identity`.
    pub fn authenticate(&mut self, identity: String) {
        self.identity = Some(identity);
        self.updated_at = Utc::now();
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }

    pub fn set_expiry(&mut self, expires_at: DateTime<Utc>) {
        self.expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Pushes the expiry out to `ttl` from now.
    pub fn touch(&mut self, ttl: Duration) {
        self.set_expiry(Utc::now() + ttl);
    }
}

/// Authentication state of the client making the current request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Viewer {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl Viewer {
    pub fn identity(&self) -> Option<&str> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated(session) => session.identity(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated(session) => Some(session),
        }
    }
}
