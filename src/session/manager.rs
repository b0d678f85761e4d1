//! Session lifecycle
//!
//! Ties a [`SessionStore`] to the session cookie: resolves the viewer of a
//! request, logs clients in and out, and keeps the sliding expiry fresh.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::state::{Session, Viewer};
use crate::session::store::SessionStoreRef;

#[derive(Debug, Clone)]
pub struct SessionManager {
    store: SessionStoreRef,
    cookie_name: Arc<str>,
    ttl: chrono::Duration,
}

impl SessionManager {
    pub fn new(store: SessionStoreRef, cookie_name: &str, ttl: std::time::Duration) -> Self {
        Self {
            store,
            cookie_name: Arc::from(cookie_name),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::minutes(30)),
        }
    }

    pub fn store(&self) -> &SessionStoreRef {
        &self.store
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Session token carried by the request, if any
    pub fn token(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.cookie_name).map(|c| c.value().to_string())
    }

    /// Resolves who is making the request.
    ///
    /// A live authenticated session has its expiry pushed forward; unknown,
    /// expired or unauthenticated tokens resolve to [`Viewer::Anonymous`].
    pub async fn current(&self, jar: &CookieJar) -> Viewer {
        let Some(token) = self.token(jar) else {
            return Viewer::Anonymous;
        };

        let session = match self.store.get_session(&token).await {
            Ok(session) => session,
            Err(SessionError::NotFound(_)) => return Viewer::Anonymous,
            Err(e) => {
                warn!("Session lookup failed: {}", e);
                return Viewer::Anonymous;
            }
        };

        if session.identity().is_none() {
            return Viewer::Anonymous;
        }

        // A logout may have removed the session since the lookup
        match self.store.touch_session(&session.id, self.ttl).await {
            Ok(Some(session)) => Viewer::Authenticated(session),
            Ok(None) => Viewer::Anonymous,
            Err(e) => {
                warn!("Failed to refresh session {}: {}", session.id, e);
                Viewer::Anonymous
            }
        }
    }

    /// Starts an authenticated session for `identity`.
    ///
    /// Any session the client already had is discarded and a new token is
    /// issued.
    pub async fn login(
        &self,
        jar: CookieJar,
        identity: &str,
    ) -> Result<(CookieJar, Session), SessionError> {
        self.discard(&jar).await?;

        let mut session = self.store.create_session(Uuid::new_v4().to_string()).await?;
        session.authenticate(identity.to_string());
        session.touch(self.ttl);
        self.store.save_session(session.clone()).await?;

        info!("Session started for {}", identity);

        let jar = jar.add(self.session_cookie(&session.id));
        Ok((jar, session))
    }

    /// Destroys the client's session and clears its cookie.
    pub async fn logout(&self, jar: CookieJar) -> Result<CookieJar, SessionError> {
        self.discard(&jar).await?;
        Ok(jar.remove(Cookie::build(self.cookie_name.to_string()).path("/")))
    }

    /// Cookie carrying `token`, valid for one TTL from now
    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build((self.cookie_name.to_string(), token.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.ttl.num_seconds()))
            .build()
    }

    async fn discard(&self, jar: &CookieJar) -> Result<(), SessionError> {
        let Some(token) = self.token(jar) else {
            return Ok(());
        };

        match self.store.delete_session(&token).await {
            Ok(()) => {
                debug!("Discarded session {}", token);
                Ok(())
            }
            Err(SessionError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::registry::InMemorySessionStore;
    use crate::session::store::SessionStore;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Store whose lookups are immediately followed by a logout of the
    /// same session, as when two requests with one cookie interleave.
    #[derive(Debug, Default)]
    struct LogoutAfterLookup {
        inner: InMemorySessionStore,
    }

    #[async_trait]
    impl SessionStore for LogoutAfterLookup {
        async fn create_session(&self, id: String) -> Result<Session, SessionError> {
            self.inner.create_session(id).await
        }

        async fn get_session(&self, id: &str) -> Result<Session, SessionError> {
            let session = self.inner.get_session(id).await?;
            self.inner.delete_session(id).await?;
            Ok(session)
        }

        async fn save_session(&self, session: Session) -> Result<(), SessionError> {
            self.inner.save_session(session).await
        }

        async fn touch_session(
            &self,
            id: &str,
            ttl: chrono::Duration,
        ) -> Result<Option<Session>, SessionError> {
            self.inner.touch_session(id, ttl).await
        }

        async fn delete_session(&self, id: &str) -> Result<(), SessionError> {
            self.inner.delete_session(id).await
        }

        async fn cleanup_expired_sessions(&self) -> Result<usize, SessionError> {
            self.inner.cleanup_expired_sessions().await
        }
    }

    fn manager() -> SessionManager {
        SessionManager::new(
            Arc::new(InMemorySessionStore::new()),
            "sid",
            Duration::from_secs(1800),
        )
    }

    fn jar_with(token: &str) -> CookieJar {
        CookieJar::new().add(Cookie::new("sid", token.to_string()))
    }

    #[tokio::test]
    async fn no_cookie_is_anonymous() {
        assert_eq!(manager().current(&CookieJar::new()).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn unknown_token_is_anonymous() {
        assert_eq!(manager().current(&jar_with("forged")).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn login_then_current_yields_identity() {
        let manager = manager();
        let (jar, session) = manager.login(CookieJar::new(), "ana@x.es").await.unwrap();

        let cookie = jar.get("sid").unwrap();
        assert_eq!(cookie.value(), session.id);
        assert_eq!(cookie.http_only(), Some(true));

        let viewer = manager.current(&jar_with(&session.id)).await;
        assert_eq!(viewer.identity(), Some("ana@x.es"));
    }

    #[tokio::test]
    async fn login_replaces_previous_session() {
        let manager = manager();
        let (_, first) = manager.login(CookieJar::new(), "ana@x.es").await.unwrap();
        let (_, second) = manager
            .login(jar_with(&first.id), "luis@x.es")
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert!(manager.store().get_session(&first.id).await.is_err());
    }

    #[tokio::test]
    async fn logout_destroys_session() {
        let manager = manager();
        let (_, session) = manager.login(CookieJar::new(), "ana@x.es").await.unwrap();

        manager.logout(jar_with(&session.id)).await.unwrap();

        assert!(manager.store().get_session(&session.id).await.is_err());
        assert_eq!(manager.current(&jar_with(&session.id)).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn logout_without_session_is_fine() {
        assert!(manager().logout(CookieJar::new()).await.is_ok());
    }

    #[tokio::test]
    async fn current_slides_expiry_forward() {
        let manager = manager();
        let (_, session) = manager.login(CookieJar::new(), "ana@x.es").await.unwrap();

        let mut stored = manager.store().get_session(&session.id).await.unwrap();
        let nearly_expired = chrono::Utc::now() + chrono::Duration::seconds(5);
        stored.set_expiry(nearly_expired);
        manager.store().save_session(stored).await.unwrap();

        manager.current(&jar_with(&session.id)).await;

        let refreshed = manager.store().get_session(&session.id).await.unwrap();
        assert!(refreshed.expires_at.unwrap() > nearly_expired + chrono::Duration::minutes(20));
    }

    #[tokio::test]
    async fn expired_session_is_anonymous() {
        let manager = manager();
        let (_, session) = manager.login(CookieJar::new(), "ana@x.es").await.unwrap();

        let mut stored = manager.store().get_session(&session.id).await.unwrap();
        stored.set_expiry(chrono::Utc::now() - chrono::Duration::seconds(1));
        manager.store().save_session(stored).await.unwrap();

        assert_eq!(manager.current(&jar_with(&session.id)).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn logout_racing_a_lookup_is_not_undone() {
        let store = Arc::new(LogoutAfterLookup::default());
        let manager = SessionManager::new(store.clone(), "sid", Duration::from_secs(1800));
        let (_, session) = manager.login(CookieJar::new(), "ana@x.es").await.unwrap();

        let viewer = manager.current(&jar_with(&session.id)).await;

        assert_eq!(viewer, Viewer::Anonymous);
        assert!(store.inner.is_empty());
    }
}
