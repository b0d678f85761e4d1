//! Session resolution
//!
//! Resolves the [`Viewer`] once per request and makes it available to
//! handlers. Guarded handlers take [`AuthenticatedUser`] instead, which
//! redirects anonymous visitors to the login page.

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use log::warn;
use std::convert::Infallible;

use crate::routes::responses::found;
use crate::server::state::AppState;
use crate::session::Viewer;

pub const LOGIN_PATH: &str = "/login";

/// Looks up the session behind the request cookie and stores the resulting
/// [`Viewer`] in the request extensions.
///
/// When the viewer is authenticated and the handler did not set the session
/// cookie itself, the cookie is re-issued so the client-side lifetime slides
/// along with the server-side expiry.
pub async fn resolve_viewer(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let viewer = state.sessions.current(&jar).await;
    request.extensions_mut().insert(viewer.clone());

    let mut response = next.run(request).await;

    if let Some(session) = viewer.session() {
        let prefix = format!("{}=", state.sessions.cookie_name());
        let handler_set_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .any(|value| value.to_str().is_ok_and(|v| v.starts_with(&prefix)));

        if !handler_set_cookie {
            let cookie = state.sessions.session_cookie(&session.id);
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!("Could not refresh session cookie: {}", e),
            }
        }
    }

    response
}

#[async_trait]
impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Viewer>().cloned().unwrap_or_default())
    }
}

/// Identity of a logged-in viewer; only extractable on authenticated requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub identity: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Viewer>().and_then(Viewer::identity) {
            Some(identity) => Ok(AuthenticatedUser {
                identity: identity.to_string(),
            }),
            None => Err(found(LOGIN_PATH)),
        }
    }
}
