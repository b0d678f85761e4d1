//! Theme preference
//!
//! Stored in its own long-lived cookie, independent of the session.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const THEME_COOKIE: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown theme: {}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Theme stored in the request cookies, or the default
    pub fn from_jar(jar: &CookieJar) -> Self {
        jar.get(THEME_COOKIE)
            .and_then(|c| c.value().parse().ok())
            .unwrap_or_default()
    }

    /// Cookie remembering this theme for `max_age_days`
    pub fn cookie(&self, max_age_days: i64) -> Cookie<'static> {
        Cookie::build((THEME_COOKIE, self.as_str()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::days(max_age_days))
            .build()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Theme
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Theme::from_jar(&CookieJar::from_headers(&parts.headers)))
    }
}
