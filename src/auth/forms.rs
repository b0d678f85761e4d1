//! Raw form payloads
//!
//! Fields arrive as optional strings exactly as the browser submitted them;
//! all interpretation happens in the validator.

use serde::Deserialize;

/// Body of `POST /signup`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawSignupForm")]
pub struct SignupForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    /// Checkbox group in submit order
    pub interests: Vec<String>,
}

/// Wire shape of the signup body. Both `interests[]` and `interests` keys
/// may be repeated, and both may appear in the same body.
#[derive(Debug, Default, Deserialize)]
struct RawSignupForm {
    name: Option<String>,
    age: Option<String>,
    email: Option<String>,
    city: Option<String>,
    #[serde(default, rename = "interests[]")]
    bracketed: Vec<String>,
    #[serde(default, rename = "interests")]
    plain: Vec<String>,
}

impl From<RawSignupForm> for SignupForm {
    fn from(raw: RawSignupForm) -> Self {
        let mut interests = raw.bracketed;
        interests.extend(raw.plain);

        Self {
            name: raw.name,
            age: raw.age,
            email: raw.email,
            city: raw.city,
            interests,
        }
    }
}

/// Body of `POST /login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl SignupForm {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn age(&self) -> &str {
        self.age.as_deref().unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or_default()
    }
}

impl LoginForm {
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or_default()
    }
}
