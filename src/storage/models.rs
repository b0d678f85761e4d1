//! Persisted data types

use serde::{Deserialize, Serialize};

/// A registration submitted through the signup form.
///
/// Records are appended once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub city: String,
    #[serde(default)]
    pub interests: Vec<String>,
}
