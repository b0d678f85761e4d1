//! Form validation
//!
//! Parses and validates the signup and login submissions.

pub mod forms;
pub mod validator;

pub use forms::{LoginForm, SignupForm};
pub use validator::{signup_record, validate_login, validate_signup};
