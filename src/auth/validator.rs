//! Form validator
//!
//! Checks signup and login submissions. Every rule runs, so a submission
//! with several problems reports all of them, in field order.

use super::forms::{LoginForm, SignupForm};
use crate::storage::UserRecord;

pub const NAME_TOO_SHORT: &str = "El nombre tiene que tener mínimo 2 caracteres.";
pub const AGE_NOT_POSITIVE: &str = "La edad debe ser mayor a 0.";
pub const EMAIL_INVALID: &str = "El email no es válido, debe contener @.";
pub const CITY_MISSING: &str = "La ciudad tiene que tener algún valor.";
pub const LOGIN_USER_INVALID: &str =
    "El email de usuario no es válido, no debe estar vacio y debe contener @.";
pub const LOGIN_PASSWORD_EMPTY: &str = "La contraseña no puede estar vacia.";

const MIN_NAME_CHARS: usize = 2;

/// Parses a submitted age, accepting only whole numbers above zero.
fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

fn has_at_sign(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.contains('@'))
}

/// Returns the signup errors in field order; empty means valid.
pub fn validate_signup(form: &SignupForm) -> Vec<String> {
    let mut errors = Vec::new();

    if form.name().trim().chars().count() < MIN_NAME_CHARS {
        errors.push(NAME_TOO_SHORT.to_string());
    }

    if parse_age(form.age()).is_none() {
        errors.push(AGE_NOT_POSITIVE.to_string());
    }

    if !has_at_sign(form.email.as_deref()) {
        errors.push(EMAIL_INVALID.to_string());
    }

    if form.city().is_empty() {
        errors.push(CITY_MISSING.to_string());
    }

    errors
}

/// Validates a signup and builds the record to persist.
pub fn signup_record(form: &SignupForm) -> Result<UserRecord, Vec<String>> {
    let errors = validate_signup(form);

    match parse_age(form.age()) {
        Some(age) if errors.is_empty() => Ok(UserRecord {
            name: form.name().to_string(),
            age,
            email: form.email().to_string(),
            city: form.city().to_string(),
            interests: form.interests.clone(),
        }),
        _ => Err(errors),
    }
}

/// Returns the login errors in field order; empty means valid.
///
/// Only the shape of the fields is checked. The identity is not looked up
/// anywhere and the password is never compared against anything.
pub fn validate_login(form: &LoginForm) -> Vec<String> {
    let mut errors = Vec::new();

    if !has_at_sign(form.user.as_deref()) {
        errors.push(LOGIN_USER_INVALID.to_string());
    }

    if form.password.as_deref().unwrap_or_default().trim().is_empty() {
        errors.push(LOGIN_PASSWORD_EMPTY.to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, age: &str, email: &str, city: &str) -> SignupForm {
        SignupForm {
            name: Some(name.to_string()),
            age: Some(age.to_string()),
            email: Some(email.to_string()),
            city: Some(city.to_string()),
            interests: Vec::new(),
        }
    }

    #[test]
    fn valid_signup_has_no_errors() {
        assert!(validate_signup(&signup("Al", "5", "a@b.com", "Rome")).is_empty());
    }

    #[test]
    fn every_failing_rule_is_reported_in_field_order() {
        let errors = validate_signup(&signup("A", "0", "bad", ""));
        assert_eq!(
            errors,
            vec![NAME_TOO_SHORT, AGE_NOT_POSITIVE, EMAIL_INVALID, CITY_MISSING]
        );
    }

    #[test]
    fn missing_fields_fail_their_rules() {
        let errors = validate_signup(&SignupForm::default());
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn short_names_always_fail_regardless_of_other_fields() {
        for name in ["", " ", "A", "  B  ", "\tñ\n"] {
            for other in [signup(name, "20", "x@y.z", "Lima"), signup(name, "-1", "nope", "")] {
                let errors = validate_signup(&other);
                assert!(errors.contains(&NAME_TOO_SHORT.to_string()), "name {name:?}");
            }
        }
        assert!(!validate_signup(&signup("  Bo ", "20", "x@y.z", "Lima"))
            .contains(&NAME_TOO_SHORT.to_string()));
    }

    #[test]
    fn email_rule_is_exactly_the_at_sign() {
        for email in ["", "plain", "no-at.example.com"] {
            let errors = validate_signup(&signup("Ana", "20", email, "Lima"));
            assert!(errors.contains(&EMAIL_INVALID.to_string()), "email {email:?}");
        }
        for email in ["@", "a@b", "weird@@", " x@ "] {
            let errors = validate_signup(&signup("Ana", "20", email, "Lima"));
            assert!(!errors.contains(&EMAIL_INVALID.to_string()), "email {email:?}");
        }
    }

    #[test]
    fn non_numeric_and_non_positive_ages_fail() {
        for age in ["", "abc", "0", "-3", "2.5", "1e3"] {
            let errors = validate_signup(&signup("Ana", age, "a@b.c", "Lima"));
            assert_eq!(errors, vec![AGE_NOT_POSITIVE], "age {age:?}");
        }
        assert!(validate_signup(&signup("Ana", " 42 ", "a@b.c", "Lima")).is_empty());
    }

    #[test]
    fn signup_record_keeps_submitted_values() {
        let mut form = signup("Al", "5", "a@b.com", "Rome");
        form.interests = vec!["yoga".into(), "cine".into()];

        let record = signup_record(&form).unwrap();
        assert_eq!(record.name, "Al");
        assert_eq!(record.age, 5);
        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.city, "Rome");
        assert_eq!(record.interests, vec!["yoga", "cine"]);
    }

    #[test]
    fn signup_record_returns_errors_for_invalid_form() {
        let errors = signup_record(&signup("A", "5", "a@b.com", "Rome")).unwrap_err();
        assert_eq!(errors, vec![NAME_TOO_SHORT]);
    }

    #[test]
    fn login_requires_at_sign_and_non_blank_password() {
        let ok = LoginForm {
            user: Some("ana@x.es".into()),
            password: Some("secret".into()),
        };
        assert!(validate_login(&ok).is_empty());

        let bad = LoginForm {
            user: Some("ana".into()),
            password: Some("   ".into()),
        };
        assert_eq!(
            validate_login(&bad),
            vec![LOGIN_USER_INVALID, LOGIN_PASSWORD_EMPTY]
        );

        assert_eq!(validate_login(&LoginForm::default()).len(), 2);
    }
}
