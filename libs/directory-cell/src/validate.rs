use std::sync::OnceLock;

use regex::Regex;

use crate::models::DirectoryError;

const MIN_PASSWORD_LENGTH: usize = 8;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Form-level checks run before any network call, so a malformed
/// submission never reaches the backend.
pub fn validate_email(email: &str) -> Result<(), DirectoryError> {
    if email_pattern().is_match(email) {
        Ok(())
    } else {
        Err(DirectoryError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )))
    }
}

pub fn validate_password(password: &str) -> Result<(), DirectoryError> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(DirectoryError::Validation(format!(
            "password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )))
    }
}

pub fn validate_name(name: &str) -> Result<(), DirectoryError> {
    if name.trim().is_empty() {
        Err(DirectoryError::Validation(
            "name must not be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}
