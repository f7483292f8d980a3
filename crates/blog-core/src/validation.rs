//! Input validation rules applied before anything is persisted.
//!
//! All checks are pure and independent of each other. Lengths are counted in
//! characters, not bytes.

use thiserror::Error;

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 6;
/// Fits the `title` column on every backend.
pub const MAX_TITLE_CHARS: usize = 255;

/// A rejected form field, with the message shown back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().count() < MIN_USERNAME_CHARS {
        return Err(ValidationError::new("username", "username too short"));
    }
    Ok(())
}

/// Loose `local@domain.tld` shape check: a non-empty local part before the
/// last `@` and a dot somewhere in the domain part.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new("email", "invalid email");

    let (local, domain) = email.rsplit_once('@').ok_or_else(invalid)?;
    if local.is_empty() || !domain.contains('.') {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::new("password", "password too short"));
    }
    Ok(())
}

/// Reject blank values for a labeled form field.
pub fn require(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", field)));
    }
    Ok(())
}

/// A post title must be present and fit the column.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    require(title, "title")?;
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::new("title", "title too long"));
    }
    Ok(())
}
