use regex::Regex;
use std::sync::LazyLock;

use crate::error::{FailureKind, ValidationError};

pub const EMAIL_MAX: usize = 64;

/// Names must be strictly longer than `NAME_MIN` and strictly shorter than `NAME_MAX`.
pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 20;

/// Passwords must be strictly longer than `PASSWORD_MIN` and strictly shorter than `PASSWORD_MAX`.
pub const PASSWORD_MIN: usize = 3;
pub const PASSWORD_MAX: usize = 20;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex is valid")
});

/// Check an email address for presence, length and shape.
pub fn email_valid(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::empty("The email_address cannot be an empty value"));
    }

    if email.chars().count() > EMAIL_MAX {
        return Err(ValidationError::new(
            FailureKind::TooLong,
            format!("The email address should be less than {EMAIL_MAX} characters!"),
        ));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new(
            FailureKind::InvalidFormat,
            "The email address is invalid",
        ));
    }

    Ok(())
}

/// Check an admin name. Both bounds reject on equality.
pub fn name_valid(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::empty("The admin_name has to be provided."));
    }

    let length = name.chars().count();
    if length >= NAME_MAX {
        return Err(ValidationError::new(
            FailureKind::TooLong,
            format!("The admin_name has to be less than {NAME_MAX}"),
        ));
    }
    if length <= NAME_MIN {
        return Err(ValidationError::new(
            FailureKind::TooShort,
            format!("The admin_name has to be more than {NAME_MIN}"),
        ));
    }

    if !name.chars().all(char::is_alphanumeric) {
        return Err(ValidationError::new(
            FailureKind::InvalidFormat,
            "The admin_name has to be alphanumeric.",
        ));
    }

    Ok(())
}

/// Check an admin password. Both bounds reject on equality, and at least one
/// non-alphanumeric character is required.
pub fn password_valid(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty("The admin_password has to be provided."));
    }

    let length = password.chars().count();
    if length >= PASSWORD_MAX {
        return Err(ValidationError::new(
            FailureKind::TooLong,
            format!("The admin_password has to be less than {PASSWORD_MAX}"),
        ));
    }
    if length <= PASSWORD_MIN {
        return Err(ValidationError::new(
            FailureKind::TooShort,
            format!("The admin_password has to be more than {PASSWORD_MIN}"),
        ));
    }

    if password.chars().all(char::is_alphanumeric) {
        return Err(ValidationError::new(
            FailureKind::InvalidFormat,
            "The admin_password has to contain at least one symbol.",
        ));
    }

    Ok(())
}

/// Ids are store-assigned serials starting at 1, so anything below is "not provided".
pub fn require_id(id: i32, subject: &str) -> Result<i32, ValidationError> {
    if id <= 0 {
        return Err(ValidationError::empty(format!(
            "The {subject}_id has to be provided."
        )));
    }
    Ok(id)
}

/// Lookup keys for the exists checks must not be blank.
pub fn require_key<'a>(value: &'a str, key: &str) -> Result<&'a str, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty(format!("The {key} has to be provided.")));
    }
    Ok(value)
}
