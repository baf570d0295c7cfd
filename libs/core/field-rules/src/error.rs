use serde::Serialize;
use thiserror::Error;

/// Category of a domain failure, independent of its message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EmptyInput,
    WrongType,
    InvalidFormat,
    TooLong,
    TooShort,
    InvalidKey,
    AlreadyExists,
    NoSuchId,
    NoSuchEmail,
    NoSuchName,
    BadCredentials,
}

/// A rejected field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    kind: FailureKind,
    message: String,
}

impl ValidationError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn empty(message: impl Into<String>) -> Self {
        Self::new(FailureKind::EmptyInput, message)
    }

    pub(crate) fn wrong_type(message: impl Into<String>) -> Self {
        Self::new(FailureKind::WrongType, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message() {
        let err = ValidationError::new(FailureKind::TooLong, "too long");
        assert_eq!(err.to_string(), "too long");
        assert_eq!(err.kind(), FailureKind::TooLong);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::AlreadyExists).unwrap();
        assert_eq!(json, "\"already_exists\"");
    }
}
