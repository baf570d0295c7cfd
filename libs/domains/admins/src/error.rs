use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use field_rules::{FailureKind, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The email adress {0} is already in use.")]
    EmailTaken(String),

    #[error("The name {0} is already in use.")]
    NameTaken(String),

    #[error("The admin with id {0} does not exist.")]
    NotFound(i32),

    /// Login with an email no admin has
    #[error("That Admin does not exist!")]
    UnknownEmail,

    #[error("The admin password is invalid!")]
    InvalidPassword,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Domain category of the failure; `None` for internal errors.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            AdminError::Validation(e) => Some(e.kind()),
            AdminError::EmailTaken(_) | AdminError::NameTaken(_) => {
                Some(FailureKind::AlreadyExists)
            }
            AdminError::NotFound(_) => Some(FailureKind::NoSuchId),
            AdminError::UnknownEmail => Some(FailureKind::NoSuchEmail),
            AdminError::InvalidPassword => Some(FailureKind::BadCredentials),
            AdminError::Internal(_) => None,
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

/// Every domain failure answers 400 with its message; only internal errors escalate.
impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::Internal(msg) => AppError::InternalServerError(msg),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_kinds() {
        assert_eq!(
            AdminError::NameTaken("abc".into()).kind(),
            Some(FailureKind::AlreadyExists)
        );
        assert_eq!(AdminError::UnknownEmail.kind(), Some(FailureKind::NoSuchEmail));
        assert_eq!(
            AdminError::InvalidPassword.kind(),
            Some(FailureKind::BadCredentials)
        );
        assert_eq!(AdminError::Internal("x".into()).kind(), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AdminError::NameTaken("abcdefgh".into()).to_string(),
            "The name abcdefgh is already in use."
        );
        assert_eq!(
            AdminError::NotFound(3).to_string(),
            "The admin with id 3 does not exist."
        );
        assert_eq!(AdminError::UnknownEmail.to_string(), "That Admin does not exist!");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AdminError::InvalidPassword.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AdminError::Internal("hash failed".into())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
