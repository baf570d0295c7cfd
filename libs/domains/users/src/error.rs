use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use field_rules::{FailureKind, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The email adress {0} is already in use.")]
    EmailTaken(String),

    #[error("The user with id {0} does not exist.")]
    NotFound(i32),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    /// Domain category of the failure; `None` for internal errors.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            UserError::Validation(e) => Some(e.kind()),
            UserError::EmailTaken(_) => Some(FailureKind::AlreadyExists),
            UserError::NotFound(_) => Some(FailureKind::NoSuchId),
            UserError::Internal(_) => None,
        }
    }
}

pub type UserResult<T> = Result<T, UserError>;

/// Every domain failure answers 400 with its message; only internal errors escalate.
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Internal(msg) => AppError::InternalServerError(msg),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
