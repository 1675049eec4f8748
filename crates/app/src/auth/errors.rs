//! Auth service errors.

use quire::validation::ValidationErrors;
use sqlx::Error;
use thiserror::Error;

use crate::auth::{PasswordError, SessionTokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("user does not exist")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session not found")]
    NotFound,

    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("session expiry out of range")]
    Expiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] SessionTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}
