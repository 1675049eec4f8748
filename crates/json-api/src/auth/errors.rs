//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use quire_app::{auth::AuthServiceError, domain::users::UsersServiceError};

use crate::envelope::validation_failed;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::UserNotFound => StatusError::not_found().brief("User does not exist"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid or expired session")
        }
        AuthServiceError::Validation(errors) => validation_failed(&errors),
        AuthServiceError::Password(source) => {
            error!("failed to verify password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Expiry(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to access sessions: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn user_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::NotFound => StatusError::not_found().brief("User does not exist"),
        UsersServiceError::Validation(errors) => validation_failed(&errors),
        UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Password(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("failed to access users: {source}");

            StatusError::internal_server_error()
        }
    }
}
