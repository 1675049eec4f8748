//! Book Errors

use salvo::http::StatusError;
use tracing::error;

use quire_app::domain::books::BooksServiceError;

use crate::envelope::validation_failed;

pub(crate) fn into_status_error(error: BooksServiceError) -> StatusError {
    match error {
        BooksServiceError::NotFound => StatusError::not_found().brief("Book not found"),
        BooksServiceError::AlreadyExists => StatusError::conflict().brief("Book already exists"),
        BooksServiceError::EmptyQuery => {
            StatusError::bad_request().brief("Search query is required")
        }
        BooksServiceError::Validation(errors) => validation_failed(&errors),
        BooksServiceError::InvalidReference
        | BooksServiceError::MissingRequiredData
        | BooksServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid book payload")
        }
        BooksServiceError::Sql(source) => {
            error!("failed to access books: {source}");

            StatusError::internal_server_error()
        }
    }
}
