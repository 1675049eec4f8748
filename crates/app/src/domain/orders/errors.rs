//! Orders service errors.

use quire::{checkout::CheckoutError, lines::LineError, validation::ValidationErrors};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::books::records::BookUuid;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("book not found")]
    BookNotFound,

    #[error("cart is empty")]
    CartEmpty,

    #[error("some items in the order are invalid or out of stock")]
    InvalidItems(#[source] CheckoutError<BookUuid>),

    #[error("insufficient stock for book: {0}")]
    InsufficientStock(String),

    #[error("order line overflow")]
    Line(#[source] LineError),

    #[error("admin role required")]
    Forbidden,

    #[error("order can no longer be removed")]
    NotRemovable,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<CheckoutError<BookUuid>> for OrdersServiceError {
    fn from(error: CheckoutError<BookUuid>) -> Self {
        match error {
            CheckoutError::CartEmpty => Self::CartEmpty,
            CheckoutError::Line(line) => Self::Line(line),
            other => Self::InvalidItems(other),
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
