//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use quire_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::BookNotFound => StatusError::not_found().brief("Book not found"),
        CartsServiceError::ItemNotFound => {
            StatusError::not_found().brief("Item not found in cart")
        }
        CartsServiceError::InsufficientStock => {
            StatusError::bad_request().brief("Insufficient stock")
        }
        CartsServiceError::InvalidQuantity(source) => StatusError::bad_request()
            .brief("Invalid quantity")
            .detail(source.to_string()),
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(source) => {
            error!("failed to access cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
