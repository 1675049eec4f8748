//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use quire_app::domain::orders::OrdersServiceError;

use crate::envelope::validation_failed;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::BookNotFound => StatusError::not_found().brief("Book not found"),
        OrdersServiceError::CartEmpty => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InvalidItems(source) => StatusError::bad_request()
            .brief("Some items in the order are invalid or out of stock")
            .detail(source.to_string()),
        OrdersServiceError::InsufficientStock(title) => {
            StatusError::bad_request().brief(format!("Insufficient stock for book: {title}"))
        }
        OrdersServiceError::Line(source) => StatusError::bad_request()
            .brief("Invalid order line")
            .detail(source.to_string()),
        OrdersServiceError::Forbidden => StatusError::forbidden().brief("Admin access required"),
        OrdersServiceError::NotRemovable => StatusError::bad_request()
            .brief("Cannot remove orders that are shipped, delivered, or cancelled"),
        OrdersServiceError::Validation(errors) => validation_failed(&errors),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("failed to access orders: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Metric label for a checkout refused on its inputs. Server-side failures
/// have none.
pub(crate) fn checkout_rejection(error: &OrdersServiceError) -> Option<&'static str> {
    match error {
        OrdersServiceError::CartEmpty => Some("cart_empty"),
        OrdersServiceError::InvalidItems(_) | OrdersServiceError::Line(_) => Some("invalid_items"),
        OrdersServiceError::InsufficientStock(_) => Some("insufficient_stock"),
        OrdersServiceError::BookNotFound => Some("book_not_found"),
        OrdersServiceError::Validation(_) => Some("invalid_address"),
        _ => None,
    }
}
