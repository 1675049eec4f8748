//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    cart::{errors::into_status_error, models::CartResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Remove From Cart Handler
///
/// Drops a line and returns its units to the book's stock. Removing a book
/// that is not in the cart leaves the cart unchanged.
#[endpoint(
    tags("cart"),
    summary = "Remove Book From Cart",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cart = state
        .app
        .carts
        .remove_item(actor.user, book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok("Book removed from cart", cart.into()))
}
