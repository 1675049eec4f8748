//! Update Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    cart::{
        errors::into_status_error,
        models::{CartResponse, QuantityRequest},
    },
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Update Cart Handler
///
/// Overwrites the quantity of a line already in the cart.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Line",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Insufficient stock or invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Book, cart or line not found"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<QuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cart = state
        .app
        .carts
        .update_item(actor.user, book.into_inner().into(), json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok("Cart updated successfully", cart.into()))
}
