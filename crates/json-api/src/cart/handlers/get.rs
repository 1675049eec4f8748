//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{errors::into_status_error, models::CartResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the signed-in user's cart with book details on every line.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ApiResponse<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(actor.user)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok("Cart fetched successfully", cart.into()))
}
