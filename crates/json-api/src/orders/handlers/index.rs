//! User Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::ApiResponse,
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
    state::State,
};

/// User Orders Handler
///
/// Lists the signed-in user's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "Get User Orders",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders listed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrdersResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let orders = state
        .app
        .orders
        .user_orders(actor.user)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Orders fetched successfully",
        OrdersResponse {
            orders: orders.into_iter().map(Into::into).collect(),
        },
    ))
}
