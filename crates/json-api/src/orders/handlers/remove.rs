//! Remove Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::ApiResponse,
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Remove Order Handler
///
/// Deletes a pending or processing order and restocks its books. Owners may
/// remove their own orders; admins may remove any.
#[endpoint(
    tags("orders"),
    summary = "Remove Order",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order already shipped, delivered or cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .remove_order(actor, id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok("Order removed successfully", order.into()))
}
