//! Create Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use quire_app::domain::orders::data::NewOrder;

use crate::{
    envelope::ApiResponse,
    extensions::*,
    observability::{record_checkout_rejected, record_order_created},
    orders::{
        errors::{checkout_rejection, into_status_error},
        models::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Create Order Handler
///
/// Checks out the requested cart lines. Stock is reserved, the cart shrinks
/// by what was ordered and the order is created in one step.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, invalid lines, insufficient stock or invalid address"),
        (status_code = StatusCode::NOT_FOUND, description = "A requested book no longer exists"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .create_order(actor.user, NewOrder::from(json.into_inner()))
        .await
        .map_err(|error| {
            if let Some(reason) = checkout_rejection(&error) {
                record_checkout_rejected(reason);
            }

            into_status_error(error)
        })?;

    record_order_created(order.total_amount);

    res.status_code(StatusCode::CREATED);

    Ok(ApiResponse::created(
        "Order created successfully",
        order.into(),
    ))
}
