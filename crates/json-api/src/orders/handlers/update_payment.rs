//! Update Payment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use quire::orders::PaymentStatus;

use crate::{
    envelope::ApiResponse,
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, UpdatePaymentStatusRequest},
    },
    state::State,
};

/// Update Payment Status Handler
///
/// Admin only.
#[endpoint(
    tags("orders"),
    summary = "Update Payment Status",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown payment status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdatePaymentStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let payment_status = json
        .into_inner()
        .payment_status
        .parse::<PaymentStatus>()
        .or_400("Invalid payment status")?;

    let order = state
        .app
        .orders
        .update_payment_status(actor, id.into_inner().into(), payment_status)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Payment status updated successfully",
        order.into(),
    ))
}
