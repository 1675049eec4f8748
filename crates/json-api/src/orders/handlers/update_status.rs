//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use quire::orders::OrderStatus;

use crate::{
    envelope::ApiResponse,
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, UpdateStatusRequest},
    },
    state::State,
};

/// Update Order Status Handler
///
/// Admin only. Any status may be written; transitions are not enforced.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("Invalid order status")?;

    let order = state
        .app
        .orders
        .update_status(actor, id.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok("Order status updated successfully", order.into()))
}

#[cfg(test)]
mod tests {
    use quire_app::domain::{
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
        users::data::Actor,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        envelope::ApiError,
        orders::handlers::tests::make_order,
        test_helpers::{Mocks, admin, customer, service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService, actor: Actor) -> Service {
        service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Some(actor),
            Router::with_path("orders/update-order/{id}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_updates_status() -> TestResult {
        let order = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |actor, o, status| {
                actor.role.is_admin() && *o == order && *status == OrderStatus::Shipped
            })
            .return_once(move |_, _, status| Ok(make_order(order, status)));

        let body: ApiResponse<OrderResponse> =
            TestClient::put(format!("http://example.com/orders/update-order/{order}"))
                .json(&json!({ "status": "shipped" }))
                .send(&make_service(orders, admin()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.message, "Order status updated successfully");
        assert_eq!(body.data.status, "shipped");

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        let mut res = TestClient::put(format!(
            "http://example.com/orders/update-order/{}",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "cancelled" }))
        .send(&make_service(orders, customer()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        let body: ApiError = res.take_json().await?;

        assert_eq!(body.message, "Admin access required");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let mut res = TestClient::put(format!(
            "http://example.com/orders/update-order/{}",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "lost" }))
        .send(&make_service(orders, admin()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ApiError = res.take_json().await?;

        assert_eq!(body.message, "Invalid order status");
        assert_eq!(body.errors.as_slice(), &["unknown order status: lost".to_string()]);

        Ok(())
    }
}
