//! Order request and response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quire::{checkout::RequestedLine, orders::ShippingAddress};
use quire_app::domain::{
    books::records::BookUuid,
    orders::{
        data::NewOrder,
        records::{OrderItemRecord, OrderRecord, OrderUuid},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressBody {
    pub street: String,
    pub city: String,
    pub state: String,

    /// `12345` or `12345-6789`
    pub zip_code: String,

    pub country: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(address: ShippingAddressBody) -> Self {
        ShippingAddress {
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        ShippingAddressBody {
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
        }
    }
}

/// A cart line selected for checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    pub book: Uuid,
    pub quantity: u32,
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub shipping_address: ShippingAddressBody,

    /// Lines to take from the cart; the rest stay in it
    pub items: Vec<OrderLineRequest>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            uuid: OrderUuid::new(),
            shipping_address: request.shipping_address.into(),
            items: request
                .items
                .into_iter()
                .map(|line| RequestedLine {
                    book: BookUuid::from(line.book),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub id: Uuid,

    /// `null` once the book has been deleted
    pub book: Option<Uuid>,

    /// Title at the time of purchase
    pub title: String,

    pub quantity: u32,
    pub price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            id: item.uuid.into(),
            book: item.book.map(Into::into),
            title: item.title,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,
    pub user: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: u64,
    pub shipping_address: ShippingAddressBody,

    /// `pending`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    /// `pending`, `completed` or `failed`
    pub payment_status: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            id: order.uuid.into(),
            user: order.user.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_amount: order.total_amount,
            shipping_address: order.shipping_address.into(),
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Newest first
    pub orders: Vec<OrderResponse>,
}

/// Update Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    pub status: String,
}

/// Update Payment Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePaymentStatusRequest {
    pub payment_status: String,
}
