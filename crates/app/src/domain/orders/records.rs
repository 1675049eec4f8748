//! Order Records

use jiff::Timestamp;
use quire::orders::{OrderStatus, PaymentStatus, ShippingAddress};

use crate::{
    domain::{books::records::BookUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub items: Vec<OrderItemRecord>,
    pub total_amount: u64,
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
///
/// `book` is cleared when the book is deleted; the title snapshot remains.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub book: Option<BookUuid>,
    pub title: String,
    pub quantity: u32,
    pub price: u64,
}
