//! Order Data

use quire::{checkout::RequestedLine, orders::ShippingAddress};

use crate::domain::{books::records::BookUuid, orders::records::OrderUuid};

/// Checkout request: the address and the cart lines to purchase.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub shipping_address: ShippingAddress,
    pub items: Vec<RequestedLine<BookUuid>>,
}
