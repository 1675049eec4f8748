//! Cart Records

use jiff::Timestamp;
use quire::lines::LineItem;

use crate::{
    domain::{books::records::BookUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user: UserUuid,
    pub total_amount: u64,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record, enriched with the book's display fields.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub book: BookUuid,
    pub quantity: u32,
    pub price: u64,
    pub title: String,
    pub author: String,
    pub cover_image: String,
}

impl CartItemRecord {
    #[must_use]
    pub fn line(&self) -> LineItem<BookUuid> {
        LineItem {
            book: self.book,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
