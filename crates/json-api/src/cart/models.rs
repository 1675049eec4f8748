//! Cart request and response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quire_app::domain::carts::records::{CartItemRecord, CartRecord};

/// Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuantityRequest {
    /// Units of the book, at least one
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub id: Uuid,
    pub book: Uuid,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub quantity: u32,

    /// Unit price times quantity, in minor units
    pub price: u64,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        CartItemResponse {
            id: item.uuid.into(),
            book: item.book.into(),
            title: item.title,
            author: item.author,
            cover_image: item.cover_image,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub id: Uuid,
    pub user: Uuid,

    /// Lines in the order they were first added
    pub items: Vec<CartItemResponse>,

    pub total_amount: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            id: cart.uuid.into(),
            user: cart.user.into(),
            items: cart.items.into_iter().map(Into::into).collect(),
            total_amount: cart.total_amount,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}
