//! Cart Handlers

pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use quire_app::domain::{
        books::records::BookUuid,
        carts::records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
    };

    use crate::test_helpers::TEST_USER;

    /// A cart holding `quantity` units of one book priced 1000 each.
    pub(crate) fn make_cart(book: BookUuid, quantity: u32) -> CartRecord {
        let items: Vec<CartItemRecord> = (quantity > 0)
            .then(|| CartItemRecord {
                uuid: CartItemUuid::new(),
                book,
                quantity,
                price: 1_000 * u64::from(quantity),
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                cover_image: "https://covers.example.com/dune.jpg".to_string(),
            })
            .into_iter()
            .collect();

        CartRecord {
            uuid: CartUuid::new(),
            user: TEST_USER,
            total_amount: items.iter().map(|item| item.price).sum(),
            items,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
