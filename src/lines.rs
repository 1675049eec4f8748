//! Line Items

use thiserror::Error;

/// Errors raised while pricing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    /// Line quantities start at one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Unit price multiplied by quantity does not fit in a `u64`.
    #[error("line price overflowed")]
    PriceOverflow,

    /// Merging quantities does not fit in a `u32`.
    #[error("line quantity overflowed")]
    QuantityOverflow,
}

/// One (book, quantity, price) tuple inside a cart or an order.
///
/// `price` is the line price in minor units, i.e. unit price multiplied by
/// quantity. It is stored alongside the quantity rather than derived on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem<K> {
    /// Book the line refers to
    pub book: K,

    /// Number of units
    pub quantity: u32,

    /// Line price in minor units
    pub price: u64,
}

impl<K> LineItem<K> {
    /// Create a line priced at `unit_price * quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::ZeroQuantity`] for an empty line and
    /// [`LineError::PriceOverflow`] when the price does not fit.
    pub fn priced(book: K, unit_price: u64, quantity: u32) -> Result<Self, LineError> {
        if quantity == 0 {
            return Err(LineError::ZeroQuantity);
        }

        Ok(Self {
            book,
            quantity,
            price: line_price(unit_price, quantity)?,
        })
    }

    /// Unit price recovered from the stored line price.
    pub fn unit_price(&self) -> u64 {
        self.price
            .checked_div(u64::from(self.quantity))
            .unwrap_or(0)
    }
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`LineError::PriceOverflow`] when the product does not fit in a `u64`.
pub fn line_price(unit_price: u64, quantity: u32) -> Result<u64, LineError> {
    unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(LineError::PriceOverflow)
}

/// Total of a list of lines: the sum of their stored prices.
///
/// Cart totals and order totals are both computed here.
pub fn total_amount<K>(lines: &[LineItem<K>]) -> u64 {
    lines
        .iter()
        .map(|line| line.price)
        .fold(0, u64::saturating_add)
}
