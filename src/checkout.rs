//! Checkout
//!
//! Converts a client-selected subset of cart lines into order lines. The
//! client's selection is never trusted directly: every requested line is
//! cross-checked against the server-held cart and the whole selection is
//! rejected if any line fails. No partial orders are produced.

use std::{fmt, hash::Hash};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::lines::{LineError, LineItem, total_amount};

/// A line the client asks to purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedLine<K> {
    /// Book to purchase
    pub book: K,

    /// Units to purchase
    pub quantity: u32,
}

/// What happens to a cart line once part of it is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLineChange<K> {
    /// The line keeps the remaining units, repriced.
    Shrunk(LineItem<K>),

    /// Every unit was ordered; the line leaves the cart.
    Dropped(K),
}

/// The validated result of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan<K> {
    /// Order lines, in request order
    pub order_lines: Vec<LineItem<K>>,

    /// Order total in minor units
    pub order_total: u64,

    /// Changes to apply to the cart, in cart order
    pub cart_changes: SmallVec<[CartLineChange<K>; 4]>,

    /// Lines left in the cart afterwards
    pub remaining: Vec<LineItem<K>>,

    /// Cart total after the changes
    pub cart_total: u64,
}

/// Reasons a checkout request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError<K: fmt::Display> {
    /// The cart has no lines.
    #[error("cart is empty")]
    CartEmpty,

    /// The request selected no lines.
    #[error("no items requested")]
    NothingRequested,

    /// A requested line asked for zero units.
    #[error("requested quantity for book {0} must be at least 1")]
    ZeroQuantity(K),

    /// A requested book has no line in the cart.
    #[error("book {0} is not in the cart")]
    NotInCart(K),

    /// A requested quantity is above what the cart line holds.
    #[error("requested {requested} of book {book}, cart holds {held}")]
    ExceedsCart {
        /// Book requested
        book: K,

        /// Units requested
        requested: u32,

        /// Units held by the cart line
        held: u32,
    },

    /// A line could not be priced.
    #[error(transparent)]
    Line(#[from] LineError),
}

/// Plan a checkout of `requested` against the cart `lines`.
///
/// Requested lines naming the same book are summed. Order lines are priced at
/// the cart line's unit price (its stored price divided by its quantity)
/// times the requested quantity; shrunk cart lines are repriced the same way.
///
/// # Errors
///
/// Returns a [`CheckoutError`] describing the first line that fails
/// validation; nothing is planned in that case.
pub fn plan<K>(
    lines: &[LineItem<K>],
    requested: &[RequestedLine<K>],
) -> Result<CheckoutPlan<K>, CheckoutError<K>>
where
    K: Copy + Eq + Hash + fmt::Display,
{
    if lines.is_empty() {
        return Err(CheckoutError::CartEmpty);
    }

    if requested.is_empty() {
        return Err(CheckoutError::NothingRequested);
    }

    let wanted = aggregate(requested)?;

    let mut order_lines = Vec::with_capacity(wanted.len());

    for &(book, quantity) in &wanted {
        let line = lines
            .iter()
            .find(|line| line.book == book)
            .ok_or(CheckoutError::NotInCart(book))?;

        if quantity > line.quantity {
            return Err(CheckoutError::ExceedsCart {
                book,
                requested: quantity,
                held: line.quantity,
            });
        }

        order_lines.push(LineItem::priced(book, line.unit_price(), quantity)?);
    }

    let ordered: FxHashMap<K, u32> = wanted.iter().copied().collect();

    let mut cart_changes = SmallVec::new();
    let mut remaining = Vec::with_capacity(lines.len());

    for line in lines {
        let Some(&taken) = ordered.get(&line.book) else {
            remaining.push(*line);

            continue;
        };

        match line.quantity - taken {
            0 => cart_changes.push(CartLineChange::Dropped(line.book)),
            left => {
                let shrunk = LineItem::priced(line.book, line.unit_price(), left)?;

                cart_changes.push(CartLineChange::Shrunk(shrunk));
                remaining.push(shrunk);
            }
        }
    }

    Ok(CheckoutPlan {
        order_total: total_amount(&order_lines),
        order_lines,
        cart_changes,
        cart_total: total_amount(&remaining),
        remaining,
    })
}

/// Sum duplicate requests per book, keeping first-seen order.
fn aggregate<K>(requested: &[RequestedLine<K>]) -> Result<Vec<(K, u32)>, CheckoutError<K>>
where
    K: Copy + Eq + Hash + fmt::Display,
{
    let mut positions: FxHashMap<K, usize> = FxHashMap::default();
    let mut wanted: Vec<(K, u32)> = Vec::with_capacity(requested.len());

    for line in requested {
        if line.quantity == 0 {
            return Err(CheckoutError::ZeroQuantity(line.book));
        }

        if let Some(entry) = positions
            .get(&line.book)
            .and_then(|&position| wanted.get_mut(position))
        {
            entry.1 = entry
                .1
                .checked_add(line.quantity)
                .ok_or(LineError::QuantityOverflow)?;
        } else {
            positions.insert(line.book, wanted.len());
            wanted.push((line.book, line.quantity));
        }
    }

    Ok(wanted)
}
