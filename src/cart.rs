//! Cart

use std::mem;

use thiserror::Error;

use crate::lines::{LineError, LineItem, total_amount};

/// Errors related to cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The book has no line in the cart.
    #[error("item not found in cart")]
    ItemNotFound,

    /// The resulting line could not be priced.
    #[error(transparent)]
    Line(#[from] LineError),
}

/// Outcome of overwriting a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityChange<K> {
    /// Quantity held before the update
    pub previous: u32,

    /// The line after the update
    pub line: LineItem<K>,
}

impl<K> QuantityChange<K> {
    /// Signed difference between the new and the previous quantity.
    pub fn delta(&self) -> i64 {
        i64::from(self.line.quantity) - i64::from(self.previous)
    }
}

/// Ordered line items of a single cart, at most one line per book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLines<K> {
    lines: Vec<LineItem<K>>,
}

impl<K> Default for CartLines<K> {
    fn default() -> Self {
        Self { lines: Vec::new() }
    }
}

impl<K: Copy + Eq> CartLines<K> {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap lines loaded from storage, keeping their order.
    #[must_use]
    pub fn from_lines(lines: Vec<LineItem<K>>) -> Self {
        Self { lines }
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[LineItem<K>] {
        &self.lines
    }

    /// Consume the cart, returning its lines.
    pub fn into_lines(self) -> Vec<LineItem<K>> {
        self.lines
    }

    /// The line for `book`, if any.
    pub fn get(&self, book: K) -> Option<&LineItem<K>> {
        self.lines.iter().find(|line| line.book == book)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cached cart total.
    pub fn total_amount(&self) -> u64 {
        total_amount(&self.lines)
    }

    /// Quantity the line for `book` would hold after adding `quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::QuantityOverflow`] when the sum does not fit.
    pub fn quantity_after_add(&self, book: K, quantity: u32) -> Result<u32, CartError> {
        let held = self.get(book).map_or(0, |line| line.quantity);

        held.checked_add(quantity)
            .ok_or(CartError::Line(LineError::QuantityOverflow))
    }

    /// Add `quantity` units of `book`.
    ///
    /// An existing line is merged: quantities are summed and the price is
    /// recomputed as `unit_price * merged quantity`. Otherwise a new line is
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Line`] when the merged line cannot be priced.
    pub fn add(&mut self, book: K, unit_price: u64, quantity: u32) -> Result<LineItem<K>, CartError> {
        if quantity == 0 {
            return Err(LineError::ZeroQuantity.into());
        }

        let merged = LineItem::priced(book, unit_price, self.quantity_after_add(book, quantity)?)?;

        match self.lines.iter_mut().find(|line| line.book == book) {
            Some(line) => *line = merged,
            None => self.lines.push(merged),
        }

        Ok(merged)
    }

    /// Overwrite the quantity of the line for `book`, repricing it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] when the book has no line and
    /// [`CartError::Line`] when the new line cannot be priced.
    pub fn set_quantity(
        &mut self,
        book: K,
        unit_price: u64,
        quantity: u32,
    ) -> Result<QuantityChange<K>, CartError> {
        let updated = LineItem::priced(book, unit_price, quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.book == book)
            .ok_or(CartError::ItemNotFound)?;

        let previous = mem::replace(line, updated).quantity;

        Ok(QuantityChange {
            previous,
            line: updated,
        })
    }

    /// Drop the line for `book`, returning it when present.
    pub fn remove(&mut self, book: K) -> Option<LineItem<K>> {
        let index = self.lines.iter().position(|line| line.book == book)?;

        Some(self.lines.remove(index))
    }

    /// Empty the cart, returning every removed line.
    pub fn clear(&mut self) -> Vec<LineItem<K>> {
        mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const BOOK_A: u32 = 1;
    const BOOK_B: u32 = 2;

    #[test]
    fn add_appends_new_lines_in_order() -> TestResult {
        let mut cart = CartLines::new();

        cart.add(BOOK_A, 1_000, 1)?;
        cart.add(BOOK_B, 500, 2)?;

        let books: Vec<u32> = cart.lines().iter().map(|line| line.book).collect();

        assert_eq!(books, vec![BOOK_A, BOOK_B]);
        assert_eq!(cart.total_amount(), 2_000);

        Ok(())
    }

    #[test]
    fn add_merges_existing_line_and_reprices() -> TestResult {
        let mut cart = CartLines::new();

        cart.add(BOOK_A, 1_000, 1)?;

        let merged = cart.add(BOOK_A, 1_000, 2)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(merged.quantity, 3);
        assert_eq!(merged.price, 3_000);
        assert_eq!(cart.total_amount(), 3_000);

        Ok(())
    }

    #[test]
    fn add_uses_current_unit_price_for_merged_line() -> TestResult {
        let mut cart = CartLines::new();

        cart.add(BOOK_A, 1_000, 1)?;

        let merged = cart.add(BOOK_A, 1_200, 1)?;

        assert_eq!(merged.price, 2_400);

        Ok(())
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let mut cart = CartLines::new();

        assert_eq!(
            cart.add(BOOK_A, 1_000, 0),
            Err(CartError::Line(LineError::ZeroQuantity))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn quantity_after_add_counts_held_units() -> TestResult {
        let mut cart = CartLines::new();

        assert_eq!(cart.quantity_after_add(BOOK_A, 2)?, 2);

        cart.add(BOOK_A, 100, 2)?;

        assert_eq!(cart.quantity_after_add(BOOK_A, 3)?, 5);

        Ok(())
    }

    #[test]
    fn set_quantity_reports_previous_quantity() -> TestResult {
        let mut cart = CartLines::new();

        cart.add(BOOK_A, 250, 4)?;

        let change = cart.set_quantity(BOOK_A, 250, 1)?;

        assert_eq!(change.previous, 4);
        assert_eq!(change.line.price, 250);
        assert_eq!(change.delta(), -3);
        assert_eq!(cart.total_amount(), 250);

        Ok(())
    }

    #[test]
    fn set_quantity_on_missing_line_fails() {
        let mut cart: CartLines<u32> = CartLines::new();

        assert_eq!(
            cart.set_quantity(BOOK_A, 100, 1),
            Err(CartError::ItemNotFound)
        );
    }

    #[test]
    fn remove_returns_the_dropped_line() -> TestResult {
        let mut cart = CartLines::new();

        cart.add(BOOK_A, 100, 3)?;
        cart.add(BOOK_B, 200, 1)?;

        let removed = cart.remove(BOOK_A);

        assert_eq!(removed.map(|line| line.quantity), Some(3));
        assert_eq!(cart.total_amount(), 200);
        assert_eq!(cart.remove(BOOK_A), None);

        Ok(())
    }

    #[test]
    fn clear_returns_all_lines_and_zeroes_total() -> TestResult {
        let mut cart = CartLines::new();

        cart.add(BOOK_A, 100, 3)?;
        cart.add(BOOK_B, 200, 1)?;

        let removed = cart.clear();

        assert_eq!(removed.len(), 2);
        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), 0);

        Ok(())
    }
}
