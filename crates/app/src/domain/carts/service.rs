//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use quire::{
    cart::CartLines,
    lines::{LineError, LineItem},
};
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        books::{PgBooksRepository, records::BookUuid},
        carts::{
            CartsServiceError, PgCartItemsRepository, PgCartsRepository,
            records::{CartItemRecord, CartRecord},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    books_repository: PgBooksRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            books_repository: PgBooksRepository::new(),
        }
    }

    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut cart = self
            .carts_repository
            .get_cart(tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        cart.items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        Ok(cart)
    }
}

fn cart_lines(items: &[CartItemRecord]) -> CartLines<BookUuid> {
    CartLines::from_lines(items.iter().map(CartItemRecord::line).collect())
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        book: BookUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity(LineError::ZeroQuantity));
        }

        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, user).await?;

        let stock = self
            .books_repository
            .get_stock(&mut tx, book)
            .await?
            .ok_or(CartsServiceError::BookNotFound)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let mut lines = cart_lines(&items);

        if quantity > stock.quantity {
            return Err(CartsServiceError::InsufficientStock);
        }

        let merged = lines.add(book, stock.price, quantity)?;

        self.items_repository
            .upsert_cart_item(&mut tx, cart.uuid, &merged)
            .await?;

        self.carts_repository
            .set_total(&mut tx, cart.uuid, lines.total_amount())
            .await?;

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        tracing::debug!(cart = %cart.uuid, %book, quantity = merged.quantity, "added book to cart");

        Ok(cart)
    }

    async fn update_item(
        &self,
        user: UserUuid,
        book: BookUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity(LineError::ZeroQuantity));
        }

        let mut tx = self.db.begin().await?;

        let stock = self
            .books_repository
            .get_stock(&mut tx, book)
            .await?
            .ok_or(CartsServiceError::BookNotFound)?;

        if quantity > stock.quantity {
            return Err(CartsServiceError::InsufficientStock);
        }

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let mut lines = cart_lines(&items);

        let change = lines.set_quantity(book, stock.price, quantity)?;

        self.items_repository
            .upsert_cart_item(&mut tx, cart.uuid, &change.line)
            .await?;

        self.carts_repository
            .set_total(&mut tx, cart.uuid, lines.total_amount())
            .await?;

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        tracing::debug!(cart = %cart.uuid, %book, delta = change.delta(), "updated cart line");

        Ok(cart)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let mut lines = cart_lines(&items);

        if let Some(removed) = lines.remove(book) {
            self.books_repository
                .restore_quantity(&mut tx, removed.book, removed.quantity)
                .await?;

            self.items_repository
                .delete_cart_item(&mut tx, cart.uuid, removed.book)
                .await?;
        }

        self.carts_repository
            .set_total(&mut tx, cart.uuid, lines.total_amount())
            .await?;

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let mut lines = cart_lines(&items);

        let mut cleared = lines.clear();

        // Book rows are locked in key order, matching checkout.
        cleared.sort_by_key(|line| line.book);

        for LineItem { book, quantity, .. } in cleared {
            self.books_repository
                .restore_quantity(&mut tx, book, quantity)
                .await?;
        }

        self.items_repository
            .delete_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository
            .set_total(&mut tx, cart.uuid, lines.total_amount())
            .await?;

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with enriched lines.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add units of a book, creating the cart or merging into an existing
    /// line as needed.
    async fn add_item(
        &self,
        user: UserUuid,
        book: BookUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Overwrite the quantity of an existing line.
    async fn update_item(
        &self,
        user: UserUuid,
        book: BookUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Drop a line, returning its units to the book's stock.
    async fn remove_item(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Drop every line, returning all units to stock.
    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;
}
