//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use quire::{
    checkout::{self, CartLineChange},
    lines::LineItem,
    orders::{OrderStatus, PaymentStatus},
};
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        books::{PgBooksRepository, records::BookUuid},
        carts::{PgCartItemsRepository, PgCartsRepository, records::CartItemRecord},
        orders::{
            OrdersServiceError, PgOrderItemsRepository, PgOrdersRepository,
            data::NewOrder,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
        },
        users::{data::Actor, records::UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
    books_repository: PgBooksRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            books_repository: PgBooksRepository::new(),
        }
    }

    /// Decrement a book's shelf stock, telling a missing book apart from an
    /// insufficient one. Returns the book title.
    async fn take_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        quantity: u32,
    ) -> Result<String, OrdersServiceError> {
        if let Some(stock) = self
            .books_repository
            .take_in_stock(tx, book, quantity)
            .await?
        {
            return Ok(stock.title);
        }

        match self.books_repository.get_stock(tx, book).await? {
            Some(stock) => Err(OrdersServiceError::InsufficientStock(stock.title)),
            None => Err(OrdersServiceError::BookNotFound),
        }
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), OrdersServiceError> {
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut grouped: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for (order, item) in self.items_repository.get_order_items(tx, &uuids).await? {
            grouped.entry(order).or_default().push(item);
        }

        for order in orders {
            order.items = grouped.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let address = order.shipping_address.trimmed();

        address.validate()?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(OrdersServiceError::CartEmpty)?;

        let cart_items = self
            .cart_items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let lines: Vec<LineItem<BookUuid>> = cart_items.iter().map(CartItemRecord::line).collect();

        let plan = checkout::plan(&lines, &order.items)?;

        // Book rows are locked in key order so concurrent checkouts cannot
        // deadlock on each other.
        let mut by_book: Vec<&LineItem<BookUuid>> = plan.order_lines.iter().collect();

        by_book.sort_by_key(|line| line.book);

        let mut titles: FxHashMap<BookUuid, String> = FxHashMap::default();

        for line in by_book {
            let title = self.take_stock(&mut tx, line.book, line.quantity).await?;

            titles.insert(line.book, title);
        }

        let mut created = self
            .orders_repository
            .create_order(&mut tx, order.uuid, user, plan.order_total, &address)
            .await?;

        for (position, line) in (0_u32..).zip(&plan.order_lines) {
            let title = titles.get(&line.book).map_or("", String::as_str);

            let item = self
                .items_repository
                .create_order_item(&mut tx, created.uuid, position, title, line)
                .await?;

            created.items.push(item);
        }

        for change in &plan.cart_changes {
            match change {
                CartLineChange::Shrunk(line) => {
                    self.cart_items_repository
                        .upsert_cart_item(&mut tx, cart.uuid, line)
                        .await?;
                }
                CartLineChange::Dropped(book) => {
                    self.cart_items_repository
                        .delete_cart_item(&mut tx, cart.uuid, *book)
                        .await?;
                }
            }
        }

        self.carts_repository
            .set_total(&mut tx, cart.uuid, plan.cart_total)
            .await?;

        tx.commit().await?;

        tracing::info!(
            order = %created.uuid,
            %user,
            lines = created.items.len(),
            total_amount = created.total_amount,
            "created order"
        );

        Ok(created)
    }

    async fn user_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.get_user_orders(&mut tx, user).await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self.orders_repository.get_order(&mut tx, order, user).await?;

        self.attach_items(&mut tx, std::slice::from_mut(&mut found))
            .await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn update_status(
        &self,
        actor: Actor,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let mut updated = self.orders_repository.set_status(&mut tx, order, status).await?;

        self.attach_items(&mut tx, std::slice::from_mut(&mut updated))
            .await?;

        tx.commit().await?;

        tracing::info!(order = %updated.uuid, admin = %actor.user, %status, "updated order status");

        Ok(updated)
    }

    async fn update_payment_status(
        &self,
        actor: Actor,
        order: OrderUuid,
        payment_status: PaymentStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let mut updated = self
            .orders_repository
            .set_payment_status(&mut tx, order, payment_status)
            .await?;

        self.attach_items(&mut tx, std::slice::from_mut(&mut updated))
            .await?;

        tx.commit().await?;

        tracing::info!(
            order = %updated.uuid,
            admin = %actor.user,
            %payment_status,
            "updated order payment status"
        );

        Ok(updated)
    }

    async fn remove_order(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut removed = self.orders_repository.lock_order(&mut tx, order).await?;

        if removed.user != actor.user && !actor.is_admin() {
            return Err(OrdersServiceError::NotFound);
        }

        if !removed.status.is_removable() {
            return Err(OrdersServiceError::NotRemovable);
        }

        self.attach_items(&mut tx, std::slice::from_mut(&mut removed))
            .await?;

        let mut restocked: Vec<(BookUuid, u32)> = removed
            .items
            .iter()
            .filter_map(|item| item.book.map(|book| (book, item.quantity)))
            .collect();

        restocked.sort_by_key(|(book, _)| *book);

        for (book, quantity) in restocked {
            self.books_repository
                .restore_quantity(&mut tx, book, quantity)
                .await?;
        }

        self.orders_repository.delete_order(&mut tx, order).await?;

        tx.commit().await?;

        tracing::info!(order = %removed.uuid, by = %actor.user, "removed order");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Check out part or all of the user's cart into a new order.
    ///
    /// Runs in one transaction: on any error the cart, the stock and the
    /// order table are left as they were.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn user_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// One of the user's own orders.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Overwrite the fulfilment status. Admin only.
    async fn update_status(
        &self,
        actor: Actor,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Overwrite the payment status. Admin only.
    async fn update_payment_status(
        &self,
        actor: Actor,
        order: OrderUuid,
        payment_status: PaymentStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Delete a pending or processing order and put its units back on the
    /// shelf. Visible to the owner and to admins.
    async fn remove_order(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use quire::{checkout::RequestedLine, users::Role};
    use testresult::TestResult;

    use crate::{
        domain::books::data::BookDetails,
        test::{
            TestContext,
            helpers::{book_details, shipping_address},
        },
    };

    use super::*;

    struct Shop {
        ctx: TestContext,
        customer: UserUuid,
        dune: BookUuid,
        emma: BookUuid,
    }

    /// A customer with a cart holding three copies of Dune at 10 each and
    /// one copy of Emma at 25.
    async fn shop() -> TestResult<Shop> {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller").await?;
        let customer = ctx.create_user("customer").await?;

        let dune = ctx
            .create_book(
                seller,
                BookDetails {
                    price: 10,
                    quantity: 5,
                    in_stock: 5,
                    ..book_details("Dune")
                },
            )
            .await?
            .uuid;

        let emma = ctx
            .create_book(
                seller,
                BookDetails {
                    price: 25,
                    quantity: 2,
                    in_stock: 2,
                    ..book_details("Emma")
                },
            )
            .await?
            .uuid;

        ctx.carts.add_item(customer, dune, 3).await?;
        ctx.carts.add_item(customer, emma, 1).await?;

        Ok(Shop {
            ctx,
            customer,
            dune,
            emma,
        })
    }

    fn new_order(items: &[(BookUuid, u32)]) -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            shipping_address: shipping_address(),
            items: items
                .iter()
                .map(|&(book, quantity)| RequestedLine { book, quantity })
                .collect(),
        }
    }

    fn customer(user: UserUuid) -> Actor {
        Actor {
            user,
            role: Role::Customer,
        }
    }

    fn admin(user: UserUuid) -> Actor {
        Actor {
            user,
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn partial_checkout_splits_the_cart_line() -> TestResult {
        let Shop {
            ctx,
            customer,
            dune,
            emma,
        } = shop().await?;

        let order = ctx
            .orders
            .create_order(customer, new_order(&[(dune, 2)]))
            .await?;

        assert_eq!(order.user, customer);
        assert_eq!(order.total_amount, 20);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.items.len(), 1);

        let item = order.items.first().ok_or("missing order item")?;

        assert_eq!(item.book, Some(dune));
        assert_eq!(item.title, "Dune");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 20);

        let cart = ctx.carts.get_cart(customer).await?;
        let remaining: Vec<(BookUuid, u32, u64)> = cart
            .items
            .iter()
            .map(|item| (item.book, item.quantity, item.price))
            .collect();

        assert_eq!(remaining, vec![(dune, 1, 10), (emma, 1, 25)]);
        assert_eq!(cart.total_amount, 35);

        // Checkout draws on shelf stock only.
        assert_eq!(ctx.book_counters(dune).await?, (5, 3));

        Ok(())
    }

    #[tokio::test]
    async fn full_checkout_drops_cart_lines() -> TestResult {
        let Shop {
            ctx,
            customer,
            dune,
            emma,
        } = shop().await?;

        let order = ctx
            .orders
            .create_order(customer, new_order(&[(emma, 1), (dune, 3)]))
            .await?;

        let titles: Vec<&str> = order.items.iter().map(|item| item.title.as_str()).collect();

        assert_eq!(titles, vec!["Emma", "Dune"]);
        assert_eq!(order.total_amount, 55);

        let cart = ctx.carts.get_cart(customer).await?;

        assert!(cart.items.is_empty());
        assert_eq!(cart.total_amount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn any_invalid_line_rejects_the_whole_order() -> TestResult {
        let Shop {
            ctx,
            customer,
            dune,
            emma,
        } = shop().await?;

        let result = ctx
            .orders
            .create_order(customer, new_order(&[(dune, 1), (emma, 2)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidItems(_))),
            "expected InvalidItems, got {result:?}"
        );

        let cart = ctx.carts.get_cart(customer).await?;

        assert_eq!(cart.total_amount, 55);
        assert_eq!(ctx.book_counters(dune).await?, (5, 5));
        assert!(ctx.orders.user_orders(customer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn book_not_in_cart_is_rejected() -> TestResult {
        let Shop { ctx, customer, .. } = shop().await?;

        let result = ctx
            .orders
            .create_order(customer, new_order(&[(BookUuid::new(), 1)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidItems(_))),
            "expected InvalidItems, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_without_cart_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("reader").await?;

        let result = ctx
            .orders
            .create_order(user, new_order(&[(BookUuid::new(), 1)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::CartEmpty)),
            "expected CartEmpty, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_address_is_rejected_with_details() -> TestResult {
        let Shop {
            ctx,
            customer,
            dune,
            ..
        } = shop().await?;

        let mut order = new_order(&[(dune, 1)]);

        order.shipping_address.city = "  ".to_string();
        order.shipping_address.zip_code = "ABCDE".to_string();

        let result = ctx.orders.create_order(customer, order).await;

        let Err(OrdersServiceError::Validation(errors)) = result else {
            return Err(format!("expected Validation, got {result:?}").into());
        };

        assert_eq!(errors.details().len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn shelf_shortage_names_the_book() -> TestResult {
        let Shop {
            ctx,
            customer,
            dune,
            ..
        } = shop().await?;

        sqlx::query("UPDATE books SET in_stock = 1 WHERE uuid = $1")
            .bind(dune.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let result = ctx
            .orders
            .create_order(customer, new_order(&[(dune, 2)]))
            .await;

        assert!(
            matches!(&result, Err(OrdersServiceError::InsufficientStock(title)) if title == "Dune"),
            "expected InsufficientStock, got {result:?}"
        );

        let cart = ctx.carts.get_cart(customer).await?;

        assert_eq!(cart.items.first().map(|item| item.quantity), Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn user_orders_are_newest_first_and_private() -> TestResult {
        let Shop {
            ctx,
            customer,
            dune,
            emma,
        } = shop().await?;

        let first = ctx
            .orders
            .create_order(customer, new_order(&[(dune, 1)]))
            .await?;

        let second = ctx
            .orders
            .create_order(customer, new_order(&[(emma, 1), (dune, 1)]))
            .await?;

        let orders = ctx.orders.user_orders(customer).await?;
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, vec![second.uuid, first.uuid]);
        assert_eq!(orders.first().map(|order| order.items.len()), Some(2));

        let stranger = ctx.create_user("stranger").await?;

        assert!(ctx.orders.user_orders(stranger).await?.is_empty());

        let result = ctx.orders.get_order(stranger, first.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let own = ctx.orders.get_order(customer, first.uuid).await?;

        assert_eq!(own.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn status_updates_require_admin() -> TestResult {
        let Shop {
            ctx,
            customer: owner,
            dune,
            ..
        } = shop().await?;

        let order = ctx
            .orders
            .create_order(owner, new_order(&[(dune, 1)]))
            .await?;

        let result = ctx
            .orders
            .update_status(customer(owner), order.uuid, OrderStatus::Shipped)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let staff = ctx.create_user("staff").await?;

        let updated = ctx
            .orders
            .update_status(admin(staff), order.uuid, OrderStatus::Delivered)
            .await?;

        assert_eq!(updated.status, OrderStatus::Delivered);
        assert_eq!(updated.items.len(), 1);

        let paid = ctx
            .orders
            .update_payment_status(admin(staff), order.uuid, PaymentStatus::Completed)
            .await?;

        assert_eq!(paid.payment_status, PaymentStatus::Completed);
        assert_eq!(paid.status, OrderStatus::Delivered);

        let result = ctx
            .orders
            .update_status(admin(staff), OrderUuid::new(), OrderStatus::Shipped)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn removing_pending_order_restores_book_quantity() -> TestResult {
        let Shop {
            ctx,
            customer: owner,
            dune,
            ..
        } = shop().await?;

        let order = ctx
            .orders
            .create_order(owner, new_order(&[(dune, 2)]))
            .await?;

        assert_eq!(ctx.book_counters(dune).await?, (5, 3));

        let removed = ctx.orders.remove_order(customer(owner), order.uuid).await?;

        assert_eq!(removed.uuid, order.uuid);
        assert_eq!(ctx.book_counters(dune).await?, (7, 3));
        assert!(ctx.orders.user_orders(owner).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn shipped_orders_cannot_be_removed() -> TestResult {
        let Shop {
            ctx,
            customer: owner,
            dune,
            ..
        } = shop().await?;

        let order = ctx
            .orders
            .create_order(owner, new_order(&[(dune, 1)]))
            .await?;

        let staff = ctx.create_user("staff").await?;

        ctx.orders
            .update_status(admin(staff), order.uuid, OrderStatus::Shipped)
            .await?;

        let result = ctx.orders.remove_order(customer(owner), order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotRemovable)),
            "expected NotRemovable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_customers_cannot_remove_an_order() -> TestResult {
        let Shop {
            ctx,
            customer: owner,
            dune,
            ..
        } = shop().await?;

        let order = ctx
            .orders
            .create_order(owner, new_order(&[(dune, 1)]))
            .await?;

        let stranger = ctx.create_user("stranger").await?;

        let result = ctx.orders.remove_order(customer(stranger), order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        ctx.orders.remove_order(admin(stranger), order.uuid).await?;

        Ok(())
    }

    #[tokio::test]
    async fn removal_skips_deleted_books() -> TestResult {
        let Shop {
            ctx,
            customer: owner,
            dune,
            emma,
        } = shop().await?;

        let order = ctx
            .orders
            .create_order(owner, new_order(&[(dune, 1), (emma, 1)]))
            .await?;

        sqlx::query("DELETE FROM books WHERE uuid = $1")
            .bind(emma.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let orders = ctx.orders.user_orders(owner).await?;
        let books: Vec<Option<BookUuid>> = orders
            .iter()
            .flat_map(|order| order.items.iter().map(|item| item.book))
            .collect();

        assert_eq!(books, vec![Some(dune), None]);

        ctx.orders.remove_order(customer(owner), order.uuid).await?;

        assert_eq!(ctx.book_counters(dune).await?, (6, 4));

        Ok(())
    }
}
