//! Order Items Repository

use quire::lines::LineItem;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query};
use uuid::Uuid;

use crate::{
    database::{amount_param, count_param, try_get_amount, try_get_count},
    domain::{
        books::records::BookUuid,
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        position: u32,
        title: &str,
        line: &LineItem<BookUuid>,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        let uuid = OrderItemUuid::new();

        query(CREATE_ORDER_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(line.book.into_uuid())
            .bind(count_param(position)?)
            .bind(title)
            .bind(count_param(line.quantity)?)
            .bind(amount_param(line.price)?)
            .execute(&mut **tx)
            .await?;

        Ok(OrderItemRecord {
            uuid,
            book: Some(line.book),
            title: title.to_string(),
            quantity: line.quantity,
            price: line.price,
        })
    }

    /// Fetch the items of several orders, paired with the order they belong
    /// to, in line order.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<(OrderUuid, OrderItemRecord)>, sqlx::Error> {
        let order_uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        let rows = query(GET_ORDER_ITEMS_SQL)
            .bind(order_uuids)
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                Ok((
                    OrderUuid::from_uuid(row.try_get("order_uuid")?),
                    OrderItemRecord::from_row(row)?,
                ))
            })
            .collect()
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let book: Option<Uuid> = row.try_get("book_uuid")?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            book: book.map(BookUuid::from_uuid),
            title: row.try_get("title")?,
            quantity: try_get_count(row, "quantity")?,
            price: try_get_amount(row, "price")?,
        })
    }
}
