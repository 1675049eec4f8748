//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use quire::users::Role;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::try_get_parsed,
    domain::{
        books::records::BookUuid,
        carts::records::CartUuid,
        orders::records::OrderUuid,
        users::records::{UserCredentials, UserRecord, UserUuid},
    },
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/find_credentials_by_email.sql");
const SET_ROLE_BY_EMAIL_SQL: &str = include_str!("sql/set_role_by_email.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<UserUuid, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(CREATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(UserUuid::from_uuid)
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_role_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        role: Role,
    ) -> Result<UserUuid, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(SET_ROLE_BY_EMAIL_SQL)
            .bind(email)
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(UserUuid::from_uuid)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let orders: Vec<Uuid> = row.try_get("order_uuids")?;
        let books: Vec<Uuid> = row.try_get("book_uuids")?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            role: try_get_parsed(row, "role")?,
            cart: row
                .try_get::<Option<Uuid>, _>("cart_uuid")?
                .map(CartUuid::from_uuid),
            orders: orders.into_iter().map(OrderUuid::from_uuid).collect(),
            books: books.into_iter().map(BookUuid::from_uuid).collect(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            role: try_get_parsed(row, "role")?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
