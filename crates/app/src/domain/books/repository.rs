//! Books Repository

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use quire::catalog::Genre;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query, query_as,
    query::QueryAs,
};

use crate::{
    database::{amount_param, count_param, try_get_amount, try_get_count, try_get_parsed},
    domain::{
        books::{
            data::BookDetails,
            records::{BookRecord, BookStock, BookUuid},
        },
        users::records::UserUuid,
    },
};

const LIST_BOOKS_SQL: &str = include_str!("sql/list_books.sql");
const COUNT_BOOKS_SQL: &str = include_str!("sql/count_books.sql");
const SEARCH_BOOKS_SQL: &str = include_str!("sql/search_books.sql");
const COUNT_SEARCH_BOOKS_SQL: &str = include_str!("sql/count_search_books.sql");
const BOOKS_BY_GENRE_SQL: &str = include_str!("sql/books_by_genre.sql");
const COUNT_BOOKS_BY_GENRE_SQL: &str = include_str!("sql/count_books_by_genre.sql");
const TRENDING_BOOKS_SQL: &str = include_str!("sql/trending_books.sql");
const COUNT_TRENDING_BOOKS_SQL: &str = include_str!("sql/count_trending_books.sql");
const BEST_SELLING_BOOKS_SQL: &str = include_str!("sql/best_selling_books.sql");
const RECENTLY_ORDERED_BOOKS_SQL: &str = include_str!("sql/recently_ordered_books.sql");
const COUNT_RECENTLY_ORDERED_BOOKS_SQL: &str =
    include_str!("sql/count_recently_ordered_books.sql");
const USER_BOOKS_SQL: &str = include_str!("sql/user_books.sql");
const COUNT_USER_BOOKS_SQL: &str = include_str!("sql/count_user_books.sql");
const RELATED_BOOKS_SQL: &str = include_str!("sql/related_books.sql");
const GET_BOOK_SQL: &str = include_str!("sql/get_book.sql");
const VIEW_BOOK_SQL: &str = include_str!("sql/view_book.sql");
const CREATE_BOOK_SQL: &str = include_str!("sql/create_book.sql");
const UPDATE_BOOK_SQL: &str = include_str!("sql/update_book.sql");
const DELETE_BOOK_SQL: &str = include_str!("sql/delete_book.sql");
const GET_STOCK_SQL: &str = include_str!("sql/get_stock.sql");
const TAKE_IN_STOCK_SQL: &str = include_str!("sql/take_in_stock.sql");
const RESTORE_QUANTITY_SQL: &str = include_str!("sql/restore_quantity.sql");

/// Which books a paginated listing selects, and in which order.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Listing<'a> {
    /// Every book, oldest first
    All,

    /// Substring match on title, author or genre; holds a `LIKE` pattern
    Search(&'a str),

    /// Books of one genre
    Genre(Genre),

    /// Viewed within `days` of `point_in_time`, most viewed first
    Trending { point_in_time: Timestamp, days: i32 },

    /// Most units sold first
    BestSelling,

    /// Sold within `days` of `point_in_time`, most recent first
    RecentlySold { point_in_time: Timestamp, days: i32 },

    /// Books listed by one user
    Owner(UserUuid),
}

impl Listing<'_> {
    const fn sql(&self) -> (&'static str, &'static str) {
        match self {
            Listing::All => (LIST_BOOKS_SQL, COUNT_BOOKS_SQL),
            Listing::Search(_) => (SEARCH_BOOKS_SQL, COUNT_SEARCH_BOOKS_SQL),
            Listing::Genre(_) => (BOOKS_BY_GENRE_SQL, COUNT_BOOKS_BY_GENRE_SQL),
            Listing::Trending { .. } => (TRENDING_BOOKS_SQL, COUNT_TRENDING_BOOKS_SQL),
            Listing::BestSelling => (BEST_SELLING_BOOKS_SQL, COUNT_BOOKS_SQL),
            Listing::RecentlySold { .. } => {
                (RECENTLY_ORDERED_BOOKS_SQL, COUNT_RECENTLY_ORDERED_BOOKS_SQL)
            }
            Listing::Owner(_) => (USER_BOOKS_SQL, COUNT_USER_BOOKS_SQL),
        }
    }

    /// Bind the listing's filter parameters, which always come first.
    fn bind<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        Self: 'q,
    {
        match self {
            Listing::All | Listing::BestSelling => query,
            Listing::Search(pattern) => query.bind(pattern),
            Listing::Genre(genre) => query.bind(genre.as_str()),
            Listing::Trending {
                point_in_time,
                days,
            }
            | Listing::RecentlySold {
                point_in_time,
                days,
            } => query.bind(SqlxTimestamp::from(point_in_time)).bind(days),
            Listing::Owner(owner) => query.bind(owner.into_uuid()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: Listing<'_>,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        let offset = i64::try_from(offset).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        listing
            .bind(query_as::<Postgres, BookRecord>(listing.sql().0))
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: Listing<'_>,
    ) -> Result<u64, sqlx::Error> {
        let (count,): (i64,) = listing
            .bind(query_as::<Postgres, (i64,)>(listing.sql().1))
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }

    pub(crate) async fn related_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        genre: Genre,
        limit: u32,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(RELATED_BOOKS_SQL)
            .bind(book.into_uuid())
            .bind(genre.as_str())
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(GET_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn view_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(VIEW_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        owner: UserUuid,
        details: &BookDetails,
    ) -> Result<BookRecord, sqlx::Error> {
        bind_details(
            query_as::<Postgres, BookRecord>(CREATE_BOOK_SQL)
                .bind(book.into_uuid())
                .bind(owner.into_uuid()),
            details,
        )?
        .fetch_one(&mut **tx)
        .await
    }

    pub(crate) async fn update_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        owner: UserUuid,
        details: &BookDetails,
    ) -> Result<BookRecord, sqlx::Error> {
        bind_details(
            query_as::<Postgres, BookRecord>(UPDATE_BOOK_SQL)
                .bind(book.into_uuid())
                .bind(owner.into_uuid()),
            details,
        )?
        .fetch_one(&mut **tx)
        .await
    }

    pub(crate) async fn delete_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        owner: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(owner.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<Option<BookStock>, sqlx::Error> {
        query_as::<Postgres, BookStock>(GET_STOCK_SQL)
            .bind(book.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Decrement `in_stock` by `quantity` and stamp the sale, only when enough
    /// units are available. `None` means the book is missing or short.
    pub(crate) async fn take_in_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        quantity: u32,
    ) -> Result<Option<BookStock>, sqlx::Error> {
        query_as::<Postgres, BookStock>(TAKE_IN_STOCK_SQL)
            .bind(book.into_uuid())
            .bind(count_param(quantity)?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn restore_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTORE_QUANTITY_SQL)
            .bind(book.into_uuid())
            .bind(count_param(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Bind editable fields as parameters `$3` to `$13`.
fn bind_details<'q>(
    query: QueryAs<'q, Postgres, BookRecord, PgArguments>,
    details: &'q BookDetails,
) -> Result<QueryAs<'q, Postgres, BookRecord, PgArguments>, sqlx::Error> {
    Ok(query
        .bind(details.title.as_str())
        .bind(details.author.as_str())
        .bind(details.cover_image.as_str())
        .bind(details.description.as_deref())
        .bind(SqlxDate::from(details.publication_date))
        .bind(details.genre.as_str())
        .bind(details.publisher.as_deref())
        .bind(amount_param(details.price)?)
        .bind(count_param(details.rating)?)
        .bind(count_param(details.quantity)?)
        .bind(count_param(details.in_stock)?))
}

impl<'r> FromRow<'r, PgRow> for BookRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BookUuid::from_uuid(row.try_get("uuid")?),
            owner: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            cover_image: row.try_get("cover_image")?,
            description: row.try_get("description")?,
            publication_date: row.try_get::<SqlxDate, _>("publication_date")?.to_jiff(),
            genre: try_get_parsed(row, "genre")?,
            publisher: row.try_get("publisher")?,
            price: try_get_amount(row, "price")?,
            rating: try_get_count(row, "rating")?,
            quantity: try_get_count(row, "quantity")?,
            in_stock: try_get_count(row, "in_stock")?,
            views: try_get_count(row, "views")?,
            last_viewed: row.try_get::<SqlxTimestamp, _>("last_viewed")?.to_jiff(),
            last_sold_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_sold_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BookStock {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BookUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            price: try_get_amount(row, "price")?,
            quantity: try_get_count(row, "quantity")?,
            in_stock: try_get_count(row, "in_stock")?,
        })
    }
}
