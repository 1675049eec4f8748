//! Books service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use quire::{
    catalog::{
        Genre, RECENTLY_SOLD_WINDOW_DAYS, RELATED_BOOKS_LIMIT, TRENDING_WINDOW_DAYS, like_pattern,
    },
    lines::total_amount,
    pagination::Page,
};

use crate::{
    database::Db,
    domain::{
        books::{
            BooksServiceError, PgBooksRepository,
            data::{BookDetails, NewBook},
            records::{BookPage, BookRecord, BookUuid},
            repository::Listing,
        },
        carts::{PgCartItemsRepository, PgCartsRepository, records::CartItemRecord},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgBooksService {
    db: Db,
    repository: PgBooksRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgBooksService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBooksRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn page(&self, listing: Listing<'_>, page: Page) -> Result<BookPage, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_books(&mut tx, listing).await?;

        let books = self
            .repository
            .list_books(&mut tx, listing, page.limit(), page.offset())
            .await?;

        tx.commit().await?;

        Ok(BookPage { books, total })
    }
}

#[async_trait]
impl BooksService for PgBooksService {
    async fn list_books(&self, page: Page) -> Result<BookPage, BooksServiceError> {
        self.page(Listing::All, page).await
    }

    async fn search_books(&self, query: &str, page: Page) -> Result<BookPage, BooksServiceError> {
        if query.trim().is_empty() {
            return Err(BooksServiceError::EmptyQuery);
        }

        let pattern = like_pattern(query);

        self.page(Listing::Search(&pattern), page).await
    }

    async fn books_by_genre(&self, genre: Genre, page: Page) -> Result<BookPage, BooksServiceError> {
        self.page(Listing::Genre(genre), page).await
    }

    async fn trending_books(
        &self,
        page: Page,
        point_in_time: Timestamp,
    ) -> Result<BookPage, BooksServiceError> {
        self.page(
            Listing::Trending {
                point_in_time,
                days: TRENDING_WINDOW_DAYS,
            },
            page,
        )
        .await
    }

    async fn best_selling_books(&self, page: Page) -> Result<BookPage, BooksServiceError> {
        self.page(Listing::BestSelling, page).await
    }

    async fn recently_ordered_books(
        &self,
        page: Page,
        point_in_time: Timestamp,
    ) -> Result<BookPage, BooksServiceError> {
        self.page(
            Listing::RecentlySold {
                point_in_time,
                days: RECENTLY_SOLD_WINDOW_DAYS,
            },
            page,
        )
        .await
    }

    async fn user_books(&self, owner: UserUuid, page: Page) -> Result<BookPage, BooksServiceError> {
        self.page(Listing::Owner(owner), page).await
    }

    async fn related_books(&self, book: BookUuid) -> Result<Vec<BookRecord>, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let source = self.repository.get_book(&mut tx, book).await?;

        let related = self
            .repository
            .related_books(&mut tx, source.uuid, source.genre, RELATED_BOOKS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(related)
    }

    async fn view_book(&self, book: BookUuid) -> Result<BookRecord, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let viewed = self.repository.view_book(&mut tx, book).await?;

        tx.commit().await?;

        Ok(viewed)
    }

    async fn create_book(&self, book: NewBook) -> Result<BookRecord, BooksServiceError> {
        let details = book.details.trimmed();

        details.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_book(&mut tx, book.uuid, book.owner, &details)
            .await?;

        tx.commit().await?;

        tracing::info!(book = %created.uuid, owner = %created.owner, "created book");

        Ok(created)
    }

    async fn update_book(
        &self,
        owner: UserUuid,
        book: BookUuid,
        details: BookDetails,
    ) -> Result<BookRecord, BooksServiceError> {
        let details = details.trimmed();

        details.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_book(&mut tx, book, owner, &details)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_book(&self, owner: UserUuid, book: BookUuid) -> Result<(), BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let carts = self
            .carts_repository
            .lock_carts_holding(&mut tx, book)
            .await?;

        let rows_affected = self.repository.delete_book(&mut tx, book, owner).await?;

        if rows_affected == 0 {
            return Err(BooksServiceError::NotFound);
        }

        // Lines for the book went with it; reprice what is left.
        for cart in &carts {
            let items = self.items_repository.get_cart_items(&mut tx, *cart).await?;

            let lines: Vec<_> = items.iter().map(CartItemRecord::line).collect();

            self.carts_repository
                .set_total(&mut tx, *cart, total_amount(&lines))
                .await?;
        }

        tx.commit().await?;

        tracing::info!(%book, carts = carts.len(), "deleted book");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BooksService: Send + Sync {
    /// Every book, oldest first.
    async fn list_books(&self, page: Page) -> Result<BookPage, BooksServiceError>;

    /// Case-insensitive substring search over title, author and genre.
    async fn search_books(&self, query: &str, page: Page) -> Result<BookPage, BooksServiceError>;

    /// Books of one genre.
    async fn books_by_genre(&self, genre: Genre, page: Page) -> Result<BookPage, BooksServiceError>;

    /// Books viewed recently, most viewed first.
    async fn trending_books(
        &self,
        page: Page,
        point_in_time: Timestamp,
    ) -> Result<BookPage, BooksServiceError>;

    /// Books by units sold, highest first.
    async fn best_selling_books(&self, page: Page) -> Result<BookPage, BooksServiceError>;

    /// Books sold recently, most recent first.
    async fn recently_ordered_books(
        &self,
        page: Page,
        point_in_time: Timestamp,
    ) -> Result<BookPage, BooksServiceError>;

    /// Books listed by `owner`.
    async fn user_books(&self, owner: UserUuid, page: Page) -> Result<BookPage, BooksServiceError>;

    /// Best-rated other books of the same genre.
    async fn related_books(&self, book: BookUuid) -> Result<Vec<BookRecord>, BooksServiceError>;

    /// Retrieve a book, counting the view.
    async fn view_book(&self, book: BookUuid) -> Result<BookRecord, BooksServiceError>;

    /// List a new book.
    async fn create_book(&self, book: NewBook) -> Result<BookRecord, BooksServiceError>;

    /// Replace the editable fields of a book owned by `owner`.
    async fn update_book(
        &self,
        owner: UserUuid,
        book: BookUuid,
        details: BookDetails,
    ) -> Result<BookRecord, BooksServiceError>;

    /// Delete a book owned by `owner`.
    async fn delete_book(&self, owner: UserUuid, book: BookUuid) -> Result<(), BooksServiceError>;
}
