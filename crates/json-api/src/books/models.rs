//! Book request and response models.

use std::string::ToString;

use jiff::civil::Date;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quire::{catalog::Genre, pagination::Page, validation::ValidationErrors};
use quire_app::domain::books::{
    data::BookDetails,
    records::{BookPage, BookRecord},
};

use crate::envelope::validation_failed;

/// Editable book fields, as sent on create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookRequest {
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub description: Option<String>,

    /// ISO date, `YYYY-MM-DD`
    pub publication_date: String,

    /// One of the fixed genre names, e.g. `Science Fiction`
    pub genre: String,

    pub publisher: Option<String>,

    /// Price in minor units
    pub price: u64,

    pub rating: u32,

    /// Units originally listed
    pub quantity: u32,

    /// Units available for checkout
    pub in_stock: u32,
}

impl BookRequest {
    /// Parse the typed fields, reporting every problem at once.
    pub(crate) fn into_details(self) -> Result<BookDetails, StatusError> {
        let mut errors = ValidationErrors::new();

        let publication_date = self
            .publication_date
            .trim()
            .parse::<Date>()
            .map_err(|_ignored| errors.push("publicationDate must be an ISO date"))
            .ok();

        let genre = self
            .genre
            .parse::<Genre>()
            .map_err(|error| errors.push(format!("genre: {error}")))
            .ok();

        let (Some(publication_date), Some(genre)) = (publication_date, genre) else {
            return Err(validation_failed(&errors));
        };

        Ok(BookDetails {
            title: self.title,
            author: self.author,
            cover_image: self.cover_image,
            description: self.description,
            publication_date,
            genre,
            publisher: self.publisher,
            price: self.price,
            rating: self.rating,
            quantity: self.quantity,
            in_stock: self.in_stock,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookResponse {
    pub id: Uuid,

    /// User who listed the book
    pub owner: Uuid,

    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub description: Option<String>,
    pub publication_date: String,
    pub genre: String,
    pub publisher: Option<String>,

    /// Price in minor units
    pub price: u64,

    pub rating: u32,
    pub quantity: u32,
    pub in_stock: u32,
    pub views: u32,
    pub last_viewed: String,
    pub last_sold_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookRecord> for BookResponse {
    fn from(book: BookRecord) -> Self {
        BookResponse {
            id: book.uuid.into(),
            owner: book.owner.into(),
            title: book.title,
            author: book.author,
            cover_image: book.cover_image,
            description: book.description,
            publication_date: book.publication_date.to_string(),
            genre: book.genre.to_string(),
            publisher: book.publisher,
            price: book.price,
            rating: book.rating,
            quantity: book.quantity,
            in_stock: book.in_stock,
            views: book.views,
            last_viewed: book.last_viewed.to_string(),
            last_sold_at: book.last_sold_at.as_ref().map(ToString::to_string),
            created_at: book.created_at.to_string(),
            updated_at: book.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    /// Matching books across every page
    pub total_books: u64,
    pub current_page: u32,
    pub total_pages: u64,
    pub limit: u32,
}

/// One page of books.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BooksResponse {
    pub books: Vec<BookResponse>,
    pub pagination: PaginationResponse,
}

impl BooksResponse {
    pub(crate) fn new(page: Page, result: BookPage) -> Self {
        BooksResponse {
            books: result.books.into_iter().map(Into::into).collect(),
            pagination: PaginationResponse {
                total_books: result.total,
                current_page: page.page(),
                total_pages: page.total_pages(result.total),
                limit: page.limit(),
            },
        }
    }
}

/// An unpaginated list of books.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookListResponse {
    pub books: Vec<BookResponse>,
}

/// Identifier of a deleted book.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedBookResponse {
    pub id: Uuid,
}
