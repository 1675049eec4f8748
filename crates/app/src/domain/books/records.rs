//! Book Records

use jiff::{Timestamp, civil::Date};
use quire::catalog::Genre;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Book UUID
pub type BookUuid = TypedUuid<BookRecord>;

/// Book Record
///
/// `quantity` is the stock a listing started with and the counter cart
/// operations check and restore; `in_stock` is the available count checkout
/// decrements.
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub uuid: BookUuid,
    pub owner: UserUuid,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub description: Option<String>,
    pub publication_date: Date,
    pub genre: Genre,
    pub publisher: Option<String>,
    pub price: u64,
    pub rating: u32,
    pub quantity: u32,
    pub in_stock: u32,
    pub views: u32,
    pub last_viewed: Timestamp,
    pub last_sold_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One page of a book listing.
#[derive(Debug, Clone, Default)]
pub struct BookPage {
    pub books: Vec<BookRecord>,

    /// Matching books across every page
    pub total: u64,
}

/// Stock counters of a book, as read by cart and checkout paths.
#[derive(Debug, Clone)]
pub(crate) struct BookStock {
    pub uuid: BookUuid,
    pub title: String,
    pub price: u64,
    pub quantity: u32,
    pub in_stock: u32,
}
