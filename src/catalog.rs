//! Catalog

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Books viewed within this many days count as trending.
pub const TRENDING_WINDOW_DAYS: i32 = 30;

/// Books sold within this many days count as recently ordered.
pub const RECENTLY_SOLD_WINDOW_DAYS: i32 = 30;

/// Maximum number of related books returned for a book.
pub const RELATED_BOOKS_LIMIT: u32 = 6;

/// Fixed page size of search results.
pub const SEARCH_PAGE_SIZE: u32 = 8;

/// Fixed page size of a user's own listings.
pub const USER_BOOKS_PAGE_SIZE: u32 = 10;

/// Error returned when parsing a genre name fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre: {0}")]
pub struct UnknownGenre(pub String);

/// Book genre, one of a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    /// Fiction
    Fiction,

    /// Non-fiction
    #[serde(rename = "Non-fiction")]
    NonFiction,

    /// Science Fiction
    #[serde(rename = "Science Fiction")]
    ScienceFiction,

    /// Mystery
    Mystery,

    /// Romance
    Romance,

    /// Thriller
    Thriller,

    /// Biography
    Biography,

    /// History
    History,

    /// Self-help
    #[serde(rename = "Self-help")]
    SelfHelp,

    /// Anything else
    Other,
}

impl Genre {
    /// Every genre, in display order.
    pub const ALL: [Genre; 10] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::ScienceFiction,
        Genre::Mystery,
        Genre::Romance,
        Genre::Thriller,
        Genre::Biography,
        Genre::History,
        Genre::SelfHelp,
        Genre::Other,
    ];

    /// Display and storage name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-fiction",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Biography => "Biography",
            Genre::History => "History",
            Genre::SelfHelp => "Self-help",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownGenre;

    /// Names match exactly, including case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

/// Escape `LIKE` wildcards so a search term is matched literally, and wrap
/// it for a substring match.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);

    pattern.push('%');

    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}

/// Units sold so far, as reported by the best-selling listing.
pub fn units_sold(quantity: u32, in_stock: u32) -> i64 {
    i64::from(quantity) - i64::from(in_stock)
}
