//! Book Data

use jiff::civil::Date;
use quire::{catalog::Genre, validation::ValidationErrors};

use crate::domain::{books::records::BookUuid, users::records::UserUuid};

/// Editable book fields, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetails {
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
}

impl BookDetails {
    /// Check the free-text fields.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`].
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require_non_blank("title", &self.title);
        errors.require_non_blank("author", &self.author);
        errors.require_non_blank("coverImage", &self.cover_image);

        errors.into_result()
    }

    /// Trim text fields, dropping optional ones left blank.
    #[must_use]
    pub fn trimmed(self) -> Self {
        let optional = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            cover_image: self.cover_image.trim().to_string(),
            description: optional(self.description),
            publisher: optional(self.publisher),
            ..self
        }
    }
}

/// New Book Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub uuid: BookUuid,
    pub owner: UserUuid,
    pub details: BookDetails,
}
