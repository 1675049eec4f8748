//! Validation

use std::sync::LazyLock;

use regex::Regex;
use smallvec::SmallVec;
use thiserror::Error;

/// Accumulated validation problems, one human-readable detail per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed")]
pub struct ValidationErrors(SmallVec<[String; 4]>);

impl ValidationErrors {
    /// Create an empty set of problems.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem.
    pub fn push(&mut self, detail: impl Into<String>) {
        self.0.push(detail.into());
    }

    /// Record `"{field} is required"` when `value` is blank after trimming.
    pub fn require_non_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(format!("{field} is required"));
        }
    }

    /// Whether no problem was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded problems.
    pub fn details(&self) -> &[String] {
        &self.0
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one problem was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Something, `@`, something, `.`, something; no whitespace and a single `@`.
#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern")
});

/// Five digits, optionally followed by `-` and four digits. ASCII digits only.
#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static ZIP_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?-u:\d){5}(-(?-u:\d){4})?$").expect("valid zip code pattern")
});

/// Loose email shape check.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// US ZIP or ZIP+4.
pub fn is_zip_code(value: &str) -> bool {
    ZIP_CODE.is_match(value)
}
