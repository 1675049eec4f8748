//! Pagination query helpers.

use quire::pagination::Page;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait PageExt {
    /// Page number from this parameter, size from `limit`, both defaulted.
    fn into_page(self, limit: QueryParam<u32, false>) -> Result<Page, StatusError>;

    /// Page number from this parameter with a fixed page size.
    fn into_fixed_page(self, limit: u32) -> Result<Page, StatusError>;
}

impl PageExt for QueryParam<u32, false> {
    fn into_page(self, limit: QueryParam<u32, false>) -> Result<Page, StatusError> {
        Page::with_defaults(self.into_inner(), limit.into_inner()).or_400("Invalid pagination")
    }

    fn into_fixed_page(self, limit: u32) -> Result<Page, StatusError> {
        Page::with_defaults(self.into_inner(), Some(limit)).or_400("Invalid pagination")
    }
}
