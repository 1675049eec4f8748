//! Trending Books Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    books::{errors::into_status_error, models::BooksResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Trending Books Handler
///
/// Books viewed in the last 30 days, most viewed first.
#[endpoint(tags("books"), summary = "List Trending Books")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BooksResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page.into_page(limit)?;

    let books = state
        .app
        .books
        .trending_books(page, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Trending books fetched successfully",
        BooksResponse::new(page, books),
    ))
}
