//! Book Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    books::{errors::into_status_error, models::BooksResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Book Index Handler
///
/// Returns every book, oldest first.
#[endpoint(tags("books"), summary = "List Books")]
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
        .list_books(page)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Books fetched successfully",
        BooksResponse::new(page, books),
    ))
}
