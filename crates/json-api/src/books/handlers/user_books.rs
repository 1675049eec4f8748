//! User Books Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use quire::{catalog::USER_BOOKS_PAGE_SIZE, pagination::Page};

use crate::{
    books::{errors::into_status_error, models::BooksResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// User Books Handler
///
/// The signed-in user's listings, ten per page.
#[endpoint(
    tags("books"),
    summary = "List My Books",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: PathParam<u32>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BooksResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let page = Page::new(page.into_inner(), USER_BOOKS_PAGE_SIZE).or_400("Invalid pagination")?;

    let books = state
        .app
        .books
        .user_books(actor.user, page)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Books fetched successfully",
        BooksResponse::new(page, books),
    ))
}
