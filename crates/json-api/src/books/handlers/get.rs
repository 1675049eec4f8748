//! Get Book Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    books::{errors::into_status_error, models::BookResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Get Book Handler
///
/// Returns a book and counts the view.
#[endpoint(
    tags("books"),
    summary = "Get Book",
    responses(
        (status_code = StatusCode::OK, description = "Book found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed book id"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BookResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let book = state
        .app
        .books
        .view_book(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok("Book fetched successfully", book.into()))
}
