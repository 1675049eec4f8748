//! Update Book Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    books::{
        errors::into_status_error,
        models::{BookRequest, BookResponse},
    },
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Update Book Handler
///
/// Replaces every editable field of a book the signed-in user owns.
#[endpoint(
    tags("books"),
    summary = "Update Book",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid book payload"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<BookRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BookResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let details = json.into_inner().into_details()?;

    let book = state
        .app
        .books
        .update_book(actor.user, id.into_inner().into(), details)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok("Book updated successfully", book.into()))
}
