//! Related Books Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    books::{errors::into_status_error, models::BookListResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Related Books Handler
///
/// Up to six best-rated other books of the same genre.
#[endpoint(tags("books"), summary = "List Related Books")]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BookListResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let books = state
        .app
        .books
        .related_books(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Related books fetched successfully",
        BookListResponse {
            books: books.into_iter().map(Into::into).collect(),
        },
    ))
}
