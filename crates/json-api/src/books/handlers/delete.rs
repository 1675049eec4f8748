//! Delete Book Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    books::{errors::into_status_error, models::DeletedBookResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Delete Book Handler
#[endpoint(
    tags("books"),
    summary = "Delete Book",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<DeletedBookResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let id = id.into_inner();

    state
        .app
        .books
        .delete_book(actor.user, id.into())
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Book deleted successfully",
        DeletedBookResponse { id },
    ))
}

#[cfg(test)]
mod tests {
    use quire_app::domain::books::{BooksServiceError, MockBooksService, records::BookUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER, customer, service};

    use super::*;

    fn make_service(books: MockBooksService) -> Service {
        service(
            Mocks {
                books,
                ..Mocks::default()
            },
            Some(customer()),
            Router::with_path("books/delete-book/{id}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_book_success() -> TestResult {
        let uuid = BookUuid::new();

        let mut books = MockBooksService::new();

        books
            .expect_delete_book()
            .once()
            .withf(move |owner, book| *owner == TEST_USER && *book == uuid)
            .return_once(|_, _| Ok(()));

        let body: ApiResponse<DeletedBookResponse> =
            TestClient::delete(format!("http://example.com/books/delete-book/{uuid}"))
                .send(&make_service(books))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.id, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_book_returns_404() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_delete_book()
            .once()
            .return_once(|_, _| Err(BooksServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/books/delete-book/{}",
            BookUuid::new()
        ))
        .send(&make_service(books))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
