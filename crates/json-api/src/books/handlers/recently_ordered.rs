//! Recently Ordered Books Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    books::{errors::into_status_error, models::BooksResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Recently Ordered Books Handler
///
/// Books sold in the last 30 days, most recent sale first.
#[endpoint(tags("books"), summary = "List Recently Ordered Books")]
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
        .recently_ordered_books(page, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Recently ordered books fetched successfully",
        BooksResponse::new(page, books),
    ))
}

#[cfg(test)]
mod tests {
    use quire_app::domain::books::MockBooksService;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service};

    use super::*;

    #[tokio::test]
    async fn test_zero_page_returns_400() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_recently_ordered_books().never();

        let service = service(
            Mocks {
                books,
                ..Mocks::default()
            },
            None,
            Router::with_path("books/recently-ordered-books").get(handler),
        );

        let res = TestClient::get("http://example.com/books/recently-ordered-books?page=0")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
