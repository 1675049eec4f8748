//! Book Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use quire::catalog::SEARCH_PAGE_SIZE;

use crate::{
    books::{errors::into_status_error, models::BooksResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Book Search Handler
///
/// Case-insensitive substring search over title, author and genre, eight
/// books per page.
#[endpoint(tags("books"), summary = "Search Books")]
pub(crate) async fn handler(
    query: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BooksResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = query
        .into_inner()
        .filter(|query| !query.trim().is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("Search query is required"))?;

    let page = page.into_fixed_page(SEARCH_PAGE_SIZE)?;

    let books = state
        .app
        .books
        .search_books(&query, page)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Books fetched successfully",
        BooksResponse::new(page, books),
    ))
}

#[cfg(test)]
mod tests {
    use quire::pagination::Page;
    use quire_app::domain::books::MockBooksService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        books::handlers::tests::page_of,
        envelope::ApiError,
        test_helpers::{Mocks, service},
    };

    use super::*;

    fn make_service(books: MockBooksService) -> Service {
        service(
            Mocks {
                books,
                ..Mocks::default()
            },
            None,
            Router::with_path("books/search").get(handler),
        )
    }

    #[tokio::test]
    async fn test_search_uses_fixed_page_size() -> TestResult {
        let expected = Page::new(2, SEARCH_PAGE_SIZE)?;

        let mut books = MockBooksService::new();

        books
            .expect_search_books()
            .once()
            .withf(move |query, page| query == "dune" && *page == expected)
            .return_once(|_, _| Ok(page_of(&["Dune"], 9)));

        let body: ApiResponse<BooksResponse> =
            TestClient::get("http://example.com/books/search?query=dune&page=2&limit=50")
                .send(&make_service(books))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.pagination.limit, SEARCH_PAGE_SIZE);
        assert_eq!(body.data.pagination.total_pages, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_search_books()
            .once()
            .return_once(|_, _| Ok(page_of(&[], 0)));

        let body: ApiResponse<BooksResponse> =
            TestClient::get("http://example.com/books/search?query=zzz")
                .send(&make_service(books))
                .await
                .take_json()
                .await?;

        assert!(body.data.books.is_empty());
        assert_eq!(body.data.pagination.total_books, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_search_blank_query_returns_400() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_search_books().never();

        let mut res = TestClient::get("http://example.com/books/search?query=%20%20")
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ApiError = res.take_json().await?;

        assert_eq!(body.message, "Search query is required");

        Ok(())
    }
}
