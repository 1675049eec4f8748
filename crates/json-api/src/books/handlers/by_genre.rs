//! Books By Genre Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use quire::catalog::Genre;

use crate::{
    books::{errors::into_status_error, models::BooksResponse},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Books By Genre Handler
#[endpoint(tags("books"), summary = "List Books By Genre")]
pub(crate) async fn handler(
    genre: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BooksResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let genre = genre
        .into_inner()
        .ok_or_else(|| StatusError::bad_request().brief("Genre is required"))?
        .parse::<Genre>()
        .or_400("Invalid genre")?;

    let page = page.into_page(limit)?;

    let books = state
        .app
        .books
        .books_by_genre(genre, page)
        .await
        .map_err(into_status_error)?;

    Ok(ApiResponse::ok(
        "Books fetched successfully",
        BooksResponse::new(page, books),
    ))
}

#[cfg(test)]
mod tests {
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
            Router::with_path("books/get-books-by-genre").get(handler),
        )
    }

    #[tokio::test]
    async fn test_by_genre_parses_display_name() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_books_by_genre()
            .once()
            .withf(|genre, _| *genre == Genre::NonFiction)
            .return_once(|_, _| Ok(page_of(&["Sapiens"], 1)));

        let res = TestClient::get("http://example.com/books/get-books-by-genre?genre=Non-fiction")
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_genre_returns_400() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_books_by_genre().never();

        let mut res = TestClient::get("http://example.com/books/get-books-by-genre?genre=Poetry")
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ApiError = res.take_json().await?;

        assert_eq!(body.message, "Invalid genre");
        assert_eq!(body.errors.as_slice(), &["unknown genre: Poetry".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_genre_returns_400() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_books_by_genre().never();

        let res = TestClient::get("http://example.com/books/get-books-by-genre")
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
