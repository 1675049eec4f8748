//! Create Book Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use quire_app::domain::books::{data::NewBook, records::BookUuid};

use crate::{
    books::{
        errors::into_status_error,
        models::{BookRequest, BookResponse},
    },
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Create Book Handler
///
/// Lists a new book owned by the signed-in user.
#[endpoint(
    tags("books"),
    summary = "Create Book",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Book created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid book payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BookRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<BookResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let details = json.into_inner().into_details()?;

    let book = state
        .app
        .books
        .create_book(NewBook {
            uuid: BookUuid::new(),
            owner: actor.user,
            details,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/books/get-book-by-id/{}", book.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(ApiResponse::created("Book created successfully", book.into()))
}

#[cfg(test)]
mod tests {
    use quire::{catalog::Genre, validation::ValidationErrors};
    use quire_app::domain::books::{BooksServiceError, MockBooksService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        books::handlers::tests::{book_body, make_book},
        envelope::ApiError,
        test_helpers::{Mocks, TEST_USER, customer, service},
    };

    use super::*;

    fn make_service(books: MockBooksService) -> Service {
        service(
            Mocks {
                books,
                ..Mocks::default()
            },
            Some(customer()),
            Router::with_path("books/create").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_book_success() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_create_book()
            .once()
            .withf(|new| {
                new.owner == TEST_USER
                    && new.details.title == "Dune"
                    && new.details.genre == Genre::ScienceFiction
                    && new.details.price == 1_299
            })
            .return_once(|new| Ok(make_book(new.uuid, "Dune")));

        let mut res = TestClient::post("http://example.com/books/create")
            .json(&book_body())
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ApiResponse<BookResponse> = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(body.status_code, 201);
        assert_eq!(
            location,
            Some(format!("/api/books/get-book-by-id/{}", body.data.id).as_str())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_book_bad_genre_returns_400() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_create_book().never();

        let mut body = book_body();

        body["genre"] = json!("Space Opera");

        let mut res = TestClient::post("http://example.com/books/create")
            .json(&body)
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ApiError = res.take_json().await?;

        assert_eq!(body.message, "Validation failed");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_book_negative_price_returns_400() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_create_book().never();

        let mut body = book_body();

        body["price"] = json!(-5);

        let res = TestClient::post("http://example.com/books/create")
            .json(&body)
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_book_blank_title_returns_400() -> TestResult {
        let mut errors = ValidationErrors::new();

        errors.push("title is required");

        let mut books = MockBooksService::new();

        books
            .expect_create_book()
            .once()
            .return_once(move |_| Err(BooksServiceError::Validation(errors)));

        let mut body = book_body();

        body["title"] = json!("  ");

        let mut res = TestClient::post("http://example.com/books/create")
            .json(&body)
            .send(&make_service(books))
            .await;

        let body: ApiError = res.take_json().await?;

        assert_eq!(body.status_code, 400);
        assert_eq!(body.errors.as_slice(), &["title is required".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_book_requires_session() -> TestResult {
        let mut books = MockBooksService::new();

        books.expect_create_book().never();

        let service = service(
            Mocks {
                books,
                ..Mocks::default()
            },
            None,
            Router::with_path("books/create").post(handler),
        );

        let res = TestClient::post("http://example.com/books/create")
            .json(&book_body())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
