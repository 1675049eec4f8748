//! JSON response envelope.
//!
//! Every `/api` response carries `statusCode`, `data`, `message` and
//! `success`. Error responses add the validation `errors`, one entry per
//! line of the [`StatusError`] detail.

use quire::validation::ValidationErrors;
use salvo::{http::ResBody, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Successful response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiResponse<T> {
    /// HTTP status code, repeated in the body
    pub status_code: u16,

    /// Response payload
    pub data: T,

    /// Human readable outcome
    pub message: String,

    /// Always `true`
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: true,
        }
    }

    /// A 200 envelope.
    pub(crate) fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self::new(StatusCode::OK, message, data))
    }

    /// A 201 envelope. The caller still sets the response status.
    pub(crate) fn created(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self::new(StatusCode::CREATED, message, data))
    }
}

/// Failed response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiError {
    pub status_code: u16,
    pub data: Option<()>,
    pub message: String,
    pub success: bool,
    pub errors: SmallVec<[String; 4]>,
}

impl ApiError {
    fn from_response(status: StatusCode, body: &ResBody) -> Self {
        let (message, errors) = match body {
            ResBody::Error(error) => (
                error.brief.clone(),
                error
                    .detail
                    .as_deref()
                    .map(|detail| detail.lines().map(str::to_string).collect())
                    .unwrap_or_default(),
            ),
            _ => (
                status.canonical_reason().unwrap_or("Error").to_string(),
                SmallVec::new(),
            ),
        };

        Self {
            status_code: status.as_u16(),
            data: None,
            message,
            success: false,
            errors,
        }
    }
}

/// 400 "Validation failed", one detail line per problem.
pub(crate) fn validation_failed(errors: &ValidationErrors) -> StatusError {
    StatusError::bad_request()
        .brief("Validation failed")
        .detail(errors.details().join("\n"))
}

/// Catcher hoop rendering every error response as an [`ApiError`].
#[handler]
pub(crate) async fn error_envelope(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let body = ApiError::from_response(status, &res.body);

    res.render(Json(body));

    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use salvo::{
        catcher::Catcher,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn invalid() -> Result<Json<ApiResponse<u32>>, StatusError> {
        Err(StatusError::bad_request()
            .brief("Validation failed")
            .detail("street is required\nzipCode must be a 5 digit ZIP code"))
    }

    #[handler]
    async fn valid() -> Json<ApiResponse<u32>> {
        ApiResponse::ok("Counted", 7)
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("invalid").get(invalid))
                .push(Router::with_path("valid").get(valid)),
        )
        .catcher(Catcher::default().hoop(error_envelope))
    }

    #[tokio::test]
    async fn test_error_detail_lines_become_errors() -> TestResult {
        let mut res = TestClient::get("http://example.com/invalid")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ApiError = res.take_json().await?;

        assert_eq!(body.status_code, 400);
        assert_eq!(body.message, "Validation failed");
        assert!(!body.success);
        assert_eq!(body.data, None);
        assert_eq!(
            body.errors.as_slice(),
            &[
                "street is required".to_string(),
                "zipCode must be a 5 digit ZIP code".to_string()
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unrouted_paths_are_wrapped() -> TestResult {
        let mut res = TestClient::get("http://example.com/nowhere")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: ApiError = res.take_json().await?;

        assert_eq!(body.status_code, 404);
        assert!(body.errors.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_success_envelope() -> TestResult {
        let body: ApiResponse<u32> = TestClient::get("http://example.com/valid")
            .send(&make_service())
            .await
            .take_json()
            .await?;

        assert_eq!(body.status_code, 200);
        assert_eq!(body.data, 7);
        assert_eq!(body.message, "Counted");
        assert!(body.success);

        Ok(())
    }
}
