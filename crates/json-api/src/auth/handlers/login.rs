//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{UserResponse, errors::into_status_error},
    envelope::ApiResponse,
    extensions::*,
    observability::record_session_issued,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub user: UserResponse,

    /// When the session cookie stops being accepted
    pub expires_at: String,
}

/// Login Handler
///
/// Opens a session and sets the `session` cookie.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid email or password format"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::NOT_FOUND, description = "User does not exist"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<LoginResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    res.add_cookie(state.cookies.session(session.token, session.expires_at));

    record_session_issued();

    Ok(ApiResponse::ok(
        "Logged in successfully",
        LoginResponse {
            user: session.user.into(),
            expires_at: session.expires_at.to_string(),
        },
    ))
}
