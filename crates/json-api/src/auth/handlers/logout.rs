//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, middleware::session_token},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    /// Whether an active session was revoked
    pub revoked: bool,
}

/// Logout Handler
///
/// Revokes the presented session, if any, and expires the cookie.
#[endpoint(tags("auth"), summary = "Logout")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<LogoutResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let revoked = match session_token(req) {
        Some(token) => state
            .app
            .auth
            .logout(&token)
            .await
            .map_err(into_status_error)?,
        None => false,
    };

    res.add_cookie(state.cookies.expired());

    Ok(ApiResponse::ok(
        "Logged out successfully",
        LogoutResponse { revoked },
    ))
}
