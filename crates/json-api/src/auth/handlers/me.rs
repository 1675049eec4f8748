//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{UserResponse, errors::user_status_error},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Current User Handler
///
/// Returns the profile of the signed-in user.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ApiResponse<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let user = state
        .app
        .users
        .get_user(actor.user)
        .await
        .map_err(user_status_error)?;

    Ok(ApiResponse::ok("User fetched successfully", user.into()))
}
