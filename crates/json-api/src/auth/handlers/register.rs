//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quire::users::Role;
use quire_app::domain::users::{data::NewUser, records::UserUuid};

use crate::{
    auth::{UserResponse, errors::user_status_error},
    envelope::ApiResponse,
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Register Handler
///
/// Creates a customer account.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid registration"),
        (status_code = StatusCode::CONFLICT, description = "Username or email taken"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.password != request.password_confirm {
        return Err(StatusError::bad_request().brief("Passwords doesn't match"));
    }

    let user = state
        .app
        .users
        .register_user(NewUser {
            uuid: UserUuid::new(),
            username: request.username,
            email: request.email,
            password: request.password,
            role: Role::Customer,
        })
        .await
        .map_err(user_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(ApiResponse::created("User registered successfully", user.into()))
}
