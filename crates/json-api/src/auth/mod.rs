//! Authentication

mod cookie;
mod errors;
mod handlers;
pub(crate) mod middleware;
mod models;

pub(crate) use cookie::*;
pub(crate) use handlers::*;
pub(crate) use models::UserResponse;
