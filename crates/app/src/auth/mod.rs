//! Authentication

mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::IssuedSession;
pub use password::*;
pub use service::*;
pub use token::*;
