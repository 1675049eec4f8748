//! Orders

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub(crate) use repositories::{PgOrderItemsRepository, PgOrdersRepository};
pub use service::*;
