//! User Records

use jiff::Timestamp;
use quire::users::Role;

use crate::{
    domain::{books::records::BookUuid, carts::records::CartUuid, orders::records::OrderUuid},
    uuids::TypedUuid,
};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
///
/// Back-references are derived from foreign keys when the record is loaded.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub cart: Option<CartUuid>,
    pub orders: Vec<OrderUuid>,
    pub books: Vec<BookUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Login lookup result; never leaves the crate.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub uuid: UserUuid,
    pub role: Role,
    pub password_hash: String,
}
