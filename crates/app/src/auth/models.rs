//! Auth data models.

use jiff::Timestamp;
use quire::users::Role;
use uuid::Uuid;

use crate::domain::users::records::{UserRecord, UserUuid};

/// Session data used during authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    /// User the session belongs to.
    pub user: UserUuid,

    /// The user's current role.
    pub role: Role,

    /// SHA-256 verifier for the token.
    pub token_hash: String,
}

/// Session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: Uuid,
    pub user: UserUuid,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Login result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserRecord,
}
