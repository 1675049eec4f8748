//! Auth response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quire_app::domain::users::records::UserRecord;

/// A user profile. The password hash never leaves the service layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    /// `admin` or `customer`
    pub role: String,

    /// The user's cart, once one exists
    pub cart: Option<Uuid>,

    pub orders: Vec<Uuid>,

    /// Books the user has listed
    pub books: Vec<Uuid>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.uuid.into(),
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            cart: user.cart.map(Into::into),
            orders: user.orders.into_iter().map(Into::into).collect(),
            books: user.books.into_iter().map(Into::into).collect(),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}
