//! Users service.

use async_trait::async_trait;
use mockall::automock;
use quire::users::{Role, validate_registration};

use crate::{
    auth::hash_password,
    database::Db,
    domain::users::{
        PgUsersRepository, UsersServiceError,
        data::NewUser,
        records::{UserRecord, UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        validate_registration(&user.username, &user.email, &user.password)?;

        let password_hash = hash_password(&user.password)?;

        let mut tx = self.db.begin().await?;

        let uuid = self
            .repository
            .create_user(
                &mut tx,
                user.uuid,
                user.username.trim(),
                &user.email.trim().to_lowercase(),
                &password_hash,
                user.role,
            )
            .await?;

        let created = self.repository.get_user(&mut tx, uuid).await?;

        tx.commit().await?;

        tracing::info!(user = %created.uuid, role = %created.role, "registered user");

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn set_role(&self, email: &str, role: Role) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let uuid = self
            .repository
            .set_role_by_email(&mut tx, &email.trim().to_lowercase(), role)
            .await?;

        let user = self.repository.get_user(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a user, hashing the supplied password.
    async fn register_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user with their cart, orders and listed books.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Change the role of the user registered under `email`.
    async fn set_role(&self, email: &str, role: Role) -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_user};

    use super::*;

    #[tokio::test]
    async fn register_user_returns_profile_without_back_references() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = UserUuid::new();

        let user = ctx
            .users
            .register_user(NewUser {
                uuid,
                ..new_user("reader")
            })
            .await?;

        assert_eq!(user.uuid, uuid);
        assert_eq!(user.username, "reader");
        assert_eq!(user.email, "reader@example.com");
        assert_eq!(user.role, Role::Customer);
        assert!(user.cart.is_none());
        assert!(user.orders.is_empty());
        assert!(user.books.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn register_user_normalises_email() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register_user(NewUser {
                email: "  Reader@Example.COM ".to_string(),
                ..new_user("reader")
            })
            .await?;

        assert_eq!(user.email, "reader@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.register_user(new_user("reader")).await?;

        let result = ctx
            .users
            .register_user(NewUser {
                username: "someone-else".to_string(),
                ..new_user("reader")
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_username_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.register_user(new_user("reader")).await?;

        let result = ctx
            .users
            .register_user(NewUser {
                email: "other@example.com".to_string(),
                ..new_user("reader")
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_registration_returns_validation_details() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .register_user(NewUser {
                email: "not-an-email".to_string(),
                ..new_user("reader")
            })
            .await;

        assert!(
            matches!(&result, Err(UsersServiceError::Validation(errors)) if errors.details().len() == 1),
            "expected one validation detail, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn set_role_promotes_user() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.register_user(new_user("reader")).await?;

        let promoted = ctx
            .users
            .set_role("READER@example.com", Role::Admin)
            .await?;

        assert_eq!(promoted.role, Role::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn set_role_unknown_email_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.set_role("ghost@example.com", Role::Admin).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
