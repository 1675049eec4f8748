//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use quire::users::validate_login;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedSession, SessionTokenVersion, format_session_token,
        generate_session_secret, hash_session_token,
        models::NewSession,
        parse_session_token, repository::PgAuthRepository, verify_password,
    },
    database::Db,
    domain::users::{PgUsersRepository, data::Actor},
};

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    users_repository: PgUsersRepository,
    session_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            users_repository: PgUsersRepository::new(),
            session_ttl,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        validate_login(email, password)?;

        let mut tx = self.db.begin().await?;

        let credentials = self
            .users_repository
            .find_credentials_by_email(&mut tx, &email.trim().to_lowercase())
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        if !verify_password(password, &credentials.password_hash)? {
            tracing::info!(user = %credentials.uuid, "rejected login");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let session_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(AuthServiceError::Expiry)?;

        self.repository
            .create_session(
                &mut tx,
                &NewSession {
                    uuid: session_uuid,
                    user: credentials.uuid,
                    token_hash: hash_session_token(&session_uuid, version, &secret),
                    expires_at,
                },
            )
            .await?;

        let user = self
            .users_repository
            .get_user(&mut tx, credentials.uuid)
            .await?;

        tx.commit().await?;

        tracing::info!(user = %user.uuid, role = %credentials.role, "issued session");

        Ok(IssuedSession {
            token,
            expires_at,
            user,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<Actor, AuthServiceError> {
        let parsed = parse_session_token(token).map_err(|_| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, parsed.session_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        let presented = hash_session_token(&parsed.session_uuid, parsed.version, &parsed.secret);

        if presented != session.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        Ok(Actor {
            user: session.user,
            role: session.role,
        })
    }

    async fn logout(&self, token: &str) -> Result<bool, AuthServiceError> {
        let Ok(parsed) = parse_session_token(token) else {
            return Ok(false);
        };

        let mut tx = self.db.begin().await?;

        let Some(session) = self
            .repository
            .find_active_session(&mut tx, parsed.session_uuid)
            .await?
        else {
            return Ok(false);
        };

        let presented = hash_session_token(&parsed.session_uuid, parsed.version, &parsed.secret);

        if presented != session.token_hash {
            return Ok(false);
        }

        let revoked = self
            .repository
            .revoke_session(&mut tx, parsed.session_uuid)
            .await?;

        tx.commit().await?;

        tracing::info!(user = %session.user, "revoked session");

        Ok(revoked)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and open a new session.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a presented session token to the acting user.
    async fn authenticate(&self, token: &str) -> Result<Actor, AuthServiceError>;

    /// Revoke the session behind a token. Returns `false` when the token did
    /// not name an active session.
    async fn logout(&self, token: &str) -> Result<bool, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use quire::users::Role;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::TEST_PASSWORD};

    use super::*;

    #[tokio::test]
    async fn login_issues_a_working_session() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("reader").await?;

        let issued = ctx
            .auth
            .login("Reader@Example.com", TEST_PASSWORD)
            .await?;

        assert!(issued.token.starts_with("qs_v1_"));
        assert_eq!(issued.user.uuid, user);
        assert!(issued.expires_at > Timestamp::now());

        let actor = ctx.auth.authenticate(&issued.token).await?;

        assert_eq!(actor.user, user);
        assert_eq!(actor.role, Role::Customer);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_unknown_email_returns_user_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.login("nobody@example.com", TEST_PASSWORD).await;

        assert!(
            matches!(result, Err(AuthServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_user("reader").await?;

        let result = ctx.auth.login("reader@example.com", "not-the-password").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_validates_input_shape() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.login("reader", "short").await;

        let Err(AuthServiceError::Validation(errors)) = result else {
            return Err(format!("expected Validation, got {result:?}").into());
        };

        assert_eq!(errors.details().len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_user("reader").await?;

        let issued = ctx.auth.login("reader@example.com", TEST_PASSWORD).await?;

        let (id, _) = issued.token.split_once('.').ok_or("token without secret")?;
        let forged = format!("{id}.{}", "0".repeat(64));

        let result = ctx.auth.authenticate(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        assert!(!ctx.auth.logout(&forged).await?);
        assert!(ctx.auth.authenticate("garbage").await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_the_session() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_user("reader").await?;

        let issued = ctx.auth.login("reader@example.com", TEST_PASSWORD).await?;

        assert!(ctx.auth.logout(&issued.token).await?);
        assert!(!ctx.auth.logout(&issued.token).await?);

        let result = ctx.auth.authenticate(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_sessions_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_user("reader").await?;

        let issued = ctx.auth.login("reader@example.com", TEST_PASSWORD).await?;

        sqlx::query("UPDATE sessions SET expires_at = now() - interval '1 minute'")
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.auth.authenticate(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn role_changes_apply_to_open_sessions() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_user("reader").await?;

        let issued = ctx.auth.login("reader@example.com", TEST_PASSWORD).await?;

        ctx.users.set_role("reader@example.com", Role::Admin).await?;

        let actor = ctx.auth.authenticate(&issued.token).await?;

        assert!(actor.is_admin());

        Ok(())
    }
}
