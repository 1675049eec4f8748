//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{
    auth::{SESSION_COOKIE, errors::into_status_error},
    extensions::*,
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = session_token(req) else {
        res.render(StatusError::unauthorized().brief("Not authenticated"));

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    match state.app.auth.authenticate(&token).await {
        Ok(actor) => depot.insert_actor(actor),
        Err(error) => {
            res.render(into_status_error(error));

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// The presented session token: the session cookie, else a bearer token.
pub(crate) fn session_token(req: &Request) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE)
        && !cookie.value().is_empty()
    {
        return Some(cookie.value().to_string());
    }

    extract_bearer_token(req).map(str::to_string)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use quire::users::Role;
    use quire_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::users::data::Actor,
    };
    use salvo::{
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER, service};

    use super::*;

    #[salvo::handler]
    async fn echo_actor(depot: &mut Depot, res: &mut Response) {
        let actor = depot
            .actor_or_401()
            .ok()
            .map_or_else(|| "missing".to_string(), |actor| format!("{}:{}", actor.user, actor.role));

        res.render(actor);
    }

    fn make_service(auth: MockAuthService) -> Service {
        service(
            Mocks {
                auth,
                ..Mocks::default()
            },
            None,
            Router::new().hoop(handler).get(echo_actor),
        )
    }

    fn customer() -> Actor {
        Actor {
            user: TEST_USER,
            role: Role::Customer,
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_return_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_session_cookie_is_preferred() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "from-cookie")
            .return_once(|_| Ok(customer()));

        let mut res = TestClient::get("http://example.com")
            .add_header(COOKIE, "session=from-cookie", true)
            .add_header(AUTHORIZATION, "Bearer from-header", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, format!("{TEST_USER}:customer"));

        Ok(())
    }

    #[tokio::test]
    async fn test_bearer_token_is_accepted() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Ok(customer()));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_session_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(COOKIE, "session=abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
