//! Session cookie

use jiff::Timestamp;
use salvo::http::cookie::{Cookie, SameSite, time::Duration};

/// Name of the cookie carrying the session token.
pub(crate) const SESSION_COOKIE: &str = "session";

/// How the session cookie is issued.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CookieSettings {
    pub(crate) secure: bool,
}

impl CookieSettings {
    /// Cookie carrying `token` until `expires_at`.
    pub(crate) fn session(self, token: String, expires_at: Timestamp) -> Cookie<'static> {
        let remaining = expires_at.duration_since(Timestamp::now()).as_secs().max(0);

        self.build(token, Duration::seconds(remaining))
    }

    /// Cookie instructing the client to drop its session.
    pub(crate) fn expired(self) -> Cookie<'static> {
        self.build(String::new(), Duration::ZERO)
    }

    fn build(self, value: String, max_age: Duration) -> Cookie<'static> {
        // Browsers refuse SameSite=None on cookies that are not Secure.
        let same_site = if self.secure {
            SameSite::None
        } else {
            SameSite::Lax
        };

        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(same_site)
            .max_age(max_age)
            .build()
    }
}
