//! Session Config

use clap::Args;
use jiff::SignedDuration;

/// Session lifetime and cookie settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Hours a login session stays valid
    #[arg(
        long,
        env = "SESSION_TTL_HOURS",
        default_value_t = 24_u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub session_ttl_hours: u16,

    /// Mark the session cookie `Secure`
    #[arg(
        long,
        env = "COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub cookie_secure: bool,
}

impl SessionConfig {
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.session_ttl_hours))
    }
}
