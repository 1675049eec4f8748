//! Users

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::{ValidationErrors, is_email};

/// Shortest accepted password at login.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Error returned when parsing a role name fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May update any order
    Admin,

    /// Regular shopper
    #[default]
    Customer,
}

impl Role {
    /// Storage name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }

    /// Whether the role grants administrative access.
    pub const fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Check registration fields, excluding the password confirmation.
///
/// # Errors
///
/// Returns the collected [`ValidationErrors`].
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.require_non_blank("username", username);

    if email.trim().is_empty() {
        errors.push("email is required");
    } else if !is_email(email.trim()) {
        errors.push("email must be a valid email address");
    }

    errors.require_non_blank("password", password);

    errors.into_result()
}

/// Check login fields.
///
/// # Errors
///
/// Returns the collected [`ValidationErrors`].
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !is_email(email.trim()) {
        errors.push("email must be a valid email address");
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("customer".parse::<Role>(), Ok(Role::Customer));
        assert!("root".parse::<Role>().is_err());
        assert!(Role::Admin.is_admin());
        assert!(!Role::default().is_admin());
    }

    #[test]
    fn registration_requires_every_field() {
        let errors = validate_registration("", "nope", " ").err().unwrap_or_default();

        assert_eq!(errors.details().len(), 3);
    }

    #[test]
    fn login_checks_email_and_password_length() {
        assert_eq!(validate_login("reader@example.com", "secret"), Ok(()));

        let errors = validate_login("reader", "12345").err().unwrap_or_default();

        assert_eq!(errors.details().len(), 2);
    }
}
