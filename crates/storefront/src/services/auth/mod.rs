//! Authentication service.
//!
//! The store has a single demo account; there is no user database. Login
//! succeeds only for the configured demo credentials. Signup accepts any
//! well-formed form and signs the new shopper in directly.

mod error;

pub use error::{AuthError, FormErrors};

use game_store_core::{AuthIdentity, Email};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::DemoAccountConfig;

/// Minimum signup password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum signup display name length.
const MIN_NAME_LENGTH: usize = 2;

const INVALID_EMAIL: &str = "Please enter a valid email.";

/// Login form.
///
/// Not `Debug`, so the password cannot end up in logs.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form.
#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Checks credentials against the demo account.
#[derive(Debug, Clone)]
pub struct DemoAuthenticator {
    account: DemoAccountConfig,
}

impl DemoAuthenticator {
    #[must_use]
    pub const fn new(account: DemoAccountConfig) -> Self {
        Self { account }
    }

    /// Verify a login form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Form` if the email is malformed or the password is
    /// empty, and `AuthError::InvalidCredentials` if they do not match the
    /// demo account.
    pub fn login(&self, form: &LoginForm) -> Result<AuthIdentity, AuthError> {
        let mut errors = FormErrors::default();
        let email = Email::parse(&form.email).ok();
        if email.is_none() {
            errors.push("email", INVALID_EMAIL);
        }
        if form.password.is_empty() {
            errors.push("password", "Password is required.");
        }
        errors.into_result()?;

        let email = email.ok_or(AuthError::InvalidCredentials)?;
        let matches = email.as_str() == self.account.email
            && form.password == self.account.password.expose_secret();
        if !matches {
            tracing::debug!(%email, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthIdentity {
            name: self.account.name.clone(),
            email,
        })
    }

    /// Validate a signup form and return the new identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Form` listing every invalid field.
    pub fn signup(&self, form: &SignupForm) -> Result<AuthIdentity, AuthError> {
        let mut errors = FormErrors::default();
        if form.name.trim().chars().count() < MIN_NAME_LENGTH {
            errors.push("name", "Name must be at least 2 characters.");
        }
        let email = Email::parse(&form.email).ok();
        if email.is_none() {
            errors.push("email", INVALID_EMAIL);
        }
        if form.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push("password", "Password must be at least 8 characters.");
        }
        errors.into_result()?;

        let email = email.ok_or(AuthError::InvalidCredentials)?;
        Ok(AuthIdentity {
            name: form.name.trim().to_owned(),
            email,
        })
    }
}
