//! Authentication types for the domain layer.
//!
//! These types have **no provider dependencies** - any identity backend can
//! populate them through the `IdentityProvider` port.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use super::{UserId, ValidationError};

/// Minimum password length accepted before calling the identity provider.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// The signed-in account.
///
/// `id` is the owner filter for every store query made during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity provider.
    pub id: UserId,

    /// Account email address.
    pub email: String,

    /// Display name if the provider has one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Email/password pair submitted to sign in or sign up.
///
/// Validated on construction, so the identity provider is never called with
/// blank fields or a password below the minimum length.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    /// Creates credentials with the default minimum password length.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ValidationError> {
        Self::with_min_password_length(email, password, DEFAULT_MIN_PASSWORD_LENGTH)
    }

    /// Creates credentials with a configured minimum password length.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if email or password is blank
    /// - `OutOfRange` if the password is shorter than `min_password_length`
    pub fn with_min_password_length(
        email: impl Into<String>,
        password: impl Into<String>,
        min_password_length: usize,
    ) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();
        let password = password.into();

        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        let length = password.chars().count();
        if length < min_password_length {
            return Err(ValidationError::out_of_range(
                "password",
                min_password_length as i32,
                i32::MAX,
                length as i32,
            ));
        }

        Ok(Self {
            email,
            password: SecretString::new(password),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Exposes the password for handing to the identity provider.
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Authentication errors.
///
/// Provider messages are carried through as-is so they can be shown inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    AccountExists,

    #[error("No active session")]
    NotSignedIn,

    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Rejected(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
