//! Authentication configuration

use serde::Deserialize;

use crate::domain::foundation::{Credentials, DEFAULT_MIN_PASSWORD_LENGTH};

use super::error::ValidationError;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Passwords shorter than this are rejected before the identity
    /// provider is called
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl AuthConfig {
    /// Builds credentials checked against the configured minimum length.
    pub fn credentials(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Credentials, crate::domain::foundation::ValidationError> {
        Credentials::with_min_password_length(email, password, self.min_password_length)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_password_length == 0 {
            return Err(ValidationError::InvalidPasswordLength);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_min_password_length() -> usize {
    DEFAULT_MIN_PASSWORD_LENGTH
}
