//! Mock identity provider for testing.
//!
//! Implements the `IdentityProvider` port against an in-memory account
//! table, avoiding the need for a real identity service.
//!
//! # Example
//!
//! ```ignore
//! use habit_tracker::adapters::auth::MockIdentityProvider;
//!
//! let identity = MockIdentityProvider::new()
//!     .with_account("me@example.com", "secret123");
//!
//! let credentials = Credentials::new("me@example.com", "secret123")?;
//! let user = identity.sign_in(&credentials).await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Credentials, UserId};
use crate::ports::IdentityProvider;

struct Account {
    password: SecretString,
    user: AuthenticatedUser,
}

/// Mock identity provider for testing.
///
/// Accounts are keyed by email. Unknown emails and wrong passwords both
/// return `InvalidCredentials`.
#[derive(Default)]
pub struct MockIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<AuthenticatedUser>>,
    /// Optional error to return for every call (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account.
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.add_account(email, password);
        self
    }

    /// Registers an account and leaves it signed in, as after a previous run.
    pub fn with_signed_in(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        let user = self.add_account(email, password);
        *self.current.write().unwrap() = Some(user);
        self
    }

    /// Forces every call to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().unwrap().len()
    }

    /// The user id registered for an email.
    pub fn user_id_for(&self, email: &str) -> Option<UserId> {
        self.accounts
            .read()
            .unwrap()
            .get(email)
            .map(|a| a.user.id.clone())
    }

    fn add_account(&self, email: impl Into<String>, password: impl Into<String>) -> AuthenticatedUser {
        let email = email.into();
        let user = AuthenticatedUser::new(
            UserId::new(format!("user-{}", Uuid::new_v4().simple())).unwrap(),
            email.clone(),
            None,
        );
        self.accounts.write().unwrap().insert(
            email,
            Account {
                password: SecretString::new(password.into()),
                user: user.clone(),
            },
        );
        user
    }

    fn check_forced(&self) -> Result<(), AuthError> {
        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError> {
        self.check_forced()?;

        let user = {
            let accounts = self.accounts.read().unwrap();
            let account = accounts
                .get(credentials.email())
                .ok_or(AuthError::InvalidCredentials)?;
            if account.password.expose_secret() != credentials.password() {
                return Err(AuthError::InvalidCredentials);
            }
            account.user.clone()
        };

        *self.current.write().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError> {
        self.check_forced()?;

        if self.accounts.read().unwrap().contains_key(credentials.email()) {
            return Err(AuthError::AccountExists);
        }
        let user = self.add_account(credentials.email(), credentials.password());

        *self.current.write().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.check_forced()?;
        *self.current.write().unwrap() = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        self.check_forced()?;
        Ok(self.current.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials::new(email, password).unwrap()
    }

    #[tokio::test]
    async fn sign_in_with_registered_account_succeeds() {
        let identity = MockIdentityProvider::new().with_account("me@example.com", "secret123");

        let user = identity.sign_in(&creds("me@example.com", "secret123")).await.unwrap();

        assert_eq!(user.email, "me@example.com");
        assert_eq!(identity.current_user().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let identity = MockIdentityProvider::new().with_account("me@example.com", "secret123");

        let result = identity.sign_in(&creds("me@example.com", "wrong-one")).await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(identity.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let identity = MockIdentityProvider::new();
        let result = identity.sign_in(&creds("nobody@example.com", "secret123")).await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn sign_up_creates_account_and_signs_in() {
        let identity = MockIdentityProvider::new();

        let user = identity.sign_up(&creds("new@example.com", "secret123")).await.unwrap();

        assert_eq!(identity.account_count(), 1);
        assert_eq!(identity.user_id_for("new@example.com"), Some(user.id.clone()));
        assert_eq!(identity.current_user().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn sign_up_existing_email_fails() {
        let identity = MockIdentityProvider::new().with_account("me@example.com", "secret123");
        let result = identity.sign_up(&creds("me@example.com", "other-pass")).await;
        assert_eq!(result, Err(AuthError::AccountExists));
    }

    #[tokio::test]
    async fn sign_out_clears_current_user() {
        let identity = MockIdentityProvider::new().with_signed_in("me@example.com", "secret123");
        assert!(identity.current_user().await.unwrap().is_some());

        identity.sign_out().await.unwrap();

        assert!(identity.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn forced_error_is_returned_until_cleared() {
        let identity = MockIdentityProvider::new()
            .with_account("me@example.com", "secret123")
            .with_error(AuthError::service_unavailable("down"));

        let result = identity.sign_in(&creds("me@example.com", "secret123")).await;
        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));

        identity.clear_error();
        assert!(identity.sign_in(&creds("me@example.com", "secret123")).await.is_ok());
    }
}
