//! Identity provider port.
//!
//! Sign-in, sign-up, sign-out, and current-user lookup against the external
//! identity service. The returned user's id becomes the owner filter for
//! every store query in the session.
//!
//! # Example
//!
//! ```ignore
//! let credentials = Credentials::new("me@example.com", "secret123")?;
//! let user = identity.sign_in(&credentials).await?;
//! let habits = habit_repo.list_by_owner(&user.id).await?;
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Credentials};

/// Authenticates users against the identity service.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidCredentials` for a wrong email/password pair
/// - Return `AuthError::AccountExists` when signing up an existing email
/// - Leave the new account signed in after a successful `sign_up`
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with existing credentials.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError>;

    /// Create an account and sign in to it.
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError>;

    /// End the current session. Signing out with no session is not an error.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The currently signed-in user, if any.
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError>;
}
