//! HabitSession - Explicit context for one signed-in user.
//!
//! A session owns the lifecycle controller and the change-feed
//! subscriptions that keep it current. `dispose` (or dropping the session)
//! tears the subscriptions down.
//!
//! # Example
//!
//! ```ignore
//! let credentials = config.auth.credentials("me@example.com", "secret123")?;
//! let session = HabitSession::start(deps, &credentials, SignInMode::SignIn).await?;
//!
//! let habit = session.controller().create_habit("Read", "Ten pages", "daily").await?;
//! session.controller().mark_complete(habit.id()).await?;
//!
//! session.sign_out().await?;
//! ```

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::domain::foundation::{
    AuthError, AuthenticatedUser, Collection, Credentials, DayBoundary, DomainError,
    ValidationError,
};
use crate::domain::habit::HabitError;
use crate::ports::{
    ChangeFeed, Clock, CompletionRepository, HabitRepository, IdentityProvider, Subscription,
};

use super::controller::HabitLifecycleController;
use super::refetch_handler::RefetchOnChange;

/// Errors from starting or ending a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Change feed subscription failed: {0}")]
    Subscribe(DomainError),

    #[error(transparent)]
    Habit(#[from] HabitError),
}

/// Whether `start` signs in to an existing account or creates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInMode {
    #[default]
    SignIn,
    SignUp,
}

/// Everything a session talks to.
#[derive(Clone)]
pub struct SessionDeps {
    pub habits: Arc<dyn HabitRepository>,
    pub completions: Arc<dyn CompletionRepository>,
    pub feed: Arc<dyn ChangeFeed>,
    pub identity: Arc<dyn IdentityProvider>,
    pub clock: Arc<dyn Clock>,
    /// Where "today" starts and ends.
    pub days: DayBoundary,
}

/// One user's active session.
pub struct HabitSession {
    controller: Arc<HabitLifecycleController>,
    identity: Arc<dyn IdentityProvider>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl HabitSession {
    /// Authenticates, subscribes to both collections, and loads the view.
    ///
    /// # Errors
    ///
    /// - `Auth` if the identity provider rejects the credentials
    /// - `Subscribe` if a change-feed subscription cannot be set up
    /// - `Habit` if the initial fetch fails
    pub async fn start(
        deps: SessionDeps,
        credentials: &Credentials,
        mode: SignInMode,
    ) -> Result<Self, SessionError> {
        let user = match mode {
            SignInMode::SignIn => deps.identity.sign_in(credentials).await,
            SignInMode::SignUp => deps.identity.sign_up(credentials).await,
        }
        .map_err(|e| {
            tracing::warn!(mode = ?mode, error = %e, "Authentication failed");
            e
        })?;

        Self::open(deps, user).await
    }

    /// Restores the session of an already signed-in user, if any.
    pub async fn resume(deps: SessionDeps) -> Result<Option<Self>, SessionError> {
        match deps.identity.current_user().await? {
            Some(user) => Ok(Some(Self::open(deps, user).await?)),
            None => Ok(None),
        }
    }

    async fn open(deps: SessionDeps, user: AuthenticatedUser) -> Result<Self, SessionError> {
        let controller = Arc::new(HabitLifecycleController::new(
            user,
            deps.habits,
            deps.completions,
            deps.clock,
            deps.days,
        ));

        let mut subscriptions = Vec::with_capacity(Collection::all().len());
        for collection in Collection::all() {
            let handler = Arc::new(RefetchOnChange::new(&controller));
            let subscription = deps
                .feed
                .subscribe(*collection, handler)
                .map_err(SessionError::Subscribe)?;
            tracing::debug!(channel = subscription.channel(), "Subscribed to change feed");
            subscriptions.push(subscription);
        }

        let session = Self {
            controller,
            identity: deps.identity,
            subscriptions: Mutex::new(subscriptions),
        };

        session.controller.refresh().await?;

        tracing::info!(user_id = %session.user().id, "Session started");
        Ok(session)
    }

    pub fn user(&self) -> &AuthenticatedUser {
        self.controller.user()
    }

    pub fn controller(&self) -> &Arc<HabitLifecycleController> {
        &self.controller
    }

    /// Whether change-feed subscriptions are still live.
    pub fn is_active(&self) -> bool {
        self.subscriptions
            .lock()
            .map(|subs| !subs.is_empty())
            .unwrap_or(false)
    }

    /// Unsubscribes all change feeds. Safe to call more than once.
    pub fn dispose(&self) {
        let subscriptions = match self.subscriptions.lock() {
            Ok(mut subs) => std::mem::take(&mut *subs),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        if subscriptions.is_empty() {
            return;
        }
        for subscription in subscriptions {
            tracing::debug!(channel = subscription.channel(), "Unsubscribing from change feed");
            subscription.unsubscribe();
        }
        tracing::info!(user_id = %self.user().id, "Session disposed");
    }

    /// Disposes the session, then signs out of the identity provider.
    pub async fn sign_out(self) -> Result<(), SessionError> {
        self.dispose();
        self.identity.sign_out().await?;
        tracing::info!(user_id = %self.user().id, "Signed out");
        Ok(())
    }
}

impl Drop for HabitSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
