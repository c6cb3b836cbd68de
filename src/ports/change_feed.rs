//! ChangeFeed port - Interface for the store's real-time change notifications.
//!
//! The document store pushes a `ChangeEvent` for every create/update/delete
//! in a collection. Consumers register a `ChangeHandler` per collection and
//! hold the returned `Subscription` for as long as they want callbacks.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{ChangeEvent, Collection, DomainError};

/// Handler for processing change-feed events.
///
/// Implementations should be:
/// - **Idempotent** - the same mutation can be announced more than once,
///   and a local write and its echo from the feed arrive in any order
/// - **Isolated** - errors don't affect other handlers
#[async_trait]
pub trait ChangeHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: ChangeEvent) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Live registration on a change-feed channel.
///
/// Dropping the subscription unsubscribes, so callbacks never outlive the
/// scope that owns them. `unsubscribe` does the same explicitly.
pub struct Subscription {
    channel: String,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Creates a subscription that runs `cancel` exactly once on teardown.
    pub fn new(channel: impl Into<String>, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            channel: channel.into(),
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Channel this subscription listens on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Whether the subscription is still registered.
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Stops delivery to this subscription's handler.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Port for subscribing to collection change events.
///
/// # Example
///
/// ```ignore
/// let sub = feed.subscribe(Collection::Habits, refetcher.clone())?;
/// // ... later, when the session ends
/// sub.unsubscribe();
/// ```
pub trait ChangeFeed: Send + Sync {
    /// Subscribe a handler to every change in one collection.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the feed connection cannot be established
    fn subscribe(
        &self,
        collection: Collection,
        handler: Arc<dyn ChangeHandler>,
    ) -> Result<Subscription, DomainError>;
}
