//! In-memory change feed implementation for testing.
//!
//! Provides synchronous, deterministic delivery of change events.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in production.
//! It uses `.expect()` on lock operations which will panic if locks are poisoned.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::config::StoreConfig;
use crate::domain::foundation::{ChangeEvent, Collection, DomainError, ErrorCode};
use crate::ports::{ChangeFeed, ChangeHandler, Subscription};

/// Database id used for channel names when none is given.
pub const LOCAL_DATABASE_ID: &str = "local";

type HandlerMap = HashMap<Collection, Vec<(u64, Arc<dyn ChangeHandler>)>>;

/// In-memory change feed.
///
/// Features:
/// - Synchronous delivery (deterministic for tests)
/// - Event capture for assertions
/// - Subscriptions that deregister on drop
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned.
///
/// # Example
///
/// ```ignore
/// let feed = Arc::new(InMemoryChangeFeed::new());
/// let sub = feed.subscribe(Collection::Habits, handler)?;
///
/// feed.publish(ChangeEvent::new(Collection::Habits, ChangeKind::Create, "h1")).await?;
/// assert_eq!(feed.event_count(), 1);
/// ```
pub struct InMemoryChangeFeed {
    channels: HashMap<Collection, String>,
    handlers: Arc<RwLock<HandlerMap>>,
    published: RwLock<Vec<ChangeEvent>>,
    next_subscription: AtomicU64,
}

impl InMemoryChangeFeed {
    /// Creates a feed with no subscribers.
    pub fn new() -> Self {
        Self::with_channels(
            Collection::all()
                .iter()
                .map(|c| (*c, c.channel(LOCAL_DATABASE_ID)))
                .collect(),
        )
    }

    /// Creates a feed whose channel names follow the store configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_channels(
            Collection::all()
                .iter()
                .map(|c| (*c, config.channel(*c)))
                .collect(),
        )
    }

    fn with_channels(channels: HashMap<Collection, String>) -> Self {
        Self {
            channels,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            published: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Delivers an event to every handler subscribed to its collection.
    ///
    /// Every handler runs even if an earlier one fails; failures are
    /// collected into one error.
    pub async fn publish(&self, event: ChangeEvent) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryChangeFeed: published write lock poisoned")
            .push(event.clone());

        // Clone handlers to release lock before await points
        let targets: Vec<Arc<dyn ChangeHandler>> = {
            let handlers = self
                .handlers
                .read()
                .expect("InMemoryChangeFeed: handlers lock poisoned");
            handlers
                .get(&event.collection)
                .map(|subs| subs.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        let mut errors = Vec::new();
        for handler in targets {
            if let Err(e) = handler.handle(event.clone()).await {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }

    // === Test Helpers ===

    /// Returns all published events.
    pub fn published_events(&self) -> Vec<ChangeEvent> {
        self.published
            .read()
            .expect("InMemoryChangeFeed: published lock poisoned")
            .clone()
    }

    /// Returns events published on one collection.
    pub fn events_for(&self, collection: Collection) -> Vec<ChangeEvent> {
        self.published_events()
            .into_iter()
            .filter(|e| e.collection == collection)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryChangeFeed: published lock poisoned")
            .len()
    }

    /// Number of live subscriptions on a collection.
    pub fn subscriber_count(&self, collection: Collection) -> usize {
        self.handlers
            .read()
            .expect("InMemoryChangeFeed: handlers lock poisoned")
            .get(&collection)
            .map_or(0, Vec::len)
    }

    /// Clears captured events (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryChangeFeed: published write lock poisoned")
            .clear();
    }
}

impl Default for InMemoryChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed for InMemoryChangeFeed {
    fn subscribe(
        &self,
        collection: Collection,
        handler: Arc<dyn ChangeHandler>,
    ) -> Result<Subscription, DomainError> {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.handlers
            .write()
            .map_err(|_| DomainError::database("change feed handlers lock poisoned"))?
            .entry(collection)
            .or_default()
            .push((id, handler));

        let channel = self
            .channels
            .get(&collection)
            .cloned()
            .unwrap_or_else(|| collection.channel(LOCAL_DATABASE_ID));
        let handlers = Arc::clone(&self.handlers);
        Ok(Subscription::new(
            channel,
            move || {
                if let Ok(mut handlers) = handlers.write() {
                    if let Some(subs) = handlers.get_mut(&collection) {
                        subs.retain(|(sub_id, _)| *sub_id != id);
                    }
                }
            },
        ))
    }
}
