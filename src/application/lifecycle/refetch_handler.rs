//! RefetchOnChange - Change-feed handler that refreshes a controller's view.

use std::sync::{Arc, Weak};

use async_trait::async_trait;

use crate::domain::foundation::{ChangeEvent, DomainError};
use crate::ports::ChangeHandler;

use super::controller::HabitLifecycleController;

/// Forwards every change event to `HabitLifecycleController::on_external_change`.
///
/// Holds the controller weakly: once the session drops the controller,
/// late events are ignored.
pub struct RefetchOnChange {
    controller: Weak<HabitLifecycleController>,
}

impl RefetchOnChange {
    pub fn new(controller: &Arc<HabitLifecycleController>) -> Self {
        Self {
            controller: Arc::downgrade(controller),
        }
    }
}

#[async_trait]
impl ChangeHandler for RefetchOnChange {
    async fn handle(&self, event: ChangeEvent) -> Result<(), DomainError> {
        let Some(controller) = self.controller.upgrade() else {
            tracing::debug!(event_id = %event.event_id, "Controller gone, ignoring change event");
            return Ok(());
        };
        controller
            .on_external_change(&event)
            .await
            .map_err(DomainError::from)
    }

    fn name(&self) -> &'static str {
        "RefetchOnChange"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryDocumentStore, StoreOperation, SystemClock};
    use crate::domain::foundation::{
        AuthenticatedUser, ChangeKind, Collection, DayBoundary, ErrorCode, UserId,
    };

    fn controller(store: &Arc<InMemoryDocumentStore>) -> Arc<HabitLifecycleController> {
        Arc::new(HabitLifecycleController::new(
            AuthenticatedUser::new(UserId::new("user-1").unwrap(), "me@example.com", None),
            store.clone(),
            store.clone(),
            Arc::new(SystemClock),
            DayBoundary::utc(),
        ))
    }

    fn event() -> ChangeEvent {
        ChangeEvent::new(Collection::Habits, ChangeKind::Create, "h1")
    }

    #[tokio::test]
    async fn dropped_controller_is_ignored() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let controller = controller(&store);
        let handler = RefetchOnChange::new(&controller);
        drop(controller);

        assert!(handler.handle(event()).await.is_ok());
    }

    #[tokio::test]
    async fn refetch_failure_surfaces_as_domain_error() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.fail(StoreOperation::ListHabits);
        let controller = controller(&store);
        let handler = RefetchOnChange::new(&controller);

        let err = handler.handle(event()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
