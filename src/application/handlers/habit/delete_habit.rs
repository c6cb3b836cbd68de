//! DeleteHabitHandler - Command handler for deleting habits.
//!
//! Completion records of the habit are left in the store.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::habit::{Habit, HabitError};
use crate::ports::HabitRepository;

/// Command to delete a habit.
#[derive(Debug, Clone)]
pub struct DeleteHabitCommand {
    pub user_id: UserId,
    pub habit: Habit,
}

/// Handler for deleting habits.
pub struct DeleteHabitHandler {
    repository: Arc<dyn HabitRepository>,
}

impl DeleteHabitHandler {
    pub fn new(repository: Arc<dyn HabitRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteHabitCommand) -> Result<(), HabitError> {
        // 1. Authorize - user must be owner
        cmd.habit.authorize(&cmd.user_id)?;

        // 2. Delete
        self.repository.delete(cmd.habit.id()).await.map_err(|e| {
            tracing::error!(habit_id = %cmd.habit.id(), error = %e, "Failed to delete habit");
            HabitError::from(e)
        })?;

        tracing::info!(habit_id = %cmd.habit.id(), "Habit deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, HabitId, Timestamp};
    use crate::domain::habit::{Frequency, HabitDraft, HabitUpdate};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockHabitRepository {
        deleted: Mutex<Vec<HabitId>>,
        fail_delete: Option<ErrorCode>,
    }

    impl MockHabitRepository {
        fn new() -> Self {
            Self {
                deleted: Mutex::new(Vec::new()),
                fail_delete: None,
            }
        }

        fn failing_with(code: ErrorCode) -> Self {
            Self {
                deleted: Mutex::new(Vec::new()),
                fail_delete: Some(code),
            }
        }

        fn deleted(&self) -> Vec<HabitId> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HabitRepository for MockHabitRepository {
        async fn list_by_owner(&self, _owner_id: &UserId) -> Result<Vec<Habit>, DomainError> {
            Ok(vec![])
        }

        async fn create(&self, draft: HabitDraft) -> Result<Habit, DomainError> {
            Ok(Habit::from_draft(HabitId::generate(), draft, Timestamp::now()))
        }

        async fn update(&self, id: &HabitId, _update: HabitUpdate) -> Result<Habit, DomainError> {
            Err(DomainError::new(ErrorCode::HabitNotFound, id.to_string()))
        }

        async fn delete(&self, id: &HabitId) -> Result<(), DomainError> {
            if let Some(code) = self.fail_delete {
                return Err(DomainError::new(code, "Simulated delete failure")
                    .with_detail("habit_id", id.as_str()));
            }
            self.deleted.lock().unwrap().push(id.clone());
            Ok(())
        }
    }

    fn habit() -> Habit {
        let draft = HabitDraft::new(
            UserId::new("user-1").unwrap(),
            "Stretch",
            "Five minutes",
            Frequency::Daily,
        )
        .unwrap();
        Habit::from_draft(HabitId::new("h1").unwrap(), draft, Timestamp::now())
    }

    #[tokio::test]
    async fn owner_can_delete() {
        let repo = Arc::new(MockHabitRepository::new());
        let handler = DeleteHabitHandler::new(repo.clone());

        handler
            .handle(DeleteHabitCommand {
                user_id: UserId::new("user-1").unwrap(),
                habit: habit(),
            })
            .await
            .unwrap();

        assert_eq!(repo.deleted(), vec![HabitId::new("h1").unwrap()]);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_nothing_is_deleted() {
        let repo = Arc::new(MockHabitRepository::new());
        let handler = DeleteHabitHandler::new(repo.clone());

        let err = handler
            .handle(DeleteHabitCommand {
                user_id: UserId::new("someone-else").unwrap(),
                habit: habit(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, HabitError::Forbidden);
        assert!(repo.deleted().is_empty());
    }

    #[tokio::test]
    async fn habit_already_gone_is_not_found() {
        let handler = DeleteHabitHandler::new(Arc::new(MockHabitRepository::failing_with(
            ErrorCode::HabitNotFound,
        )));

        let err = handler
            .handle(DeleteHabitCommand {
                user_id: UserId::new("user-1").unwrap(),
                habit: habit(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, HabitError::NotFound("h1".to_string()));
    }

    #[tokio::test]
    async fn store_failure_is_transient() {
        let handler = DeleteHabitHandler::new(Arc::new(MockHabitRepository::failing_with(
            ErrorCode::DatabaseError,
        )));

        let err = handler
            .handle(DeleteHabitCommand {
                user_id: UserId::new("user-1").unwrap(),
                habit: habit(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, HabitError::TransientStore(_)));
    }
}
