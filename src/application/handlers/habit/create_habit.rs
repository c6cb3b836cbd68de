//! CreateHabitHandler - Command handler for creating habits.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::habit::{Frequency, Habit, HabitDraft, HabitError};
use crate::ports::HabitRepository;

/// Command to create a new habit.
///
/// Fields arrive as entered; the handler validates them.
#[derive(Debug, Clone)]
pub struct CreateHabitCommand {
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub frequency: String,
}

/// Handler for creating habits.
pub struct CreateHabitHandler {
    repository: Arc<dyn HabitRepository>,
}

impl CreateHabitHandler {
    pub fn new(repository: Arc<dyn HabitRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateHabitCommand) -> Result<Habit, HabitError> {
        // 1. Validate before any store call
        let frequency: Frequency = cmd.frequency.parse()?;
        let draft = HabitDraft::new(cmd.owner_id, cmd.title, cmd.description, frequency)?;

        // 2. Persist
        let habit = self.repository.create(draft).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create habit");
            HabitError::from(e)
        })?;

        tracing::info!(habit_id = %habit.id(), frequency = %habit.frequency(), "Habit created");
        Ok(habit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, HabitId, Timestamp, ValidationError};
    use crate::domain::habit::HabitUpdate;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockHabitRepository {
        created: Mutex<Vec<HabitDraft>>,
        fail_create: bool,
    }

    impl MockHabitRepository {
        fn new() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail_create: false,
            }
        }

        fn failing() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail_create: true,
            }
        }

        fn created(&self) -> Vec<HabitDraft> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HabitRepository for MockHabitRepository {
        async fn list_by_owner(&self, _owner_id: &UserId) -> Result<Vec<Habit>, DomainError> {
            Ok(vec![])
        }

        async fn create(&self, draft: HabitDraft) -> Result<Habit, DomainError> {
            if self.fail_create {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated create failure",
                ));
            }
            self.created.lock().unwrap().push(draft.clone());
            Ok(Habit::from_draft(
                HabitId::new("habit-1").unwrap(),
                draft,
                Timestamp::now(),
            ))
        }

        async fn update(&self, id: &HabitId, _update: HabitUpdate) -> Result<Habit, DomainError> {
            Err(DomainError::new(ErrorCode::HabitNotFound, id.to_string()))
        }

        async fn delete(&self, _id: &HabitId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn command(title: &str, description: &str, frequency: &str) -> CreateHabitCommand {
        CreateHabitCommand {
            owner_id: UserId::new("user-1").unwrap(),
            title: title.to_string(),
            description: description.to_string(),
            frequency: frequency.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_habit_with_zero_streak() {
        let repo = Arc::new(MockHabitRepository::new());
        let handler = CreateHabitHandler::new(repo.clone());

        let habit = handler
            .handle(command("Read", "Ten pages", "weekly"))
            .await
            .unwrap();

        assert_eq!(habit.title(), "Read");
        assert_eq!(habit.frequency(), Frequency::Weekly);
        assert_eq!(habit.streak_count(), 0);
        assert!(habit.last_completed().is_none());
        assert_eq!(repo.created().len(), 1);
    }

    #[tokio::test]
    async fn blank_title_fails_before_store_call() {
        let repo = Arc::new(MockHabitRepository::new());
        let handler = CreateHabitHandler::new(repo.clone());

        let err = handler.handle(command("   ", "Ten pages", "daily")).await.unwrap_err();

        assert_eq!(err, HabitError::Validation(ValidationError::empty_field("title")));
        assert!(repo.created().is_empty());
    }

    #[tokio::test]
    async fn blank_description_fails_before_store_call() {
        let repo = Arc::new(MockHabitRepository::new());
        let handler = CreateHabitHandler::new(repo.clone());

        let err = handler.handle(command("Read", "", "daily")).await.unwrap_err();

        assert_eq!(
            err,
            HabitError::Validation(ValidationError::empty_field("description"))
        );
        assert!(repo.created().is_empty());
    }

    #[tokio::test]
    async fn unknown_frequency_fails_before_store_call() {
        let repo = Arc::new(MockHabitRepository::new());
        let handler = CreateHabitHandler::new(repo.clone());

        let err = handler.handle(command("Read", "Ten pages", "hourly")).await.unwrap_err();

        assert!(matches!(err, HabitError::Validation(ValidationError::NotInSet { .. })));
        assert!(repo.created().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_transient() {
        let handler = CreateHabitHandler::new(Arc::new(MockHabitRepository::failing()));

        let err = handler.handle(command("Read", "Ten pages", "daily")).await.unwrap_err();

        assert!(matches!(err, HabitError::TransientStore(_)));
    }
}
