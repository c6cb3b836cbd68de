//! MarkCompleteHandler - Command handler for recording a habit completion.
//!
//! Records at most one completion per habit per local day, then bumps the
//! habit's `streak_count` and `last_completed`. The two writes are not
//! atomic: if the habit update fails after the completion was stored, the
//! completion stays and `HabitError::PartialWrite` is returned.

use std::sync::Arc;

use crate::domain::foundation::{DayBoundary, UserId};
use crate::domain::habit::{
    CompletionDraft, CompletionLog, CompletionRecord, Habit, HabitError, HabitUpdate,
};
use crate::ports::{Clock, CompletionRepository, HabitRepository};

/// Command to mark a habit done now.
#[derive(Debug, Clone)]
pub struct MarkCompleteCommand {
    pub user_id: UserId,
    /// The habit as it stands in the caller's view.
    pub habit: Habit,
}

/// What `MarkCompleteHandler::handle` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkCompleteOutcome {
    /// A completion already exists for this habit today. Nothing was written.
    AlreadyCompletedToday,

    /// Both writes succeeded.
    Completed {
        completion: CompletionRecord,
        habit: Habit,
    },
}

impl MarkCompleteOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, MarkCompleteOutcome::Completed { .. })
    }
}

/// Handler for marking habits complete.
pub struct MarkCompleteHandler {
    habits: Arc<dyn HabitRepository>,
    completions: Arc<dyn CompletionRepository>,
    clock: Arc<dyn Clock>,
    days: DayBoundary,
}

impl MarkCompleteHandler {
    pub fn new(
        habits: Arc<dyn HabitRepository>,
        completions: Arc<dyn CompletionRepository>,
        clock: Arc<dyn Clock>,
        days: DayBoundary,
    ) -> Self {
        Self {
            habits,
            completions,
            clock,
            days,
        }
    }

    /// Marks the habit done unless `known` already holds a completion for it
    /// in the current local day.
    pub async fn handle(
        &self,
        cmd: MarkCompleteCommand,
        known: &CompletionLog,
    ) -> Result<MarkCompleteOutcome, HabitError> {
        let habit = cmd.habit;

        // 1. Authorize
        habit.authorize(&cmd.user_id)?;

        // 2. One completion per local day
        let now = self.clock.now();
        if known.is_completed_on_day(habit.id(), &now, &self.days) {
            tracing::debug!(habit_id = %habit.id(), "Habit already completed today");
            return Ok(MarkCompleteOutcome::AlreadyCompletedToday);
        }

        // 3. Record the completion
        let completion = self
            .completions
            .create(CompletionDraft {
                owner_id: cmd.user_id,
                habit_id: habit.id().clone(),
                completed_at: now,
            })
            .await
            .map_err(|e| {
                tracing::error!(habit_id = %habit.id(), error = %e, "Failed to record completion");
                HabitError::from(e)
            })?;

        // 4. Update the habit's streak mirror
        let update = HabitUpdate::completion(&habit, now);
        let updated = match self.habits.update(habit.id(), update).await {
            Ok(updated) => updated,
            Err(e) => {
                tracing::warn!(
                    habit_id = %habit.id(),
                    completion_id = %completion.id(),
                    error = %e,
                    "Completion saved but habit update failed"
                );
                return Err(HabitError::PartialWrite {
                    completion_id: completion.id().clone(),
                    habit_id: habit.id().clone(),
                    reason: e.to_string(),
                });
            }
        };

        tracing::info!(
            habit_id = %habit.id(),
            streak_count = updated.streak_count(),
            "Habit marked complete"
        );

        Ok(MarkCompleteOutcome::Completed {
            completion,
            habit: updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryDocumentStore, StoreOperation};
    use crate::domain::foundation::{CompletionId, Timestamp};
    use crate::domain::habit::{Frequency, HabitDraft};

    struct Fixture {
        store: Arc<InMemoryDocumentStore>,
        clock: Arc<FixedClock>,
        handler: MarkCompleteHandler,
        habit: Habit,
    }

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    // 2024-03-10T09:00:00Z
    fn morning() -> Timestamp {
        Timestamp::from_millis(1_710_061_200_000).unwrap()
    }

    async fn fixture() -> Fixture {
        let clock = Arc::new(FixedClock::new(morning()));
        let store = Arc::new(InMemoryDocumentStore::new().with_clock(clock.clone()));
        let draft = HabitDraft::new(owner(), "Read", "Ten pages", Frequency::Daily).unwrap();
        let habit = HabitRepository::create(store.as_ref(), draft).await.unwrap();
        let handler =
            MarkCompleteHandler::new(store.clone(), store.clone(), clock.clone(), DayBoundary::utc());
        Fixture {
            store,
            clock,
            handler,
            habit,
        }
    }

    fn command(f: &Fixture) -> MarkCompleteCommand {
        MarkCompleteCommand {
            user_id: owner(),
            habit: f.habit.clone(),
        }
    }

    #[tokio::test]
    async fn writes_completion_and_bumps_streak() {
        let f = fixture().await;

        let outcome = f.handler.handle(command(&f), &CompletionLog::default()).await.unwrap();

        match outcome {
            MarkCompleteOutcome::Completed { completion, habit } => {
                assert_eq!(completion.completed_at(), &morning());
                assert_eq!(completion.habit_id(), f.habit.id());
                assert_eq!(habit.streak_count(), 1);
                assert_eq!(habit.last_completed(), Some(&morning()));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(f.store.all_completions().len(), 1);
    }

    #[tokio::test]
    async fn second_mark_on_same_day_is_a_no_op() {
        let f = fixture().await;
        let mut known = CompletionLog::default();
        let first = f.handler.handle(command(&f), &known).await.unwrap();
        if let MarkCompleteOutcome::Completed { completion, .. } = first {
            known.push(completion);
        }

        f.clock.advance(chrono::Duration::hours(5));
        let outcome = f.handler.handle(command(&f), &known).await.unwrap();

        assert_eq!(outcome, MarkCompleteOutcome::AlreadyCompletedToday);
        assert_eq!(f.store.all_completions().len(), 1);
    }

    #[tokio::test]
    async fn completion_from_yesterday_does_not_block_today() {
        let f = fixture().await;
        let known = CompletionLog::new(vec![CompletionRecord::new(
            CompletionId::new("c0").unwrap(),
            owner(),
            f.habit.id().clone(),
            morning().add_days(-1),
        )]);

        let outcome = f.handler.handle(command(&f), &known).await.unwrap();

        assert!(outcome.is_completed());
    }

    #[tokio::test]
    async fn completion_failure_writes_nothing() {
        let f = fixture().await;
        f.store.fail(StoreOperation::CreateCompletion);

        let err = f
            .handler
            .handle(command(&f), &CompletionLog::default())
            .await
            .unwrap_err();

        assert!(matches!(err, HabitError::TransientStore(_)));
        assert!(f.store.all_completions().is_empty());
        assert_eq!(f.store.habit(f.habit.id()).unwrap().streak_count(), 0);
    }

    #[tokio::test]
    async fn habit_update_failure_is_partial_write() {
        let f = fixture().await;
        f.store.fail(StoreOperation::UpdateHabit);

        let err = f
            .handler
            .handle(command(&f), &CompletionLog::default())
            .await
            .unwrap_err();

        match err {
            HabitError::PartialWrite {
                completion_id,
                habit_id,
                ..
            } => {
                assert_eq!(&habit_id, f.habit.id());
                let stored = f.store.all_completions();
                assert_eq!(stored.len(), 1);
                assert_eq!(stored[0].id(), &completion_id);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(f.store.habit(f.habit.id()).unwrap().streak_count(), 0);
    }

    #[tokio::test]
    async fn other_users_habit_is_forbidden() {
        let f = fixture().await;
        let cmd = MarkCompleteCommand {
            user_id: UserId::new("intruder").unwrap(),
            habit: f.habit.clone(),
        };

        let err = f.handler.handle(cmd, &CompletionLog::default()).await.unwrap_err();

        assert_eq!(err, HabitError::Forbidden);
        assert!(f.store.all_completions().is_empty());
    }
}
