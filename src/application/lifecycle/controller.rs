//! HabitLifecycleController - Owns one user's view of habits and completions.
//!
//! The view is replaced wholesale on every refetch. Mutations go through
//! the command handlers; the change feed then triggers a refetch of the
//! affected collection. A local write and its feed echo may arrive in any
//! order, so every view update is idempotent.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::application::handlers::{
    CreateHabitCommand, CreateHabitHandler, DeleteHabitCommand, DeleteHabitHandler,
    MarkCompleteCommand, MarkCompleteHandler, MarkCompleteOutcome,
};
use crate::domain::foundation::{
    AuthenticatedUser, ChangeEvent, Collection, DayBoundary, HabitId, Timestamp, UserId,
};
use crate::domain::habit::{CompletionLog, CompletionRecord, Habit, HabitError};
use crate::domain::streaks::{HabitRanker, Leaderboard, StreakCalculator};
use crate::ports::{Clock, CompletionRepository, HabitRepository};

/// Locally held, fetched state.
#[derive(Debug, Default)]
struct ViewState {
    habits: Vec<Habit>,
    /// Every completion of the user.
    history: CompletionLog,
    /// Completions fetched since the local midnight of the last refetch.
    today: CompletionLog,
}

impl ViewState {
    fn habit(&self, id: &HabitId) -> Result<Habit, HabitError> {
        self.habits
            .iter()
            .find(|h| h.id() == id)
            .cloned()
            .ok_or_else(|| HabitError::not_found(id))
    }

    fn upsert_habit(&mut self, habit: Habit) {
        match self.habits.iter_mut().find(|h| h.id() == habit.id()) {
            Some(existing) => *existing = habit,
            None => self.habits.push(habit),
        }
    }

    fn record_completion(&mut self, completion: CompletionRecord) {
        self.today.push(completion.clone());
        self.history.push(completion);
    }
}

/// Habit lifecycle for one signed-in user.
pub struct HabitLifecycleController {
    user: AuthenticatedUser,
    habits: Arc<dyn HabitRepository>,
    completions: Arc<dyn CompletionRepository>,
    clock: Arc<dyn Clock>,
    days: DayBoundary,
    create_handler: CreateHabitHandler,
    mark_handler: MarkCompleteHandler,
    delete_handler: DeleteHabitHandler,
    state: RwLock<ViewState>,
    /// Serializes `mark_complete` so the per-day check sees earlier writes.
    mark_gate: Mutex<()>,
}

impl HabitLifecycleController {
    pub fn new(
        user: AuthenticatedUser,
        habits: Arc<dyn HabitRepository>,
        completions: Arc<dyn CompletionRepository>,
        clock: Arc<dyn Clock>,
        days: DayBoundary,
    ) -> Self {
        Self {
            create_handler: CreateHabitHandler::new(habits.clone()),
            mark_handler: MarkCompleteHandler::new(
                habits.clone(),
                completions.clone(),
                clock.clone(),
                days,
            ),
            delete_handler: DeleteHabitHandler::new(habits.clone()),
            user,
            habits,
            completions,
            clock,
            days,
            state: RwLock::new(ViewState::default()),
            mark_gate: Mutex::new(()),
        }
    }

    pub fn user(&self) -> &AuthenticatedUser {
        &self.user
    }

    fn user_id(&self) -> &UserId {
        &self.user.id
    }

    // ─────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────

    /// Creates a habit owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// - `Validation` if title or description is blank, or the frequency
    ///   is not one of daily/weekly/monthly
    /// - `TransientStore` if the store call fails
    pub async fn create_habit(
        &self,
        title: &str,
        description: &str,
        frequency: &str,
    ) -> Result<Habit, HabitError> {
        let habit = self
            .create_handler
            .handle(CreateHabitCommand {
                owner_id: self.user_id().clone(),
                title: title.to_string(),
                description: description.to_string(),
                frequency: frequency.to_string(),
            })
            .await?;

        self.state.write().await.upsert_habit(habit.clone());
        Ok(habit)
    }

    /// Marks a habit done now. A second call on the same local day is a
    /// no-op returning `AlreadyCompletedToday`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the habit is not in the current view
    /// - `TransientStore` if the completion write fails
    /// - `PartialWrite` if the completion was written but the habit update failed
    pub async fn mark_complete(&self, habit_id: &HabitId) -> Result<MarkCompleteOutcome, HabitError> {
        let _gate = self.mark_gate.lock().await;

        let (habit, today) = {
            let state = self.state.read().await;
            (state.habit(habit_id)?, state.today.clone())
        };

        let cmd = MarkCompleteCommand {
            user_id: self.user_id().clone(),
            habit,
        };
        match self.mark_handler.handle(cmd, &today).await {
            Ok(MarkCompleteOutcome::Completed { completion, habit }) => {
                let mut state = self.state.write().await;
                state.record_completion(completion.clone());
                state.upsert_habit(habit.clone());
                Ok(MarkCompleteOutcome::Completed { completion, habit })
            }
            Ok(MarkCompleteOutcome::AlreadyCompletedToday) => {
                Ok(MarkCompleteOutcome::AlreadyCompletedToday)
            }
            Err(err @ HabitError::PartialWrite { .. }) => {
                // The completion exists; pick it up so the day stays guarded.
                if let Err(e) = self.refetch(Collection::Completions).await {
                    tracing::warn!(habit_id = %habit_id, error = %e, "Refetch after partial write failed");
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Deletes a habit. Its completions stay in the store.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the habit is not in the current view
    /// - `TransientStore` if the store call fails
    pub async fn delete_habit(&self, habit_id: &HabitId) -> Result<(), HabitError> {
        let habit = self.state.read().await.habit(habit_id)?;

        self.delete_handler
            .handle(DeleteHabitCommand {
                user_id: self.user_id().clone(),
                habit,
            })
            .await?;

        self.state.write().await.habits.retain(|h| h.id() != habit_id);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Change feed
    // ─────────────────────────────────────────────────────────────────────

    /// Refetches the collection an event belongs to, whatever its kind.
    pub async fn on_external_change(&self, event: &ChangeEvent) -> Result<(), HabitError> {
        tracing::debug!(
            collection = %event.collection,
            kind = %event.kind,
            document_id = %event.document_id,
            "Change feed event, refetching"
        );
        self.refetch(event.collection).await
    }

    /// Refetches both collections.
    pub async fn refresh(&self) -> Result<(), HabitError> {
        futures::try_join!(
            self.refetch(Collection::Habits),
            self.refetch(Collection::Completions),
        )?;
        Ok(())
    }

    async fn refetch(&self, collection: Collection) -> Result<(), HabitError> {
        match collection {
            Collection::Habits => {
                let habits = self
                    .habits
                    .list_by_owner(self.user_id())
                    .await
                    .map_err(|e| self.fetch_failed(collection, e.into()))?;
                self.state.write().await.habits = habits;
            }
            Collection::Completions => {
                let since = self.days.start_of_day(&self.clock.now());
                let (history, today) = futures::try_join!(
                    self.completions.list_by_owner(self.user_id(), None),
                    self.completions.list_by_owner(self.user_id(), Some(since)),
                )
                .map_err(|e| self.fetch_failed(collection, e.into()))?;

                let mut state = self.state.write().await;
                state.history = CompletionLog::new(history);
                state.today = CompletionLog::new(today);
            }
        }
        Ok(())
    }

    fn fetch_failed(&self, collection: Collection, err: HabitError) -> HabitError {
        tracing::error!(collection = %collection, user_id = %self.user_id(), error = %err, "Fetch failed");
        err
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries (local view)
    // ─────────────────────────────────────────────────────────────────────

    pub async fn habits(&self) -> Vec<Habit> {
        self.state.read().await.habits.clone()
    }

    pub async fn habit(&self, habit_id: &HabitId) -> Option<Habit> {
        self.state.read().await.habit(habit_id).ok()
    }

    /// Whether the habit has a completion in today's local day.
    /// Decided now, so it flips back at local midnight without a refetch.
    pub async fn is_completed_today(&self, habit_id: &HabitId) -> bool {
        let now = self.clock.now();
        self.state
            .read()
            .await
            .today
            .is_completed_on_day(habit_id, &now, &self.days)
    }

    /// Completions in today's local day.
    pub async fn completions_today(&self) -> Vec<CompletionRecord> {
        let now = self.clock.now();
        let start = self.days.start_of_day(&now);
        let end = self.days.end_of_day(&now);
        self.state
            .read()
            .await
            .today
            .records()
            .iter()
            .filter(|r| in_range(r.completed_at(), &start, &end))
            .cloned()
            .collect()
    }

    /// Streak board computed from the local history.
    pub async fn streak_board(&self) -> Leaderboard {
        let state = self.state.read().await;
        let streaks = StreakCalculator::compute_all(&state.habits, state.history.records());
        HabitRanker::rank(streaks)
    }
}

fn in_range(ts: &Timestamp, start: &Timestamp, end: &Timestamp) -> bool {
    !ts.is_before(start) && ts.is_before(end)
}
