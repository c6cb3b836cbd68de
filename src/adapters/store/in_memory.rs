//! In-memory document store for testing and local development.
//!
//! Implements both collection ports over plain vectors and, when a feed is
//! attached, announces every mutation on it the way the hosted store does.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned.

use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::adapters::clock::SystemClock;
use crate::adapters::events::InMemoryChangeFeed;
use crate::domain::foundation::{
    ChangeEvent, ChangeKind, Collection, CompletionId, DomainError, ErrorCode, HabitId, Timestamp,
    UserId,
};
use crate::domain::habit::{CompletionDraft, CompletionRecord, Habit, HabitDraft, HabitUpdate};
use crate::ports::{Clock, CompletionRepository, HabitRepository};

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    ListHabits,
    CreateHabit,
    UpdateHabit,
    DeleteHabit,
    ListCompletions,
    CreateCompletion,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOperation::ListHabits => "list_habits",
            StoreOperation::CreateHabit => "create_habit",
            StoreOperation::UpdateHabit => "update_habit",
            StoreOperation::DeleteHabit => "delete_habit",
            StoreOperation::ListCompletions => "list_completions",
            StoreOperation::CreateCompletion => "create_completion",
        };
        write!(f, "{}", name)
    }
}

/// In-memory habits and completions collections.
///
/// # Example
///
/// ```ignore
/// let feed = Arc::new(InMemoryChangeFeed::new());
/// let store = Arc::new(InMemoryDocumentStore::new().with_feed(feed.clone()));
///
/// store.fail(StoreOperation::UpdateHabit);
/// ```
pub struct InMemoryDocumentStore {
    habits: RwLock<Vec<Habit>>,
    completions: RwLock<Vec<CompletionRecord>>,
    failing: RwLock<HashSet<StoreOperation>>,
    feed: Option<Arc<InMemoryChangeFeed>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            habits: RwLock::new(Vec::new()),
            completions: RwLock::new(Vec::new()),
            failing: RwLock::new(HashSet::new()),
            feed: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Announce every mutation on this feed.
    pub fn with_feed(mut self, feed: Arc<InMemoryChangeFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Stamp `created_at` and change events from this clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // === Failure Injection ===

    /// Make an operation fail with `DatabaseError` until `recover` is called.
    pub fn fail(&self, op: StoreOperation) {
        self.failing
            .write()
            .expect("InMemoryDocumentStore: failing lock poisoned")
            .insert(op);
    }

    pub fn recover(&self, op: StoreOperation) {
        self.failing
            .write()
            .expect("InMemoryDocumentStore: failing lock poisoned")
            .remove(&op);
    }

    fn check(&self, op: StoreOperation) -> Result<(), DomainError> {
        let failing = self
            .failing
            .read()
            .expect("InMemoryDocumentStore: failing lock poisoned");
        if failing.contains(&op) {
            return Err(DomainError::database(format!("{} failed: store unavailable", op)));
        }
        Ok(())
    }

    // === Seeding and Inspection ===

    /// Inserts a habit directly, without announcing it.
    pub fn insert_habit(&self, habit: Habit) {
        self.habits
            .write()
            .expect("InMemoryDocumentStore: habits lock poisoned")
            .push(habit);
    }

    /// Inserts a completion directly, without announcing it.
    pub fn insert_completion(&self, record: CompletionRecord) {
        self.completions
            .write()
            .expect("InMemoryDocumentStore: completions lock poisoned")
            .push(record);
    }

    pub fn habit(&self, id: &HabitId) -> Option<Habit> {
        self.habits
            .read()
            .expect("InMemoryDocumentStore: habits lock poisoned")
            .iter()
            .find(|h| h.id() == id)
            .cloned()
    }

    pub fn habit_count(&self) -> usize {
        self.habits
            .read()
            .expect("InMemoryDocumentStore: habits lock poisoned")
            .len()
    }

    pub fn all_completions(&self) -> Vec<CompletionRecord> {
        self.completions
            .read()
            .expect("InMemoryDocumentStore: completions lock poisoned")
            .clone()
    }

    async fn announce(&self, collection: Collection, kind: ChangeKind, document_id: &str) {
        let Some(feed) = &self.feed else {
            return;
        };
        let event = ChangeEvent::new(collection, kind, document_id).at(self.clock.now());
        if let Err(e) = feed.publish(event).await {
            tracing::warn!(
                collection = %collection,
                kind = %kind,
                document_id,
                error = %e,
                "Change feed subscriber failed"
            );
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn habit_not_found(id: &HabitId) -> DomainError {
    DomainError::new(ErrorCode::HabitNotFound, format!("Habit {} not found", id))
        .with_detail("habit_id", id.as_str())
}

#[async_trait]
impl HabitRepository for InMemoryDocumentStore {
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Habit>, DomainError> {
        self.check(StoreOperation::ListHabits)?;
        let habits = self
            .habits
            .read()
            .expect("InMemoryDocumentStore: habits lock poisoned");
        Ok(habits
            .iter()
            .filter(|h| h.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: HabitDraft) -> Result<Habit, DomainError> {
        self.check(StoreOperation::CreateHabit)?;
        let habit = Habit::from_draft(HabitId::generate(), draft, self.clock.now());
        self.insert_habit(habit.clone());

        self.announce(Collection::Habits, ChangeKind::Create, habit.id().as_str())
            .await;
        Ok(habit)
    }

    async fn update(&self, id: &HabitId, update: HabitUpdate) -> Result<Habit, DomainError> {
        self.check(StoreOperation::UpdateHabit)?;
        let updated = {
            let mut habits = self
                .habits
                .write()
                .expect("InMemoryDocumentStore: habits lock poisoned");
            let habit = habits
                .iter_mut()
                .find(|h| h.id() == id)
                .ok_or_else(|| habit_not_found(id))?;
            habit.apply(&update);
            habit.clone()
        };

        self.announce(Collection::Habits, ChangeKind::Update, id.as_str())
            .await;
        Ok(updated)
    }

    async fn delete(&self, id: &HabitId) -> Result<(), DomainError> {
        self.check(StoreOperation::DeleteHabit)?;
        {
            let mut habits = self
                .habits
                .write()
                .expect("InMemoryDocumentStore: habits lock poisoned");
            let before = habits.len();
            habits.retain(|h| h.id() != id);
            if habits.len() == before {
                return Err(habit_not_found(id));
            }
        }

        self.announce(Collection::Habits, ChangeKind::Delete, id.as_str())
            .await;
        Ok(())
    }
}

#[async_trait]
impl CompletionRepository for InMemoryDocumentStore {
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        since: Option<Timestamp>,
    ) -> Result<Vec<CompletionRecord>, DomainError> {
        self.check(StoreOperation::ListCompletions)?;
        let completions = self
            .completions
            .read()
            .expect("InMemoryDocumentStore: completions lock poisoned");
        Ok(completions
            .iter()
            .filter(|c| c.owner_id() == owner_id)
            .filter(|c| since.map_or(true, |s| !c.completed_at().is_before(&s)))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: CompletionDraft) -> Result<CompletionRecord, DomainError> {
        self.check(StoreOperation::CreateCompletion)?;
        let record = CompletionRecord::from_draft(CompletionId::generate(), draft);
        self.insert_completion(record.clone());

        self.announce(Collection::Completions, ChangeKind::Create, record.id().as_str())
            .await;
        Ok(record)
    }
}
