//! Completion records: one timestamped "habit was done" event each.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CompletionId, DayBoundary, HabitId, Timestamp, UserId};

/// Fields for a completion that does not exist in the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionDraft {
    pub owner_id: UserId,
    pub habit_id: HabitId,
    pub completed_at: Timestamp,
}

/// A stored completion. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    id: CompletionId,
    owner_id: UserId,
    habit_id: HabitId,
    completed_at: Timestamp,
}

impl CompletionRecord {
    pub fn new(id: CompletionId, owner_id: UserId, habit_id: HabitId, completed_at: Timestamp) -> Self {
        Self {
            id,
            owner_id,
            habit_id,
            completed_at,
        }
    }

    /// Materializes a freshly stored draft.
    pub fn from_draft(id: CompletionId, draft: CompletionDraft) -> Self {
        Self::new(id, draft.owner_id, draft.habit_id, draft.completed_at)
    }

    pub fn id(&self) -> &CompletionId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    pub fn completed_at(&self) -> &Timestamp {
        &self.completed_at
    }
}

/// The completions currently held in local view state.
///
/// Replaced wholesale on every refetch; appended to only for a completion
/// this client just wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionLog {
    records: Vec<CompletionRecord>,
}

impl CompletionLog {
    pub fn new(records: Vec<CompletionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CompletionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a record unless one with the same id is already present.
    pub fn push(&mut self, record: CompletionRecord) {
        if !self.records.iter().any(|r| r.id() == record.id()) {
            self.records.push(record);
        }
    }

    /// Records belonging to one habit, in stored order.
    pub fn for_habit<'a>(&'a self, habit_id: &'a HabitId) -> impl Iterator<Item = &'a CompletionRecord> + 'a {
        self.records.iter().filter(move |r| r.habit_id() == habit_id)
    }

    /// Whether the habit has a completion in the local day containing `now`.
    pub fn is_completed_on_day(&self, habit_id: &HabitId, now: &Timestamp, days: &DayBoundary) -> bool {
        let start = days.start_of_day(now);
        let end = days.end_of_day(now);
        self.for_habit(habit_id)
            .any(|r| !r.completed_at().is_before(&start) && r.completed_at().is_before(&end))
    }
}
