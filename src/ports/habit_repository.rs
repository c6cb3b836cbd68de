//! Habit repository port.
//!
//! Defines the contract for the habits collection of the external document
//! store. Every query is scoped to one owner.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HabitId, UserId};
use crate::domain::habit::{Habit, HabitDraft, HabitUpdate};

/// Repository port for Habit documents.
///
/// Implementations must ensure:
/// - Ids are assigned by the store on `create`
/// - `update` and `delete` on an unknown id return `HabitNotFound`
/// - Every mutation is announced on the habits change-feed channel
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// List all habits owned by a user.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on store failure
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Habit>, DomainError>;

    /// Create a habit from a validated draft. `streak_count` starts at 0.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on store failure
    async fn create(&self, draft: HabitDraft) -> Result<Habit, DomainError>;

    /// Apply field changes and return the stored habit.
    ///
    /// # Errors
    ///
    /// - `HabitNotFound` if the habit doesn't exist
    /// - `DatabaseError` on store failure
    async fn update(&self, id: &HabitId, update: HabitUpdate) -> Result<Habit, DomainError>;

    /// Delete a habit. Its completions are left in place.
    ///
    /// # Errors
    ///
    /// - `HabitNotFound` if the habit doesn't exist
    /// - `DatabaseError` on store failure
    async fn delete(&self, id: &HabitId) -> Result<(), DomainError>;
}
