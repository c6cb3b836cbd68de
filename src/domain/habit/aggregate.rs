//! Habit aggregate entity.
//!
//! Habits are created, mutated on completion, and deleted through the
//! external document store; this type is the local view of one document.
//!
//! # Ownership
//!
//! A habit belongs to exactly one user. The owner is fixed at creation and
//! there is no mutation that changes it.

use serde::{Deserialize, Serialize};

use super::Frequency;
use crate::domain::foundation::{
    DomainError, ErrorCode, HabitId, Timestamp, UserId, ValidationError,
};

/// Maximum length for habit title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for habit description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Validated fields for a habit that does not exist in the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDraft {
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub frequency: Frequency,
}

impl HabitDraft {
    /// Creates a draft for submission.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title or description is blank
    /// - `InvalidFormat` if either exceeds its maximum length
    pub fn new(
        owner_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        frequency: Frequency,
    ) -> Result<Self, ValidationError> {
        let title = title.into().trim().to_string();
        let description = description.into().trim().to_string();

        validate_text("title", &title, MAX_TITLE_LENGTH)?;
        validate_text("description", &description, MAX_DESCRIPTION_LENGTH)?;

        Ok(Self {
            owner_id,
            title,
            description,
            frequency,
        })
    }
}

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::invalid_format(
            field,
            format!("must be {} characters or less", max),
        ));
    }
    Ok(())
}

/// Field changes sent with `update_habit`.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<Timestamp>,
}

impl HabitUpdate {
    /// The update recorded against a habit after a new completion.
    pub fn completion(habit: &Habit, completed_at: Timestamp) -> Self {
        Self {
            streak_count: Some(habit.streak_count().saturating_add(1)),
            last_completed: Some(completed_at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.streak_count.is_none() && self.last_completed.is_none()
    }
}

/// Habit aggregate.
///
/// # Invariants
///
/// - `owner_id` never changes after creation
/// - `streak_count` never decreases through `apply`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    id: HabitId,
    owner_id: UserId,
    title: String,
    description: String,
    frequency: Frequency,

    /// Server-side mirror of the current streak. Display uses the
    /// streak calculator instead.
    streak_count: u32,

    last_completed: Option<Timestamp>,
    created_at: Timestamp,
}

impl Habit {
    /// Materializes a freshly stored draft.
    pub fn from_draft(id: HabitId, draft: HabitDraft, created_at: Timestamp) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            title: draft.title,
            description: draft.description,
            frequency: draft.frequency,
            streak_count: 0,
            last_completed: None,
            created_at,
        }
    }

    /// Reconstitute a habit from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: HabitId,
        owner_id: UserId,
        title: String,
        description: String,
        frequency: Frequency,
        streak_count: u32,
        last_completed: Option<Timestamp>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            description,
            frequency,
            streak_count,
            last_completed,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn streak_count(&self) -> u32 {
        self.streak_count
    }

    pub fn last_completed(&self) -> Option<&Timestamp> {
        self.last_completed.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this habit.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Validates that the user can mutate this habit.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not authorized to modify this habit",
            )
            .with_detail("habit_id", self.id.as_str()))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a stored update.
    ///
    /// A `streak_count` lower than the current value is ignored.
    pub fn apply(&mut self, update: &HabitUpdate) {
        if let Some(count) = update.streak_count {
            self.streak_count = self.streak_count.max(count);
        }
        if let Some(at) = update.last_completed {
            self.last_completed = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("user-123").unwrap()
    }

    fn test_habit() -> Habit {
        let draft = HabitDraft::new(owner(), "Read", "Ten pages", Frequency::Daily).unwrap();
        Habit::from_draft(HabitId::new("h1").unwrap(), draft, Timestamp::now())
    }

    #[test]
    fn draft_requires_title() {
        let err = HabitDraft::new(owner(), "  ", "desc", Frequency::Daily).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("title"));
    }

    #[test]
    fn draft_requires_description() {
        let err = HabitDraft::new(owner(), "Read", "", Frequency::Daily).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("description"));
    }

    #[test]
    fn draft_rejects_too_long_title() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(HabitDraft::new(owner(), long, "desc", Frequency::Daily).is_err());
    }

    #[test]
    fn draft_trims_text() {
        let draft = HabitDraft::new(owner(), "  Read ", " pages ", Frequency::Weekly).unwrap();
        assert_eq!(draft.title, "Read");
        assert_eq!(draft.description, "pages");
    }

    #[test]
    fn new_habit_starts_with_zero_streak() {
        let habit = test_habit();
        assert_eq!(habit.streak_count(), 0);
        assert!(habit.last_completed().is_none());
        assert_eq!(habit.frequency(), Frequency::Daily);
    }

    #[test]
    fn completion_update_increments_streak() {
        let habit = test_habit();
        let at = Timestamp::now();
        let update = HabitUpdate::completion(&habit, at);
        assert_eq!(update.streak_count, Some(1));
        assert_eq!(update.last_completed, Some(at));
    }

    #[test]
    fn apply_never_decrements_streak() {
        let mut habit = test_habit();
        habit.apply(&HabitUpdate {
            streak_count: Some(4),
            last_completed: None,
        });
        habit.apply(&HabitUpdate {
            streak_count: Some(2),
            last_completed: None,
        });
        assert_eq!(habit.streak_count(), 4);
    }

    #[test]
    fn owner_is_authorized() {
        assert!(test_habit().authorize(&owner()).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let other = UserId::new("someone-else").unwrap();
        let err = test_habit().authorize(&other).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(HabitUpdate::default().is_empty());
    }
}
