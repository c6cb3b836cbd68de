//! Habit-specific error types.

use thiserror::Error;

use crate::domain::foundation::{CompletionId, DomainError, ErrorCode, HabitId, ValidationError};

/// Errors surfaced by habit operations.
///
/// Every variant is returned to the call site that issued the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HabitError {
    /// Required field missing or outside its enumerated set.
    /// Raised before any store call.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The habit is not in the caller's view or no longer in the store.
    #[error("Habit not found: {0}")]
    NotFound(String),

    /// The habit belongs to another user.
    #[error("Permission denied")]
    Forbidden,

    /// A store call failed (timeout, auth expiry, server error).
    #[error("Store unavailable: {0}")]
    TransientStore(String),

    /// The completion was written but the habit update was not.
    /// The completion persists; the habit's `streak_count` is stale.
    #[error("Completion {completion_id} saved but habit {habit_id} was not updated: {reason}")]
    PartialWrite {
        completion_id: CompletionId,
        habit_id: HabitId,
        reason: String,
    },
}

impl HabitError {
    pub fn not_found(id: &HabitId) -> Self {
        HabitError::NotFound(id.to_string())
    }

    pub fn transient(message: impl Into<String>) -> Self {
        HabitError::TransientStore(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            HabitError::Validation(_) => ErrorCode::ValidationFailed,
            HabitError::NotFound(_) => ErrorCode::HabitNotFound,
            HabitError::Forbidden => ErrorCode::Forbidden,
            HabitError::TransientStore(_) | HabitError::PartialWrite { .. } => {
                ErrorCode::DatabaseError
            }
        }
    }
}

impl From<DomainError> for HabitError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                HabitError::Validation(ValidationError::invalid_format(field, err.message))
            }
            ErrorCode::HabitNotFound => HabitError::NotFound(
                err.details.get("habit_id").cloned().unwrap_or(err.message),
            ),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => HabitError::Forbidden,
            _ => HabitError::TransientStore(err.to_string()),
        }
    }
}

impl From<HabitError> for DomainError {
    fn from(err: HabitError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            HabitError::Validation(v) => DomainError::validation(v.field().to_string(), message),
            HabitError::NotFound(id) => DomainError::new(code, message).with_detail("habit_id", id),
            HabitError::PartialWrite {
                completion_id,
                habit_id,
                ..
            } => DomainError::new(code, message)
                .with_detail("completion_id", completion_id.as_str())
                .with_detail("habit_id", habit_id.as_str()),
            HabitError::Forbidden | HabitError::TransientStore(_) => DomainError::new(code, message),
        }
    }
}
