//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, and event types
//! that form the vocabulary of the habit tracking domain.

mod auth;
mod day_boundary;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Credentials, DEFAULT_MIN_PASSWORD_LENGTH};
pub use day_boundary::{DayBoundary, MAX_OFFSET_MINUTES};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{ChangeEvent, ChangeKind, Collection, EventId};
pub use ids::{CompletionId, HabitId, UserId};
pub use timestamp::{Timestamp, MILLIS_PER_DAY};
