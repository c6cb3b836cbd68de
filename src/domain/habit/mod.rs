//! Habit domain module.
//!
//! Habits, their completion records, and the errors habit operations return.

mod aggregate;
mod completion;
mod errors;
mod frequency;

pub use aggregate::{Habit, HabitDraft, HabitUpdate, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
pub use completion::{CompletionDraft, CompletionLog, CompletionRecord};
pub use errors::HabitError;
pub use frequency::Frequency;
