//! Habit command handlers.

mod create_habit;
mod delete_habit;
mod mark_complete;

pub use create_habit::{CreateHabitCommand, CreateHabitHandler};
pub use delete_habit::{DeleteHabitCommand, DeleteHabitHandler};
pub use mark_complete::{MarkCompleteCommand, MarkCompleteHandler, MarkCompleteOutcome};
