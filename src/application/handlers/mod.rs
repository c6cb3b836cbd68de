//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod habit;
pub mod streaks;

pub use habit::{
    CreateHabitCommand, CreateHabitHandler, DeleteHabitCommand, DeleteHabitHandler,
    MarkCompleteCommand, MarkCompleteHandler, MarkCompleteOutcome,
};
pub use streaks::{GetStreakBoardHandler, GetStreakBoardQuery};
