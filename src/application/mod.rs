//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through the store; the lifecycle controller keeps
//! the signed-in user's view and refetches it when the change feed fires.

pub mod handlers;
pub mod lifecycle;

pub use handlers::{
    // Habit handlers
    CreateHabitCommand, CreateHabitHandler,
    DeleteHabitCommand, DeleteHabitHandler,
    MarkCompleteCommand, MarkCompleteHandler, MarkCompleteOutcome,
    // Streak queries
    GetStreakBoardHandler, GetStreakBoardQuery,
};
pub use lifecycle::{
    HabitLifecycleController, HabitSession, RefetchOnChange, SessionDeps, SessionError,
    SignInMode,
};
