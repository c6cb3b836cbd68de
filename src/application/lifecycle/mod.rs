//! Habit lifecycle: the per-user controller, its change-feed hookup, and
//! the session that owns both.

mod controller;
mod refetch_handler;
mod session;

pub use controller::HabitLifecycleController;
pub use refetch_handler::RefetchOnChange;
pub use session::{HabitSession, SessionDeps, SessionError, SignInMode};
