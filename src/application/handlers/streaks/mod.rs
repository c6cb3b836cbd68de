//! Streak query handlers.

mod get_streak_board;

pub use get_streak_board::{GetStreakBoardHandler, GetStreakBoardQuery};
