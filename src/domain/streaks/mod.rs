//! Streaks Module - Pure domain services for streak statistics.
//!
//! # Components
//!
//! - `StreakCalculator` - completion history → `{current, best, total}`
//! - `HabitRanker` - orders habits by a statistic into a `Leaderboard`
//!
//! Both are stateless and free of I/O. Results are recomputed from the full
//! completion list on every query and never cached.

mod calculator;
mod ranking;

pub use calculator::{HabitStreak, StreakCalculator, StreakStats, CONSECUTIVE_DAY_TOLERANCE};
pub use ranking::{HabitRanker, Leaderboard, RankBadge, RankBy, RankedHabit, PODIUM_SIZE};
