//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, day boundaries, errors, events)
//! - `habit` - Habits, completion records, and habit errors
//! - `streaks` - Pure streak computation and habit ranking

pub mod foundation;
pub mod habit;
pub mod streaks;
