//! Streak Calculator - current/best/total statistics from completion history.
//!
//! Completions are classified by the real-valued day gap to the previous
//! completion of the same habit. A gap of at most 1.5 days continues the
//! run, which absorbs same-day double marks and late-evening/next-morning
//! pairs up to 36 hours apart. Anything larger starts a new run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{HabitId, Timestamp};
use crate::domain::habit::{CompletionRecord, Habit};

/// Largest gap, in fractional days, that still continues a run.
pub const CONSECUTIVE_DAY_TOLERANCE: f64 = 1.5;

/// Derived statistics for one habit. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Length of the run ending at the most recent completion.
    /// Does not need to reach today.
    pub current: u32,

    /// Longest run anywhere in the history.
    pub best: u32,

    /// Number of completion records.
    pub total: u32,
}

impl StreakStats {
    pub fn new(current: u32, best: u32, total: u32) -> Self {
        Self {
            current,
            best,
            total,
        }
    }
}

/// A habit paired with its computed statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStreak {
    pub habit: Habit,
    pub stats: StreakStats,
}

/// Pure streak computation. No I/O, no clock.
pub struct StreakCalculator;

impl StreakCalculator {
    /// Computes statistics for one habit from an unordered completion set.
    ///
    /// Records for other habits are ignored, so the full per-user list can
    /// be passed as-is.
    ///
    /// # Edge Cases
    /// - No completions: `{0, 0, 0}`
    /// - One completion: `{1, 1, 1}`
    /// - Several completions on one day: a single run of that length
    pub fn compute(habit_id: &HabitId, completions: &[CompletionRecord]) -> StreakStats {
        let mut history: Vec<&Timestamp> = completions
            .iter()
            .filter(|c| c.habit_id() == habit_id)
            .map(|c| c.completed_at())
            .collect();
        history.sort();
        Self::scan(&history)
    }

    /// Computes statistics for every habit in one pass over the completions.
    ///
    /// Output order matches `habits`.
    pub fn compute_all(habits: &[Habit], completions: &[CompletionRecord]) -> Vec<HabitStreak> {
        let mut by_habit: HashMap<&HabitId, Vec<&Timestamp>> = HashMap::new();
        for completion in completions {
            by_habit
                .entry(completion.habit_id())
                .or_default()
                .push(completion.completed_at());
        }

        habits
            .iter()
            .map(|habit| {
                let stats = match by_habit.get_mut(habit.id()) {
                    Some(history) => {
                        history.sort();
                        Self::scan(history)
                    }
                    None => StreakStats::default(),
                };
                HabitStreak {
                    habit: habit.clone(),
                    stats,
                }
            })
            .collect()
    }

    /// Walks an ascending history. Every record, the first included,
    /// updates `best`.
    fn scan(history: &[&Timestamp]) -> StreakStats {
        let mut run: u32 = 0;
        let mut best: u32 = 0;
        let mut previous: Option<&Timestamp> = None;

        for &completed_at in history {
            run = match previous {
                Some(prev) if completed_at.days_since(prev) <= CONSECUTIVE_DAY_TOLERANCE => {
                    run.saturating_add(1)
                }
                _ => 1,
            };
            best = best.max(run);
            previous = Some(completed_at);
        }

        StreakStats {
            current: run,
            best,
            total: saturating_count(history.len()),
        }
    }
}

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
