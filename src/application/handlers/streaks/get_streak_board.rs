//! GetStreakBoardHandler - Query handler for the streaks leaderboard.
//!
//! Reads the user's habits and full completion history, computes
//! current/best/total per habit, and ranks them.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::habit::HabitError;
use crate::domain::streaks::{HabitRanker, Leaderboard, RankBy, StreakCalculator};
use crate::ports::{CompletionRepository, HabitRepository};

/// Query for a user's streak board.
#[derive(Debug, Clone)]
pub struct GetStreakBoardQuery {
    pub user_id: UserId,
    pub rank_by: RankBy,
}

impl GetStreakBoardQuery {
    /// Board ranked by best streak.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            rank_by: RankBy::default(),
        }
    }
}

/// Handler for the streak board.
pub struct GetStreakBoardHandler {
    habits: Arc<dyn HabitRepository>,
    completions: Arc<dyn CompletionRepository>,
}

impl GetStreakBoardHandler {
    pub fn new(
        habits: Arc<dyn HabitRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            habits,
            completions,
        }
    }

    pub async fn handle(&self, query: GetStreakBoardQuery) -> Result<Leaderboard, HabitError> {
        let (habits, completions) = futures::try_join!(
            self.habits.list_by_owner(&query.user_id),
            self.completions.list_by_owner(&query.user_id, None),
        )
        .map_err(|e| {
            tracing::error!(user_id = %query.user_id, error = %e, "Failed to load streak data");
            HabitError::from(e)
        })?;

        let streaks = StreakCalculator::compute_all(&habits, &completions);
        Ok(HabitRanker::rank_by(streaks, query.rank_by))
    }
}
