//! Habit Ranker - leaderboard ordering of habits by streak statistics.

use serde::{Deserialize, Serialize};

use super::HabitStreak;

/// Number of leaderboard places that receive a badge.
pub const PODIUM_SIZE: usize = 3;

/// Statistic the leaderboard is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankBy {
    #[default]
    Best,
    Current,
    Total,
}

impl RankBy {
    fn key(&self, entry: &HabitStreak) -> u32 {
        match self {
            RankBy::Best => entry.stats.best,
            RankBy::Current => entry.stats.current,
            RankBy::Total => entry.stats.total,
        }
    }
}

/// Badge for the top three places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankBadge {
    Gold,
    Silver,
    Bronze,
}

impl RankBadge {
    /// Badge for a 1-based rank, if it is on the podium.
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(RankBadge::Gold),
            2 => Some(RankBadge::Silver),
            3 => Some(RankBadge::Bronze),
            _ => None,
        }
    }

    /// The 1-based rank this badge marks.
    pub fn rank(&self) -> usize {
        match self {
            RankBadge::Gold => 1,
            RankBadge::Silver => 2,
            RankBadge::Bronze => 3,
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedHabit {
    /// 1-based position. Tied entries still get distinct positions.
    pub rank: usize,
    pub entry: HabitStreak,
}

impl RankedHabit {
    pub fn badge(&self) -> Option<RankBadge> {
        RankBadge::for_rank(self.rank)
    }
}

/// Ordered habit statistics, highest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<RankedHabit>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[RankedHabit] {
        &self.entries
    }

    /// The badge holders: at most the first three entries.
    pub fn podium(&self) -> &[RankedHabit] {
        let end = self.entries.len().min(PODIUM_SIZE);
        &self.entries[..end]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<RankedHabit> {
        self.entries
    }
}

/// Orders habits for the leaderboard.
pub struct HabitRanker;

impl HabitRanker {
    /// Ranks by best streak, descending.
    pub fn rank(streaks: Vec<HabitStreak>) -> Leaderboard {
        Self::rank_by(streaks, RankBy::Best)
    }

    /// Ranks by the chosen statistic, descending. Ties keep input order.
    pub fn rank_by(mut streaks: Vec<HabitStreak>, by: RankBy) -> Leaderboard {
        // sort_by is stable
        streaks.sort_by(|a, b| by.key(b).cmp(&by.key(a)));

        let entries = streaks
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedHabit { rank: i + 1, entry })
            .collect();

        Leaderboard { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{HabitId, Timestamp, UserId};
    use crate::domain::habit::{Frequency, Habit, HabitDraft};
    use crate::domain::streaks::StreakStats;

    fn entry(id: &str, current: u32, best: u32, total: u32) -> HabitStreak {
        let draft = HabitDraft::new(
            UserId::new("user-1").unwrap(),
            format!("Habit {}", id),
            "desc",
            Frequency::Daily,
        )
        .unwrap();
        HabitStreak {
            habit: Habit::from_draft(HabitId::new(id).unwrap(), draft, Timestamp::now()),
            stats: StreakStats::new(current, best, total),
        }
    }

    fn ids(board: &Leaderboard) -> Vec<&str> {
        board
            .entries()
            .iter()
            .map(|r| r.entry.habit.id().as_str())
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_board() {
        let board = HabitRanker::rank(vec![]);
        assert!(board.is_empty());
        assert!(board.podium().is_empty());
    }

    #[test]
    fn ranks_by_best_descending_with_stable_ties() {
        let board = HabitRanker::rank(vec![
            entry("idx0", 1, 3, 3),
            entry("idx1", 5, 5, 5),
            entry("idx2", 2, 5, 9),
            entry("idx3", 1, 1, 1),
        ]);
        assert_eq!(ids(&board), vec!["idx1", "idx2", "idx0", "idx3"]);
    }

    #[test]
    fn ranks_are_one_based_and_distinct() {
        let board = HabitRanker::rank(vec![entry("a", 1, 2, 2), entry("b", 1, 2, 2)]);
        let ranks: Vec<usize> = board.entries().iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn podium_is_top_three_with_badges() {
        let board = HabitRanker::rank(vec![
            entry("a", 1, 4, 4),
            entry("b", 1, 3, 3),
            entry("c", 1, 2, 2),
            entry("d", 1, 1, 1),
        ]);

        let badges: Vec<Option<RankBadge>> = board.podium().iter().map(|r| r.badge()).collect();
        assert_eq!(
            badges,
            vec![
                Some(RankBadge::Gold),
                Some(RankBadge::Silver),
                Some(RankBadge::Bronze)
            ]
        );
        assert_eq!(board.entries()[3].badge(), None);
    }

    #[test]
    fn podium_shrinks_for_short_boards() {
        let board = HabitRanker::rank(vec![entry("a", 1, 1, 1)]);
        assert_eq!(board.podium().len(), 1);
    }

    #[test]
    fn can_rank_by_total() {
        let board = HabitRanker::rank_by(
            vec![entry("a", 1, 5, 5), entry("b", 1, 2, 9)],
            RankBy::Total,
        );
        assert_eq!(ids(&board), vec!["b", "a"]);
    }

    #[test]
    fn badge_rank_round_trips() {
        for rank in 1..=3 {
            assert_eq!(RankBadge::for_rank(rank).unwrap().rank(), rank);
        }
        assert_eq!(RankBadge::for_rank(0), None);
    }
}
