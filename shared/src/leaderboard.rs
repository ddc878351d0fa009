use std::collections::{BTreeMap, HashMap};

use strum::EnumIter;

use crate::GithubHandle;

pub use strum::IntoEnumIterator;

/// Counted categories of weekly activity, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ActivityKind {
    Approvals,
    Changes,
    Merges,
    Opens,
}

impl ActivityKind {
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Approvals => "Positive reviews",
            Self::Changes => "Requests for changes",
            Self::Merges => "Merges of already reviewed PRs",
            Self::Opens => "New PRs",
        }
    }
}

/// One rank row. Ties share the row; logins are sorted for stable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    pub rank: usize,
    pub count: u32,
    pub logins: Vec<GithubHandle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    rows: Vec<RankedRow>,
}

impl Leaderboard {
    /// Groups logins by count and assigns dense 1-based ranks in descending
    /// count order: counts [5, 5, 3] become rank 1 for both fives and rank 2
    /// for the three.
    pub fn from_counts(counts: &HashMap<GithubHandle, u32>) -> Self {
        let mut grouped: BTreeMap<u32, Vec<GithubHandle>> = BTreeMap::new();
        for (login, count) in counts {
            grouped.entry(*count).or_default().push(login.clone());
        }

        let rows = grouped
            .into_iter()
            .rev()
            .enumerate()
            .map(|(index, (count, mut logins))| {
                logins.sort();
                RankedRow {
                    rank: index + 1,
                    count,
                    logins,
                }
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[RankedRow] {
        &self.rows
    }

    pub fn top(&self) -> Option<&RankedRow> {
        self.rows.first()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of every login's count, for aggregate totals.
    pub fn total(&self) -> u64 {
        self.rows
            .iter()
            .map(|row| u64::from(row.count) * row.logins.len() as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Leaderboard;

    fn counts(entries: &[(&str, u32)]) -> HashMap<String, u32> {
        entries
            .iter()
            .map(|(login, count)| ((*login).to_string(), *count))
            .collect()
    }

    #[test]
    fn ties_share_a_rank_and_ranks_stay_dense() {
        let board = Leaderboard::from_counts(&counts(&[("a", 5), ("b", 5), ("c", 3)]));

        let rows = board.rows();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].count, 5);
        assert_eq!(rows[0].logins, vec!["a".to_string(), "b".to_string()]);

        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].count, 3);
        assert_eq!(rows[1].logins, vec!["c".to_string()]);
    }

    #[test]
    fn empty_counts_produce_an_empty_board() {
        let board = Leaderboard::from_counts(&HashMap::new());

        assert!(board.is_empty());
        assert!(board.top().is_none());
        assert_eq!(board.total(), 0);
    }

    #[test]
    fn top_and_total() {
        let board = Leaderboard::from_counts(&counts(&[("a", 2), ("b", 7), ("c", 7)]));

        let top = board.top().unwrap();
        assert_eq!(top.count, 7);
        assert_eq!(top.logins.len(), 2);
        assert_eq!(board.total(), 16);
    }
}
