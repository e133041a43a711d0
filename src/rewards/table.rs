//! Full rank tables.
//!
//! Evaluating every rank of the collection is embarrassingly parallel: each rank is
//! an independent pure call, and `RewardProfile` is `Copy`. We use rayon and keep
//! the output in rank order.

use std::ops::RangeInclusive;

use rayon::prelude::*;
use serde::Serialize;

use crate::domain::{RankReward, RewardProfile};
use crate::engine::RewardCurveEngine;

/// Evaluate `profile` for every rank in `ranks` (ascending rank order).
pub fn rank_table(
    profile: &RewardProfile,
    ranks: RangeInclusive<i64>,
    engine: &RewardCurveEngine,
) -> Vec<RankReward> {
    ranks
        .into_par_iter()
        .map(|rank| profile.evaluate_with(engine, rank))
        .collect()
}

/// Column sums over a table (the total payout if every rank is farmed once).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TableTotals {
    pub rows: usize,
    pub gold: f64,
    pub xp: f64,
    pub essence: f64,
}

pub fn totals(rows: &[RankReward]) -> TableTotals {
    rows.iter().fold(
        TableTotals {
            rows: rows.len(),
            ..TableTotals::default()
        },
        |mut acc, r| {
            acc.gold += r.gold;
            acc.xp += r.xp;
            acc.essence += r.essence;
            acc
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_in_rank_order_and_matches_serial_eval() {
        let profile = RewardProfile::default();
        let engine = RewardCurveEngine::default();
        let rows = rank_table(&profile, 1..=4000, &engine);

        assert_eq!(rows.len(), 4000);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.rank, i as i64 + 1);
        }
        assert_eq!(rows[1234], profile.evaluate(1235));
    }

    #[test]
    fn totals_sum_columns() {
        let rows = vec![
            RankReward { rank: 1, gold: 10.0, xp: 1.0, essence: 0.5 },
            RankReward { rank: 2, gold: 5.0, xp: 2.0, essence: 0.5 },
        ];
        let t = totals(&rows);
        assert_eq!(t.rows, 2);
        assert_eq!(t.gold, 15.0);
        assert_eq!(t.xp, 3.0);
        assert_eq!(t.essence, 1.0);
    }
}
