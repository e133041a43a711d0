//! Three-resource evaluation.
//!
//! Gold, XP and essence each have an independent curve; a node's payout is the
//! three curves evaluated at the same rank. There is no coupling between them.

use crate::domain::{RankReward, ResourceKind, RewardProfile};
use crate::engine::RewardCurveEngine;

impl RewardProfile {
    /// Evaluate all three resources for `rank` (out-of-domain ranks extrapolate).
    pub fn evaluate(&self, rank: i64) -> RankReward {
        self.evaluate_with(&RewardCurveEngine::default(), rank)
    }

    pub fn evaluate_with(&self, engine: &RewardCurveEngine, rank: i64) -> RankReward {
        RankReward {
            rank,
            gold: engine.evaluate(rank, &self.gold),
            xp: engine.evaluate(rank, &self.xp),
            essence: engine.evaluate(rank, &self.essence),
        }
    }
}

impl RankReward {
    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Gold => self.gold,
            ResourceKind::Xp => self.xp,
            ResourceKind::Essence => self.essence,
        }
    }
}
