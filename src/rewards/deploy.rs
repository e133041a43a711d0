//! Rewards paid by deployed story nodes.
//!
//! A node pays the profile curve with its output range (both ends) multiplied by
//! the node kind's factor, evaluated to a whole number:
//!
//! | kind       | gold / XP | essence |
//! | ---------- | --------- | ------- |
//! | normal     | x1        | x1      |
//! | challenger | x2        | x1.5    |
//! | mini-boss  | x5        | x3      |
//! | final boss | x10       | x5      |

use serde::Serialize;

use crate::domain::{ResourceKind, RewardProfile};
use crate::engine::RewardCurveEngine;
use crate::rewards::{Chapter, NodeKind, locate_rank};

impl NodeKind {
    /// Output-range multiplier applied to `resource` for this node kind.
    pub fn multiplier(self, resource: ResourceKind) -> f64 {
        let (gold_xp, essence) = match self {
            NodeKind::Normal => (1.0, 1.0),
            NodeKind::Challenger => (2.0, 1.5),
            NodeKind::MiniBoss => (5.0, 3.0),
            NodeKind::FinalBoss => (10.0, 5.0),
        };
        match resource {
            ResourceKind::Gold | ResourceKind::Xp => gold_xp,
            ResourceKind::Essence => essence,
        }
    }
}

/// Whole-number payout of one deployed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeployedReward {
    pub rank: i64,
    pub chapter: u8,
    pub kind: NodeKind,
    pub gold: i64,
    pub xp: i64,
    pub essence: i64,
}

impl DeployedReward {
    pub fn get(&self, resource: ResourceKind) -> i64 {
        match resource {
            ResourceKind::Gold => self.gold,
            ResourceKind::Xp => self.xp,
            ResourceKind::Essence => self.essence,
        }
    }
}

/// Payout of the node `rank` is deployed as, or `None` if no chapter owns it.
pub fn deployed_reward(rank: i64, profile: &RewardProfile) -> Option<DeployedReward> {
    let (chapter, kind) = locate_rank(rank)?;
    Some(deploy_as(chapter, kind, rank, profile))
}

/// Payout of `rank` deployed as `kind` in `chapter`.
pub(crate) fn deploy_as(chapter: &Chapter, kind: NodeKind, rank: i64, profile: &RewardProfile) -> DeployedReward {
    let engine = RewardCurveEngine::default();
    let pay = |resource: ResourceKind| {
        let config = profile.get(resource).scaled(kind.multiplier(resource));
        engine.evaluate_whole(rank, &config)
    };
    DeployedReward {
        rank,
        chapter: chapter.number,
        kind,
        gold: pay(ResourceKind::Gold),
        xp: pay(ResourceKind::Xp),
        essence: pay(ResourceKind::Essence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payout(rank: i64) -> (NodeKind, i64, i64, i64) {
        let r = deployed_reward(rank, &RewardProfile::default()).unwrap();
        (r.kind, r.gold, r.xp, r.essence)
    }

    #[test]
    fn one_rank_of_each_kind() {
        assert_eq!(payout(4000), (NodeKind::Normal, 100, 10, 1));
        assert_eq!(payout(500), (NodeKind::Challenger, 17_500, 1_750, 7));
        assert_eq!(payout(95), (NodeKind::MiniBoss, 48_800, 4_880, 15));
        assert_eq!(payout(1), (NodeKind::FinalBoss, 100_000, 10_000, 25));
    }

    #[test]
    fn normal_nodes_match_the_base_curve() {
        let profile = RewardProfile::default();
        let deployed = deployed_reward(2250, &profile).unwrap();
        let base = profile.evaluate(2250);
        assert_eq!(deployed.chapter, 6);
        assert_eq!(deployed.gold as f64, base.gold);
        assert_eq!(deployed.xp as f64, base.xp);
        // Essence is paid whole: 2.8 -> 3.
        assert_eq!(deployed.essence, 3);
    }

    #[test]
    fn undeployed_ranks_have_no_payout() {
        let profile = RewardProfile::default();
        assert!(deployed_reward(0, &profile).is_none());
        assert!(deployed_reward(4001, &profile).is_none());
    }

    #[test]
    fn multipliers_by_resource() {
        assert_eq!(NodeKind::Challenger.multiplier(ResourceKind::Xp), 2.0);
        assert_eq!(NodeKind::Challenger.multiplier(ResourceKind::Essence), 1.5);
        assert_eq!(NodeKind::FinalBoss.multiplier(ResourceKind::Gold), 10.0);
    }
}
