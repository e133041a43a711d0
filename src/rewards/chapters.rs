//! Story-mode chapter layout.
//!
//! The 4000-Mek collection is split across ten chapters. Chapter 1 holds the most
//! common Meks and chapter 10 the rarest, so rewards climb chapter by chapter.
//! Each chapter also owns a band of challenger and mini-boss ranks plus a single
//! final-boss rank (rank 1 is the chapter 10 boss).

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::domain::{RankReward, RewardProfile};
use crate::engine::RewardCurveEngine;
use crate::rewards::deploy::{DeployedReward, deploy_as};

/// Number of story chapters.
pub const CHAPTER_COUNT: usize = 10;

/// Which kind of node a rank is deployed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Normal,
    Challenger,
    MiniBoss,
    FinalBoss,
}

impl NodeKind {
    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::Normal => "normal",
            NodeKind::Challenger => "challenger",
            NodeKind::MiniBoss => "mini-boss",
            NodeKind::FinalBoss => "final boss",
        }
    }
}

/// Rank bands owned by one chapter (all bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    pub number: u8,
    pub normal: (i64, i64),
    pub challenger: (i64, i64),
    pub mini_boss: (i64, i64),
    pub final_boss: i64,
}

impl Chapter {
    pub fn normal_ranks(&self) -> RangeInclusive<i64> {
        self.normal.0..=self.normal.1
    }

    pub fn challenger_ranks(&self) -> RangeInclusive<i64> {
        self.challenger.0..=self.challenger.1
    }

    pub fn mini_boss_ranks(&self) -> RangeInclusive<i64> {
        self.mini_boss.0..=self.mini_boss.1
    }

    /// Node kind for `rank` if this chapter owns it.
    pub fn classify(&self, rank: i64) -> Option<NodeKind> {
        if self.normal_ranks().contains(&rank) {
            Some(NodeKind::Normal)
        } else if self.challenger_ranks().contains(&rank) {
            Some(NodeKind::Challenger)
        } else if self.mini_boss_ranks().contains(&rank) {
            Some(NodeKind::MiniBoss)
        } else if rank == self.final_boss {
            Some(NodeKind::FinalBoss)
        } else {
            None
        }
    }
}

const fn chapter(
    number: u8,
    normal: (i64, i64),
    challenger: (i64, i64),
    mini_boss: (i64, i64),
    final_boss: i64,
) -> Chapter {
    Chapter {
        number,
        normal,
        challenger,
        mini_boss,
        final_boss,
    }
}

pub const CHAPTERS: [Chapter; CHAPTER_COUNT] = [
    chapter(1, (3651, 4000), (461, 500), (92, 100), 10),
    chapter(2, (3301, 3650), (421, 460), (83, 91), 9),
    chapter(3, (2951, 3300), (381, 420), (74, 82), 8),
    chapter(4, (2601, 2950), (341, 380), (65, 73), 7),
    chapter(5, (2251, 2600), (301, 340), (56, 64), 6),
    chapter(6, (1901, 2250), (261, 300), (47, 55), 5),
    chapter(7, (1551, 1900), (221, 260), (38, 46), 4),
    chapter(8, (1201, 1550), (181, 220), (29, 37), 3),
    chapter(9, (851, 1200), (141, 180), (20, 28), 2),
    chapter(10, (501, 850), (101, 140), (11, 19), 1),
];

/// Locate the chapter and node kind a rank is deployed as.
pub fn locate_rank(rank: i64) -> Option<(&'static Chapter, NodeKind)> {
    CHAPTERS
        .iter()
        .find_map(|ch| ch.classify(rank).map(|kind| (ch, kind)))
}

/// Reward span of a chapter's normal-Mek nodes, plus its final boss payout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChapterPreview {
    pub chapter: u8,
    /// Worst (highest-numbered) normal rank in the chapter.
    pub low: RankReward,
    /// Best (lowest-numbered) normal rank in the chapter.
    pub high: RankReward,
    pub boss: DeployedReward,
}

/// Evaluate each chapter's weakest and strongest normal-Mek node and its boss.
pub fn chapter_preview(profile: &RewardProfile, engine: &RewardCurveEngine) -> Vec<ChapterPreview> {
    CHAPTERS
        .iter()
        .map(|ch| ChapterPreview {
            chapter: ch.number,
            low: profile.evaluate_with(engine, ch.normal.1),
            high: profile.evaluate_with(engine, ch.normal.0),
            boss: deploy_as(ch, NodeKind::FinalBoss, ch.final_boss, profile),
        })
        .collect()
}
