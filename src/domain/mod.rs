//! Domain types used throughout the tool.
//!
//! This module defines:
//!
//! - the curve configuration value object (`RewardCurveConfig`, `Rounding`)
//! - per-resource profiles (`ResourceKind`, `RewardProfile`)
//! - evaluation outputs (`RankReward`, `EventSlot`) and persisted records

pub mod types;

pub use types::*;
