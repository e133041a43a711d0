//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed by value into the evaluator (configs are `Copy`)
//! - saved to / loaded from the profile store as JSON
//! - exported to CSV for spreadsheets

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Best rank in the Mek collection.
pub const DEFAULT_RANK_MIN: i64 = 1;
/// Worst rank in the Mek collection.
pub const DEFAULT_RANK_MAX: i64 = 4000;

/// Post-processing snap applied to an evaluated reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Rounding {
    /// Return the exact real value.
    #[serde(rename = "none")]
    #[value(name = "none")]
    None,
    #[serde(rename = "0.1")]
    #[value(name = "0.1")]
    Tenth,
    #[serde(rename = "0.5")]
    #[value(name = "0.5")]
    Half,
    #[serde(rename = "1")]
    #[value(name = "1")]
    One,
    #[serde(rename = "5")]
    #[value(name = "5")]
    Five,
    #[serde(rename = "10")]
    #[value(name = "10")]
    Ten,
    #[serde(rename = "100")]
    #[value(name = "100")]
    Hundred,
    #[serde(rename = "1000")]
    #[value(name = "1000")]
    Thousand,
}

impl Rounding {
    pub const ALL: [Rounding; 8] = [
        Rounding::None,
        Rounding::Tenth,
        Rounding::Half,
        Rounding::One,
        Rounding::Five,
        Rounding::Ten,
        Rounding::Hundred,
        Rounding::Thousand,
    ];

    /// Granularity to snap to, or `None` for no rounding.
    pub fn step(self) -> Option<f64> {
        match self {
            Rounding::None => None,
            Rounding::Tenth => Some(0.1),
            Rounding::Half => Some(0.5),
            Rounding::One => Some(1.0),
            Rounding::Five => Some(5.0),
            Rounding::Ten => Some(10.0),
            Rounding::Hundred => Some(100.0),
            Rounding::Thousand => Some(1000.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rounding::None => "none",
            Rounding::Tenth => "0.1",
            Rounding::Half => "0.5",
            Rounding::One => "1",
            Rounding::Five => "5",
            Rounding::Ten => "10",
            Rounding::Hundred => "100",
            Rounding::Thousand => "1000",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Parameters of one rank-to-reward curve.
///
/// Rank `rank_min` is the best rank and earns `output_max`; rank `rank_max`
/// is the worst and earns `output_min`. `curve` in `[-1, 1]` bends the
/// interpolation (0 = linear, > 0 lifts mid ranks, < 0 sinks them).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardCurveConfig {
    pub rank_min: i64,
    pub rank_max: i64,
    pub output_min: f64,
    pub output_max: f64,
    pub curve: f64,
    pub rounding: Rounding,
}

impl RewardCurveConfig {
    /// Build a validated config.
    pub fn new(
        rank_min: i64,
        rank_max: i64,
        output_min: f64,
        output_max: f64,
        curve: f64,
        rounding: Rounding,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            rank_min,
            rank_max,
            output_min,
            output_max,
            curve,
            rounding,
        };
        config.validate()?;
        Ok(config)
    }

    /// Linear, unrounded config over the full collection (ranks 1..=4000).
    pub fn collection(output_min: f64, output_max: f64) -> Result<Self, ConfigError> {
        Self::new(DEFAULT_RANK_MIN, DEFAULT_RANK_MAX, output_min, output_max, 0.0, Rounding::None)
    }

    pub fn with_curve(mut self, curve: f64) -> Result<Self, ConfigError> {
        self.curve = curve;
        self.validate()?;
        Ok(self)
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Same curve with both output bounds multiplied by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.output_min *= factor;
        self.output_max *= factor;
        self
    }

    /// Check the invariants the evaluator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rank_min >= self.rank_max {
            return Err(ConfigError::DegenerateDomain {
                min: self.rank_min,
                max: self.rank_max,
            });
        }
        for (field, value) in [
            ("output_min", self.output_min),
            ("output_max", self.output_max),
            ("curve", self.curve),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        Ok(())
    }

    /// `curve` outside `[-1, 1]` still evaluates, but is outside the tuned range.
    pub fn curve_in_range(&self) -> bool {
        (-1.0..=1.0).contains(&self.curve)
    }

    pub fn rank_range(&self) -> RangeInclusive<i64> {
        self.rank_min..=self.rank_max
    }

    pub fn clamp_rank(&self, rank: i64) -> i64 {
        rank.clamp(self.rank_min, self.rank_max)
    }
}

/// The reward currencies a node pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Gold,
    Xp,
    Essence,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Gold, ResourceKind::Xp, ResourceKind::Essence];

    pub fn display_name(self) -> &'static str {
        match self {
            ResourceKind::Gold => "Gold",
            ResourceKind::Xp => "XP",
            ResourceKind::Essence => "Essence",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ResourceKind::Gold => ResourceKind::Xp,
            ResourceKind::Xp => ResourceKind::Essence,
            ResourceKind::Essence => ResourceKind::Gold,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ResourceKind::Gold => ResourceKind::Essence,
            ResourceKind::Xp => ResourceKind::Gold,
            ResourceKind::Essence => ResourceKind::Xp,
        }
    }
}

/// One curve per resource, all driven by the same rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardProfile {
    pub gold: RewardCurveConfig,
    pub xp: RewardCurveConfig,
    pub essence: RewardCurveConfig,
}

impl Default for RewardProfile {
    fn default() -> Self {
        let curve = |output_min: f64, output_max: f64, rounding: Rounding| RewardCurveConfig {
            rank_min: DEFAULT_RANK_MIN,
            rank_max: DEFAULT_RANK_MAX,
            output_min,
            output_max,
            curve: 0.0,
            rounding,
        };
        Self {
            gold: curve(100.0, 10_000.0, Rounding::Hundred),
            xp: curve(10.0, 1_000.0, Rounding::Ten),
            essence: curve(1.0, 5.0, Rounding::Tenth),
        }
    }
}

impl RewardProfile {
    pub fn get(&self, kind: ResourceKind) -> &RewardCurveConfig {
        match kind {
            ResourceKind::Gold => &self.gold,
            ResourceKind::Xp => &self.xp,
            ResourceKind::Essence => &self.essence,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut RewardCurveConfig {
        match kind {
            ResourceKind::Gold => &mut self.gold,
            ResourceKind::Xp => &mut self.xp,
            ResourceKind::Essence => &mut self.essence,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ResourceKind::ALL {
            self.get(kind).validate()?;
        }
        Ok(())
    }
}

/// Rewards paid for one rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankReward {
    pub rank: i64,
    pub gold: f64,
    pub xp: f64,
    pub essence: f64,
}

/// One slot of a sequential event rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSlot {
    /// 1-based event number.
    pub number: usize,
    pub gold: i64,
    pub xp: i64,
}

/// A profile as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub profile: RewardProfile,
}
