//! Rank-to-reward evaluation.
//!
//! Every reward screen in the game shares this one formula; call sites differ
//! only in the `RewardCurveConfig` they pass in.
//!
//! ```text
//! n      = 1 - (rank - rank_min) / (rank_max - rank_min)
//! curved = n                       curve == 0
//!          n ^ (1 / (1 + 2·c))     curve  > 0
//!          n ^ (1 + 2·|c|)         curve  < 0
//! reward = round(output_min + (output_max - output_min) · curved)
//! ```
//!
//! Configs are validated when constructed, so evaluation has no error path.

use crate::domain::RewardCurveConfig;
use crate::math::{apply_curve, apply_rounding, lerp, normalize_rank, round_half_up};

/// Evaluate without applying the rounding policy.
pub fn evaluate_raw(rank: i64, config: &RewardCurveConfig) -> f64 {
    let normalized = normalize_rank(rank, config.rank_min, config.rank_max);
    let curved = apply_curve(normalized, config.curve);
    lerp(config.output_min, config.output_max, curved)
}

/// Evaluate and apply `config.rounding` (`Rounding::None` returns the exact value).
pub fn evaluate(rank: i64, config: &RewardCurveConfig) -> f64 {
    apply_rounding(evaluate_raw(rank, config), config.rounding)
}

/// Evaluate, apply `config.rounding`, then snap to a whole number.
///
/// Used where rewards are stored as integers (gold/XP on deployed nodes and
/// event slots). `NaN` (only reachable by extrapolating past `rank_max` with a
/// non-zero curve) saturates to `0`.
pub fn evaluate_whole(rank: i64, config: &RewardCurveConfig) -> i64 {
    round_half_up(evaluate(rank, config)) as i64
}

/// How ranks outside `[rank_min, rank_max]` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankPolicy {
    /// Evaluate the formula as-is; out-of-domain ranks extrapolate.
    #[default]
    Extrapolate,
    /// Clamp the rank into the domain first.
    Clamp,
}

/// Evaluator with an explicit out-of-domain rank policy.
///
/// The free functions in this module are the `Extrapolate` behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardCurveEngine {
    pub rank_policy: RankPolicy,
}

impl RewardCurveEngine {
    pub fn new(rank_policy: RankPolicy) -> Self {
        Self { rank_policy }
    }

    pub fn clamped() -> Self {
        Self::new(RankPolicy::Clamp)
    }

    fn resolve_rank(&self, rank: i64, config: &RewardCurveConfig) -> i64 {
        match self.rank_policy {
            RankPolicy::Extrapolate => rank,
            RankPolicy::Clamp => config.clamp_rank(rank),
        }
    }

    pub fn evaluate(&self, rank: i64, config: &RewardCurveConfig) -> f64 {
        evaluate(self.resolve_rank(rank, config), config)
    }

    pub fn evaluate_raw(&self, rank: i64, config: &RewardCurveConfig) -> f64 {
        evaluate_raw(self.resolve_rank(rank, config), config)
    }

    pub fn evaluate_whole(&self, rank: i64, config: &RewardCurveConfig) -> i64 {
        evaluate_whole(self.resolve_rank(rank, config), config)
    }
}
