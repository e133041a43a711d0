//! Rank normalization and curve bias.
//!
//! The reward curve is built from three primitives:
//!
//! - `normalize_rank`: map a rank onto `[0, 1]` with the best rank at `1`
//! - `apply_curve`: bend the normalized value with a power law
//! - `lerp`: interpolate the bent value into the output range
//!
//! Numerical notes:
//! - Normalization is not clamped. Ranks outside the domain give values outside
//!   `[0, 1]` and the reward extrapolates.
//! - A normalized value below `0` raised to a fractional exponent is `NaN`
//!   (`f64::powf` never panics). That only happens for ranks past `rank_max`
//!   combined with a non-zero curve.

/// Scale applied to `|curve|` before it becomes an exponent.
pub const CURVE_SCALE: f64 = 2.0;

/// Map `rank` to `[0, 1]`: `rank_min -> 1`, `rank_max -> 0`.
///
/// Callers guarantee `rank_min < rank_max`. The subtraction happens in `f64` so
/// domains spanning most of `i64` (and far out-of-domain ranks) cannot overflow.
pub fn normalize_rank(rank: i64, rank_min: i64, rank_max: i64) -> f64 {
    let span = rank_max as f64 - rank_min as f64;
    1.0 - (rank as f64 - rank_min as f64) / span
}

/// Exponent used for a given curve value.
///
/// - `curve > 0`: `1 / (1 + 2·curve)` (< 1, lifts mid values)
/// - `curve < 0`: `1 + 2·|curve|` (> 1, sinks mid values)
/// - `curve == 0`: `1`
pub fn curve_exponent(curve: f64) -> f64 {
    let factor = curve.abs() * CURVE_SCALE;
    if curve > 0.0 {
        1.0 / (1.0 + factor)
    } else if curve < 0.0 {
        1.0 + factor
    } else {
        1.0
    }
}

/// Apply the curve bias to a normalized rank.
pub fn apply_curve(normalized: f64, curve: f64) -> f64 {
    if curve == 0.0 {
        return normalized;
    }
    normalized.powf(curve_exponent(curve))
}

/// Linear interpolation from `min` (at `t = 0`) to `max` (at `t = 1`).
pub fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + (max - min) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_endpoints() {
        assert_eq!(normalize_rank(1, 1, 4000), 1.0);
        assert_eq!(normalize_rank(4000, 1, 4000), 0.0);
        assert_eq!(normalize_rank(2001, 1, 4001), 0.5);
    }

    #[test]
    fn normalize_handles_extreme_ranks() {
        let mid = normalize_rank(0, i64::MIN, i64::MAX);
        assert!((mid - 0.5).abs() < 1e-12);
        assert_eq!(normalize_rank(i64::MIN, i64::MIN, i64::MAX), 1.0);

        let far = normalize_rank(i64::MIN, 1, 4000);
        assert!(far.is_finite() && far > 1.0);
        let far = normalize_rank(i64::MAX, 1, 4000);
        assert!(far.is_finite() && far < 0.0);
    }

    #[test]
    fn normalize_extrapolates_outside_domain() {
        assert!(normalize_rank(0, 1, 4000) > 1.0);
        assert!(normalize_rank(4001, 1, 4000) < 0.0);
    }

    #[test]
    fn curve_exponent_by_sign() {
        assert_eq!(curve_exponent(0.0), 1.0);
        assert!((curve_exponent(0.5) - 0.5).abs() < 1e-12);
        assert!((curve_exponent(-0.5) - 2.0).abs() < 1e-12);
        assert!((curve_exponent(1.0) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn positive_curve_lifts_and_negative_sinks() {
        let mid = 0.5;
        assert!(apply_curve(mid, 0.5) > mid);
        assert!(apply_curve(mid, -0.5) < mid);
        assert_eq!(apply_curve(mid, 0.0), mid);
    }

    #[test]
    fn out_of_domain_with_curve_does_not_panic() {
        let v = apply_curve(-0.1, 0.3);
        assert!(v.is_nan());
        let v = apply_curve(1.2, -1.3);
        assert!(v.is_finite());
    }
}
