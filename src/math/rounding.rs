//! Snap-to-granularity rounding.
//!
//! Ties round toward `+∞` (`2.5 -> 3`, `-2.5 -> -2`), which is what the game's
//! existing reward tables were generated with. `f64::round` rounds ties away
//! from zero and would disagree on negative halves.
//!
//! Sub-unit steps are computed as `round(v·k) / k` with `k = 1/step` rather than
//! `round(v / step) · step`: dividing by `0.1` and multiplying back leaves
//! representation noise (`0.30000000000000004`) that the `k` form avoids.

use crate::domain::Rounding;

/// Round to the nearest integer, ties toward `+∞`.
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Snap `value` to the nearest multiple of `step` (`step > 0`).
pub fn snap(value: f64, step: f64) -> f64 {
    if step < 1.0 {
        let k = (1.0 / step).round();
        round_half_up(value * k) / k
    } else {
        round_half_up(value / step) * step
    }
}

/// Apply a rounding policy.
pub fn apply_rounding(value: f64, rounding: Rounding) -> f64 {
    match rounding.step() {
        Some(step) => snap(value, step),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_up_ties() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-0.2), 0.0);
    }

    #[test]
    fn snap_to_each_policy() {
        let v = 5051.2378;
        assert_eq!(apply_rounding(v, Rounding::None), v);
        assert_eq!(apply_rounding(v, Rounding::Tenth), 5051.2);
        assert_eq!(apply_rounding(v, Rounding::Half), 5051.0);
        assert_eq!(apply_rounding(v, Rounding::One), 5051.0);
        assert_eq!(apply_rounding(v, Rounding::Five), 5050.0);
        assert_eq!(apply_rounding(v, Rounding::Ten), 5050.0);
        assert_eq!(apply_rounding(v, Rounding::Hundred), 5100.0);
        assert_eq!(apply_rounding(v, Rounding::Thousand), 5000.0);
    }

    #[test]
    fn tenth_has_no_representation_noise() {
        assert_eq!(apply_rounding(0.29999, Rounding::Tenth), 0.3);
        assert_eq!(apply_rounding(2.75, Rounding::Half), 3.0);
    }
}
