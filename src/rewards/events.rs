//! Linear gold/XP rollout across the sequential event nodes.
//!
//! Event nodes are numbered 1..=200 (20 per chapter) and pay more the later
//! they appear. This is the rank curve with `curve = 0`, the slot's reverse
//! index standing in for rank, so slot 1 pays the minimum and the last slot
//! pays the maximum. Values are whole numbers.

use serde::{Deserialize, Serialize};

use crate::domain::{EventSlot, Rounding, RewardCurveConfig};
use crate::engine::evaluate_whole;
use crate::error::ConfigError;

/// Total event nodes across all chapters.
pub const EVENT_SLOTS: usize = 200;
/// Event nodes per chapter.
pub const EVENTS_PER_CHAPTER: usize = 20;

/// Output bounds for one resource of the rollout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRange {
    pub min: f64,
    pub max: f64,
    pub rounding: Rounding,
}

impl EventRange {
    pub fn gold_default() -> Self {
        Self {
            min: 100.0,
            max: 10_000.0,
            rounding: Rounding::None,
        }
    }

    pub fn xp_default() -> Self {
        Self {
            min: 10.0,
            max: 1_000.0,
            rounding: Rounding::None,
        }
    }

    /// Curve whose rank domain is the slot numbers.
    pub fn to_curve(self, slots: usize) -> Result<RewardCurveConfig, ConfigError> {
        if slots < 2 {
            return Err(ConfigError::TooFewSlots { slots });
        }
        RewardCurveConfig::new(1, slots as i64, self.min, self.max, 0.0, self.rounding)
    }
}

/// Assign gold and XP to `slots` sequential events.
pub fn rollout(gold: EventRange, xp: EventRange, slots: usize) -> Result<Vec<EventSlot>, ConfigError> {
    let gold_curve = gold.to_curve(slots)?;
    let xp_curve = xp.to_curve(slots)?;

    let out = (1..=slots)
        .map(|number| {
            let rank = (slots + 1 - number) as i64;
            EventSlot {
                number,
                gold: evaluate_whole(rank, &gold_curve),
                xp: evaluate_whole(rank, &xp_curve),
            }
        })
        .collect();
    Ok(out)
}

/// Chapter (1-based) an event number belongs to.
pub fn chapter_of_event(number: usize) -> usize {
    number.saturating_sub(1) / EVENTS_PER_CHAPTER + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollout_hits_both_bounds_and_increases() {
        let slots = rollout(EventRange::gold_default(), EventRange::xp_default(), EVENT_SLOTS).unwrap();
        assert_eq!(slots.len(), EVENT_SLOTS);
        assert_eq!(slots[0].number, 1);
        assert_eq!(slots[0].gold, 100);
        assert_eq!(slots[0].xp, 10);
        assert_eq!(slots[EVENT_SLOTS - 1].gold, 10_000);
        assert_eq!(slots[EVENT_SLOTS - 1].xp, 1_000);

        for pair in slots.windows(2) {
            assert!(pair[1].gold >= pair[0].gold);
            assert!(pair[1].xp >= pair[0].xp);
        }
    }

    #[test]
    fn rollout_matches_linear_step() {
        // min + index * (max - min) / (slots - 1)
        let slots = rollout(EventRange::gold_default(), EventRange::xp_default(), EVENT_SLOTS).unwrap();
        let step: f64 = 9_900.0 / 199.0;
        assert_eq!(slots[1].gold, (100.0 + step).round() as i64);
        assert_eq!(slots[99].gold, (100.0 + 99.0 * step).round() as i64);
    }

    #[test]
    fn rounding_applies_before_whole() {
        let gold = EventRange {
            rounding: Rounding::Five,
            ..EventRange::gold_default()
        };
        let slots = rollout(gold, EventRange::xp_default(), EVENT_SLOTS).unwrap();
        assert!(slots.iter().all(|s| s.gold % 5 == 0));
    }

    #[test]
    fn single_slot_is_rejected() {
        let err = rollout(EventRange::gold_default(), EventRange::xp_default(), 1).unwrap_err();
        assert_eq!(err, ConfigError::TooFewSlots { slots: 1 });
    }

    #[test]
    fn chapter_boundaries() {
        assert_eq!(chapter_of_event(1), 1);
        assert_eq!(chapter_of_event(20), 1);
        assert_eq!(chapter_of_event(21), 2);
        assert_eq!(chapter_of_event(200), 10);
    }
}
