//! Formatted terminal output: profile summaries, rank lookups and tables.
//!
//! We keep formatting code in one place so:
//! - the evaluator stays free of presentation concerns
//! - output changes are localized (the golden tests below pin the layout)

use crate::domain::{EventSlot, RankReward, ResourceKind, RewardCurveConfig, RewardProfile};
use crate::rewards::{ChapterPreview, DeployedReward, EVENTS_PER_CHAPTER, TableTotals, chapter_of_event};

/// Format a reward value: whole numbers without decimals, otherwise up to 4 places.
pub fn fmt_value(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// One-line description of a curve config.
pub fn format_curve(config: &RewardCurveConfig) -> String {
    format!(
        "ranks {}..{} -> {}..{} | curve {:+.2} | rounding {}",
        config.rank_min,
        config.rank_max,
        fmt_value(config.output_min),
        fmt_value(config.output_max),
        config.curve,
        config.rounding.label(),
    )
}

/// Profile header with one line per resource.
pub fn format_profile_summary(name: Option<&str>, profile: &RewardProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== rewards - profile: {} ===\n", name.unwrap_or("(default)")));
    for kind in ResourceKind::ALL {
        out.push_str(&format!("{:<8} {}\n", kind.display_name(), format_curve(profile.get(kind))));
    }
    out
}

/// Rewards for a single rank: the curve value and, for ranks in the chapter
/// layout, what the deployed node pays.
pub fn format_rank_reward(reward: &RankReward, deployed: Option<&DeployedReward>) -> String {
    let mut out = String::new();
    let Some(deployed) = deployed else {
        out.push_str(&format!("Rank {} - not deployed\n", reward.rank));
        for kind in ResourceKind::ALL {
            out.push_str(&format!("  {:<8} {}\n", kind.display_name(), fmt_value(reward.get(kind))));
        }
        return out;
    };

    out.push_str(&format!(
        "Rank {} - chapter {} ({})\n",
        reward.rank,
        deployed.chapter,
        deployed.kind.display_name()
    ));
    out.push_str(&format!("  {:<8} {:>8} {:>9}\n", "", "curve", "deployed"));
    for kind in ResourceKind::ALL {
        out.push_str(&format!(
            "  {:<8} {:>8} {:>9}\n",
            kind.display_name(),
            fmt_value(reward.get(kind)),
            deployed.get(kind)
        ));
    }
    out
}

/// Chapter preview table (weakest and strongest normal node per chapter, plus
/// the final boss gold payout).
pub fn format_chapter_table(rows: &[ChapterPreview]) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        format!(
            "{:<7} {:<11} {:>9} {:>9} {:>7} {:>7} {:>8} {:>8} {:>9}",
            "chapter", "ranks", "gold_min", "gold_max", "xp_min", "xp_max", "ess_min", "ess_max", "boss_gold"
        ),
    );
    push_row(
        &mut out,
        format!(
            "{:-<7} {:-<11} {:->9} {:->9} {:->7} {:->7} {:->8} {:->8} {:->9}",
            "", "", "", "", "", "", "", "", ""
        ),
    );
    for row in rows {
        push_row(
            &mut out,
            format!(
                "{:<7} {:<11} {:>9} {:>9} {:>7} {:>7} {:>8} {:>8} {:>9}",
                row.chapter,
                format!("{}-{}", row.high.rank, row.low.rank),
                fmt_value(row.low.gold),
                fmt_value(row.high.gold),
                fmt_value(row.low.xp),
                fmt_value(row.high.xp),
                fmt_value(row.low.essence),
                fmt_value(row.high.essence),
                row.boss.gold,
            ),
        );
    }
    out
}

/// Event rollout summarized per chapter (first and last event of each).
pub fn format_event_table(slots: &[EventSlot]) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        format!(
            "{:<7} {:<9} {:>10} {:>10} {:>8} {:>8}",
            "chapter", "events", "gold_first", "gold_last", "xp_first", "xp_last"
        ),
    );
    push_row(
        &mut out,
        format!("{:-<7} {:-<9} {:->10} {:->10} {:->8} {:->8}", "", "", "", "", "", ""),
    );
    for chunk in slots.chunks(EVENTS_PER_CHAPTER) {
        let (Some(first), Some(last)) = (chunk.first(), chunk.last()) else {
            continue;
        };
        push_row(
            &mut out,
            format!(
                "{:<7} {:<9} {:>10} {:>10} {:>8} {:>8}",
                chapter_of_event(first.number),
                format!("{}-{}", first.number, last.number),
                first.gold,
                last.gold,
                first.xp,
                last.xp,
            ),
        );
    }
    out
}

/// Totals line for a rank table.
pub fn format_totals(totals: &TableTotals) -> String {
    format!(
        "Totals over {} ranks: gold={} xp={} essence={}\n",
        totals.rows,
        fmt_value(totals.gold),
        fmt_value(totals.xp),
        fmt_value(totals.essence),
    )
}

fn push_row(out: &mut String, row: String) {
    out.push_str(row.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RewardProfile;
    use crate::engine::RewardCurveEngine;
    use crate::rewards::{EventRange, chapter_preview, deployed_reward, rollout};

    #[test]
    fn fmt_value_trims() {
        assert_eq!(fmt_value(5100.0), "5100");
        assert_eq!(fmt_value(2.8), "2.8");
        assert_eq!(fmt_value(5051.23782), "5051.2378");
        assert_eq!(fmt_value(-3.0), "-3");
        assert_eq!(fmt_value(f64::NAN), "NaN");
    }

    #[test]
    fn curve_line() {
        let line = format_curve(&RewardProfile::default().gold);
        assert_eq!(line, "ranks 1..4000 -> 100..10000 | curve +0.00 | rounding 100");
    }

    #[test]
    fn rank_lookup_golden() {
        let profile = RewardProfile::default();
        let deployed = deployed_reward(2250, &profile);
        let txt = format_rank_reward(&profile.evaluate(2250), deployed.as_ref());
        let expected = concat!(
            "Rank 2250 - chapter 6 (normal)\n",
            "              curve  deployed\n",
            "  Gold         4400      4400\n",
            "  XP            440       440\n",
            "  Essence       2.8         3\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn rank_lookup_outside_layout() {
        let txt = format_rank_reward(&RewardProfile::default().evaluate(4001), None);
        assert!(txt.starts_with("Rank 4001 - not deployed\n"));
        assert_eq!(txt.lines().count(), 4);
    }

    #[test]
    fn chapter_table_golden_first_rows() {
        let rows = chapter_preview(&RewardProfile::default(), &RewardCurveEngine::default());
        let txt = format_chapter_table(&rows);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(
            lines[0],
            "chapter ranks        gold_min  gold_max  xp_min  xp_max  ess_min  ess_max boss_gold"
        );
        assert_eq!(
            lines[2],
            "1       3651-4000         100      1000      10     100        1      1.3     99800"
        );
    }

    #[test]
    fn event_table_has_one_row_per_chapter() {
        let slots = rollout(EventRange::gold_default(), EventRange::xp_default(), 200).unwrap();
        let txt = format_event_table(&slots);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[2].starts_with("1       1-20"));
        assert!(lines[11].starts_with("10      181-200"));
        assert!(lines[11].contains("10000"));
    }
}
