//! Debug bundle writer for inspecting a profile's curves.
//!
//! A bundle is one markdown file with the curve settings, a raw-vs-rounded
//! sample per resource, and the chapter preview. It is what gets attached when
//! someone asks "why does rank N pay X?".

use std::fmt::Write as _;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::domain::{ResourceKind, RewardProfile};
use crate::engine::{RewardCurveEngine, evaluate, evaluate_raw};
use crate::error::AppError;
use crate::report::{fmt_value, format_curve};
use crate::rewards::chapter_preview;

/// Ranks sampled per resource (clamped into each curve's domain).
const SAMPLE_RANKS: [i64; 9] = [1, 500, 1000, 1500, 2000, 2500, 3000, 3500, 4000];

/// Write a bundle under `dir` and return its path.
pub fn write_debug_bundle(dir: &Path, name: Option<&str>, profile: &RewardProfile) -> Result<PathBuf, AppError> {
    write_debug_bundle_at(dir, name, profile, Local::now())
}

/// The file name and the `generated` line both come from `now`.
fn write_debug_bundle_at(
    dir: &Path,
    name: Option<&str>,
    profile: &RewardProfile,
    now: DateTime<Local>,
) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = now.format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("rewards_debug_{}_{ts}.md", name.unwrap_or("default")));

    let body = render_debug_markdown(name, profile, &now.to_rfc3339());
    fs::write(&path, body).map_err(|e| AppError::new(4, format!("Failed to write debug file: {e}")))?;

    info!(path = %path.display(), "wrote debug bundle");
    Ok(path)
}

/// Markdown body of a bundle (no I/O).
pub fn render_debug_markdown(name: Option<&str>, profile: &RewardProfile, generated: &str) -> String {
    // Writing into a String cannot fail.
    let mut out = String::new();
    let _ = writeln!(out, "# rewards debug bundle");
    let _ = writeln!(out, "- generated: {generated}");
    let _ = writeln!(out, "- profile: {}", name.unwrap_or("(default)"));

    let _ = writeln!(out, "\n## Curves");
    for kind in ResourceKind::ALL {
        let _ = writeln!(out, "- {}: {}", kind.display_name(), format_curve(profile.get(kind)));
    }

    for kind in ResourceKind::ALL {
        let config = profile.get(kind);
        let _ = writeln!(out, "\n## {} samples", kind.display_name());
        let _ = writeln!(out, "| rank | raw | rounded |");
        let _ = writeln!(out, "| - | - | - |");
        let mut last = None;
        for rank in SAMPLE_RANKS.map(|r| config.clamp_rank(r)) {
            if last == Some(rank) {
                continue;
            }
            last = Some(rank);
            let _ = writeln!(
                out,
                "| {rank} | {} | {} |",
                fmt_value(evaluate_raw(rank, config)),
                fmt_value(evaluate(rank, config)),
            );
        }
    }

    let _ = writeln!(out, "\n## Chapter preview (normal nodes)");
    let _ = writeln!(out, "| chapter | ranks | gold | xp | essence |");
    let _ = writeln!(out, "| - | - | - | - | - |");
    for row in chapter_preview(profile, &RewardCurveEngine::default()) {
        let _ = writeln!(
            out,
            "| {} | {}-{} | {}-{} | {}-{} | {}-{} |",
            row.chapter,
            row.high.rank,
            row.low.rank,
            fmt_value(row.low.gold),
            fmt_value(row.high.gold),
            fmt_value(row.low.xp),
            fmt_value(row.high.xp),
            fmt_value(row.low.essence),
            fmt_value(row.high.essence),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_has_every_section() {
        let md = render_debug_markdown(Some("launch"), &RewardProfile::default(), "2026-01-01T00:00:00Z");
        assert!(md.starts_with("# rewards debug bundle\n- generated: 2026-01-01T00:00:00Z\n- profile: launch\n"));
        assert!(md.contains("## Gold samples"));
        assert!(md.contains("## Essence samples"));
        assert!(md.contains("| 2000 | 5051.2378 | 5100 |"));
        assert!(md.contains("| 1 | 3651-4000 | 100-1000 | 10-100 | 1-1.3 |"));
    }

    #[test]
    fn bundle_is_written_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_debug_bundle(dir.path(), None, &RewardProfile::default()).unwrap();
        assert!(path.starts_with(dir.path()));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("- profile: (default)"));
    }

    #[test]
    fn file_name_and_generated_line_share_one_timestamp() {
        use chrono::TimeZone;

        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).single().unwrap();
        let path = write_debug_bundle_at(dir.path(), Some("launch"), &RewardProfile::default(), now).unwrap();
        assert_eq!(path.file_name().unwrap(), "rewards_debug_launch_20260304_050607.md");
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains(&format!("- generated: {}\n", now.to_rfc3339())));
        assert!(text.contains("- generated: 2026-03-04T05:06:07"));
    }
}
