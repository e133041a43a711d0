//! Export rank tables and event rollouts to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{EventSlot, RankReward, RewardProfile};
use crate::error::AppError;
use crate::rewards::{chapter_of_event, deployed_reward};

fn create(path: &Path) -> Result<BufWriter<File>, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    Ok(BufWriter::new(file))
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::new(2, format!("Failed to write export CSV: {e}"))
}

/// Write a rank table (one row per rank).
///
/// Deployed columns hold what `profile` pays for the node each rank is deployed
/// as, and are empty for ranks outside the chapter layout.
pub fn write_rank_table_csv(path: &Path, rows: &[RankReward], profile: &RewardProfile) -> Result<(), AppError> {
    let mut out = create(path)?;
    write_rank_table(&mut out, rows, profile).map_err(write_err)?;
    out.flush().map_err(write_err)
}

/// Write an event rollout (one row per event slot).
pub fn write_events_csv(path: &Path, slots: &[EventSlot]) -> Result<(), AppError> {
    let mut out = create(path)?;
    write_events(&mut out, slots).map_err(write_err)?;
    out.flush().map_err(write_err)
}

fn write_rank_table<W: Write>(out: &mut W, rows: &[RankReward], profile: &RewardProfile) -> std::io::Result<()> {
    writeln!(
        out,
        "rank,chapter,node,gold,xp,essence,deployed_gold,deployed_xp,deployed_essence"
    )?;
    for r in rows {
        let (placement, deployed) = match deployed_reward(r.rank, profile) {
            Some(d) => (
                format!("{},{}", d.chapter, d.kind.display_name()),
                format!("{},{},{}", d.gold, d.xp, d.essence),
            ),
            None => (",".to_string(), ",,".to_string()),
        };
        writeln!(out, "{},{},{},{},{},{}", r.rank, placement, r.gold, r.xp, r.essence, deployed)?;
    }
    Ok(())
}

fn write_events<W: Write>(out: &mut W, slots: &[EventSlot]) -> std::io::Result<()> {
    writeln!(out, "event,chapter,gold,xp")?;
    for s in slots {
        writeln!(out, "{},{},{},{}", s.number, chapter_of_event(s.number), s.gold, s.xp)?;
    }
    Ok(())
}
