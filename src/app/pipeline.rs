//! Shared profile workflow used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! store lookup -> validation -> rank table -> totals
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::cli::ProfileSelect;
use crate::domain::{RankReward, ResourceKind, RewardProfile};
use crate::engine::RewardCurveEngine;
use crate::error::AppError;
use crate::io::ProfileStore;
use crate::rewards::{TableTotals, rank_table, totals};

/// A profile plus the name it was loaded under (`None` = built-in default).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProfile {
    pub name: Option<String>,
    pub profile: RewardProfile,
}

impl LoadedProfile {
    pub fn builtin() -> Self {
        Self {
            name: None,
            profile: RewardProfile::default(),
        }
    }
}

/// All computed outputs for one profile.
#[derive(Debug, Clone)]
pub struct ProfileRun {
    pub table: Vec<RankReward>,
    pub totals: TableTotals,
}

/// Load `name` from the store, or the built-in profile when `name` is `None`.
pub fn load_profile(store: &dyn ProfileStore, name: Option<&str>) -> Result<LoadedProfile, AppError> {
    let Some(name) = name else {
        debug!("using built-in profile");
        return Ok(LoadedProfile::builtin());
    };

    let record = store.load(name)?;
    record.profile.validate()?;
    warn_out_of_range(&record.profile);
    Ok(LoadedProfile {
        name: Some(record.name),
        profile: record.profile,
    })
}

/// Resolve `--profile` / `--pick` into a loaded profile.
pub fn resolve_profile(store: &dyn ProfileStore, select: &ProfileSelect) -> Result<LoadedProfile, AppError> {
    if select.pick {
        let name = crate::cli::picker::prompt_for_profile(store)?;
        return load_profile(store, Some(&name));
    }
    load_profile(store, select.profile.as_deref())
}

/// Evaluate a profile: the full table over `ranks`, and its totals.
pub fn run_profile(
    profile: &RewardProfile,
    ranks: RangeInclusive<i64>,
    engine: &RewardCurveEngine,
) -> Result<ProfileRun, AppError> {
    profile.validate()?;
    if ranks.is_empty() {
        return Err(AppError::new(
            3,
            format!("Empty rank range: {}..={}.", ranks.start(), ranks.end()),
        ));
    }

    let table = rank_table(profile, ranks, engine);
    let totals = totals(&table);
    debug!(rows = totals.rows, "evaluated rank table");

    Ok(ProfileRun { table, totals })
}

/// Log a warning for every resource whose curve bias is outside [-1, 1].
///
/// Such curves still evaluate, but the editor UIs never produce them.
pub fn warn_out_of_range(profile: &RewardProfile) {
    for kind in ResourceKind::ALL {
        let config = profile.get(kind);
        if !config.curve_in_range() {
            warn!(
                resource = kind.display_name(),
                curve = config.curve,
                "curve bias outside [-1, 1]"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStore;

    #[test]
    fn missing_name_uses_builtin() {
        let store = MemoryStore::new();
        let loaded = load_profile(&store, None).unwrap();
        assert_eq!(loaded, LoadedProfile::builtin());
    }

    #[test]
    fn loads_saved_profile() {
        let mut store = MemoryStore::new();
        let mut profile = RewardProfile::default();
        profile.xp.curve = -0.25;
        store.save("hard", &profile).unwrap();

        let loaded = load_profile(&store, Some("hard")).unwrap();
        assert_eq!(loaded.name.as_deref(), Some("hard"));
        assert_eq!(loaded.profile.xp.curve, -0.25);

        let err = load_profile(&store, Some("absent")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn run_covers_range() {
        let run = run_profile(&RewardProfile::default(), 1..=4000, &RewardCurveEngine::default()).unwrap();
        assert_eq!(run.table.len(), 4000);
        assert_eq!(run.totals.rows, 4000);
        assert_eq!(run.table[0].gold, 10_000.0);
        assert_eq!(run.table[3999].gold, 100.0);
    }

    #[test]
    fn empty_range_is_exit_3() {
        #[allow(clippy::reversed_empty_ranges)]
        let err = run_profile(&RewardProfile::default(), 10..=1, &RewardCurveEngine::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
