//! Named profile storage.
//!
//! The evaluator never touches storage. Front-ends own a `ProfileStore` and pass
//! loaded profiles into the engine.
//!
//! Implementations:
//! - `JsonDirStore`: one pretty-printed `<name>.json` per profile under a root dir
//! - `MemoryStore`: in-process map (tests, scratch sessions)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{ProfileRecord, RewardProfile};
use crate::error::{AppError, ConfigError};

/// Whether a save created a new profile or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Persistence for named reward profiles.
pub trait ProfileStore {
    fn load(&self, name: &str) -> Result<ProfileRecord, AppError>;
    fn save(&mut self, name: &str, profile: &RewardProfile) -> Result<SaveOutcome, AppError>;
    /// Profile names, sorted.
    fn list(&self) -> Result<Vec<String>, AppError>;
    fn delete(&mut self, name: &str) -> Result<(), AppError>;
}

/// Accept 1-64 characters from `[A-Za-z0-9_-]`.
///
/// Names become file names, so anything path-like is refused.
pub fn validate_name(name: &str) -> Result<(), ConfigError> {
    let ok = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidName { name: name.to_string() })
    }
}

fn not_found(name: &str) -> AppError {
    AppError::new(2, format!("Profile not found: '{name}'."))
}

/// Profiles stored as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// The directory is created lazily on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl ProfileStore for JsonDirStore {
    fn load(&self, name: &str) -> Result<ProfileRecord, AppError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.exists() {
            return Err(not_found(name));
        }
        debug!(path = %path.display(), "loading profile");
        let record = crate::io::profile::read_profile_json(&path)?;
        record.profile.validate()?;
        Ok(record)
    }

    fn save(&mut self, name: &str, profile: &RewardProfile) -> Result<SaveOutcome, AppError> {
        validate_name(name)?;
        profile.validate()?;

        fs::create_dir_all(&self.root).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to create profile dir '{}': {e}", self.root.display()),
            )
        })?;

        let path = self.path_for(name);
        let outcome = if path.exists() {
            SaveOutcome::Updated
        } else {
            SaveOutcome::Created
        };

        let record = ProfileRecord {
            name: name.to_string(),
            saved_at: Utc::now(),
            profile: *profile,
        };
        crate::io::profile::write_profile_json(&path, &record)?;
        info!(name, ?outcome, path = %path.display(), "saved profile");
        Ok(outcome)
    }

    fn list(&self) -> Result<Vec<String>, AppError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::new(
                    2,
                    format!("Failed to read profile dir '{}': {e}", self.root.display()),
                ));
            }
        };

        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    == Some("json")
            })
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .filter(|name| validate_name(name).is_ok())
            .collect();
        names.sort();
        Ok(names)
    }

    fn delete(&mut self, name: &str) -> Result<(), AppError> {
        validate_name(name)?;
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(name, "deleted profile");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(name)),
            Err(e) => Err(AppError::new(
                2,
                format!("Failed to delete profile '{}': {e}", path.display()),
            )),
        }
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, ProfileRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self, name: &str) -> Result<ProfileRecord, AppError> {
        self.records.get(name).cloned().ok_or_else(|| not_found(name))
    }

    fn save(&mut self, name: &str, profile: &RewardProfile) -> Result<SaveOutcome, AppError> {
        validate_name(name)?;
        profile.validate()?;
        let record = ProfileRecord {
            name: name.to_string(),
            saved_at: Utc::now(),
            profile: *profile,
        };
        let outcome = match self.records.insert(name.to_string(), record) {
            Some(_) => SaveOutcome::Updated,
            None => SaveOutcome::Created,
        };
        Ok(outcome)
    }

    fn list(&self) -> Result<Vec<String>, AppError> {
        Ok(self.records.keys().cloned().collect())
    }

    fn delete(&mut self, name: &str) -> Result<(), AppError> {
        self.records.remove(name).map(|_| ()).ok_or_else(|| not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rounding;

    fn tuned_profile() -> RewardProfile {
        let mut profile = RewardProfile::default();
        profile.gold = profile.gold.with_curve(0.35).unwrap().with_rounding(Rounding::Ten);
        profile
    }

    #[test]
    fn name_rules() {
        assert!(validate_name("chapter-1_gold").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("../escape").is_err());
        assert!(validate_name("a b").is_err());
        assert!(validate_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path().join("profiles"));
        assert!(store.list().unwrap().is_empty());

        let profile = tuned_profile();
        assert_eq!(store.save("launch", &profile).unwrap(), SaveOutcome::Created);
        assert_eq!(store.save("launch", &profile).unwrap(), SaveOutcome::Updated);
        store.save("alt", &RewardProfile::default()).unwrap();

        let record = store.load("launch").unwrap();
        assert_eq!(record.name, "launch");
        assert_eq!(record.profile, profile);
        assert_eq!(store.list().unwrap(), vec!["alt".to_string(), "launch".to_string()]);

        store.delete("alt").unwrap();
        assert_eq!(store.list().unwrap(), vec!["launch".to_string()]);
        assert_eq!(store.delete("alt").unwrap_err().exit_code(), 2);
    }

    #[test]
    fn json_store_rejects_invalid_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path());
        let mut profile = RewardProfile::default();
        profile.xp.rank_max = profile.xp.rank_min;
        assert!(store.save("broken", &profile).is_err());
        assert!(store.load("broken").is_err());
    }

    #[test]
    fn json_store_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::write(dir.path().join("bad name.json"), "{}").unwrap();
        let store = JsonDirStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn json_store_lists_only_lowercase_json_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path());
        store.save("kept", &RewardProfile::default()).unwrap();
        fs::write(dir.path().join("shouty.JSON"), "{}").unwrap();
        fs::write(dir.path().join("mixed.Json"), "{}").unwrap();
        assert_eq!(store.list().unwrap(), vec!["kept".to_string()]);
        assert!(store.load("shouty").is_err());
    }

    #[test]
    fn memory_store_behaves_like_json_store() {
        let mut store = MemoryStore::new();
        let profile = tuned_profile();
        assert_eq!(store.save("a", &profile).unwrap(), SaveOutcome::Created);
        assert_eq!(store.save("a", &profile).unwrap(), SaveOutcome::Updated);
        assert_eq!(store.load("a").unwrap().profile, profile);
        store.delete("a").unwrap();
        assert!(store.load("a").is_err());
    }
}
