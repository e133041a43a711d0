//! Read/write profile JSON files.
//!
//! A profile file is the portable form of a saved `ProfileRecord`:
//! - profile name and save time
//! - the gold / XP / essence curve configs
//!
//! The schema is defined by `domain::ProfileRecord`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::ProfileRecord;
use crate::error::AppError;

/// Write a profile JSON file.
pub fn write_profile_json(path: &Path, record: &ProfileRecord) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create profile JSON '{}': {e}", path.display()))
    })?;

    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, record)
        .map_err(|e| AppError::new(2, format!("Failed to write profile JSON: {e}")))?;
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to write profile JSON: {e}")))
}

/// Read a profile JSON file.
pub fn read_profile_json(path: &Path) -> Result<ProfileRecord, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open profile JSON '{}': {e}", path.display()))
    })?;
    let record: ProfileRecord = serde_json::from_reader(file).map_err(|e| {
        AppError::new(2, format!("Invalid profile JSON '{}': {e}", path.display()))
    })?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RewardProfile;
    use chrono::Utc;

    #[test]
    fn schema_uses_rounding_labels() {
        let record = ProfileRecord {
            name: "default".to_string(),
            saved_at: Utc::now(),
            profile: RewardProfile::default(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"rounding\":\"100\""));
        assert!(json.contains("\"rank_max\":4000"));
    }

    #[test]
    fn malformed_file_is_a_user_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_profile_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("Invalid profile JSON"));
    }
}
