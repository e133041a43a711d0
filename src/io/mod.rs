//! Input/output: the profile store, profile JSON files, and CSV exports.

pub mod export;
pub mod profile;
pub mod store;

pub use store::{JsonDirStore, MemoryStore, ProfileStore, SaveOutcome};
