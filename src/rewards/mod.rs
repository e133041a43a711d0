//! Reward layouts built on the curve evaluator.
//!
//! Responsibilities:
//!
//! - evaluate a three-resource profile for a rank
//! - lay out the story chapters and preview their reward spans
//! - scale payouts for deployed challenger and boss nodes
//! - roll out the sequential event nodes
//! - build full rank tables (parallel)

pub mod chapters;
pub mod deploy;
pub mod events;
pub mod profile;
pub mod table;

pub use chapters::*;
pub use deploy::*;
pub use events::*;
pub use table::*;
