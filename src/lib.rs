//! `mek-rewards` library crate.
//!
//! The binary (`rewards`) is a thin wrapper around this library so that:
//!
//! - the curve engine is testable without spawning processes
//! - modules are reusable (e.g., a future server endpoint that prices nodes)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod rewards;
pub mod settings;
pub mod tui;
