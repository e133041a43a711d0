//! The reward curve evaluator.
//!
//! Pure functions only: no I/O, no shared state. Safe to call from any number of
//! threads at once (see `rewards::table` for the parallel rank table).

pub mod evaluator;

pub use evaluator::*;
