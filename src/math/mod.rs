//! Mathematical utilities: rank normalization, curve bias and rounding.

pub mod bias;
pub mod rounding;

pub use bias::*;
pub use rounding::*;
