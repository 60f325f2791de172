//! Stat derivation.

mod calculator;

pub use calculator::StatCalculator;
