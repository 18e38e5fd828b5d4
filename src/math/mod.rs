//! Numeric helpers shared by the aggregator and the presentation adapters.

pub mod median;

pub use median::{median, round_to};
