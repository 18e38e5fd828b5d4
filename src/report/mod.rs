//! Formatted terminal output for the `summary` and `metrics` commands.

mod format;

pub use format::*;
