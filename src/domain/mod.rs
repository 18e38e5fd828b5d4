//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the retained metric columns (`Metric`, `MetricValues`)
//! - loaded rows (`Record`, `Dataset`, `DateBounds`)
//! - the user's filter choice (`FilterSelection`)
//! - aggregation outputs (`DailySeries`, `StateSummary`)

pub mod types;

pub use types::*;
