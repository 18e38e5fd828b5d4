//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - view exports (JSON/CSV) (`export`)
//! - static report download (`download`)

pub mod download;
pub mod export;
pub mod ingest;

pub use download::*;
pub use export::*;
pub use ingest::*;
