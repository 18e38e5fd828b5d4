//! `hospital-dash` library crate.
//!
//! The binary (`hdash`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the load/filter/aggregate stages are reusable from other front-ends
//! - code stays easy to navigate as the project grows

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod filter;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod present;
pub mod report;
pub mod tui;
