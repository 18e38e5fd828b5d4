//! Presentation adapters.
//!
//! These turn aggregator outputs into render-ready frames. A frame carries
//! everything a renderer needs (points, labels, scale configuration), so the
//! TUI, the text report and the JSON export all draw from the same values.
//!
//! - `line`: the per-day time series chart
//! - `map`: the per-state choropleth
//! - `grid`: tile positions of US states for terminal maps
//! - `colorscale`: the sequential Blues scale used to color the map

pub mod colorscale;
pub mod grid;
pub mod line;
pub mod map;

pub use colorscale::{blues, Rgb};
pub use grid::{tile_position, GRID_COLS, GRID_ROWS, STATE_TILES};
pub use line::LineChartFrame;
pub use map::{MapFrame, MapLocation};
