//! Terminal plots for the text front-end.

pub mod ascii;

pub use ascii::render_line_chart;
