//! Plotters-powered time-series widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Dates travel as `f64` day numbers (`NaiveDate::num_days_from_ce`).

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::present::LineChartFrame;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call (see
/// `ChartSeries::from_frame`), which keeps `render()` focused on drawing.
pub struct TimeSeriesChart<'a> {
    /// Daily medians as `(day number, value)`.
    pub points: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

/// Chart-ready data derived from a `LineChartFrame`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartSeries {
    /// `None` when the frame has nothing to draw.
    pub fn from_frame(frame: &LineChartFrame) -> Option<Self> {
        let (first, last) = frame.x_range()?;
        let (y_lo, y_hi) = frame.y_range()?;

        let points: Vec<(f64, f64)> = frame
            .points
            .iter()
            .filter(|(_, y)| y.is_finite())
            .map(|&(d, y)| (day_number(d), y))
            .collect();

        let (mut x0, mut x1) = (day_number(first), day_number(last));
        if x1 <= x0 {
            x0 -= 1.0;
            x1 += 1.0;
        }

        let (y0, y1) = if y_hi > y_lo {
            let pad = ((y_hi - y_lo) * 0.05).max(1e-12);
            (y_lo - pad, y_hi + pad)
        } else {
            (y_lo - 1.0, y_lo + 1.0)
        };

        Some(Self {
            points,
            x_bounds: [x0, x1],
            y_bounds: [y0, y1],
        })
    }
}

pub fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of `day_number`, rounded to the nearest day.
pub fn date_from_day_number(v: f64) -> Option<NaiveDate> {
    if !v.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
}

impl Widget for TimeSeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let line_color = RGBColor(107, 174, 214);
            chart.draw_series(LineSeries::new(self.points.iter().copied(), &line_color))?;

            // Pixels rather than `Circle`: the backend scales circle radii badly.
            chart.draw_series(self.points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    fn frame(points: Vec<(NaiveDate, f64)>) -> LineChartFrame {
        LineChartFrame {
            title: String::new(),
            x_label: "Dates".to_string(),
            y_label: "Deaths Covid".to_string(),
            points,
        }
    }

    #[test]
    fn day_numbers_round_trip() {
        let d = date(17);
        assert_eq!(date_from_day_number(day_number(d) + 0.4), Some(d));
        assert_eq!(date_from_day_number(f64::NAN), None);
    }

    #[test]
    fn series_bounds_are_padded() {
        let s = ChartSeries::from_frame(&frame(vec![(date(1), 10.0), (date(11), 30.0)])).unwrap();
        assert_eq!(s.x_bounds, [day_number(date(1)), day_number(date(11))]);
        assert!((s.y_bounds[0] - 9.0).abs() < 1e-9);
        assert!((s.y_bounds[1] - 31.0).abs() < 1e-9);
    }

    #[test]
    fn single_day_is_widened() {
        let s = ChartSeries::from_frame(&frame(vec![(date(3), 5.0)])).unwrap();
        assert_eq!(s.x_bounds[1] - s.x_bounds[0], 2.0);
        assert_eq!(s.y_bounds, [4.0, 6.0]);
        assert!(ChartSeries::from_frame(&frame(Vec::new())).is_none());
    }
}
