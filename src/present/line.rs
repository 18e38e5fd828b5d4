//! Line chart frame: median of the selected metric per day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::DailySeries;

pub const X_LABEL: &str = "Dates";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartFrame {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Ascending by date.
    pub points: Vec<(NaiveDate, f64)>,
}

impl LineChartFrame {
    pub fn from_series(series: &DailySeries) -> Self {
        let metric = series.metric.display_name();
        Self {
            title: format!("Distribution of {metric} across time"),
            x_label: X_LABEL.to_string(),
            y_label: metric,
            points: series.points().collect(),
        }
    }

    /// Date range covered by the points.
    pub fn x_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.0, self.points.last()?.0))
    }

    /// Min/max value over finite points.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &(_, y) in &self.points {
            if y.is_finite() {
                lo = lo.min(y);
                hi = hi.max(y);
            }
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }
}
