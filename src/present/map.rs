//! Choropleth frame: one colored location per state.

use serde::{Deserialize, Serialize};

use crate::domain::StateSummary;
use crate::math::round_to;

pub const LOCATION_MODE: &str = "USA-states";
pub const GEO_SCOPE: &str = "usa";
pub const COLORSCALE: &str = "Blues";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLocation {
    /// Two-letter state code.
    pub code: String,
    /// Median of the selected metric, rounded to 2 decimals.
    pub value: f64,
    /// Multi-line tooltip text.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFrame {
    pub title: String,
    pub colorbar_title: String,
    pub location_mode: String,
    pub scope: String,
    pub colorscale: String,
    pub locations: Vec<MapLocation>,
}

impl MapFrame {
    pub fn from_summary(summary: &StateSummary) -> Self {
        let metric = summary.metric;
        let locations = summary
            .states
            .iter()
            .map(|row| MapLocation {
                code: row.state.clone(),
                value: round_to(row.medians.get(metric), 2),
                label: row.label.clone(),
            })
            .collect();

        Self {
            title: format!("Distribution of {} across the US", metric.display_name()),
            colorbar_title: metric.display_name(),
            location_mode: LOCATION_MODE.to_string(),
            scope: GEO_SCOPE.to_string(),
            colorscale: COLORSCALE.to_string(),
            locations,
        }
    }

    pub fn get(&self, code: &str) -> Option<&MapLocation> {
        self.locations.iter().find(|l| l.code == code)
    }

    /// Min/max over finite values, the domain of the color scale.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for loc in &self.locations {
            if loc.value.is_finite() {
                lo = lo.min(loc.value);
                hi = hi.max(loc.value);
            }
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }

    /// Position of `value` in the color domain, in `[0, 1]`.
    ///
    /// A flat domain (single value) maps everything to the top of the scale.
    pub fn normalized(&self, value: f64) -> Option<f64> {
        let (lo, hi) = self.value_range()?;
        if !value.is_finite() {
            return None;
        }
        if hi - lo <= f64::EPSILON {
            return Some(1.0);
        }
        Some(((value - lo) / (hi - lo)).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Metric, MetricValues, StateRow};

    fn row(state: &str, bed: f64) -> StateRow {
        StateRow {
            state: state.to_string(),
            medians: MetricValues::from_fn(|m| if m == Metric::BedUtilization { bed } else { 1.0 }),
            label: format!("{state} label"),
        }
    }

    #[test]
    fn values_are_rounded_and_labels_kept() {
        let summary = StateSummary {
            metric: Metric::BedUtilization,
            states: vec![row("NC", 0.1234), row("SC", 0.5678)],
        };

        let frame = MapFrame::from_summary(&summary);
        assert_eq!(frame.scope, "usa");
        assert_eq!(frame.location_mode, "USA-states");
        assert_eq!(frame.colorbar_title, "Inpatient Bed Covid Utilization");
        assert_eq!(frame.get("NC").unwrap().value, 0.12);
        assert_eq!(frame.get("SC").unwrap().value, 0.57);
        assert_eq!(frame.get("SC").unwrap().label, "SC label");
    }

    #[test]
    fn normalized_spans_value_range() {
        let summary = StateSummary {
            metric: Metric::BedUtilization,
            states: vec![row("NC", 0.1), row("SC", 0.3), row("GA", 0.2)],
        };
        let frame = MapFrame::from_summary(&summary);
        assert_eq!(frame.normalized(0.1), Some(0.0));
        assert_eq!(frame.normalized(0.3), Some(1.0));
        assert!((frame.normalized(0.2).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_map_has_no_range() {
        let frame = MapFrame::from_summary(&StateSummary {
            metric: Metric::CovidDeaths,
            states: Vec::new(),
        });
        assert!(frame.value_range().is_none());
        assert!(frame.normalized(1.0).is_none());
    }
}
