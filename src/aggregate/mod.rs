//! Aggregation of a filtered dataset into chart-ready views.
//!
//! Responsibilities:
//!
//! - per-day medians of every metric (`daily`)
//! - per-state medians plus a tooltip label (`state`, `label`)
//!
//! Both views are pure functions of their input: running them twice on the same
//! dataset yields identical output.

pub mod daily;
pub mod label;
pub mod state;

pub use daily::daily_series;
pub use label::{format_state_label, natural_float};
pub use state::state_summary;

use crate::domain::{DailySeries, Dataset, Metric, MetricValues, Record, StateSummary};
use crate::error::InvalidMetricError;
use crate::math::median;

/// Build both aggregate views for `metric_name`.
///
/// The metric name is validated before any work is done, so an unknown name
/// fails even when `dataset` is empty.
pub fn aggregate(
    dataset: &Dataset,
    metric_name: &str,
) -> Result<(DailySeries, StateSummary), InvalidMetricError> {
    let metric: Metric = metric_name.parse()?;
    Ok(aggregate_metric(dataset, metric))
}

/// Same as [`aggregate`] for an already-validated metric.
pub fn aggregate_metric(dataset: &Dataset, metric: Metric) -> (DailySeries, StateSummary) {
    let daily = daily_series(dataset, metric);
    let states = state_summary(dataset, metric);

    tracing::debug!(
        metric = metric.column_name(),
        records = dataset.len(),
        days = daily.len(),
        states = states.len(),
        "aggregated"
    );
    (daily, states)
}

/// Median of every metric across a non-empty group of records.
fn group_medians(group: &[&Record]) -> MetricValues {
    MetricValues::from_fn(|metric| {
        let values: Vec<f64> = group.iter().map(|r| r.values.get(metric)).collect();
        median(&values).unwrap_or(f64::NAN)
    })
}
