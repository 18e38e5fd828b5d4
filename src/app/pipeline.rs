//! Shared dashboard pipeline used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load CSV -> filter by date -> aggregate -> chart frames
//!
//! Every filter change is a fresh invocation that returns a `DashboardView`
//! value; nothing is cached between invocations except the immutable dataset.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::aggregate_metric;
use crate::domain::{DailySeries, Dataset, DateBounds, FilterSelection, Metric, StateSummary};
use crate::error::{AppError, InvalidMetricError};
use crate::filter::filter_by_date;
use crate::io::ingest::{load, LoadedData};
use crate::present::{LineChartFrame, MapFrame};

/// All computed outputs of a single pipeline invocation.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selection: FilterSelection,
    pub records_in_range: usize,
    pub daily: DailySeries,
    pub states: StateSummary,
    pub line: LineChartFrame,
    pub map: MapFrame,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.records_in_range == 0
    }
}

/// Load the dataset and run one invocation against it.
pub fn run(
    data_path: &Path,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    metric: Option<&str>,
) -> Result<(LoadedData, DashboardView), AppError> {
    let loaded = load(data_path)?;
    let selection = resolve_selection(&loaded.bounds, start, end, metric)?;
    let view = run_with_dataset(&loaded.dataset, selection);
    Ok((loaded, view))
}

/// Filter, aggregate and build chart frames for `selection`.
pub fn run_with_dataset(dataset: &Dataset, selection: FilterSelection) -> DashboardView {
    let filtered = filter_by_date(dataset, selection.start, selection.end);
    let (daily, states) = aggregate_metric(&filtered, selection.metric);

    let line = LineChartFrame::from_series(&daily);
    let map = MapFrame::from_summary(&states);

    DashboardView {
        selection,
        records_in_range: filtered.len(),
        daily,
        states,
        line,
        map,
    }
}

/// Turn optional user choices into a complete selection.
///
/// Missing dates default to the dataset bounds and given dates are clamped into
/// them; a missing metric defaults to the first selectable one.
pub fn resolve_selection(
    bounds: &DateBounds,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    metric: Option<&str>,
) -> Result<FilterSelection, InvalidMetricError> {
    let metric = match metric {
        Some(name) => name.parse()?,
        None => Metric::ALL[0],
    };

    Ok(FilterSelection {
        start: start.map(|d| bounds.clamp(d)).unwrap_or(bounds.min),
        end: end.map(|d| bounds.clamp(d)).unwrap_or(bounds.max),
        metric,
    })
}
