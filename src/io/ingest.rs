//! CSV ingest and normalization.
//!
//! This module is responsible for turning the hospital-utilization CSV into a
//! clean `Dataset` of `(date, state, metric values)` records.
//!
//! Design goals:
//! - **Columns by name**: the retained columns are resolved from the header, so
//!   a reordered upstream schema keeps working
//! - **Drop, don't impute**: a row with any missing cell is skipped
//! - **Fatal on bad data**: an unparseable date or number aborts the load
//! - **Separation of concerns**: no filtering or aggregation here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{Dataset, DateBounds, Metric, MetricValues, Record};
use crate::error::DataLoadError;

pub const DATE_COLUMN: &str = "date";
pub const STATE_COLUMN: &str = "state";

/// Cell contents treated as missing (in addition to an empty cell).
const NA_MARKERS: [&str; 17] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "#NA",
    "<NA>", "1.#IND", "1.#QNAN", "-1.#IND", "-1.#QNAN",
];

/// Loader output: the dataset plus what the controls need to bound themselves.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub bounds: DateBounds,
    pub metrics: Vec<Metric>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl LoadedData {
    /// Display names for the metric selector, in column order.
    pub fn metric_names(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.display_name()).collect()
    }
}

/// Column positions resolved from the header.
struct Columns {
    date: usize,
    state: usize,
    metrics: [(Metric, usize); 4],
}

/// Load the dataset from a CSV file.
pub fn load(path: &Path) -> Result<LoadedData, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = load_reader(file)?;

    tracing::info!(
        path = %path.display(),
        rows_read = loaded.rows_read,
        rows_dropped = loaded.rows_dropped,
        min_date = %loaded.bounds.min,
        max_date = %loaded.bounds.max,
        "loaded dataset"
    );
    Ok(loaded)
}

/// Load the dataset from any reader producing CSV text.
pub fn load_reader<R: Read>(reader: R) -> Result<LoadedData, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);
    let columns = resolve_columns(&header_map)?;
    let width = headers.len();

    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_dropped = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let row = result?;
        if row.len() < width || row.iter().any(is_missing) {
            rows_dropped += 1;
            continue;
        }

        records.push(parse_row(&row, &columns, line)?);
    }

    let dataset = Dataset::new(records);
    let bounds = dataset.date_bounds().ok_or(DataLoadError::Empty)?;

    Ok(LoadedData {
        dataset,
        bounds,
        metrics: Metric::ALL.to_vec(),
        rows_read,
        rows_dropped,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Whether a header row names `date`, `state` and every metric column.
pub fn has_required_columns(headers: &StringRecord) -> bool {
    resolve_columns(&build_header_map(headers)).is_ok()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<Columns, DataLoadError> {
    let find = |name: &str| {
        header_map
            .get(name)
            .copied()
            .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
    };

    Ok(Columns {
        date: find(DATE_COLUMN)?,
        state: find(STATE_COLUMN)?,
        metrics: [
            (Metric::StaffShortageToday, find(Metric::StaffShortageToday.column_name())?),
            (Metric::StaffShortageWeek, find(Metric::StaffShortageWeek.column_name())?),
            (Metric::BedUtilization, find(Metric::BedUtilization.column_name())?),
            (Metric::CovidDeaths, find(Metric::CovidDeaths.column_name())?),
        ],
    })
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_MARKERS.contains(&cell)
}

fn parse_row(row: &StringRecord, columns: &Columns, line: usize) -> Result<Record, DataLoadError> {
    let cell = |idx: usize| row.get(idx).map(str::trim).unwrap_or_default();

    let raw_date = cell(columns.date);
    let date = parse_date(raw_date).ok_or_else(|| DataLoadError::InvalidDate {
        line,
        value: raw_date.to_string(),
    })?;

    // Codes are matched against the map tiles, so store them in one case.
    let state = cell(columns.state).to_ascii_uppercase();

    let mut values = MetricValues::from_fn(|_| 0.0);
    for (metric, idx) in &columns.metrics {
        let raw = cell(*idx);
        let value = raw.parse::<f64>().map_err(|_| DataLoadError::InvalidNumber {
            line,
            column: metric.column_name().to_string(),
            value: raw.to_string(),
        })?;
        values.set(*metric, value);
    }

    Ok(Record { date, state, values })
}

/// Parse a date or datetime cell, discarding any time-of-day.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    const DATETIME_FMTS: [&str; 6] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %I:%M:%S %p",
    ];

    let s = s.trim();
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
