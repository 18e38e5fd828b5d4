//! Date-range selection.

use chrono::NaiveDate;

use crate::domain::Dataset;

/// Keep records with `start <= date <= end` (both bounds inclusive).
///
/// `start > end` selects nothing. An empty result is valid; downstream stages
/// produce empty series from it.
pub fn filter_by_date(dataset: &Dataset, start: NaiveDate, end: NaiveDate) -> Dataset {
    let filtered: Dataset = dataset
        .records()
        .iter()
        .filter(|r| start <= r.date && r.date <= end)
        .cloned()
        .collect();

    tracing::debug!(
        %start,
        %end,
        kept = filtered.len(),
        total = dataset.len(),
        "filtered by date"
    );
    filtered
}
