//! Per-state median summary with tooltip labels.

use std::collections::BTreeMap;

use crate::domain::{Dataset, Metric, Record, StateRow, StateSummary};

use super::{format_state_label, group_medians};

/// Group records by state and take the median of every metric per state.
///
/// Rows come out ordered by state code.
pub fn state_summary(dataset: &Dataset, metric: Metric) -> StateSummary {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for r in dataset.records() {
        groups.entry(r.state.as_str()).or_default().push(r);
    }

    let states = groups
        .into_iter()
        .map(|(state, group)| {
            let medians = group_medians(&group);
            StateRow {
                state: state.to_string(),
                label: format_state_label(state, &medians),
                medians,
            }
        })
        .collect();

    StateSummary { metric, states }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::MetricValues;

    fn rec(day: u32, state: &str, bed: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            state: state.to_string(),
            values: MetricValues {
                staff_shortage_today: 1.0,
                staff_shortage_week: 2.0,
                bed_utilization: bed,
                deaths: 3.0,
            },
        }
    }

    #[test]
    fn odd_group_median() {
        let ds: Dataset = vec![rec(1, "NC", 0.10), rec(2, "NC", 0.50), rec(3, "NC", 0.30)]
            .into_iter()
            .collect();

        let summary = state_summary(&ds, Metric::BedUtilization);
        let nc = summary.get("NC").unwrap();
        assert!((nc.medians.bed_utilization - 0.30).abs() < 1e-12);
    }

    #[test]
    fn even_group_median() {
        let ds: Dataset = vec![
            rec(1, "NC", 0.10),
            rec(2, "NC", 0.20),
            rec(3, "NC", 0.30),
            rec(4, "NC", 0.40),
        ]
        .into_iter()
        .collect();

        let summary = state_summary(&ds, Metric::BedUtilization);
        let nc = summary.get("NC").unwrap();
        assert!((nc.medians.bed_utilization - 0.25).abs() < 1e-12);
    }

    #[test]
    fn one_row_per_state_sorted() {
        let ds: Dataset = vec![rec(1, "SC", 0.1), rec(1, "NC", 0.2), rec(2, "SC", 0.3)]
            .into_iter()
            .collect();

        let summary = state_summary(&ds, Metric::CovidDeaths);
        let codes: Vec<_> = summary.states.iter().map(|s| s.state.as_str()).collect();
        assert_eq!(codes, vec!["NC", "SC"]);
        assert!(summary.states[0].label.starts_with("NC\n"));
    }

    #[test]
    fn tied_bed_median_rounds_to_even_in_label() {
        let ds: Dataset = vec![rec(1, "NC", 0.12), rec(2, "NC", 0.13)].into_iter().collect();

        let summary = state_summary(&ds, Metric::BedUtilization);
        let nc = summary.get("NC").unwrap();
        assert!((nc.medians.bed_utilization - 0.125).abs() < 1e-12);
        assert!(nc.label.contains("\nBed Utilization 0.12\n"), "label: {}", nc.label);

        let map = crate::present::MapFrame::from_summary(&summary);
        assert_eq!(map.get("NC").unwrap().value, 0.12);
    }
}
