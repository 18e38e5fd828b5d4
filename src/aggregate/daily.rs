//! Per-day median series.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DailyPoint, DailySeries, Dataset, Metric, Record};

use super::group_medians;

/// Group records by date and take the median of every metric per date.
///
/// Every metric is aggregated, not only `metric`; the series just remembers
/// which one the chart shows. Dates come out strictly ascending.
pub fn daily_series(dataset: &Dataset, metric: Metric) -> DailySeries {
    let mut groups: BTreeMap<NaiveDate, Vec<&Record>> = BTreeMap::new();
    for r in dataset.records() {
        groups.entry(r.date).or_default().push(r);
    }

    let days = groups
        .into_iter()
        .map(|(date, group)| DailyPoint {
            date,
            medians: group_medians(&group),
        })
        .collect();

    DailySeries { metric, days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetricValues;

    fn rec(day: u32, state: &str, bed: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            state: state.to_string(),
            values: MetricValues::from_fn(|m| match m {
                Metric::BedUtilization => bed,
                _ => 1.0,
            }),
        }
    }

    #[test]
    fn dates_are_strictly_ascending_and_unique() {
        let ds: Dataset = vec![
            rec(9, "NC", 0.1),
            rec(3, "NC", 0.2),
            rec(9, "SC", 0.3),
            rec(1, "SC", 0.4),
            rec(3, "GA", 0.5),
        ]
        .into_iter()
        .collect();

        let series = daily_series(&ds, Metric::BedUtilization);
        assert_eq!(series.len(), 3);
        assert!(series.days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn median_across_states_per_day() {
        let ds: Dataset = vec![
            rec(1, "NC", 0.10),
            rec(1, "SC", 0.20),
            rec(1, "GA", 0.30),
            rec(1, "VA", 0.40),
        ]
        .into_iter()
        .collect();

        let series = daily_series(&ds, Metric::BedUtilization);
        let (_, value) = series.points().next().unwrap();
        assert!((value - 0.25).abs() < 1e-12);
    }
}
