//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between pipeline stages by value
//! - exported to JSON/CSV
//! - rendered by any front-end (TUI, plain terminal output)

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidMetricError;

/// The metric columns retained from the source dataset.
///
/// Declaration order is the order the metric selector lists them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "critical_staffing_shortage_today_yes")]
    StaffShortageToday,
    #[serde(rename = "critical_staffing_shortage_anticipated_within_week_yes")]
    StaffShortageWeek,
    #[serde(rename = "inpatient_bed_covid_utilization")]
    BedUtilization,
    #[serde(rename = "deaths_covid")]
    CovidDeaths,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::StaffShortageToday,
        Metric::StaffShortageWeek,
        Metric::BedUtilization,
        Metric::CovidDeaths,
    ];

    /// Column name in the source CSV.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::StaffShortageToday => "critical_staffing_shortage_today_yes",
            Metric::StaffShortageWeek => "critical_staffing_shortage_anticipated_within_week_yes",
            Metric::BedUtilization => "inpatient_bed_covid_utilization",
            Metric::CovidDeaths => "deaths_covid",
        }
    }

    /// Human-readable name shown in selectors and axis labels.
    pub fn display_name(self) -> String {
        display_name_for_column(self.column_name())
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn expected_names() -> String {
        Self::ALL
            .iter()
            .map(|m| m.column_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for Metric {
    type Err = InvalidMetricError;

    /// Accepts a column name (`deaths_covid`) or a display name (`Deaths Covid`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let column = s.trim().split(' ').collect::<Vec<_>>().join("_").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.column_name() == column)
            .ok_or_else(|| InvalidMetricError {
                name: s.to_string(),
                expected: Self::expected_names(),
            })
    }
}

/// `snake_case_column` -> `Snake Case Column`.
///
/// Title-casing follows the usual "word" rule: a letter is upper-cased when it
/// does not follow another letter, every other letter is lower-cased.
pub fn display_name_for_column(column: &str) -> String {
    let spaced = column.split('_').collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_alpha = false;
    for ch in spaced.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// One value per retained metric.
///
/// Used both for the raw values of a record and for per-group medians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricValues {
    #[serde(rename = "critical_staffing_shortage_today_yes")]
    pub staff_shortage_today: f64,
    #[serde(rename = "critical_staffing_shortage_anticipated_within_week_yes")]
    pub staff_shortage_week: f64,
    #[serde(rename = "inpatient_bed_covid_utilization")]
    pub bed_utilization: f64,
    #[serde(rename = "deaths_covid")]
    pub deaths: f64,
}

impl MetricValues {
    /// Build values by evaluating `f` once per metric.
    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        Self {
            staff_shortage_today: f(Metric::StaffShortageToday),
            staff_shortage_week: f(Metric::StaffShortageWeek),
            bed_utilization: f(Metric::BedUtilization),
            deaths: f(Metric::CovidDeaths),
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::StaffShortageToday => self.staff_shortage_today,
            Metric::StaffShortageWeek => self.staff_shortage_week,
            Metric::BedUtilization => self.bed_utilization,
            Metric::CovidDeaths => self.deaths,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::StaffShortageToday => self.staff_shortage_today = value,
            Metric::StaffShortageWeek => self.staff_shortage_week = value,
            Metric::BedUtilization => self.bed_utilization = value,
            Metric::CovidDeaths => self.deaths = value,
        }
    }
}

/// One row of the source dataset after loading.
///
/// Invariant: every field is present and `date` carries no time-of-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub state: String,
    pub values: MetricValues,
}

/// Ordered collection of records, immutable for the lifetime of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest date present, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<DateBounds> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some(DateBounds { min, max })
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Inclusive date range covered by a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.max)
    }
}

/// A user's filter choice: date window plus the metric to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub metric: Metric,
}

/// Medians of every metric on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub medians: MetricValues,
}

/// Per-day medians, strictly ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub metric: Metric,
    pub days: Vec<DailyPoint>,
}

impl DailySeries {
    /// `(date, median)` pairs for the selected metric.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.days.iter().map(|d| (d.date, d.medians.get(self.metric)))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Medians of every metric for one state, plus its tooltip text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRow {
    pub state: String,
    pub medians: MetricValues,
    pub label: String,
}

/// Per-state medians, ordered by state code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSummary {
    pub metric: Metric,
    pub states: Vec<StateRow>,
}

impl StateSummary {
    pub fn get(&self, state: &str) -> Option<&StateRow> {
        self.states.iter().find(|row| row.state == state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_title_cased() {
        assert_eq!(Metric::CovidDeaths.display_name(), "Deaths Covid");
        assert_eq!(
            Metric::StaffShortageWeek.display_name(),
            "Critical Staffing Shortage Anticipated Within Week Yes"
        );
        assert_eq!(display_name_for_column("icu_2nd_wave"), "Icu 2Nd Wave");
    }

    #[test]
    fn metric_parses_column_and_display_names() {
        assert_eq!("deaths_covid".parse::<Metric>().unwrap(), Metric::CovidDeaths);
        assert_eq!("Deaths Covid".parse::<Metric>().unwrap(), Metric::CovidDeaths);
        assert_eq!(
            "Inpatient Bed Covid Utilization".parse::<Metric>().unwrap(),
            Metric::BedUtilization
        );
        for m in Metric::ALL {
            assert_eq!(m.display_name().parse::<Metric>().unwrap(), m);
        }

        let err = "icu_beds".parse::<Metric>().unwrap_err();
        assert_eq!(err.name, "icu_beds");
    }

    #[test]
    fn metric_cycles_in_both_directions() {
        assert_eq!(Metric::CovidDeaths.next(), Metric::StaffShortageToday);
        assert_eq!(Metric::StaffShortageToday.prev(), Metric::CovidDeaths);
    }

    #[test]
    fn date_bounds_of_empty_dataset_is_none() {
        assert!(Dataset::default().date_bounds().is_none());
    }
}
