//! Terminal formatting: load stats, the active selection and the aggregate tables.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized (the tests below pin the layout)

use std::path::Path;

use crate::app::pipeline::DashboardView;
use crate::domain::{DailySeries, Metric, StateSummary};
use crate::io::ingest::LoadedData;
use crate::present::tile_position;

/// Header block: where the data came from and what survived loading.
pub fn format_load_summary(data_path: &Path, loaded: &LoadedData) -> String {
    let mut out = String::new();

    out.push_str("=== hdash - Impact of Covid on hospitals ===\n");
    out.push_str(&format!("Data: {}\n", data_path.display()));
    out.push_str(&format!(
        "Rows: read={} | kept={} | dropped={}\n",
        loaded.rows_read,
        loaded.dataset.len(),
        loaded.rows_dropped
    ));
    out.push_str(&format!(
        "Dates: [{}, {}]\n",
        loaded.bounds.min, loaded.bounds.max
    ));

    out
}

/// The filter choice plus how much data it matched.
pub fn format_selection(view: &DashboardView) -> String {
    let s = &view.selection;
    let mut out = String::new();

    out.push_str(&format!("Metric: {} ({})\n", s.metric.display_name(), s.metric.column_name()));
    out.push_str(&format!("Range: {} .. {} (inclusive)\n", s.start, s.end));
    out.push_str(&format!(
        "Matched: records={} | days={} | states={}\n",
        view.records_in_range,
        view.daily.len(),
        view.states.len()
    ));
    if view.is_empty() {
        out.push_str("No records in the selected range.\n");
    }

    out
}

/// Selectable metrics, in selector order, and the date bounds.
pub fn format_metrics(loaded: &LoadedData) -> String {
    let mut out = String::new();

    out.push_str("Metrics:\n");
    for (idx, metric) in loaded.metrics.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}) {:<56} {}\n",
            idx + 1,
            metric.display_name(),
            metric.column_name()
        ));
    }
    out.push_str(&format!(
        "\nDate range: {} .. {}\n",
        loaded.bounds.min, loaded.bounds.max
    ));

    out
}

/// Daily medians of every metric; the selected one is marked with `*`.
///
/// `limit` keeps the first and last `limit / 2` rows of a long series.
pub fn format_daily_table(series: &DailySeries, limit: Option<usize>) -> String {
    let mut out = String::new();

    let headers: Vec<String> = Metric::ALL
        .iter()
        .map(|m| {
            let mark = if *m == series.metric { "*" } else { "" };
            format!("{mark}{}", short_name(*m))
        })
        .collect();

    out.push_str(
        format!(
            "{:<10} {:>12} {:>12} {:>12} {:>12}",
            "date", headers[0], headers[1], headers[2], headers[3]
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&separator());

    let rows = series.days.len();
    let keep = limit.map(|l| l.max(2) / 2);
    for (idx, day) in series.days.iter().enumerate() {
        if let Some(half) = keep {
            if rows > half * 2 && idx == half {
                out.push_str(&format!("... {} more day(s) ...\n", rows - half * 2));
            }
            if rows > half * 2 && idx >= half && idx < rows - half {
                continue;
            }
        }
        let m = &day.medians;
        out.push_str(
            format!(
                "{:<10} {:>12} {:>12} {:>12} {:>12}",
                day.date.to_string(),
                fmt_value(m.staff_shortage_today),
                fmt_value(m.staff_shortage_week),
                fmt_value(m.bed_utilization),
                fmt_value(m.deaths),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Per-state medians; states missing from the tile map are flagged.
pub fn format_state_table(summary: &StateSummary) -> String {
    let mut out = String::new();

    let headers: Vec<String> = Metric::ALL
        .iter()
        .map(|m| {
            let mark = if *m == summary.metric { "*" } else { "" };
            format!("{mark}{}", short_name(*m))
        })
        .collect();

    out.push_str(
        format!(
            "{:<10} {:>12} {:>12} {:>12} {:>12}",
            "state", headers[0], headers[1], headers[2], headers[3]
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&separator());

    let mut off_map = Vec::new();
    for row in &summary.states {
        if tile_position(&row.state).is_none() {
            off_map.push(row.state.as_str());
        }
        let m = &row.medians;
        out.push_str(
            format!(
                "{:<10} {:>12} {:>12} {:>12} {:>12}",
                truncate(&row.state, 10),
                fmt_value(m.staff_shortage_today),
                fmt_value(m.staff_shortage_week),
                fmt_value(m.bed_utilization),
                fmt_value(m.deaths),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if !off_map.is_empty() {
        out.push_str(&format!("Off map: {}\n", off_map.join(", ")));
    }

    out
}

fn short_name(metric: Metric) -> &'static str {
    match metric {
        Metric::StaffShortageToday => "short_today",
        Metric::StaffShortageWeek => "short_week",
        Metric::BedUtilization => "bed_util",
        Metric::CovidDeaths => "deaths",
    }
}

fn separator() -> String {
    let line = format!("{:-<10} {:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", "", "");
    format!("{}\n", line.trim_end())
}

fn fmt_value(v: f64) -> String {
    format!("{v:.3}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::{DailyPoint, MetricValues, StateRow};

    fn values(v: f64) -> MetricValues {
        MetricValues::from_fn(|_| v)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    #[test]
    fn daily_table_marks_selected_metric() {
        let series = DailySeries {
            metric: Metric::CovidDeaths,
            days: vec![DailyPoint { date: date(1), medians: values(1.5) }],
        };
        let txt = format_daily_table(&series, None);
        let expected = concat!(
            "date        short_today   short_week     bed_util      *deaths\n",
            "---------- ------------ ------------ ------------ ------------\n",
            "2021-01-01        1.500        1.500        1.500        1.500\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn daily_table_elides_middle_rows() {
        let series = DailySeries {
            metric: Metric::BedUtilization,
            days: (1..=10)
                .map(|d| DailyPoint { date: date(d), medians: values(d as f64) })
                .collect(),
        };
        let txt = format_daily_table(&series, Some(4));
        assert!(txt.contains("2021-01-02"));
        assert!(!txt.contains("2021-01-03"));
        assert!(txt.contains("... 6 more day(s) ..."));
        assert!(txt.contains("2021-01-09"));
        assert!(txt.contains("2021-01-10"));
    }

    #[test]
    fn state_table_lists_off_map_codes() {
        let summary = StateSummary {
            metric: Metric::CovidDeaths,
            states: vec![
                StateRow { state: "NC".into(), medians: values(2.0), label: String::new() },
                StateRow { state: "PR".into(), medians: values(3.0), label: String::new() },
            ],
        };
        let txt = format_state_table(&summary);
        assert!(txt.contains("\nNC "));
        assert!(txt.ends_with("Off map: PR\n"));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("ABCDEFGHIJKL", 10), "ABCDEFGHI.");
        assert_eq!(truncate("NC", 10), "NC");
    }
}
