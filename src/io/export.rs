//! Export a dashboard view to JSON and CSV.
//!
//! The JSON file is the full `DashboardView` (selection, aggregates and both
//! chart frames), ready for any external charting tool. The CSV files are the
//! two aggregate tables, easy to consume in spreadsheets.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::app::pipeline::DashboardView;
use crate::domain::{DailySeries, Metric, StateSummary};
use crate::error::ExportError;

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ExportError::Create {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the whole view as pretty-printed JSON.
pub fn write_view_json(path: &Path, view: &DashboardView) -> Result<(), ExportError> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, view)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// One row per date: the date, then the median of every metric.
pub fn write_daily_csv(path: &Path, series: &DailySeries) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(create(path)?);

    let mut header = vec!["date".to_string()];
    header.extend(Metric::ALL.iter().map(|m| m.column_name().to_string()));
    writer.write_record(&header)?;

    for day in &series.days {
        let mut row = vec![day.date.to_string()];
        row.extend(Metric::ALL.iter().map(|m| day.medians.get(*m).to_string()));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// One row per state: the code, the median of every metric, then the label.
pub fn write_states_csv(path: &Path, summary: &StateSummary) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(create(path)?);

    let mut header = vec!["state".to_string()];
    header.extend(Metric::ALL.iter().map(|m| m.column_name().to_string()));
    header.push("text".to_string());
    writer.write_record(&header)?;

    for row in &summary.states {
        let mut record = vec![row.state.clone()];
        record.extend(Metric::ALL.iter().map(|m| row.medians.get(*m).to_string()));
        record.push(row.label.clone());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::app::pipeline::run_with_dataset;
    use crate::domain::{Dataset, FilterSelection, MetricValues, Record};

    fn view() -> DashboardView {
        let d = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let ds: Dataset = vec![Record {
            date: d,
            state: "NC".to_string(),
            values: MetricValues {
                staff_shortage_today: 2.0,
                staff_shortage_week: 5.0,
                bed_utilization: 0.1234,
                deaths: 10.0,
            },
        }]
        .into_iter()
        .collect();
        run_with_dataset(
            &ds,
            FilterSelection {
                start: d,
                end: d,
                metric: Metric::CovidDeaths,
            },
        )
    }

    #[test]
    fn json_export_contains_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        write_view_json(&path, &view()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["selection"]["metric"], "deaths_covid");
        assert_eq!(value["line"]["x_label"], "Dates");
        assert_eq!(value["map"]["locations"][0]["code"], "NC");
        assert_eq!(value["map"]["locations"][0]["value"], 10.0);
    }

    #[test]
    fn csv_exports_quote_multiline_labels() {
        let dir = tempfile::tempdir().unwrap();
        let daily = dir.path().join("daily.csv");
        let states = dir.path().join("states.csv");
        let v = view();
        write_daily_csv(&daily, &v.daily).unwrap();
        write_states_csv(&states, &v.states).unwrap();

        let daily_txt = std::fs::read_to_string(&daily).unwrap();
        assert!(daily_txt.starts_with("date,critical_staffing_shortage_today_yes,"));
        assert!(daily_txt.contains("2021-01-01,2,5,0.1234,10"));

        let mut reader = csv::Reader::from_path(&states).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "NC");
        assert!(row[5].starts_with("NC\nBed Utilization 0.12\n"));
    }
}
