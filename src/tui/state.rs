//! Dashboard interaction model, independent of the terminal.
//!
//! Every control change re-runs filter + aggregate over the immutable dataset
//! (`pipeline::run_with_dataset`); only the selection is mutable.

use chrono::{Days, NaiveDate};

use crate::app::pipeline::{run_with_dataset, DashboardView};
use crate::domain::{DateBounds, FilterSelection};
use crate::io::ingest::{parse_date, LoadedData};
use crate::present::MapLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    About,
    Dashboard,
}

impl Tab {
    pub const TITLES: [&'static str; 2] = ["About", "Dashboard"];

    pub fn index(self) -> usize {
        match self {
            Tab::About => 0,
            Tab::Dashboard => 1,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Tab::About => Tab::Dashboard,
            Tab::Dashboard => Tab::About,
        }
    }
}

/// Sidebar controls, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Start,
    End,
    Metric,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Start, Field::End, Field::Metric];

    pub fn is_date(self) -> bool {
        matches!(self, Field::Start | Field::End)
    }
}

pub struct DashboardState {
    loaded: LoadedData,
    selection: FilterSelection,
    view: DashboardView,
    pub tab: Tab,
    pub field: usize,
    pub editing: bool,
    pub date_input: String,
    pub selected_state: usize,
    pub status: String,
}

impl DashboardState {
    pub fn new(loaded: LoadedData, selection: FilterSelection) -> Self {
        let view = run_with_dataset(&loaded.dataset, selection);
        let mut state = Self {
            loaded,
            selection,
            view,
            tab: Tab::Dashboard,
            field: 0,
            editing: false,
            date_input: String::new(),
            selected_state: 0,
            status: String::new(),
        };
        state.status = state.summary_status();
        state
    }

    pub fn loaded(&self) -> &LoadedData {
        &self.loaded
    }

    pub fn selection(&self) -> FilterSelection {
        self.selection
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn bounds(&self) -> DateBounds {
        self.loaded.bounds
    }

    pub fn current_field(&self) -> Field {
        Field::ALL[self.field.min(Field::ALL.len() - 1)]
    }

    pub fn select_prev_field(&mut self) {
        self.field = self.field.saturating_sub(1);
    }

    pub fn select_next_field(&mut self) {
        self.field = (self.field + 1).min(Field::ALL.len() - 1);
    }

    /// Step the focused control: dates by `delta` days, the metric by one entry.
    pub fn adjust(&mut self, delta: i64) {
        match self.current_field() {
            Field::Start => {
                let start = shift(self.selection.start, delta);
                self.set_start(start);
            }
            Field::End => {
                let end = shift(self.selection.end, delta);
                self.set_end(end);
            }
            Field::Metric => {
                self.selection.metric = if delta >= 0 {
                    self.selection.metric.next()
                } else {
                    self.selection.metric.prev()
                };
            }
        }
        self.refresh();
    }

    /// Start typing a date for the focused date control.
    pub fn begin_edit(&mut self) {
        let field = self.current_field();
        if !field.is_date() {
            return;
        }
        self.date_input = match field {
            Field::Start => self.selection.start.to_string(),
            _ => self.selection.end.to_string(),
        };
        self.editing = true;
        self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.status = "Date edit canceled.".to_string();
    }

    pub fn push_date_char(&mut self, c: char) {
        if (c.is_ascii_digit() || c == '-' || c == '/') && self.date_input.len() < 10 {
            self.date_input.push(c);
        }
    }

    pub fn pop_date_char(&mut self) {
        self.date_input.pop();
    }

    pub fn apply_date_input(&mut self) {
        self.editing = false;
        let trimmed = self.date_input.trim().to_string();
        let Some(date) = parse_date(&trimmed) else {
            self.status = format!("Invalid date '{trimmed}'");
            return;
        };
        match self.current_field() {
            Field::Start => self.set_start(date),
            Field::End => self.set_end(date),
            Field::Metric => return,
        }
        self.refresh();
    }

    fn set_start(&mut self, date: NaiveDate) {
        self.selection.start = self.bounds().clamp(date).min(self.selection.end);
    }

    fn set_end(&mut self, date: NaiveDate) {
        self.selection.end = self.bounds().clamp(date).max(self.selection.start);
    }

    /// Move the map tooltip to the next/previous state with data.
    pub fn cycle_state(&mut self, delta: isize) {
        let n = self.view.map.locations.len();
        if n == 0 {
            return;
        }
        let cur = self.selected_state.min(n - 1) as isize;
        self.selected_state = (cur + delta).rem_euclid(n as isize) as usize;
    }

    pub fn selected_location(&self) -> Option<&MapLocation> {
        self.view.map.locations.get(self.selected_state)
    }

    /// Swap in a freshly loaded dataset, keeping the selection where it still fits.
    pub fn replace_data(&mut self, loaded: LoadedData) {
        let bounds = loaded.bounds;
        self.selection.start = bounds.clamp(self.selection.start);
        self.selection.end = bounds.clamp(self.selection.end).max(self.selection.start);
        self.loaded = loaded;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.view = run_with_dataset(&self.loaded.dataset, self.selection);
        let n = self.view.map.locations.len();
        self.selected_state = self.selected_state.min(n.saturating_sub(1));
        self.status = self.summary_status();
        tracing::debug!(
            start = %self.selection.start,
            end = %self.selection.end,
            metric = self.selection.metric.column_name(),
            records = self.view.records_in_range,
            "view refreshed"
        );
    }

    fn summary_status(&self) -> String {
        if self.view.is_empty() {
            "No records in the selected range.".to_string()
        } else {
            format!(
                "{} records | {} days | {} states",
                self.view.records_in_range,
                self.view.daily.len(),
                self.view.states.len()
            )
        }
    }
}

fn shift(date: NaiveDate, delta: i64) -> NaiveDate {
    let days = Days::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dataset, Metric, MetricValues, Record};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    fn loaded(days: &[u32]) -> LoadedData {
        let dataset: Dataset = days
            .iter()
            .flat_map(|&d| {
                ["NC", "SC"].into_iter().map(move |s| Record {
                    date: date(d),
                    state: s.to_string(),
                    values: MetricValues::from_fn(|_| d as f64),
                })
            })
            .collect();
        let bounds = dataset.date_bounds().unwrap();
        LoadedData {
            dataset,
            bounds,
            metrics: Metric::ALL.to_vec(),
            rows_read: days.len() * 2,
            rows_dropped: 0,
        }
    }

    fn state() -> DashboardState {
        let data = loaded(&[1, 2, 3, 4, 5]);
        let selection = FilterSelection {
            start: data.bounds.min,
            end: data.bounds.max,
            metric: Metric::CovidDeaths,
        };
        DashboardState::new(data, selection)
    }

    #[test]
    fn start_never_passes_end_or_bounds() {
        let mut s = state();
        s.adjust(-10);
        assert_eq!(s.selection().start, date(1));

        s.adjust(10);
        assert_eq!(s.selection().start, date(5));
        assert_eq!(s.view().records_in_range, 2);

        s.select_next_field();
        s.adjust(-3);
        assert_eq!(s.selection().end, date(5));
    }

    #[test]
    fn metric_control_cycles_and_rebuilds_view() {
        let mut s = state();
        s.field = 2;
        s.adjust(1);
        assert_eq!(s.selection().metric, Metric::StaffShortageToday);
        assert_eq!(s.view().line.y_label, "Critical Staffing Shortage Today Yes");
        s.adjust(-1);
        assert_eq!(s.selection().metric, Metric::CovidDeaths);
    }

    #[test]
    fn typed_dates_are_parsed_and_clamped() {
        let mut s = state();
        s.field = 1;
        s.begin_edit();
        assert!(s.editing);
        assert_eq!(s.date_input, "2021-01-05");

        s.date_input.clear();
        for c in "2021-01-03x".chars() {
            s.push_date_char(c);
        }
        s.apply_date_input();
        assert!(!s.editing);
        assert_eq!(s.selection().end, date(3));
        assert_eq!(s.view().daily.len(), 3);

        s.begin_edit();
        s.date_input = "not a date".to_string();
        s.apply_date_input();
        assert_eq!(s.selection().end, date(3));
        assert!(s.status.starts_with("Invalid date"));
    }

    #[test]
    fn metric_field_has_no_date_editor() {
        let mut s = state();
        s.field = 2;
        s.begin_edit();
        assert!(!s.editing);
    }

    #[test]
    fn state_cursor_wraps() {
        let mut s = state();
        assert_eq!(s.selected_location().unwrap().code, "NC");
        s.cycle_state(1);
        assert_eq!(s.selected_location().unwrap().code, "SC");
        s.cycle_state(1);
        assert_eq!(s.selected_location().unwrap().code, "NC");
        s.cycle_state(-1);
        assert_eq!(s.selected_location().unwrap().code, "SC");
    }

    #[test]
    fn reload_clamps_selection_into_new_bounds() {
        let mut s = state();
        s.replace_data(loaded(&[2, 3]));
        assert_eq!(s.selection().start, date(2));
        assert_eq!(s.selection().end, date(3));
        assert_eq!(s.view().records_in_range, 4);
    }
}
