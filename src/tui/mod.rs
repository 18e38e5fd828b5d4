//! Ratatui-based terminal UI.
//!
//! Layout follows the dashboard page: a header with title and credits, an
//! "About" / "Dashboard" tab bar, a settings sidebar (date range + metric),
//! and on the dashboard tab the daily line chart above the state map.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Terminal,
};

use crate::app::pipeline::resolve_selection;
use crate::config::DashboardConfig;
use crate::data::animation::{fetch_animation, DEFAULT_TIMEOUT};
use crate::error::AppError;
use crate::io::download::save_report;
use crate::io::ingest::load;

mod map;
mod plotters_chart;
mod spinner;
mod state;

use map::StateMap;
use plotters_chart::{date_from_day_number, ChartSeries, TimeSeriesChart};
use spinner::Spinner;
use state::{DashboardState, Field, Tab};

const TITLE: &str = "Impact of Covid on hospitals";
const SUBTITLE: &str = "INLS641: Visual Analytics";
const TEAM: &str = "Team: Viola Goodacre, Vibhor Gupta";

/// Where `s` saves the report, relative to the working directory.
const REPORT_DEST: &str = "hdash-report.pdf";

const NOTES: [&str; 2] = [
    "For the time series the data is aggregated at day level and the median values are presented.",
    "For the map the data is aggregated at state level and the median values are presented.",
];

const ABOUT: &str = "This dashboard looks at how Covid-19 affected US hospitals, using \
state-level daily reports of critical staffing shortages (today and anticipated \
within a week), inpatient bed utilization by Covid patients and Covid deaths. \
Pick a date range and a metric in the sidebar: the Dashboard tab shows the daily \
median across reporting states and a map of per-state medians. Findings and \
methodology are in the full report.";

/// Start the TUI.
///
/// Data is loaded (and the animation fetched) before the terminal is taken
/// over, so load errors print like any other CLI error.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    let loaded = load(&config.data_path)?;
    let selection = resolve_selection(
        &loaded.bounds,
        config.start,
        config.end,
        config.metric.as_deref(),
    )?;
    let spinner = config
        .animation_url
        .as_deref()
        .and_then(|url| fetch_animation(url, DEFAULT_TIMEOUT))
        .map(|asset| Spinner::new(&asset));

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App {
        state: DashboardState::new(loaded, selection),
        data_path: config.data_path,
        report_path: config.report_path,
        spinner,
    };
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    state: DashboardState,
    data_path: PathBuf,
    report_path: PathBuf,
    spinner: Option<Spinner>,
}

impl App {
    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let tick = self
            .spinner
            .as_ref()
            .map(|s| s.interval().min(Duration::from_millis(100)))
            .unwrap_or(Duration::from_millis(100));

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(tick).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                // Keep the spinner moving.
                needs_redraw = self.spinner.is_some();
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let state = &mut self.state;
        if state.editing {
            match code {
                KeyCode::Esc => state.cancel_edit(),
                KeyCode::Enter => state.apply_date_input(),
                KeyCode::Backspace => state.pop_date_char(),
                KeyCode::Char(c) => state.push_date_char(c),
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => state.tab = state.tab.toggle(),
            KeyCode::Up => state.select_prev_field(),
            KeyCode::Down => state.select_next_field(),
            KeyCode::Left => state.adjust(-1),
            KeyCode::Right => state.adjust(1),
            KeyCode::PageDown => state.adjust(-30),
            KeyCode::PageUp => state.adjust(30),
            KeyCode::Enter => state.begin_edit(),
            KeyCode::Char('[') => state.cycle_state(-1),
            KeyCode::Char(']') => state.cycle_state(1),
            KeyCode::Char('s') => self.save_report(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
        false
    }

    fn save_report(&mut self) {
        let dest = PathBuf::from(REPORT_DEST);
        self.state.status = match save_report(&self.report_path, &dest) {
            Ok(bytes) => format!("Saved report to {} ({bytes} bytes)", dest.display()),
            Err(err) => {
                tracing::warn!(%err, "report download failed");
                err.to_string()
            }
        };
    }

    fn reload(&mut self) {
        match load(&self.data_path) {
            Ok(loaded) => {
                self.state.replace_data(loaded);
                self.state.status = format!("Reloaded {}", self.data_path.display());
            }
            Err(err) => {
                tracing::warn!(%err, "reload failed, keeping previous data");
                self.state.status = format!("Reload failed: {err}");
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_tabs(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut title = Vec::new();
        if let Some(spinner) = &self.spinner {
            title.push(Span::styled(
                format!("{} ", spinner.glyph()),
                Style::default().fg(Color::Cyan),
            ));
        }
        title.push(Span::styled(
            TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

        let lines = vec![
            Line::from(title),
            Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                TEAM,
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let tabs = Tabs::new(Tab::TITLES.to_vec())
            .select(self.state.tab.index())
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(tabs, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(area);

        self.draw_settings(frame, chunks[0]);
        match self.state.tab {
            Tab::About => self.draw_about(frame, chunks[1]),
            Tab::Dashboard => self.draw_dashboard(frame, chunks[1]),
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let s = &self.state;
        let selection = s.selection();
        let bounds = s.bounds();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(area);

        let value_for = |field: Field| match field {
            Field::Start if s.editing && s.current_field() == field => format!("Start: {}_", s.date_input),
            Field::End if s.editing && s.current_field() == field => format!("End:   {}_", s.date_input),
            Field::Start => format!("Start: {}", selection.start),
            Field::End => format!("End:   {}", selection.end),
            Field::Metric => "Metric:".to_string(),
        };

        let mut items: Vec<ListItem> = Field::ALL.iter().map(|&f| ListItem::new(value_for(f))).collect();
        items.push(ListItem::new(format!("  {}", selection.metric.display_name())));

        let list = List::new(items)
            .block(Block::default().title("Select the date range").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut list_state = ratatui::widgets::ListState::default();
        list_state.select(Some(s.field));
        frame.render_stateful_widget(list, chunks[0], &mut list_state);

        let loaded = s.loaded();
        let mut info = vec![
            Line::from(format!("Data: {}", self.data_path.display())),
            Line::from(format!("Dates: {} .. {}", bounds.min, bounds.max)),
            Line::from(format!(
                "Rows: {} kept, {} dropped",
                loaded.dataset.len(),
                loaded.rows_dropped
            )),
            Line::from(""),
            Line::from(Span::styled("Metrics:", Style::default().add_modifier(Modifier::BOLD))),
        ];
        for name in loaded.metric_names() {
            let style = if name == selection.metric.display_name() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            info.push(Line::from(Span::styled(format!("- {name}"), style)));
        }

        let p = Paragraph::new(Text::from(info))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Dataset").borders(Borders::ALL));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_about(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(ABOUT),
            Line::from(""),
            Line::from(vec![
                Span::raw("Full report: "),
                Span::styled(
                    self.report_path.display().to_string(),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(". Press s to save a copy as {REPORT_DEST}.")),
            ]),
        ];

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("About").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_dashboard(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Percentage(45),
                Constraint::Min(0),
            ])
            .split(area);

        let mut notes = vec![Line::from(Span::styled(
            "Notes:",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        notes.extend(NOTES.iter().map(|n| Line::from(format!("• {n}"))));
        frame.render_widget(Paragraph::new(Text::from(notes)).wrap(Wrap { trim: true }), chunks[0]);

        self.draw_chart(frame, chunks[1]);
        self.draw_map(frame, chunks[2]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = &self.state.view().line;
        let block = Block::default().title(line.title.as_str()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(series) = ChartSeries::from_frame(line) else {
            let msg = Paragraph::new("No data in the selected range.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        let widget = TimeSeriesChart {
            points: &series.points,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: &line.x_label,
            y_label: &line.y_label,
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_value,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &series, &line.x_label, &line.y_label);
        }
    }

    fn draw_map(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let map = &self.state.view().map;
        let block = Block::default().title(map.title.as_str()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(inner);

        let selected = self.state.selected_location();
        frame.render_widget(
            StateMap {
                frame: map,
                selected: selected.map(|l| l.code.as_str()),
            },
            chunks[0],
        );

        let mut lines = vec![Line::from(Span::styled(
            map.colorbar_title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        match selected {
            Some(loc) => {
                lines.push(Line::from(""));
                lines.extend(loc.label.lines().map(|l| Line::from(l.to_string())));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("value: {:.2}", loc.value),
                    Style::default().fg(Color::Cyan),
                )));
            }
            None => lines.push(Line::from("No states in range.")),
        }

        let off_map: Vec<&str> = map
            .locations
            .iter()
            .filter(|l| crate::present::tile_position(&l.code).is_none())
            .map(|l| l.code.as_str())
            .collect();
        if !off_map.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Off map: {}", off_map.join(", ")),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("[ / ] state").borders(Borders::LEFT));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab about/dashboard  ↑/↓ select  ←/→ adjust  Enter edit date  [/] state  s save report  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.state.status.as_str(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn fmt_axis_date(v: f64) -> String {
    date_from_day_number(v)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_axis_value(v: f64) -> String {
    if v.abs() >= 100.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 6,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    series: &ChartSeries,
    x_label: &str,
    y_label: &str,
) {
    let ticks = 4usize;
    let style = Style::default().fg(Color::Gray);
    let [x0, x1] = series.x_bounds;
    let [y0, y1] = series.y_bounds;

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = fmt_axis_date(x0 + u * (x1 - x0));
        let label_len = label.len() as u16;
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let start = x
            .saturating_sub(label_len / 2)
            .min((inner.x + inner.width).saturating_sub(label_len));
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = fmt_axis_value(y0 + u * (y1 - y0));
        let label_len = label.len() as u16;
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(
            Paragraph::new(x_label.to_string())
                .alignment(Alignment::Center)
                .style(style),
            x_rect,
        );
    }

    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.saturating_sub(insets.right),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(y_label.to_string()).style(style.add_modifier(Modifier::BOLD)),
        y_rect,
    );
}
