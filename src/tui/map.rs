//! Tile-grid choropleth widget.
//!
//! Each state is one cell of the grid in `present::grid`, filled with its
//! Blues color. The last row is a color bar spanning the value range.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::present::{blues, MapFrame, Rgb, GRID_COLS, GRID_ROWS, STATE_TILES};

/// Cell fill for states without data in the current range.
const NO_DATA: Color = Color::DarkGray;

pub struct StateMap<'a> {
    pub frame: &'a MapFrame,
    /// Code of the state whose tooltip is shown.
    pub selected: Option<&'a str>,
}

impl Widget for StateMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < GRID_COLS * 3 || area.height < GRID_ROWS + 1 {
            buf.set_string(
                area.x,
                area.y,
                "Map area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let grid_height = area.height - 1;
        let cell_w = (area.width / GRID_COLS).min(8);
        let cell_h = (grid_height / GRID_ROWS).min(3);
        let x_off = area.x + (area.width - cell_w * GRID_COLS) / 2;
        let y_off = area.y + (grid_height - cell_h * GRID_ROWS) / 2;

        for (code, col, row) in STATE_TILES {
            let cell = Rect {
                x: x_off + col * cell_w,
                y: y_off + row * cell_h,
                // One column of gap keeps neighbouring tiles apart.
                width: cell_w.saturating_sub(1).max(2),
                height: cell_h,
            };

            let fill = self
                .frame
                .get(code)
                .and_then(|loc| self.frame.normalized(loc.value))
                .map(blues);

            let mut style = match fill {
                Some(rgb) => Style::default().bg(to_color(rgb)).fg(text_color(rgb)),
                None => Style::default().bg(NO_DATA).fg(Color::Gray),
            };
            if self.selected == Some(code) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }

            buf.set_style(cell, style);
            let label_x = cell.x + cell.width.saturating_sub(code.len() as u16) / 2;
            let label_y = cell.y + cell.height / 2;
            buf.set_string(label_x, label_y, code, style);
        }

        self.render_colorbar(
            Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            },
            buf,
        );
    }
}

impl StateMap<'_> {
    fn render_colorbar(&self, area: Rect, buf: &mut Buffer) {
        let label = Style::default().fg(Color::Gray);
        let Some((lo, hi)) = self.frame.value_range() else {
            buf.set_string(area.x, area.y, "no data", label);
            return;
        };

        let lo_txt = format!("{lo:.2} ");
        let hi_txt = format!(" {hi:.2}");
        let steps: u16 = 18;
        let needed = lo_txt.len() as u16 + steps + hi_txt.len() as u16;
        if area.width < needed {
            return;
        }

        let mut x = area.x + (area.width - needed) / 2;
        buf.set_string(x, area.y, &lo_txt, label);
        x += lo_txt.len() as u16;
        for i in 0..steps {
            let t = i as f64 / (steps - 1) as f64;
            buf.set_string(x + i, area.y, " ", Style::default().bg(to_color(blues(t))));
        }
        x += steps;
        buf.set_string(x, area.y, &hi_txt, label);
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn text_color(rgb: Rgb) -> Color {
    if rgb.luminance() > 0.5 {
        Color::Black
    } else {
        Color::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::MapLocation;

    fn frame() -> MapFrame {
        let loc = |code: &str, value: f64| MapLocation {
            code: code.to_string(),
            value,
            label: code.to_string(),
        };
        MapFrame {
            title: "Distribution of Deaths Covid across the US".to_string(),
            colorbar_title: "Deaths Covid".to_string(),
            location_mode: "USA-states".to_string(),
            scope: "usa".to_string(),
            colorscale: "Blues".to_string(),
            locations: vec![loc("NC", 1.0), loc("TX", 9.0)],
        }
    }

    fn cell_of(buf: &Buffer, code: &str) -> (u16, u16) {
        let area = buf.area;
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width.saturating_sub(1) {
                if buf[(x, y)].symbol() == &code[..1] && buf[(x + 1, y)].symbol() == &code[1..] {
                    return (x, y);
                }
            }
        }
        panic!("{code} not drawn");
    }

    #[test]
    fn colors_follow_value_rank() {
        let f = frame();
        let area = Rect::new(0, 0, 60, 17);
        let mut buf = Buffer::empty(area);
        StateMap { frame: &f, selected: Some("NC") }.render(area, &mut buf);

        let tx = cell_of(&buf, "TX");
        assert_eq!(buf[tx].bg, to_color(blues(1.0)));
        assert_eq!(buf[tx].fg, Color::White);

        let nc = cell_of(&buf, "NC");
        assert_eq!(buf[nc].bg, to_color(blues(0.0)));
        assert!(buf[nc].modifier.contains(Modifier::REVERSED));

        let ca = cell_of(&buf, "CA");
        assert_eq!(buf[ca].bg, NO_DATA);
    }

    #[test]
    fn tiny_area_shows_hint() {
        let f = frame();
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        StateMap { frame: &f, selected: None }.render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "M");
    }
}
