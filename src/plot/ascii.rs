//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - daily medians: `o`
//! - segments joining consecutive days: `-`

use chrono::NaiveDate;

use crate::present::LineChartFrame;

/// Render the line chart frame on a `width` x `height` character grid.
pub fn render_line_chart(frame: &LineChartFrame, width: usize, height: usize) -> String {
    let mut out = String::new();
    out.push_str(&frame.title);
    out.push('\n');

    let Some((first, last)) = frame.x_range() else {
        out.push_str("(no data in the selected range)\n");
        return out;
    };

    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = x_span(first, last);
    let (y_min, y_max) = match frame.y_range() {
        Some((lo, hi)) if hi > lo => pad_range(lo, hi, 0.05),
        Some((lo, _)) => (lo - 1.0, lo + 1.0),
        None => (0.0, 1.0),
    };

    out.push_str(&format!(
        "x: {} [{first}, {last}] | y: {} [{y_min:.2}, {y_max:.2}]\n",
        frame.x_label, frame.y_label
    ));

    let mut grid = vec![vec![' '; width]; height];

    let cells: Vec<(usize, usize)> = frame
        .points
        .iter()
        .filter(|(_, y)| y.is_finite())
        .map(|&(date, y)| {
            let t = (date - first).num_days() as f64;
            (
                map_x(t, t_min, t_max, width),
                map_y(y, y_min, y_max, height),
            )
        })
        .collect();

    // Segments first so the markers overlay them.
    for pair in cells.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &cells {
        grid[y][x] = 'o';
    }

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Day offsets spanned by the series; a single day is widened so it plots centered.
fn x_span(first: NaiveDate, last: NaiveDate) -> (f64, f64) {
    let days = (last - first).num_days() as f64;
    if days > 0.0 { (0.0, days) } else { (-1.0, 1.0) }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    fn frame(points: Vec<(NaiveDate, f64)>) -> LineChartFrame {
        LineChartFrame {
            title: "Distribution of Deaths Covid across time".to_string(),
            x_label: "Dates".to_string(),
            y_label: "Deaths Covid".to_string(),
            points,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let f = frame(vec![(date(1), 0.0), (date(5), 2.0), (date(10), 9.0)]);
        let txt = render_line_chart(&f, 12, 5);
        let expected = concat!(
            "Distribution of Deaths Covid across time\n",
            "x: Dates [2021-01-01, 2021-01-10] | y: Deaths Covid [-0.45, 9.45]\n",
            "          -o\n",
            "        --  \n",
            "      --    \n",
            "   --o      \n",
            "o--         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_frame_prints_placeholder() {
        let txt = render_line_chart(&frame(Vec::new()), 40, 10);
        assert!(txt.ends_with("(no data in the selected range)\n"));
    }

    #[test]
    fn single_point_is_centered() {
        let txt = render_line_chart(&frame(vec![(date(3), 7.0)]), 11, 5);
        let rows: Vec<&str> = txt.lines().skip(2).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2], "     o     ");
    }
}
