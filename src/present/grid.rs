//! Tile-grid layout of the US states.
//!
//! Terminals can't draw state outlines, so the map uses the common
//! equal-area "tile grid": every state (plus DC) gets one cell on a 12x8 grid
//! roughly matching its geographic position. Codes that are not on the grid
//! (territories, unknown codes) are reported separately by the renderers.

pub const GRID_COLS: u16 = 12;
pub const GRID_ROWS: u16 = 8;

/// `(code, column, row)` for every tile.
pub const STATE_TILES: [(&str, u16, u16); 51] = [
    ("AK", 0, 0),
    ("ME", 11, 0),
    ("VT", 10, 1),
    ("NH", 11, 1),
    ("WA", 1, 2),
    ("ID", 2, 2),
    ("MT", 3, 2),
    ("ND", 4, 2),
    ("MN", 5, 2),
    ("IL", 6, 2),
    ("WI", 7, 2),
    ("MI", 8, 2),
    ("NY", 9, 2),
    ("RI", 10, 2),
    ("MA", 11, 2),
    ("OR", 1, 3),
    ("NV", 2, 3),
    ("WY", 3, 3),
    ("SD", 4, 3),
    ("IA", 5, 3),
    ("IN", 6, 3),
    ("OH", 7, 3),
    ("PA", 8, 3),
    ("NJ", 9, 3),
    ("CT", 10, 3),
    ("CA", 1, 4),
    ("UT", 2, 4),
    ("CO", 3, 4),
    ("NE", 4, 4),
    ("MO", 5, 4),
    ("KY", 6, 4),
    ("WV", 7, 4),
    ("VA", 8, 4),
    ("MD", 9, 4),
    ("DE", 10, 4),
    ("AZ", 2, 5),
    ("NM", 3, 5),
    ("KS", 4, 5),
    ("AR", 5, 5),
    ("TN", 6, 5),
    ("NC", 7, 5),
    ("SC", 8, 5),
    ("DC", 9, 5),
    ("OK", 4, 6),
    ("LA", 5, 6),
    ("MS", 6, 6),
    ("AL", 7, 6),
    ("GA", 8, 6),
    ("HI", 0, 7),
    ("TX", 4, 7),
    ("FL", 9, 7),
];

/// Grid cell of a state code (case-insensitive), if it is on the map.
pub fn tile_position(code: &str) -> Option<(u16, u16)> {
    let code = code.trim();
    STATE_TILES
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map(|&(_, col, row)| (col, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tiles_are_unique_and_inside_grid() {
        let mut cells = HashSet::new();
        let mut codes = HashSet::new();
        for (code, col, row) in STATE_TILES {
            assert!(col < GRID_COLS && row < GRID_ROWS, "{code} outside grid");
            assert!(cells.insert((col, row)), "{code} overlaps another tile");
            assert!(codes.insert(code), "{code} listed twice");
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_skips_territories() {
        assert_eq!(tile_position("nc"), Some((7, 5)));
        assert_eq!(tile_position("PR"), None);
    }
}
