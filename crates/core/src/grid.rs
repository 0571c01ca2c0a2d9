//! Grid: a sparse `(x, y) -> byte` store with row/column maxima for
//! constant-time wrap-around lookups during traversal.

use std::collections::{BTreeMap, BTreeSet};

/// A sparse program grid. Only non-space cells are stored; `get` on an
/// absent coordinate returns a space.
#[derive(Debug, Default)]
pub struct Grid {
    cells: BTreeMap<(i64, i64), u8>,
    /// For each occupied row `y`, the set of occupied `x` (gives `row_max_x`).
    rows: BTreeMap<i64, BTreeSet<i64>>,
    /// For each occupied column `x`, the set of occupied `y` (gives `col_max_y`).
    cols: BTreeMap<i64, BTreeSet<i64>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from program lines, dropping a leading `#!` shebang line.
    pub fn from_lines(mut lines: Vec<String>) -> Self {
        if lines.first().is_some_and(|l| l.starts_with("#!")) {
            lines.remove(0);
        }
        let mut grid = Self::new();
        for (y, line) in lines.iter().enumerate() {
            for (x, byte) in line.bytes().enumerate() {
                if byte != b' ' {
                    grid.set(x as i64, y as i64, byte);
                }
            }
        }
        grid
    }

    pub fn get(&self, x: i64, y: i64) -> u8 {
        self.cells.get(&(x, y)).copied().unwrap_or(b' ')
    }

    pub fn set(&mut self, x: i64, y: i64, byte: u8) {
        if byte == b' ' {
            if self.cells.remove(&(x, y)).is_some() {
                if let Some(row) = self.rows.get_mut(&y) {
                    row.remove(&x);
                    if row.is_empty() {
                        self.rows.remove(&y);
                    }
                }
                if let Some(col) = self.cols.get_mut(&x) {
                    col.remove(&y);
                    if col.is_empty() {
                        self.cols.remove(&x);
                    }
                }
            }
        } else {
            self.cells.insert((x, y), byte);
            self.rows.entry(y).or_default().insert(x);
            self.cols.entry(x).or_default().insert(y);
        }
    }

    /// Largest occupied `x` on row `y`, or `0` if the row is empty.
    pub fn row_max_x(&self, y: i64) -> i64 {
        self.rows
            .get(&y)
            .and_then(|xs| xs.iter().next_back())
            .copied()
            .unwrap_or(0)
    }

    /// Largest occupied `y` on column `x`, or `0` if the column is empty.
    pub fn col_max_y(&self, x: i64) -> i64 {
        self.cols
            .get(&x)
            .and_then(|ys| ys.iter().next_back())
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_on_empty_cell_is_space() {
        let grid = Grid::new();
        assert_eq!(grid.get(0, 0), b' ');
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut grid = Grid::new();
        grid.set(3, 4, b'x');
        assert_eq!(grid.get(3, 4), b'x');
    }

    #[test]
    fn setting_space_removes_the_cell() {
        let mut grid = Grid::new();
        grid.set(1, 1, b'a');
        grid.set(1, 1, b' ');
        assert_eq!(grid.get(1, 1), b' ');
        assert_eq!(grid.row_max_x(1), 0);
        assert_eq!(grid.col_max_y(1), 0);
    }

    #[test]
    fn maxima_track_occupied_cells() {
        let mut grid = Grid::new();
        grid.set(0, 0, b'a');
        grid.set(4, 0, b'b');
        grid.set(2, 0, b'c');
        assert_eq!(grid.row_max_x(0), 4);
        assert_eq!(grid.col_max_y(0), 0);
        assert_eq!(grid.col_max_y(4), 0);
    }

    #[test]
    fn from_lines_drops_shebang() {
        let grid = Grid::from_lines(vec!["#!/usr/bin/env pota".to_string(), "ab".to_string()]);
        assert_eq!(grid.get(0, 0), b'a');
        assert_eq!(grid.get(1, 0), b'b');
    }

    #[test]
    fn from_lines_does_not_store_trailing_spaces() {
        let grid = Grid::from_lines(vec!["a  ".to_string()]);
        assert_eq!(grid.row_max_x(0), 0);
    }
}
