//! The persistent playfield: locked cells plus the pure grid algorithms
//! (collision, merge, sweep) that act on it.

use std::fmt;

use super::matrix::{Cell, Matrix};

pub const ROWS: usize = 20;
pub const COLS: usize = 10;

/// Points for the first row of a sweep pass; each further row doubles the run value.
const ROW_POINTS: u32 = 10;

/// Outcome of one sweep pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepResult {
    pub rows: u32,
    pub points: u32,
}

impl fmt::Display for SweepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.rows == 1 { "row" } else { "rows" };
        write!(f, "{} {noun} for {} points", self.rows, self.points)
    }
}

/// Fixed ROWS x COLS grid, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: Vec<[Cell; COLS]>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self { rows: vec![[0; COLS]; ROWS] }
    }

    pub fn rows(&self) -> &[[Cell; COLS]] {
        &self.rows
    }

    /// Cell at `(x, y)`; `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(|row| *row = [0; COLS]);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|c| *c == 0))
    }

    /// True when any filled cell of `shape` placed at `(ox, oy)` lands outside
    /// the side walls, below the floor, or on a locked cell. Cells above the
    /// top edge are allowed.
    pub fn collide(&self, shape: &Matrix, (ox, oy): (i32, i32)) -> bool {
        shape.cells().any(|(x, y, _)| {
            let bx = ox + x as i32;
            let by = oy + y as i32;
            if bx < 0 || bx >= COLS as i32 || by >= ROWS as i32 {
                return true;
            }
            by >= 0 && self.rows[by as usize][bx as usize] != 0
        })
    }

    /// Writes the filled cells of `shape` into the board. Cells above the top
    /// edge are dropped.
    pub fn merge(&mut self, shape: &Matrix, (ox, oy): (i32, i32)) {
        for (x, y, v) in shape.cells() {
            let bx = ox + x as i32;
            let by = oy + y as i32;
            if (0..COLS as i32).contains(&bx) && (0..ROWS as i32).contains(&by) {
                self.rows[by as usize][bx as usize] = v;
            }
        }
    }

    /// Removes every full row, inserting empty rows at the top.
    ///
    /// Rows are scanned bottom-up and the same index is re-checked after a
    /// removal. Each cleared row scores the current run value, which starts at
    /// `ROW_POINTS` and doubles after every row of the pass.
    pub fn sweep(&mut self) -> SweepResult {
        let mut result = SweepResult::default();
        let mut run = 1;
        let mut y = ROWS;
        while y > 0 {
            let idx = y - 1;
            if self.rows[idx].iter().all(|c| *c != 0) {
                self.rows.remove(idx);
                self.rows.insert(0, [0; COLS]);
                result.rows += 1;
                result.points += run * ROW_POINTS;
                run *= 2;
                continue;
            }
            y -= 1;
        }
        result
    }
}
