//! Small rectangular cell grids used for piece shapes.
//!
//! Shapes are stored as an array of rows so rotation can swap cells in place.
//! Every live piece owns its own `Matrix`; templates hand out fresh copies.

/// A single board / shape cell. 0 is empty, 1..=7 is a palette colour index.
pub type Cell = u8;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<Cell>>,
}

impl Matrix {
    /// Builds a matrix from rows. All rows are expected to share one length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Iterates `(x, y, value)` for every non-empty cell.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(x, v)| (x, y, *v))
        })
    }

    /// Rotates a square matrix by 90 degrees in place.
    ///
    /// Transposes, then reverses every row for `dir > 0` (clockwise) or the
    /// row order for `dir <= 0` (counter-clockwise).
    pub fn rotate(&mut self, dir: i32) {
        let n = self.rows.len();
        for y in 0..n {
            for x in 0..y {
                let tmp = self.rows[x][y];
                self.rows[x][y] = self.rows[y][x];
                self.rows[y][x] = tmp;
            }
        }
        if dir > 0 {
            self.rows.iter_mut().for_each(|row| row.reverse());
        } else {
            self.rows.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_shape() -> Matrix {
        Matrix::from_rows(vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 1, 0]])
    }

    #[test]
    fn test_rotate_clockwise() {
        let mut m = t_shape();
        m.rotate(1);
        assert_eq!(m.rows(), &[vec![0, 1, 0], vec![1, 1, 0], vec![0, 1, 0]]);
    }

    #[test]
    fn test_rotate_counter_clockwise() {
        let mut m = t_shape();
        m.rotate(-1);
        assert_eq!(m.rows(), &[vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn test_rotate_cw_then_ccw_restores() {
        let mut m = t_shape();
        m.rotate(1);
        m.rotate(-1);
        assert_eq!(m, t_shape());
    }

    #[test]
    fn test_four_rotations_identity() {
        for dir in [1, -1] {
            let mut m = t_shape();
            for _ in 0..4 {
                m.rotate(dir);
            }
            assert_eq!(m, t_shape());
        }
    }

    #[test]
    fn test_cells_skips_empty() {
        let m = t_shape();
        let cells: Vec<_> = m.cells().collect();
        assert_eq!(cells, vec![(0, 1, 1), (1, 1, 1), (2, 1, 1), (1, 2, 1)]);
    }
}
