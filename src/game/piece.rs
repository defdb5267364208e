//! Tetromino templates and the falling player piece.

use super::board::{Board, COLS};
use super::matrix::Matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tetromino {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::J,
        Tetromino::L,
        Tetromino::O,
        Tetromino::S,
        Tetromino::T,
        Tetromino::Z,
    ];

    /// Palette index written into the board for this shape.
    pub fn color_index(self) -> u8 {
        match self {
            Tetromino::T => 1,
            Tetromino::O => 2,
            Tetromino::L => 3,
            Tetromino::J => 4,
            Tetromino::I => 5,
            Tetromino::S => 6,
            Tetromino::Z => 7,
        }
    }

    /// A fresh, owned copy of the spawn-orientation template.
    pub fn matrix(self) -> Matrix {
        let c = self.color_index();
        let rows: Vec<Vec<u8>> = match self {
            Tetromino::I => vec![
                vec![0, c, 0, 0],
                vec![0, c, 0, 0],
                vec![0, c, 0, 0],
                vec![0, c, 0, 0],
            ],
            Tetromino::J => vec![vec![0, c, 0], vec![0, c, 0], vec![c, c, 0]],
            Tetromino::L => vec![vec![0, c, 0], vec![0, c, 0], vec![0, c, c]],
            Tetromino::O => vec![vec![c, c], vec![c, c]],
            Tetromino::S => vec![vec![0, c, c], vec![c, c, 0], vec![0, 0, 0]],
            Tetromino::T => vec![vec![0, 0, 0], vec![c, c, c], vec![0, c, 0]],
            Tetromino::Z => vec![vec![c, c, 0], vec![0, c, c], vec![0, 0, 0]],
        };
        Matrix::from_rows(rows)
    }
}

/// The currently falling piece plus the running tallies shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub matrix: Matrix,
    pub pos: (i32, i32),
    pub score: u32,
    pub lines: u32,
}

impl Player {
    pub fn new(matrix: Matrix) -> Self {
        let mut p = Self { matrix, pos: (0, 0), score: 0, lines: 0 };
        p.center_at_top();
        p
    }

    /// Moves the piece to the top row, horizontally centred.
    pub fn center_at_top(&mut self) {
        self.pos = ((COLS / 2) as i32 - (self.matrix.width() / 2) as i32, 0);
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collide(&self.matrix, self.pos)
    }

    /// Shifts horizontally; a colliding result is rejected. Returns whether the move stuck.
    pub fn shift(&mut self, board: &Board, dx: i32) -> bool {
        self.pos.0 += dx;
        if self.collides(board) {
            self.pos.0 -= dx;
            return false;
        }
        true
    }

    /// Rotates in place, searching sideways kicks on collision.
    ///
    /// Kick offsets grow as 1, -2, 3, -4 ... applied cumulatively, so the piece
    /// visits x+1, x-1, x+2, x-2 and so on. Once the offset exceeds the shape
    /// width the rotation is undone and the original column restored.
    pub fn rotate(&mut self, board: &Board, dir: i32) -> bool {
        let start_x = self.pos.0;
        let mut offset: i32 = 1;
        self.matrix.rotate(dir);
        while self.collides(board) {
            self.pos.0 += offset;
            offset = -(offset + if offset > 0 { 1 } else { -1 });
            if offset > self.matrix.width() as i32 {
                self.matrix.rotate(-dir);
                self.pos.0 = start_x;
                return false;
            }
        }
        true
    }
}
