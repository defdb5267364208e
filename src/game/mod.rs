//! Falling-block simulation: board, active piece, lookahead, score and the
//! time-driven drop. Pure Rust with no DOM access; the `web` module drives it
//! from `requestAnimationFrame` and keyboard callbacks.

pub mod board;
pub mod matrix;
pub mod piece;
pub mod spawner;

use crate::input::Command;
use board::{Board, SweepResult};
use matrix::Matrix;
use piece::Player;
use spawner::Randomizer;

/// Default automatic drop period in milliseconds.
pub const DEFAULT_DROP_INTERVAL_MS: f64 = 1000.0;

/// Things the presentation layer reacts to. Drained once per frame / input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { score: u32, lines: u32 },
    RowsCleared(SweepResult),
    GameOver { score: u32 },
}

pub struct Game {
    board: Board,
    player: Player,
    next: Matrix,
    rng: Randomizer,
    paused: bool,
    game_over: bool,
    drop_counter: f64,
    drop_interval: f64,
    // None until the first tick after a reset so the first frame has dt = 0
    last_time: Option<f64>,
    pieces_locked: u32,
    events: Vec<GameEvent>,
}

impl Game {
    /// The first two pieces rolled from `rng` become the active piece and the
    /// lookahead.
    pub fn new(rng: Randomizer, drop_interval: f64) -> Self {
        let mut game = Self {
            board: Board::new(),
            player: Player::new(Matrix::default()),
            next: Matrix::default(),
            rng,
            paused: false,
            game_over: false,
            drop_counter: 0.0,
            drop_interval,
            last_time: None,
            pieces_locked: 0,
            events: Vec::new(),
        };
        game.reset();
        game
    }

    /// Starts over: empty board, zero score, fresh piece and lookahead, unpaused.
    pub fn reset(&mut self) {
        self.board.clear();
        self.player.score = 0;
        self.player.lines = 0;
        self.paused = false;
        self.game_over = false;
        self.drop_counter = 0.0;
        self.last_time = None;
        self.pieces_locked = 0;
        self.events.clear();
        self.next = self.rng.next_matrix();
        self.spawn();
        self.push_score();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn next(&self) -> &Matrix {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn lines(&self) -> u32 {
        self.player.lines
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn drop_interval(&self) -> f64 {
        self.drop_interval
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Frame callback entry. `now` is the frame timestamp in milliseconds.
    /// Returns true when the frame should be redrawn.
    pub fn tick(&mut self, now: f64) -> bool {
        let dt = self.last_time.map(|last| now - last).unwrap_or(0.0);
        self.last_time = Some(now);
        self.advance(dt)
    }

    /// Accumulates `dt` ms of falling time and performs the automatic drop
    /// once the counter passes the drop interval.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        self.drop_counter += dt.max(0.0);
        if self.drop_counter > self.drop_interval {
            self.soft_drop();
        }
        true
    }

    pub fn apply(&mut self, cmd: Command) {
        if self.game_over {
            return;
        }
        if self.paused && cmd != Command::TogglePause {
            return;
        }
        match cmd {
            Command::MoveLeft => self.move_piece(-1),
            Command::MoveRight => self.move_piece(1),
            Command::SoftDrop => self.soft_drop(),
            Command::RotateCw => self.rotate(1),
            Command::RotateCcw => self.rotate(-1),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    pub fn move_piece(&mut self, dir: i32) {
        self.player.shift(&self.board, dir);
    }

    pub fn rotate(&mut self, dir: i32) {
        self.player.rotate(&self.board, dir);
    }

    /// One row down; locks the piece when it cannot descend.
    pub fn soft_drop(&mut self) {
        if self.game_over {
            return;
        }
        self.player.pos.1 += 1;
        if self.player.collides(&self.board) {
            self.player.pos.1 -= 1;
            self.lock();
        }
        self.drop_counter = 0.0;
    }

    /// Straight to the lowest free position, then lock.
    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        while !self.player.collides(&self.board) {
            self.player.pos.1 += 1;
        }
        self.player.pos.1 -= 1;
        self.lock();
        self.drop_counter = 0.0;
    }

    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "paused" } else { "resumed" });
    }

    fn lock(&mut self) {
        self.board.merge(&self.player.matrix, self.player.pos);
        self.pieces_locked += 1;
        let swept = self.board.sweep();
        if swept.rows > 0 {
            self.player.score += swept.points;
            self.player.lines += swept.rows;
            log::debug!("cleared {swept}");
            self.events.push(GameEvent::RowsCleared(swept));
        }
        self.push_score();
        self.spawn();
    }

    /// Promotes the lookahead to the active piece and rolls a new lookahead.
    fn spawn(&mut self) {
        let fresh = self.rng.next_matrix();
        self.player.matrix = std::mem::replace(&mut self.next, fresh);
        self.player.center_at_top();
        if self.player.collides(&self.board) {
            self.game_over = true;
            log::info!("game over with score {}", self.player.score);
            self.events.push(GameEvent::GameOver { score: self.player.score });
        }
    }

    fn push_score(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            score: self.player.score,
            lines: self.player.lines,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::board::{COLS, ROWS};
    use super::*;

    fn game(seed: u32) -> Game {
        Game::new(Randomizer::with_seed(seed), DEFAULT_DROP_INTERVAL_MS)
    }

    #[test]
    fn test_new_game_state() {
        let g = game(1);
        assert!(g.board().is_empty());
        assert_eq!(g.score(), 0);
        assert!(!g.is_paused());
        assert!(!g.is_game_over());
        assert_eq!(g.player().pos.1, 0);
        assert!(!g.player().collides(g.board()));
    }

    #[test]
    fn test_first_pieces_follow_seed() {
        let mut rng = Randomizer::with_seed(31);
        let first = rng.next_matrix();
        let second = rng.next_matrix();
        let g = game(31);
        assert_eq!(g.player().matrix, first);
        assert_eq!(g.next(), &second);
    }

    #[test]
    fn test_piece_never_above_top_row() {
        let mut g = game(32);
        let cmds = [
            Command::RotateCw,
            Command::MoveLeft,
            Command::RotateCcw,
            Command::SoftDrop,
            Command::MoveRight,
            Command::RotateCw,
            Command::HardDrop,
        ];
        for cmd in cmds.iter().cycle().take(700) {
            if g.is_game_over() {
                break;
            }
            g.apply(*cmd);
            let (px, py) = g.player().pos;
            assert!(py >= 0);
            assert!(g.player().matrix.cells().all(|(_, y, _)| py + y as i32 >= 0));
            if g.is_game_over() {
                break;
            }
            assert!(!g.player().collides(g.board()), "live piece overlaps at ({px}, {py})");
        }
    }

    #[test]
    fn test_first_tick_has_no_elapsed_time() {
        let mut g = game(2);
        let y = g.player().pos.1;
        assert!(g.tick(50_000.0));
        assert_eq!(g.player().pos.1, y);
    }

    #[test]
    fn test_auto_drop_after_interval() {
        let mut g = game(3);
        let y = g.player().pos.1;
        g.tick(0.0);
        g.tick(600.0);
        g.tick(1000.0);
        // exactly 1000 is not past the interval
        assert_eq!(g.player().pos.1, y);
        g.tick(1001.0);
        assert_eq!(g.player().pos.1, y + 1);
        // counter reset after the drop
        g.tick(1500.0);
        assert_eq!(g.player().pos.1, y + 1);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut g = game(4);
        let y = g.player().pos.1;
        g.tick(0.0);
        g.apply(Command::TogglePause);
        assert!(g.is_paused());
        assert!(!g.tick(5000.0));
        g.apply(Command::SoftDrop);
        g.apply(Command::MoveLeft);
        assert_eq!(g.player().pos.1, y);
        g.apply(Command::TogglePause);
        // Paused frames still advance the clock, so no catch-up drop.
        assert!(g.tick(5100.0));
        assert_eq!(g.player().pos.1, y);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut g = game(5);
        let shape = g.player().matrix.clone();
        let next = g.next().clone();
        g.hard_drop();
        assert_eq!(g.pieces_locked(), 1);
        let bottom = g.board().rows()[ROWS - 1];
        assert!(bottom.iter().any(|c| *c != 0));
        let filled: usize = g
            .board()
            .rows()
            .iter()
            .map(|r| r.iter().filter(|c| **c != 0).count())
            .sum();
        assert_eq!(filled, shape.cells().count());
        assert_eq!(g.player().matrix, next);
    }

    #[test]
    fn test_hard_drop_matches_repeated_soft_drops() {
        for seed in [11, 12, 13, 14] {
            let mut soft = game(seed);
            let mut hard = game(seed);
            for _ in 0..4 {
                let locked = soft.pieces_locked();
                while soft.pieces_locked() == locked && !soft.is_game_over() {
                    soft.soft_drop();
                }
                hard.hard_drop();
                assert_eq!(soft.board(), hard.board());
                assert_eq!(soft.score(), hard.score());
                assert_eq!(soft.player(), hard.player());
            }
        }
    }

    #[test]
    fn test_line_clear_scores() {
        let mut g = game(6);
        // Leave exactly the cells the next vertical drop fills open in two rows.
        g.player.matrix = Matrix::from_rows(vec![vec![1, 0], vec![1, 0]]);
        g.player.pos = (0, 0);
        for y in ROWS - 2..ROWS {
            for x in 1..COLS {
                g.board.set(x, y, 2);
            }
        }
        g.hard_drop();
        assert_eq!(g.score(), 30);
        assert_eq!(g.lines(), 2);
        assert!(g.board().is_empty());
        let events = g.drain_events();
        assert!(events.contains(&GameEvent::RowsCleared(SweepResult { rows: 2, points: 30 })));
        assert!(events.contains(&GameEvent::ScoreChanged { score: 30, lines: 2 }));
    }

    #[test]
    fn test_stacking_ends_game_and_ignores_input() {
        let mut g = game(7);
        for _ in 0..200 {
            if g.is_game_over() {
                break;
            }
            g.hard_drop();
        }
        assert!(g.is_game_over());
        assert!(g.drain_events().iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        let before = g.player().clone();
        g.apply(Command::MoveLeft);
        g.apply(Command::HardDrop);
        g.apply(Command::TogglePause);
        assert_eq!(g.player(), &before);
        assert!(!g.is_paused());
        assert!(!g.tick(1e9));
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut g = game(8);
        while !g.is_game_over() {
            g.hard_drop();
        }
        g.reset();
        assert!(!g.is_game_over());
        assert!(!g.is_paused());
        assert!(g.board().is_empty());
        assert_eq!(g.score(), 0);
        assert_eq!(g.lines(), 0);
        assert_eq!(g.player().pos.1, 0);
        assert_eq!(
            g.drain_events(),
            vec![GameEvent::ScoreChanged { score: 0, lines: 0 }]
        );
    }
}
