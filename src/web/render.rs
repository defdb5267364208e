//! Canvas drawing for the board and the lookahead preview.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::game::Game;
use crate::game::board::{COLS, ROWS};
use crate::game::matrix::Cell;

/// Cells across / down in the preview box.
pub const PREVIEW_CELLS: usize = 4;

/// Fill colour per cell value; index 0 is never drawn.
const PALETTE: [&str; 8] = [
    "#000000", "#FF0D72", "#0DC2FF", "#0DFF72", "#F538FF", "#FF8E0D", "#FFE138", "#3877FF",
];

/// A canvas plus its 2d context and the pixel size of one cell.
pub struct Surface {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub block: f64,
}

impl Surface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&self) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height());
        gradient.add_color_stop(0.0, "#1b1b24").ok();
        gradient.add_color_stop(1.0, "#0b0b10").ok();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.width(), self.height());
    }
}

pub fn draw_frame(board: &Surface, preview: &Surface, game: &Game) {
    draw_board(board, game);
    draw_piece(board, game);
    draw_preview(preview, game);
}

/// Board and empty preview without the falling piece, shown before the
/// first start.
pub fn draw_idle(board: &Surface, preview: &Surface, game: &Game) {
    draw_board(board, game);
    preview.clear();
}

fn draw_board(s: &Surface, game: &Game) {
    s.clear();

    s.ctx.set_stroke_style_str("rgba(255,255,255,0.05)");
    s.ctx.set_line_width(1.0);
    for x in 0..=COLS {
        let fx = x as f64 * s.block;
        line(&s.ctx, fx, 0.0, fx, ROWS as f64 * s.block);
    }
    for y in 0..=ROWS {
        let fy = y as f64 * s.block;
        line(&s.ctx, 0.0, fy, COLS as f64 * s.block, fy);
    }

    for (y, row) in game.board().rows().iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            draw_cell(s, x as f64, y as f64, v);
        }
    }
}

// Pieces spawn at row 0 and only ever move down, so every cell is on the board.
fn draw_piece(s: &Surface, game: &Game) {
    let player = game.player();
    let (px, py) = player.pos;
    for (x, y, v) in player.matrix.cells() {
        draw_cell(s, (px + x as i32) as f64, (py + y as i32) as f64, v);
    }
}

fn draw_preview(s: &Surface, game: &Game) {
    s.clear();
    let next = game.next();
    let ox = (PREVIEW_CELLS as f64 - next.width() as f64) / 2.0;
    let oy = (PREVIEW_CELLS as f64 - next.height() as f64) / 2.0;
    for (x, y, v) in next.cells() {
        draw_cell(s, ox + x as f64, oy + y as f64, v);
    }
}

fn draw_cell(s: &Surface, x: f64, y: f64, v: Cell) {
    if v == 0 {
        return;
    }
    let color = PALETTE.get(v as usize).copied().unwrap_or("#ffffff");
    let b = s.block;
    s.ctx.set_fill_style_str(color);
    s.ctx.fill_rect(x * b + 1.0, y * b + 1.0, b - 2.0, b - 2.0);
    // top highlight
    s.ctx.set_fill_style_str("rgba(255,255,255,0.18)");
    s.ctx.fill_rect(x * b + 1.0, y * b + 1.0, b - 2.0, b * 0.2);
}

/// Dims the board and writes PAUSED across it. Drawn once on pause; the loop
/// leaves the canvas alone until play resumes.
pub fn draw_paused(s: &Surface) {
    s.ctx.set_fill_style_str("rgba(0,0,0,0.55)");
    s.ctx.fill_rect(0.0, 0.0, s.width(), s.height());
    let cx = s.width() / 2.0;
    let cy = s.height() / 2.0;
    s.ctx.set_font("bold 32px 'Fira Code', monospace");
    s.ctx.set_text_align("center");
    s.ctx.set_line_width(5.0);
    s.ctx.set_stroke_style_str("#000000");
    s.ctx.stroke_text("PAUSED", cx, cy).ok();
    s.ctx.set_fill_style_str("#ffffff");
    s.ctx.fill_text("PAUSED", cx, cy).ok();
    s.ctx.set_font("14px 'Fira Code', monospace");
    s.ctx.fill_text("press P to resume", cx, cy + 28.0).ok();
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}
