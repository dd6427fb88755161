//! GameView: maps a `MatchSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The 500×700 pixel field is scaled down to whole terminal cells. Terminal
//! glyphs are roughly twice as tall as they are wide, so by default one row
//! covers twice as many pixels as one column.

use crate::core::{BallSnapshot, MatchSnapshot, PaddleRect};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, Winner, DEFAULT_BALL_COLOR, FIELD_HEIGHT, FIELD_WIDTH, WIN_SCORE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Placement of the field inside a viewport.
///
/// `origin_*` is the top-left corner of the border; the field itself starts
/// one cell in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cols: u16,
    pub rows: u16,
}

impl FieldLayout {
    /// Largest field that fits `viewport` at the given glyph aspect.
    ///
    /// Returns `None` when not even a single cell fits inside the border.
    pub fn fit(viewport: Viewport, glyph_aspect: u16, anchor_y: AnchorY) -> Option<Self> {
        let avail_w = viewport.width.saturating_sub(2) as u32;
        let avail_h = viewport.height.saturating_sub(2) as u32;
        let aspect = glyph_aspect.max(1) as u32;
        let (fw, fh) = (FIELD_WIDTH as u32, FIELD_HEIGHT as u32);

        let rows = avail_h.min(avail_w * fh / (aspect * fw));
        let cols = avail_w.min(rows * aspect * fw / fh);
        if rows == 0 || cols == 0 {
            return None;
        }

        let frame_w = cols as u16 + 2;
        let frame_h = rows as u16 + 2;
        let origin_y = match anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        Some(Self {
            origin_x: viewport.width.saturating_sub(frame_w) / 2,
            origin_y,
            cols: cols as u16,
            rows: rows as u16,
        })
    }

    pub fn frame_width(&self) -> u16 {
        self.cols + 2
    }

    pub fn frame_height(&self) -> u16 {
        self.rows + 2
    }

    /// Column holding pixel `px`, or `None` off the field.
    pub fn col_of(&self, px: i32) -> Option<u16> {
        (0..FIELD_WIDTH)
            .contains(&px)
            .then(|| (px as u32 * self.cols as u32 / FIELD_WIDTH as u32) as u16)
    }

    /// Row holding pixel `py`, or `None` off the field.
    pub fn row_of(&self, py: i32) -> Option<u16> {
        (0..FIELD_HEIGHT)
            .contains(&py)
            .then(|| (py as u32 * self.rows as u32 / FIELD_HEIGHT as u32) as u16)
    }

    fn col_clamped(&self, px: i32) -> u16 {
        self.col_of(px.clamp(0, FIELD_WIDTH - 1)).unwrap_or(0)
    }

    fn row_clamped(&self, py: i32) -> u16 {
        self.row_of(py.clamp(0, FIELD_HEIGHT - 1)).unwrap_or(0)
    }

    /// Pixel at the centre of cell `(col, row)`.
    fn cell_center(&self, col: u16, row: u16) -> (i32, i32) {
        let x = (2 * col as i32 + 1) * FIELD_WIDTH / (2 * self.cols as i32);
        let y = (2 * row as i32 + 1) * FIELD_HEIGHT / (2 * self.rows as i32);
        (x, y)
    }

    /// Terminal position of field cell `(col, row)`.
    pub fn screen(&self, col: u16, row: u16) -> (u16, u16) {
        (self.origin_x + 1 + col, self.origin_y + 1 + row)
    }
}

/// A lightweight terminal renderer for the match.
pub struct GameView {
    /// Pixels-per-row over pixels-per-column; 2 suits most terminal fonts.
    glyph_aspect: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            glyph_aspect: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

const FIELD_BG: Rgb = Rgb::new(20, 20, 28);

impl GameView {
    pub fn new(glyph_aspect: u16) -> Self {
        Self {
            glyph_aspect,
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> Option<FieldLayout> {
        FieldLayout::fit(viewport, self.glyph_aspect, self.anchor_y)
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &MatchSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let Some(layout) = self.layout(viewport) else {
            return;
        };

        let (x0, y0) = layout.screen(0, 0);
        fb.fill_rect(
            x0,
            y0,
            layout.cols,
            layout.rows,
            ' ',
            CellStyle::fg_on(Rgb::WHITE, FIELD_BG),
        );
        draw_border(fb, &layout, CellStyle::fg_on(Rgb::new(200, 200, 200), Rgb::BLACK).dim());

        match snap.phase {
            Phase::NotStarted => {
                let demo = BallSnapshot {
                    x: FIELD_WIDTH / 2,
                    y: FIELD_HEIGHT / 2,
                    radius: 5,
                    color: DEFAULT_BALL_COLOR,
                };
                draw_ball(fb, &layout, &demo);
                draw_paddle(fb, &layout, &snap.paddle);
                self.draw_intro(fb, &layout);
            }
            Phase::Playing => {
                for ball in &snap.balls {
                    draw_ball(fb, &layout, ball);
                }
                draw_paddle(fb, &layout, &snap.paddle);
                draw_score(fb, &layout, snap.player_score, snap.cpu_score);
            }
            Phase::Over => {
                let verdict = match snap.winner {
                    Some(Winner::Cpu) => "Game over. I won!",
                    _ => "Game over. You won!",
                };
                draw_centered_lines(
                    fb,
                    &layout,
                    &[verdict, "", "SPACE to play again", "ESC to exit"],
                );
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &MatchSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_intro(&self, fb: &mut FrameBuffer, layout: &FieldLayout) {
        // Instructions start two rows under the centred demo ball.
        let top = layout.row_clamped(FIELD_HEIGHT / 2) + 2;
        draw_lines_from(
            fb,
            layout,
            top,
            &["SPACE to start", "ESC to quit", "←/→ move the racket", ""],
        );

        if top + 4 >= layout.rows {
            return;
        }
        // "First to 21 wins" with the threshold written digit by digit.
        let digits = if WIN_SCORE >= 10 { 2 } else { 1 };
        let width = "First to ".len() as u16 + digits + " wins".len() as u16;
        let style = text_style();
        let (mut x, y) = centered_at(layout, width, top + 4);
        fb.put_str(x, y, "First to ", style);
        x += "First to ".len() as u16;
        x = fb.put_u32(x, y, WIN_SCORE, style);
        fb.put_str(x, y, " wins", style);
    }
}

fn text_style() -> CellStyle {
    CellStyle::fg_on(Rgb::WHITE, FIELD_BG).bold()
}

fn draw_border(fb: &mut FrameBuffer, layout: &FieldLayout, style: CellStyle) {
    let (x, y) = (layout.origin_x, layout.origin_y);
    let (w, h) = (layout.frame_width(), layout.frame_height());

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Filled circle: every cell whose centre lies inside the ball, or a single
/// dot when the ball is smaller than a cell.
fn draw_ball(fb: &mut FrameBuffer, layout: &FieldLayout, ball: &BallSnapshot) {
    let style = CellStyle::fg_on(Rgb::from(ball.color), FIELD_BG);
    let r = ball.radius.max(0);
    let c0 = layout.col_clamped(ball.x - r);
    let c1 = layout.col_clamped(ball.x + r);
    let r0 = layout.row_clamped(ball.y - r);
    let r1 = layout.row_clamped(ball.y + r);

    let mut covered = false;
    for row in r0..=r1 {
        for col in c0..=c1 {
            let (cx, cy) = layout.cell_center(col, row);
            let (dx, dy) = (cx - ball.x, cy - ball.y);
            if dx * dx + dy * dy <= r * r {
                let (sx, sy) = layout.screen(col, row);
                fb.put_char(sx, sy, '█', style);
                covered = true;
            }
        }
    }

    if !covered {
        let (sx, sy) = layout.screen(layout.col_clamped(ball.x), layout.row_clamped(ball.y));
        fb.put_char(sx, sy, '●', style);
    }
}

fn draw_paddle(fb: &mut FrameBuffer, layout: &FieldLayout, paddle: &PaddleRect) {
    // A racket pushed entirely off the field is not drawn.
    if paddle.x + paddle.width < 0 || paddle.x >= FIELD_WIDTH {
        return;
    }
    let style = CellStyle::fg_on(Rgb::WHITE, FIELD_BG).bold();
    let row = layout.row_clamped(paddle.y);
    let c0 = layout.col_clamped(paddle.x);
    let c1 = layout.col_clamped(paddle.x + paddle.width);
    for col in c0..=c1 {
        let (sx, sy) = layout.screen(col, row);
        fb.put_char(sx, sy, '▀', style);
    }
}

fn draw_score(fb: &mut FrameBuffer, layout: &FieldLayout, player: u32, cpu: u32) {
    let style = text_style();
    let (x, y) = layout.screen(0, 0);
    fb.put_str_clipped(x, y, "Score: ", layout.cols, style);
    let x = fb.put_u32(x + 7, y, player, style);
    fb.put_char(x, y, '/', style);
    fb.put_u32(x + 1, y, cpu, style);
}

/// Draw `lines` centred in the field; returns the row of the first line.
/// Draw `lines` centred in the field.
fn draw_centered_lines(fb: &mut FrameBuffer, layout: &FieldLayout, lines: &[&str]) {
    let first = (layout.rows / 2).saturating_sub(lines.len() as u16 / 2);
    draw_lines_from(fb, layout, first, lines);
}

/// Draw `lines` horizontally centred, one per field row from `first`.
/// Rows past the bottom of the field are dropped.
fn draw_lines_from(fb: &mut FrameBuffer, layout: &FieldLayout, first: u16, lines: &[&str]) {
    let style = text_style();
    for (i, line) in lines.iter().enumerate() {
        let row = first + i as u16;
        if row >= layout.rows {
            break;
        }
        let w = line.chars().count() as u16;
        let (x, y) = centered_at(layout, w, row);
        fb.put_str_clipped(x, y, line, layout.cols, style);
    }
}

fn centered_at(layout: &FieldLayout, width: u16, row: u16) -> (u16, u16) {
    let col = layout.cols.saturating_sub(width) / 2;
    layout.screen(col, row)
}
