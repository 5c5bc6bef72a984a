//! Rendering layer — all terminal I/O lives here.
//!
//! `TerminalSurface` maps the 800×600 pixel arena onto an 80×30 cell grid
//! (10×20 pixels per cell, which keeps squares roughly square in a typical
//! terminal font) framed by a border.  Anything outside the arena is clipped.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use ghost_chase::asset::ObstacleTexture;
use ghost_chase::config::{ARENA_HEIGHT, ARENA_WIDTH};
use ghost_chase::entities::Rect;
use ghost_chase::render::{Surface, TextAlign, Tint};

// ── Grid ──────────────────────────────────────────────────────────────────────

const CELL_WIDTH: f64 = 10.0;
const CELL_HEIGHT: f64 = 20.0;

pub const GRID_COLS: u16 = (ARENA_WIDTH / CELL_WIDTH) as u16;
pub const GRID_ROWS: u16 = (ARENA_HEIGHT / CELL_HEIGHT) as u16;

/// Border on every side, plus one row underneath for the controls hint.
pub const MIN_TERM_COLS: u16 = GRID_COLS + 2;
pub const MIN_TERM_ROWS: u16 = GRID_ROWS + 3;

/// Text at or above this nominal size is drawn bold.
const BOLD_TEXT_SIZE: u16 = 40;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HINT: Color = Color::DarkGrey;

fn colour(tint: Tint) -> Color {
    match tint {
        Tint::Blue => Color::Blue,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Grey => Color::Grey,
        Tint::Ink => Color::White,
    }
}

/// Half-open cell span covered by `[start, end)` pixels, clipped to `limit`.
fn cell_span(start: f64, end: f64, cell: f64, limit: u16) -> (u16, u16) {
    let first = (start / cell).floor().clamp(0.0, limit as f64) as u16;
    let last = (end / cell).ceil().clamp(0.0, limit as f64) as u16;
    (first, last)
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        TerminalSurface { out }
    }

    /// Position the cursor at a grid cell (inside the border).
    fn move_to(&mut self, col: u16, row: u16) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(col + 1, row + 1))?;
        Ok(())
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = GRID_COLS as usize;

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
        self.out.queue(cursor::MoveTo(0, GRID_ROWS + 1))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

        for row in 1..=GRID_ROWS {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(GRID_COLS + 1, row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, GRID_ROWS + 2))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print("← ↑ ↓ → : Move   R : Restart   Q : Quit"))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;
        self.draw_controls_hint()
    }

    fn draw_rect(&mut self, rect: Rect, tint: Tint) -> std::io::Result<()> {
        let (c0, c1) = cell_span(rect.x, rect.right(), CELL_WIDTH, GRID_COLS);
        let (r0, r1) = cell_span(rect.y, rect.bottom(), CELL_HEIGHT, GRID_ROWS);
        if c0 >= c1 {
            return Ok(());
        }

        self.out.queue(style::SetForegroundColor(colour(tint)))?;
        let fill = "█".repeat((c1 - c0) as usize);
        for row in r0..r1 {
            self.move_to(c0, row)?;
            self.out.queue(Print(&fill))?;
        }
        Ok(())
    }

    fn draw_image(&mut self, image: &ObstacleTexture, rect: Rect) -> std::io::Result<()> {
        let (c0, c1) = cell_span(rect.x, rect.right(), CELL_WIDTH, GRID_COLS);
        let (r0, r1) = cell_span(rect.y, rect.bottom(), CELL_HEIGHT, GRID_ROWS);

        for row in r0..r1 {
            self.move_to(c0, row)?;
            // Sample at each cell's centre.
            let v = ((row as f64 + 0.5) * CELL_HEIGHT - rect.y) / rect.height;
            for col in c0..c1 {
                let u = ((col as f64 + 0.5) * CELL_WIDTH - rect.x) / rect.width;
                let [r, g, b] = image.sample(u, v);
                self.out.queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
                self.out.queue(Print("█"))?;
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: (f64, f64),
        size: u16,
        align: TextAlign,
        tint: Tint,
    ) -> std::io::Result<()> {
        let len = text.chars().count() as u16;
        let anchor_col = (at.0 / CELL_WIDTH).max(0.0) as u16;
        // `at.1` is the text baseline; the glyphs sit in the row above it.
        let row = ((at.1 / CELL_HEIGHT).floor() as u16).saturating_sub(1);
        if row >= GRID_ROWS {
            return Ok(());
        }
        let col = match align {
            TextAlign::Left => anchor_col,
            TextAlign::Center => anchor_col.saturating_sub(len / 2),
        };

        self.move_to(col.min(GRID_COLS.saturating_sub(len)), row)?;
        self.out.queue(style::SetForegroundColor(colour(tint)))?;
        if size >= BOLD_TEXT_SIZE {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
            self.out.queue(Print(text))?;
            self.out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
        } else {
            self.out.queue(Print(text))?;
        }
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, GRID_ROWS + 2))?;
        self.out.flush()
    }
}
