/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// playfield rectangles into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use click_shooter::entities::{GameState, GameStatus, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Rgb { r: 0x2c, g: 0x3e, b: 0x50 };
const C_PLAYER: Color = Color::Rgb { r: 0x34, g: 0x98, b: 0xdb };
const C_BULLET: Color = Color::Rgb { r: 0xe7, g: 0x4c, b: 0x3c };
const C_ENEMY: Color = Color::Rgb { r: 0x2e, g: 0xcc, b: 0x71 };
const C_BORDER: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Playfield ↔ terminal mapping ─────────────────────────────────────────────

/// Maps playfield units onto the terminal cells inside the border.
///
/// Layout: row 0 HUD, row 1 top border, rows 2..rows-2 the field,
/// row rows-2 bottom border, row rows-1 controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    field_width: f32,
    field_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, field_width: f32, field_height: f32) -> Self {
        Viewport { cols, rows, field_width, field_height }
    }

    fn inner_cols(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    fn inner_rows(&self) -> u16 {
        self.rows.saturating_sub(4)
    }

    fn scale_x(&self) -> f32 {
        self.inner_cols() as f32 / self.field_width
    }

    fn scale_y(&self) -> f32 {
        self.inner_rows() as f32 / self.field_height
    }

    /// Playfield x under terminal column `col` (used for mouse input).
    pub fn column_to_x(&self, col: u16) -> f32 {
        let inner = col.saturating_sub(1).min(self.inner_cols().saturating_sub(1));
        (inner as f32 + 0.5) / self.scale_x()
    }

    /// Terminal cells covered by `rect`, clipped to the field.
    /// Returns `(col_start, col_end, row_start, row_end)`, end-exclusive.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let (sx, sy) = (self.scale_x(), self.scale_y());
        let c0 = (rect.x * sx).floor().max(0.0);
        let c1 = ((rect.x + rect.width) * sx).ceil().min(self.inner_cols() as f32);
        let r0 = (rect.y * sy).floor().max(0.0);
        let r1 = ((rect.y + rect.height) * sy).ceil().min(self.inner_rows() as f32);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16 + 1, c1 as u16 + 1, r0 as u16 + 2, r1 as u16 + 2))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_background(out, view)?;
    draw_hud(out, view, state)?;

    if state.is_started() {
        for enemy in &state.enemies {
            fill_rect(out, view, &enemy.rect(), "▓", C_ENEMY)?;
        }
        for bullet in &state.bullets {
            fill_rect(out, view, &bullet.rect(), "│", C_BULLET)?;
        }
        fill_rect(out, view, &state.player.rect(), "█", C_PLAYER)?;
    }

    draw_controls_hint(out, view)?;

    match state.status {
        GameStatus::NotStarted => draw_banner(
            out,
            view,
            &["CLICK SHOOTER", "Click or press SPACE to start"],
            Color::White,
        )?,
        GameStatus::GameOver => {
            let score_line = format!("Final Score: {}", state.score);
            draw_banner(
                out,
                view,
                &["GAME  OVER", score_line.as_str(), "Click or press SPACE to restart"],
                C_GAME_OVER,
            )?
        }
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border & background ───────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_background<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let blank = " ".repeat(view.inner_cols() as usize);
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    for row in 2..view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(1, row))?;
        out.queue(Print(&blank))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    let status = match state.status {
        GameStatus::NotStarted => "[ READY ]",
        GameStatus::Playing => "[ PLAYING ]",
        GameStatus::GameOver => "[ GAME OVER ]",
    };
    let sx = (view.cols / 2).saturating_sub(status.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(Print(status))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = view.cells(rect) else {
        return Ok(());
    };
    let line = glyph.repeat((c1 - c0) as usize);
    out.queue(style::SetForegroundColor(color))?;
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse / ← → : Move   Click / SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Centred overlay ───────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[&str],
    color: Color,
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(if i == 0 { color } else { Color::White }))?;
        out.queue(Print(*msg))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}
