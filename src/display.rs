//! Rendering layer: all terminal I/O lives here.
//!
//! The simulation works in pixels; this module projects the play area onto a
//! character grid (one column per `CELL_W` pixels, one row per `CELL_H`
//! pixels) inside a one-cell border.  No game logic is performed here.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{Body, GameState};
use crate::error::{GameError, Result};

pub const TITLE: &str = "Balloon Shooter";

/// Pixels per terminal cell.
pub const CELL_W: i32 = 10;
pub const CELL_H: i32 = 20;

const MISS_TEXT_AT: (i32, i32) = (200, 10);
const QUIT_TEXT_AT: (i32, i32) = (200, 280);
const QUIT_HINT: &str = "Press Q to quit";

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_PLAYER: Color = Color::White;
const C_BALLOON: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_MISSES: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Glyph art for one entity, one string per terminal row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<String>,
}

impl Sprite {
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        if rows.iter().all(|r| r.is_empty()) {
            return Err(GameError::EmptySprite(path.to_path_buf()));
        }
        Ok(Sprite { rows })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| GameError::Sprite {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

#[derive(Clone, Debug)]
pub struct Sprites {
    pub gun: Sprite,
    pub balloon: Sprite,
    pub bullet: Sprite,
}

impl Sprites {
    /// Load `gun.txt`, `ball.txt` and `bullet.txt` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = |name: &str| -> PathBuf { dir.join(name) };
        Ok(Sprites {
            gun: Sprite::load(&path("gun.txt"))?,
            balloon: Sprite::load(&path("ball.txt"))?,
            bullet: Sprite::load(&path("bullet.txt"))?,
        })
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Play area size in cells, border excluded.
pub fn grid_size(config: &GameConfig) -> (u16, u16) {
    let cols = (config.width + CELL_W - 1) / CELL_W;
    let rows = (config.height + CELL_H - 1) / CELL_H;
    (cols as u16, rows as u16)
}

/// Smallest terminal that fits the bordered play area.
pub fn required_size(config: &GameConfig) -> (u16, u16) {
    let (cols, rows) = grid_size(config);
    (cols + 2, rows + 2)
}

pub fn check_terminal_size(config: &GameConfig, actual: (u16, u16)) -> Result<()> {
    let needed = required_size(config);
    if actual.0 < needed.0 || actual.1 < needed.1 {
        return Err(GameError::TerminalTooSmall { needed, actual });
    }
    Ok(())
}

/// Terminal cell for a pixel position, border offset included.
fn cell(x: i32, y: i32) -> (i32, i32) {
    (1 + x.div_euclid(CELL_W), 1 + y.div_euclid(CELL_H))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, sprites: &Sprites) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let grid = grid_size(&state.config);
    draw_border(out, grid)?;

    draw_sprite(out, grid, &sprites.gun, &state.player.body, C_PLAYER)?;
    draw_sprite(out, grid, &sprites.balloon, &state.balloon.body, C_BALLOON)?;
    for bullet in &state.bullets {
        draw_sprite(out, grid, &sprites.bullet, &bullet.body, C_BULLET)?;
    }

    draw_text(out, grid, MISS_TEXT_AT, &format!("Misses: {}", state.misses), C_MISSES)?;
    draw_text(out, grid, QUIT_TEXT_AT, QUIT_HINT, C_HINT)?;

    // Park cursor below the frame and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid.1 + 2))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, (cols, rows): (u16, u16)) -> std::io::Result<()> {
    let bar = "─".repeat(cols as usize);
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{bar}┐")))?;
    out.queue(cursor::MoveTo(0, rows + 1))?;
    out.queue(Print(format!("└{bar}┘")))?;

    for row in 1..=rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols + 1, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Entities & text ───────────────────────────────────────────────────────────

/// Draw `text` starting at cell (`col`, `row`), cut to the inside of the
/// border.
fn draw_clipped<W: Write>(
    out: &mut W,
    (cols, rows): (u16, u16),
    (col, row): (i32, i32),
    text: &str,
) -> std::io::Result<()> {
    if row < 1 || row > rows as i32 {
        return Ok(());
    }
    let skip = (1 - col).max(0) as usize;
    let start = col.max(1);
    let room = (cols as i32 + 1 - start).max(0) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(start as u16, row as u16))?;
    out.queue(Print(visible))?;
    Ok(())
}

fn draw_sprite<W: Write>(
    out: &mut W,
    grid: (u16, u16),
    sprite: &Sprite,
    body: &Body,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = cell(body.x, body.y);
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.rows().iter().enumerate() {
        draw_clipped(out, grid, (col, row + i as i32), line)?;
    }
    Ok(())
}

fn draw_text<W: Write>(
    out: &mut W,
    grid: (u16, u16),
    (x, y): (i32, i32),
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    draw_clipped(out, grid, cell(x, y), text)
}
