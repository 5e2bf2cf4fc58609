//! Terminal render sink. All terminal output lives here.
//!
//! World coordinates are scaled onto the character grid inside a border.
//! No game logic is performed; this module only translates sprites into
//! terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use sky_barrage::consts::{EXPLOSION_SIZE, PLAYER_SIZE, SHIELD_THICKNESS};
use sky_barrage::entities::{Facing, Mood};
use sky_barrage::geometry::rotated_extent;
use sky_barrage::render::{RenderSink, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_JOY: Color = Color::Yellow;
const C_PLAYER_DEFEATED: Color = Color::Red;
const C_ENEMY: [Color; 3] = [Color::Green, Color::Red, Color::Magenta];
const C_ENEMY_JAMMED: Color = Color::DarkGrey;
const C_BOMB: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
];
const C_BOMB_INACTIVE: Color = Color::DarkGrey;
const C_BEAM: Color = Color::Cyan;
const C_EXPLOSION: [Color; 2] = [Color::Yellow, Color::Red];
const C_GRAVITY: Color = Color::DarkGrey;
const C_SHIELD: Color = Color::Blue;
const C_EMP: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const ENEMY_GLYPHS: [&str; 3] = ["«▼»", "(◎)", "<Ѫ>"];

const HINT: &str =
    "Arrows/WASD: Move  SPACE: Beam  F+SPACE: Fan  ENTER: Gravity  E: EMP  I: Invincible  1: Shield  Q: Quit";

pub struct TerminalSink<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    world: Vec2,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, cols: u16, rows: u16, world: Vec2) -> Self {
        TerminalSink {
            out,
            cols,
            rows,
            world,
        }
    }

    /// Inner drawing area: everything except the border and the hint row.
    fn grid(&self) -> (f32, f32) {
        (
            self.cols.saturating_sub(2).max(1) as f32,
            self.rows.saturating_sub(3).max(1) as f32,
        )
    }

    /// Map a world position to a terminal cell, or `None` if it falls
    /// outside the bordered area.
    fn cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        let (gw, gh) = self.grid();
        let x = (pos.x / self.world.x * gw).floor();
        let y = (pos.y / self.world.y * gh).floor();
        if x < 0.0 || y < 0.0 || x >= gw || y >= gh {
            return None;
        }
        Some((x as u16 + 1, y as u16 + 1))
    }

    /// World extent expressed in cells, at least one in each direction.
    fn cells_for(&self, size: Vec2) -> (u16, u16) {
        let (gw, gh) = self.grid();
        let w = (size.x / self.world.x * gw).round().max(1.0);
        let h = (size.y / self.world.y * gh).round().max(1.0);
        (w as u16, h as u16)
    }

    fn put(&mut self, pos: Vec2, color: Color, text: &str) -> std::io::Result<()> {
        if let Some((x, y)) = self.cell(pos) {
            let width = text.chars().count() as u16;
            let x = x.saturating_sub(width / 2).max(1);
            self.out.queue(cursor::MoveTo(x, y))?;
            self.out.queue(style::SetForegroundColor(color))?;
            self.out.queue(Print(text))?;
        }
        Ok(())
    }

    /// Fill a world-space box centred on `center` with `glyph`, stepping
    /// `stride` cells between glyphs.
    fn fill(
        &mut self,
        center: Vec2,
        size: Vec2,
        color: Color,
        glyph: char,
        stride: (u16, u16),
    ) -> std::io::Result<()> {
        let (w, h) = self.cells_for(size);
        let Some((cx, cy)) = self.cell(center) else {
            return Ok(());
        };
        let left = cx.saturating_sub(w / 2).max(1);
        let top = cy.saturating_sub(h / 2).max(1);
        let right = (left + w).min(self.cols.saturating_sub(1));
        let bottom = (top + h).min(self.rows.saturating_sub(2));
        self.out.queue(style::SetForegroundColor(color))?;
        for row in (top..bottom).step_by(stride.1.max(1) as usize) {
            for col in (left..right).step_by(stride.0.max(1) as usize) {
                self.out.queue(cursor::MoveTo(col, row))?;
                self.out.queue(Print(glyph))?;
            }
        }
        Ok(())
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.cols as usize;
        let bottom = self.rows.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;
        for row in 1..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }

        self.out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        let hint: String = HINT.chars().take(w.saturating_sub(2)).collect();
        self.out.queue(Print(hint))?;
        Ok(())
    }

    fn draw_player(
        &mut self,
        pos: Vec2,
        facing: Facing,
        invincible: bool,
        mood: Mood,
    ) -> std::io::Result<()> {
        let arrow = facing_arrow(facing);
        let (face, color) = match mood {
            Mood::Calm => (format!("({arrow})"), C_PLAYER),
            Mood::Joy { .. } => (format!("^{arrow}^"), C_PLAYER_JOY),
            Mood::Defeated => ("(×)".to_string(), C_PLAYER_DEFEATED),
        };
        if invincible {
            self.out.queue(style::SetAttribute(Attribute::Reverse))?;
        }
        self.put(pos, color, &face)?;
        if invincible {
            self.out.queue(style::SetAttribute(Attribute::NoReverse))?;
        }
        Ok(())
    }
}

fn facing_arrow(facing: Facing) -> char {
    match facing {
        Facing::East => '→',
        Facing::NorthEast => '↗',
        Facing::North => '↑',
        Facing::NorthWest => '↖',
        Facing::West => '←',
        Facing::SouthWest => '↙',
        Facing::South => '↓',
        Facing::SouthEast => '↘',
    }
}

/// Line glyph closest to an on-screen angle.
fn beam_glyph(angle: f32) -> char {
    let sector = ((angle.rem_euclid(180.0) + 22.5) / 45.0) as u32 % 4;
    match sector {
        0 => '─',
        1 => '╱',
        2 => '│',
        _ => '╲',
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn begin_frame(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    fn draw(&mut self, sprite: Sprite, pos: Vec2) -> std::io::Result<()> {
        match sprite {
            Sprite::Player {
                facing,
                invincible,
                mood,
            } => self.draw_player(pos, facing, invincible, mood),
            Sprite::Enemy { variant, jammed } => {
                let idx = variant as usize % ENEMY_GLYPHS.len();
                let color = if jammed { C_ENEMY_JAMMED } else { C_ENEMY[idx] };
                self.put(pos, color, ENEMY_GLYPHS[idx])
            }
            Sprite::Bomb {
                radius,
                color,
                active,
            } => {
                let glyph = if radius >= 30.0 { "◉" } else { "●" };
                let color = if active {
                    C_BOMB[color as usize % C_BOMB.len()]
                } else {
                    C_BOMB_INACTIVE
                };
                self.put(pos, color, glyph)
            }
            Sprite::Beam { angle } => {
                let mut buf = [0u8; 4];
                let glyph = beam_glyph(angle).encode_utf8(&mut buf);
                self.put(pos, C_BEAM, glyph)
            }
            Sprite::Explosion { frame } => {
                let glyph = if frame == 0 { '✶' } else { '✸' };
                let (w, h) = EXPLOSION_SIZE;
                self.fill(pos, Vec2::new(w, h), C_EXPLOSION[frame as usize % 2], glyph, (2, 1))
            }
            Sprite::GravityField { size } => self.fill(pos, size, C_GRAVITY, '·', (4, 2)),
            Sprite::Shield { angle } => {
                let (_, ph) = PLAYER_SIZE;
                let size = rotated_extent(Vec2::new(SHIELD_THICKNESS, ph * 2.0), angle);
                self.fill(pos, size, C_SHIELD, '▒', (1, 1))
            }
            Sprite::EmpFlash { size } => {
                self.fill(pos, size, C_EMP, '░', (3, 2))?;
                self.put(pos, C_EMP, "⚡ EMP ⚡")
            }
        }
    }

    fn draw_score(&mut self, score: u32, pos: Vec2) -> std::io::Result<()> {
        self.put(pos, C_SCORE, &format!("Score: {score}"))
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
