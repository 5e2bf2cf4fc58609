//! Render seam. The engine only says "draw this sprite here"; how a sprite
//! looks is up to the sink.

use glam::Vec2;

use crate::consts::SCORE_ANCHOR;
use crate::entities::{Facing, GameState, Mood};

/// Opaque image handle: a read-only description of which look to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sprite {
    Player {
        facing: Facing,
        invincible: bool,
        mood: Mood,
    },
    Enemy {
        variant: u8,
        jammed: bool,
    },
    Bomb {
        radius: f32,
        color: u8,
        active: bool,
    },
    Beam {
        angle: f32,
    },
    Explosion {
        frame: u8,
    },
    GravityField {
        size: Vec2,
    },
    Shield {
        angle: f32,
    },
    EmpFlash {
        size: Vec2,
    },
}

pub trait RenderSink {
    /// Start a new frame.
    fn begin_frame(&mut self) -> std::io::Result<()>;
    /// Draw `sprite` centred on `pos` (world coordinates).
    fn draw(&mut self, sprite: Sprite, pos: Vec2) -> std::io::Result<()>;
    /// Draw the `"Score: {score}"` readout at `pos`.
    fn draw_score(&mut self, score: u32, pos: Vec2) -> std::io::Result<()>;
    /// Finish the frame.
    fn present(&mut self) -> std::io::Result<()>;
}

/// Where the score readout goes for a play area.
pub fn score_position(state: &GameState) -> Vec2 {
    let (x, from_bottom) = SCORE_ANCHOR;
    Vec2::new(state.area.min.x + x, state.area.max.y - from_bottom)
}

/// Draw one complete frame. Groups always go out in the same order:
/// gravity fields, beams, enemies, bombs, explosions, shield, player, EMP
/// flash, then the score.
pub fn render_frame<S: RenderSink + ?Sized>(state: &GameState, sink: &mut S) -> std::io::Result<()> {
    sink.begin_frame()?;

    for field in &state.gravity_fields {
        let bounds = field.bounds();
        sink.draw(Sprite::GravityField { size: bounds.size() }, bounds.center())?;
    }
    for beam in &state.beams {
        sink.draw(Sprite::Beam { angle: beam.angle }, beam.pos)?;
    }
    for enemy in &state.enemies {
        let sprite = Sprite::Enemy {
            variant: enemy.variant,
            jammed: enemy.jammed,
        };
        sink.draw(sprite, enemy.pos)?;
    }
    for bomb in &state.bombs {
        let sprite = Sprite::Bomb {
            radius: bomb.radius,
            color: bomb.color,
            active: bomb.is_active(),
        };
        sink.draw(sprite, bomb.pos)?;
    }
    for explosion in &state.explosions {
        sink.draw(Sprite::Explosion { frame: explosion.frame() }, explosion.pos)?;
    }
    if let Some(shield) = &state.shield {
        sink.draw(Sprite::Shield { angle: shield.angle }, shield.pos)?;
    }

    let player = &state.player;
    let sprite = Sprite::Player {
        facing: player.facing,
        invincible: player.is_invincible(),
        mood: player.mood,
    };
    sink.draw(sprite, player.pos)?;

    if state.emp_flash > 0 {
        sink.draw(Sprite::EmpFlash { size: state.area.size() }, state.area.center())?;
    }

    sink.draw_score(state.score, score_position(state))?;
    sink.present()
}
