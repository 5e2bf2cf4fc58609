//! Sky Barrage - a fixed-tick arcade shooter engine.
//!
//! Core modules:
//! - `geometry`: bounding boxes and direction vectors
//! - `entities`: entity state and per-kind motion rules
//! - `collision`: ordered group-vs-group collision rules
//! - `abilities`: score-gated special abilities
//! - `compute`: the pure per-tick simulation step
//! - `game_loop`: fixed-rate driver over input, render and pacing seams

pub mod abilities;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game_loop;
pub mod geometry;
pub mod input;
pub mod render;

pub use config::GameConfig;
pub use entities::{GameState, GameStatus};
pub use input::{HeldKeys, Key, TickInput};

/// Tuning constants, in world units and ticks.
pub mod consts {
    /// Default play area.
    pub const PLAY_WIDTH: f32 = 1100.0;
    pub const PLAY_HEIGHT: f32 = 650.0;
    /// Target simulation rate.
    pub const TICKS_PER_SECOND: u32 = 50;

    pub const PLAYER_START: (f32, f32) = (900.0, 400.0);
    pub const PLAYER_SIZE: (f32, f32) = (100.0, 100.0);
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Length of the "joy" look after downing an enemy.
    pub const JOY_PULSE_TICKS: u32 = 10;

    pub const ENEMY_SIZE: (f32, f32) = (70.0, 60.0);
    pub const ENEMY_FALL_SPEED: f32 = 6.0;
    pub const ENEMY_SPAWN_PERIOD: u64 = 200;
    pub const ENEMY_HOLD_MIN: f32 = 50.0;
    pub const ENEMY_DROP_INTERVAL: (u32, u32) = (50, 300);
    pub const ENEMY_VARIANTS: u8 = 3;

    pub const BOMB_SPEED: f32 = 6.0;
    pub const BOMB_RADIUS: (u32, u32) = (10, 50);
    pub const BOMB_COLORS: u8 = 6;

    pub const BEAM_SIZE: (f32, f32) = (60.0, 20.0);
    pub const BEAM_SPEED: f32 = 10.0;
    pub const FAN_BEAMS: usize = 5;
    /// Total spread of a fan, centred on the facing.
    pub const FAN_ARC_DEGREES: f32 = 100.0;

    pub const EXPLOSION_SIZE: (f32, f32) = (100.0, 90.0);
    pub const EXPLOSION_LONG: u32 = 100;
    pub const EXPLOSION_SHORT: u32 = 50;

    pub const SHIELD_THICKNESS: f32 = 20.0;
    pub const SHIELD_LIFE: u32 = 400;
    pub const GRAVITY_LIFE: u32 = 400;
    pub const INVINCIBLE_TICKS: u32 = 500;
    pub const EMP_FLASH_TICKS: u32 = 3;

    pub const SCORE_ENEMY_BEAM: u32 = 10;
    pub const SCORE_MINOR: u32 = 1;

    pub const COST_GRAVITY: u32 = 200;
    pub const COST_EMP: u32 = 20;
    pub const COST_INVINCIBLE: u32 = 100;
    pub const COST_SHIELD: u32 = 50;

    /// Score readout offset from the bottom-left corner.
    pub const SCORE_ANCHOR: (f32, f32) = (100.0, 50.0);
    /// Real-time hold on the final frame after a loss.
    pub const DEFEAT_HOLD_MS: u64 = 2000;
}
