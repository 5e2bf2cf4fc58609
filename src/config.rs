//! Startup configuration: play-area size, tick rate and RNG seed.

use std::time::Duration;

use anyhow::{ensure, Result};

use crate::consts::*;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub ticks_per_second: u32,
    /// Seed for every random decision in a run.
    pub seed: u64,
    /// Real-time hold on the final frame after a loss.
    pub defeat_hold: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,
            seed: rand::random(),
            defeat_hold: Duration::from_millis(DEFEAT_HOLD_MS),
        }
    }
}

impl GameConfig {
    /// Reject play areas and tick rates the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width.is_finite() && self.height.is_finite(),
            "play area must be finite, got {}x{}",
            self.width,
            self.height
        );
        let (pw, ph) = PLAYER_SIZE;
        ensure!(
            self.width >= pw && self.height >= ph,
            "play area {}x{} is smaller than the player ({}x{})",
            self.width,
            self.height,
            pw,
            ph
        );
        ensure!(
            self.height / 2.0 >= ENEMY_HOLD_MIN,
            "play area height {} leaves no room for enemies to hold",
            self.height
        );
        ensure!(self.ticks_per_second > 0, "tick rate must be at least 1");
        Ok(())
    }

    /// Wall-clock length of one tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}
