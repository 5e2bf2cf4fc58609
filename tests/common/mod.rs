#![allow(dead_code)]

use std::collections::VecDeque;

use glam::Vec2;
use sky_barrage::game_loop::{InputSource, Pacer};
use sky_barrage::render::{RenderSink, Sprite};
use sky_barrage::{Key, TickInput};

/// Plays back a fixed list of inputs, then asks to quit.
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
    pub polls: usize,
}

impl ScriptedInput {
    pub fn new(script: Vec<TickInput>) -> Self {
        ScriptedInput {
            script: script.into(),
            polls: 0,
        }
    }

    pub fn idle_for(ticks: usize) -> Self {
        ScriptedInput::new(vec![TickInput::default(); ticks])
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.polls += 1;
        self.script
            .pop_front()
            .unwrap_or_else(|| TickInput::default().press(Key::Quit))
    }
}

/// Keeps every frame's draw calls.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<(Sprite, Vec2)>>,
    pub scores: Vec<(u32, Vec2)>,
    pub presented: usize,
}

impl RenderSink for RecordingSink {
    fn begin_frame(&mut self) -> std::io::Result<()> {
        self.frames.push(Vec::new());
        Ok(())
    }

    fn draw(&mut self, sprite: Sprite, pos: Vec2) -> std::io::Result<()> {
        if let Some(frame) = self.frames.last_mut() {
            frame.push((sprite, pos));
        }
        Ok(())
    }

    fn draw_score(&mut self, score: u32, pos: Vec2) -> std::io::Result<()> {
        self.scores.push((score, pos));
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

/// Counts waits instead of sleeping.
#[derive(Default)]
pub struct CountingPacer {
    pub waits: usize,
    pub holds: usize,
}

impl Pacer for CountingPacer {
    fn wait_for_next_tick(&mut self) {
        self.waits += 1;
    }

    fn hold_defeat(&mut self) {
        self.holds += 1;
    }
}

/// Draw-order rank of a sprite kind.
pub fn rank(sprite: &Sprite) -> u8 {
    match sprite {
        Sprite::GravityField { .. } => 0,
        Sprite::Beam { .. } => 1,
        Sprite::Enemy { .. } => 2,
        Sprite::Bomb { .. } => 3,
        Sprite::Explosion { .. } => 4,
        Sprite::Shield { .. } => 5,
        Sprite::Player { .. } => 6,
        Sprite::EmpFlash { .. } => 7,
    }
}
