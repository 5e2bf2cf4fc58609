//! Logical input consumed by the engine, one snapshot per tick.
//!
//! The engine never sees raw key codes: adapters (the terminal front-end,
//! tests) translate their own events into [`Key`]s.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    FanModifier,
    Gravity,
    Emp,
    Invincible,
    Shield,
    Quit,
}

impl Key {
    /// Unit step contributed by a directional key.
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Key::Up => Some((0, -1)),
            Key::Down => Some((0, 1)),
            Key::Left => Some((-1, 0)),
            Key::Right => Some((1, 0)),
            _ => None,
        }
    }
}

/// Which keys are currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fan_modifier: bool,
}

impl HeldKeys {
    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::FanModifier => self.fan_modifier = held,
            _ => {}
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::FanModifier => self.fan_modifier,
            _ => false,
        }
    }

    /// Sum of the held directional deltas, each axis clamped to -1..=1.
    pub fn steer(&self) -> (i32, i32) {
        let (mut dx, mut dy) = (0, 0);
        for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
            if let (true, Some((x, y))) = (self.is_held(key), key.delta()) {
                dx += x;
                dy += y;
            }
        }
        (dx.clamp(-1, 1), dy.clamp(-1, 1))
    }

    pub fn steer_vec(&self) -> Vec2 {
        let (dx, dy) = self.steer();
        Vec2::new(dx as f32, dy as f32)
    }
}

/// Everything the loop learns from its input source in one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Discrete key-down events, in arrival order.
    pub pressed: Vec<Key>,
    pub quit: bool,
}

impl TickInput {
    pub fn with_held(held: HeldKeys) -> Self {
        TickInput {
            held,
            ..Default::default()
        }
    }

    pub fn press(mut self, key: Key) -> Self {
        if key == Key::Quit {
            self.quit = true;
        } else {
            self.pressed.push(key);
        }
        self
    }
}
