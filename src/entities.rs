//! Entity types and their motion rules.
//!
//! Each kind owns its state and exposes the only mutations other systems
//! may apply to it (`Enemy::jam`, `Bomb::deactivate`, `Player::make_invincible`).
//! Bounding boxes are never stored; `bounds()` derives them from the current
//! position so a collision test can never see a stale box.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::geometry::{self, Bounds};
use crate::input::HeldKeys;

fn v((x, y): (f32, f32)) -> Vec2 {
    Vec2::new(x, y)
}

// ── Facing ───────────────────────────────────────────────────────────────────

/// The eight compass directions the player can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::East,
        Facing::NorthEast,
        Facing::North,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
        Facing::South,
        Facing::SouthEast,
    ];

    /// Facing for a summed steering vector; `None` for `(0, 0)`.
    pub fn from_steer(steer: (i32, i32)) -> Option<Facing> {
        Facing::ALL.into_iter().find(|f| f.delta() == steer)
    }

    /// Grid step in screen coordinates (y down).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::East => (1, 0),
            Facing::NorthEast => (1, -1),
            Facing::North => (0, -1),
            Facing::NorthWest => (-1, -1),
            Facing::West => (-1, 0),
            Facing::SouthWest => (-1, 1),
            Facing::South => (0, 1),
            Facing::SouthEast => (1, 1),
        }
    }

    /// On-screen angle, counter-clockwise from east.
    pub fn degrees(self) -> f32 {
        match self {
            Facing::East => 0.0,
            Facing::NorthEast => 45.0,
            Facing::North => 90.0,
            Facing::NorthWest => 135.0,
            Facing::West => 180.0,
            Facing::SouthWest => -135.0,
            Facing::South => -90.0,
            Facing::SouthEast => -45.0,
        }
    }

    pub fn step(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32)
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerMode {
    Normal,
    Invincible { ticks_remaining: u32 },
}

/// Purely visual state of the player sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Calm,
    Joy { ticks: u32 },
    Defeated,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub facing: Facing,
    pub mode: PlayerMode,
    pub mood: Mood,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Player {
            pos,
            facing: Facing::East,
            mode: PlayerMode::Normal,
            mood: Mood::Calm,
        }
    }

    pub fn size() -> Vec2 {
        v(PLAYER_SIZE)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, Player::size())
    }

    pub fn is_invincible(&self) -> bool {
        matches!(self.mode, PlayerMode::Invincible { .. })
    }

    pub fn make_invincible(&mut self, ticks: u32) {
        self.mode = PlayerMode::Invincible {
            ticks_remaining: ticks,
        };
    }

    pub fn cheer(&mut self) {
        if self.mood != Mood::Defeated {
            self.mood = Mood::Joy {
                ticks: JOY_PULSE_TICKS,
            };
        }
    }

    pub fn defeat(&mut self) {
        self.mood = Mood::Defeated;
    }

    /// Move by the held directional keys. A move that would leave `area` is
    /// rejected whole; no partial clipping.
    pub fn update(&mut self, held: &HeldKeys, area: &Bounds) {
        let steer = held.steer();
        let previous = self.pos;
        self.pos += held.steer_vec() * PLAYER_SPEED;
        if !area.contains(&self.bounds()) {
            self.pos = previous;
        }
        if let Some(facing) = Facing::from_steer(steer) {
            self.facing = facing;
        }

        if let PlayerMode::Invincible { ticks_remaining } = self.mode {
            let left = ticks_remaining.saturating_sub(1);
            self.mode = if left == 0 {
                PlayerMode::Normal
            } else {
                PlayerMode::Invincible {
                    ticks_remaining: left,
                }
            };
        }

        if let Mood::Joy { ticks } = self.mood {
            self.mood = if ticks <= 1 {
                Mood::Calm
            } else {
                Mood::Joy { ticks: ticks - 1 }
            };
        }
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyPhase {
    Descending,
    Holding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropInterval {
    Every(u32),
    Never,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub phase: EnemyPhase,
    /// Vertical centre at which the enemy stops and starts bombing.
    pub hold_altitude: f32,
    pub drop_interval: DropInterval,
    /// Which of the enemy looks to draw.
    pub variant: u8,
    /// Set by an EMP pulse; changes the look only.
    pub jammed: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, hold_altitude: f32, drop_interval: u32) -> Self {
        Enemy {
            pos,
            vel: Vec2::new(0.0, ENEMY_FALL_SPEED),
            phase: EnemyPhase::Descending,
            hold_altitude,
            drop_interval: DropInterval::Every(drop_interval.max(1)),
            variant: 0,
            jammed: false,
        }
    }

    /// A fresh enemy at the top edge with randomized stop altitude, bombing
    /// cadence and look.
    pub fn spawn(area: &Bounds, rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(area.min.x..=area.max.x);
        let lowest = (area.min.y + area.size().y / 2.0).max(ENEMY_HOLD_MIN);
        let hold_altitude = rng.gen_range(ENEMY_HOLD_MIN..=lowest);
        let (lo, hi) = ENEMY_DROP_INTERVAL;
        let interval = rng.gen_range(lo..=hi);
        Enemy {
            variant: rng.gen_range(0..ENEMY_VARIANTS),
            ..Enemy::new(Vec2::new(x, area.min.y), hold_altitude, interval)
        }
    }

    pub fn size() -> Vec2 {
        v(ENEMY_SIZE)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, Enemy::size())
    }

    pub fn is_holding(&self) -> bool {
        self.phase == EnemyPhase::Holding
    }

    /// Fall until the centre reaches the hold altitude, then stay put.
    pub fn update(&mut self) {
        if self.phase == EnemyPhase::Descending {
            self.pos += self.vel;
            if self.pos.y >= self.hold_altitude {
                self.phase = EnemyPhase::Holding;
                self.vel = Vec2::ZERO;
            }
        }
    }

    /// Whether this enemy drops a bomb on global tick `tick`.
    pub fn ready_to_drop(&self, tick: u64) -> bool {
        match (self.phase, self.drop_interval) {
            (EnemyPhase::Holding, DropInterval::Every(n)) => tick % n as u64 == 0,
            _ => false,
        }
    }

    /// EMP effect: never drop again.
    pub fn jam(&mut self) {
        self.drop_interval = DropInterval::Never;
        self.jammed = true;
    }
}

// ── Bomb ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombState {
    Active,
    Inactive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    pub pos: Vec2,
    /// Unit vector fixed at creation.
    pub direction: Vec2,
    pub speed: f32,
    pub state: BombState,
    pub radius: f32,
    pub color: u8,
}

impl Bomb {
    pub fn new(pos: Vec2, direction: Vec2, radius: f32) -> Self {
        Bomb {
            pos,
            direction: direction.try_normalize().unwrap_or(Vec2::Y),
            speed: BOMB_SPEED,
            state: BombState::Active,
            radius,
            color: 0,
        }
    }

    /// Bomb released below `enemy`, aimed at `target` as it stands right now.
    pub fn dropped_by(enemy: &Enemy, target: Vec2, rng: &mut impl Rng) -> Self {
        let direction = geometry::direction(enemy.pos, target).unwrap_or(Vec2::Y);
        let (lo, hi) = BOMB_RADIUS;
        let radius = rng.gen_range(lo..=hi) as f32;
        let pos = enemy.pos + Vec2::new(0.0, Enemy::size().y / 2.0);
        Bomb {
            color: rng.gen_range(0..BOMB_COLORS),
            ..Bomb::new(pos, direction, radius)
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, Vec2::splat(self.radius * 2.0))
    }

    pub fn is_active(&self) -> bool {
        self.state == BombState::Active
    }

    /// EMP effect: halve speed and stop threatening the player for good.
    pub fn deactivate(&mut self) {
        self.speed /= 2.0;
        self.state = BombState::Inactive;
    }

    /// Advance one tick. Returns `false` once the bomb has left `area`.
    pub fn update(&mut self, area: &Bounds) -> bool {
        self.pos += self.velocity();
        area.contains(&self.bounds())
    }
}

// ── Beam ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    pub pos: Vec2,
    pub direction: Vec2,
    /// On-screen angle in degrees, used for the sprite and its extent.
    pub angle: f32,
}

impl Beam {
    /// Beam leaving the player along its facing, turned by `offset_degrees`.
    pub fn fired_by(player: &Player, offset_degrees: f32) -> Self {
        let angle = player.facing.degrees() + offset_degrees;
        let direction = geometry::unit_from_degrees(angle);
        Beam {
            pos: player.pos + direction * Player::size(),
            direction,
            angle,
        }
    }

    /// `count` beams evenly spread over the fan arc, centred on the facing.
    pub fn fan(player: &Player, count: usize) -> Vec<Beam> {
        if count <= 1 {
            return vec![Beam::fired_by(player, 0.0)];
        }
        let step = FAN_ARC_DEGREES / (count - 1) as f32;
        (0..count)
            .map(|i| Beam::fired_by(player, -FAN_ARC_DEGREES / 2.0 + step * i as f32))
            .collect()
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * BEAM_SPEED
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, geometry::rotated_extent(v(BEAM_SIZE), self.angle))
    }

    /// Advance one tick. Returns `false` once the beam has left `area`.
    pub fn update(&mut self, area: &Bounds) -> bool {
        self.pos += self.velocity();
        area.contains(&self.bounds())
    }
}

// ── Explosion ────────────────────────────────────────────────────────────────

/// Cosmetic burst left where something was destroyed. Never collides.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    pub life: u32,
}

impl Explosion {
    pub fn new(pos: Vec2, life: u32) -> Self {
        Explosion { pos, life }
    }

    /// Which of the two alternating frames to show.
    pub fn frame(&self) -> u8 {
        ((self.life / 10) % 2) as u8
    }

    /// Count down. Returns `false` when the explosion has burnt out.
    pub fn update(&mut self) -> bool {
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}

// ── Gravity field ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GravityField {
    pub area: Bounds,
    pub life: u32,
}

impl GravityField {
    pub fn covering(area: Bounds, life: u32) -> Self {
        GravityField { area, life }
    }

    pub fn bounds(&self) -> Bounds {
        self.area
    }

    pub fn update(&mut self) -> bool {
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}

// ── Shield ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Shield {
    pub pos: Vec2,
    pub angle: f32,
    pub life: u32,
}

impl Shield {
    /// Wall raised one player-extent ahead of the player's facing, turned to
    /// face the same way. Position and orientation never change afterwards.
    pub fn raised_by(player: &Player, life: u32) -> Self {
        Shield {
            pos: player.pos + player.facing.step() * Player::size(),
            angle: player.facing.degrees(),
            life,
        }
    }

    pub fn bounds(&self) -> Bounds {
        let size = Vec2::new(SHIELD_THICKNESS, Player::size().y * 2.0);
        Bounds::from_center(self.pos, geometry::rotated_extent(size, self.angle))
    }

    pub fn update(&mut self) -> bool {
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}

// ── Master game state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over,
}

/// The entire game state. Each entity lives in exactly one typed collection;
/// removing it from that collection is its destruction.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub area: Bounds,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    pub gravity_fields: Vec<GravityField>,
    /// At most one shield can exist.
    pub shield: Option<Shield>,
    pub score: u32,
    pub status: GameStatus,
    pub tick: u64,
    /// Ticks left on the EMP screen flash.
    pub emp_flash: u32,
}

impl GameState {
    pub fn new(width: f32, height: f32) -> Self {
        let area = Bounds::play_area(width, height);
        let start = v(PLAYER_START).min(area.max - Player::size() / 2.0);
        GameState {
            area,
            player: Player::new(start.max(area.min + Player::size() / 2.0)),
            enemies: Vec::new(),
            bombs: Vec::new(),
            beams: Vec::new(),
            explosions: Vec::new(),
            gravity_fields: Vec::new(),
            shield: None,
            score: 0,
            status: GameStatus::Running,
            tick: 0,
            emp_flash: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }
}
