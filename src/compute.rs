//! The per-tick simulation step.
//!
//! `tick` takes an immutable reference to the current `GameState` (plus the
//! tick's input and an injected RNG) and returns a brand-new `GameState`.
//! Side effects are limited to the RNG.

use rand::Rng;

use crate::abilities::{apply_input, Ability, Activation};
use crate::collision::{resolve_collisions, CollisionEvent};
use crate::config::GameConfig;
use crate::consts::*;
use crate::entities::{Bomb, Enemy, GameState};
use crate::input::TickInput;

/// What happened during one tick, for logging and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub activations: Vec<(Ability, Activation)>,
    pub enemy_spawned: bool,
    pub bombs_dropped: usize,
    pub collisions: Vec<CollisionEvent>,
}

/// Build the initial game state for a play area.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState::new(config.width, config.height)
}

/// Spawn one enemy if `tick` falls on the spawn period.
pub fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) -> bool {
    if state.tick % ENEMY_SPAWN_PERIOD != 0 {
        return false;
    }
    let enemy = Enemy::spawn(&state.area, rng);
    log::debug!(
        "enemy spawned at x={:.0}, holds at y={:.0}",
        enemy.pos.x,
        enemy.hold_altitude
    );
    state.enemies.push(enemy);
    true
}

/// Every holding enemy whose cadence falls on this tick drops a bomb aimed at
/// the player's current position.
pub fn drop_bombs(state: &mut GameState, rng: &mut impl Rng) -> usize {
    let target = state.player.pos;
    let tick = state.tick;
    let dropped: Vec<Bomb> = state
        .enemies
        .iter()
        .filter(|e| e.ready_to_drop(tick))
        .map(|e| Bomb::dropped_by(e, target, rng))
        .collect();
    let count = dropped.len();
    state.bombs.extend(dropped);
    count
}

/// Advance every entity by one tick and drop whatever expired or left the
/// play area.
pub fn update_entities(state: &mut GameState, input: &TickInput) {
    let area = state.area;
    state.player.update(&input.held, &area);
    state.beams.retain_mut(|b| b.update(&area));
    for enemy in &mut state.enemies {
        enemy.update();
    }
    state.bombs.retain_mut(|b| b.update(&area));
    state.explosions.retain_mut(|e| e.update());
    state.gravity_fields.retain_mut(|g| g.update());
    if let Some(shield) = &mut state.shield {
        if !shield.update() {
            state.shield = None;
        }
    }
    state.emp_flash = state.emp_flash.saturating_sub(1);
}

/// Advance the simulation by one tick, mutating in place.
///
/// Order: abilities, enemy spawn, bomb drops, collisions, motion. A tick that
/// ends the game skips motion so the final frame shows the fatal contact.
/// The tick counter is not advanced here; see [`tick`].
pub fn step(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) -> TickReport {
    let mut report = TickReport::default();
    if state.is_over() {
        return report;
    }

    report.activations = apply_input(state, input);
    report.enemy_spawned = spawn_enemies(state, rng);
    report.bombs_dropped = drop_bombs(state, rng);
    report.collisions = resolve_collisions(state);

    if !state.is_over() {
        update_entities(state, input);
    }
    report
}

/// Advance the simulation by one tick. All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if !state.is_over() {
        step(&mut next, input, rng);
        next.tick += 1;
    }
    next
}
