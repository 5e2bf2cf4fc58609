//! Collision resolution, run once per tick after spawning and before motion.
//!
//! Rules are applied in a fixed order. An entity destroyed by one rule is
//! removed from its collection immediately, so no later rule in the same tick
//! can see it again. Gravity fields and the shield only ever destroy.

use glam::Vec2;

use crate::consts::*;
use crate::entities::{Explosion, GameState, GameStatus};
use crate::geometry::Bounds;

/// What destroyed an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destroyer {
    Beam,
    Gravity,
    Shield,
    /// An invincible player absorbing the hit.
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollisionEvent {
    EnemyDowned { at: Vec2, by: Destroyer },
    BombDowned { at: Vec2, by: Destroyer },
    PlayerDefeated { at: Vec2 },
}

// ── Pairing helpers ──────────────────────────────────────────────────────────

/// Mark which `a` boxes overlap any `b` box and which `b` boxes were hit.
///
/// With `consume_b`, a `b` already claimed by an earlier `a` is skipped, so
/// each `b` pairs with at most one `a`. Every `b` overlapping a given `a` is
/// claimed by it.
fn pair_off(a: &[Bounds], b: &[Bounds], consume_b: bool) -> (Vec<bool>, Vec<bool>) {
    let mut a_hit = vec![false; a.len()];
    let mut b_hit = vec![false; b.len()];
    for (i, abox) in a.iter().enumerate() {
        for (j, bbox) in b.iter().enumerate() {
            if consume_b && b_hit[j] {
                continue;
            }
            if abox.intersects(bbox) {
                a_hit[i] = true;
                b_hit[j] = true;
            }
        }
    }
    (a_hit, b_hit)
}

/// Remove the marked items, preserving the order of the rest.
fn take_marked<T>(items: &mut Vec<T>, marks: &[bool]) -> Vec<T> {
    let mut taken = Vec::new();
    let mut kept = Vec::with_capacity(items.len());
    for (item, &marked) in std::mem::take(items).into_iter().zip(marks) {
        if marked {
            taken.push(item);
        } else {
            kept.push(item);
        }
    }
    *items = kept;
    taken
}

fn award(state: &mut GameState, points: u32) {
    state.score = state.score.saturating_add(points);
}

// ── Resolver ─────────────────────────────────────────────────────────────────

/// Apply every collision rule for this tick, in order, and report what
/// happened.
pub fn resolve_collisions(state: &mut GameState) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    // 1. Enemy × Beam
    let beam_boxes: Vec<Bounds> = state.beams.iter().map(|b| b.bounds()).collect();
    let enemy_boxes: Vec<Bounds> = state.enemies.iter().map(|e| e.bounds()).collect();
    let (enemy_hit, beam_hit) = pair_off(&enemy_boxes, &beam_boxes, true);
    take_marked(&mut state.beams, &beam_hit);
    for enemy in take_marked(&mut state.enemies, &enemy_hit) {
        state.explosions.push(Explosion::new(enemy.pos, EXPLOSION_LONG));
        award(state, SCORE_ENEMY_BEAM);
        state.player.cheer();
        events.push(CollisionEvent::EnemyDowned {
            at: enemy.pos,
            by: Destroyer::Beam,
        });
    }

    // 2. Bomb × Beam
    let beam_boxes: Vec<Bounds> = state.beams.iter().map(|b| b.bounds()).collect();
    let bomb_boxes: Vec<Bounds> = state.bombs.iter().map(|b| b.bounds()).collect();
    let (bomb_hit, beam_hit) = pair_off(&bomb_boxes, &beam_boxes, true);
    take_marked(&mut state.beams, &beam_hit);
    for bomb in take_marked(&mut state.bombs, &bomb_hit) {
        minor_kill(state, &mut events, bomb.pos, Destroyer::Beam, false);
    }

    // 3. Bomb × GravityField
    let field_boxes: Vec<Bounds> = state.gravity_fields.iter().map(|g| g.bounds()).collect();
    let bomb_boxes: Vec<Bounds> = state.bombs.iter().map(|b| b.bounds()).collect();
    let (bomb_hit, _) = pair_off(&bomb_boxes, &field_boxes, false);
    for bomb in take_marked(&mut state.bombs, &bomb_hit) {
        minor_kill(state, &mut events, bomb.pos, Destroyer::Gravity, false);
    }

    // 4. Enemy × GravityField
    let enemy_boxes: Vec<Bounds> = state.enemies.iter().map(|e| e.bounds()).collect();
    let (enemy_hit, _) = pair_off(&enemy_boxes, &field_boxes, false);
    for enemy in take_marked(&mut state.enemies, &enemy_hit) {
        minor_kill(state, &mut events, enemy.pos, Destroyer::Gravity, true);
    }

    // 5. Bomb × Shield
    let shield_boxes: Vec<Bounds> = state.shield.iter().map(|s| s.bounds()).collect();
    let bomb_boxes: Vec<Bounds> = state.bombs.iter().map(|b| b.bounds()).collect();
    let (bomb_hit, _) = pair_off(&bomb_boxes, &shield_boxes, false);
    for bomb in take_marked(&mut state.bombs, &bomb_hit) {
        minor_kill(state, &mut events, bomb.pos, Destroyer::Shield, false);
    }

    // 6. Bomb × Player: active bombs only, one test per bomb.
    let player_box = state.player.bounds();
    let mut i = 0;
    while i < state.bombs.len() {
        let bomb = &state.bombs[i];
        if !bomb.is_active() || !bomb.bounds().intersects(&player_box) {
            i += 1;
            continue;
        }
        let bomb = state.bombs.remove(i);
        if state.player.is_invincible() {
            minor_kill(state, &mut events, bomb.pos, Destroyer::Player, false);
            continue;
        }
        state.status = GameStatus::Over;
        state.player.defeat();
        log::info!("player struck at tick {} with score {}", state.tick, state.score);
        events.push(CollisionEvent::PlayerDefeated { at: bomb.pos });
        break;
    }

    events
}

/// The common "destroyed for one point" outcome: short explosion, +1.
fn minor_kill(
    state: &mut GameState,
    events: &mut Vec<CollisionEvent>,
    at: Vec2,
    by: Destroyer,
    enemy: bool,
) {
    state.explosions.push(Explosion::new(at, EXPLOSION_SHORT));
    award(state, SCORE_MINOR);
    events.push(if enemy {
        CollisionEvent::EnemyDowned { at, by }
    } else {
        CollisionEvent::BombDowned { at, by }
    });
}
