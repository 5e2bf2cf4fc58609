use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sky_barrage::compute::*;
use sky_barrage::consts::*;
use sky_barrage::entities::*;
use sky_barrage::{GameConfig, HeldKeys, Key, TickInput};

fn make_state() -> GameState {
    let mut s = GameState::new(PLAY_WIDTH, PLAY_HEIGHT);
    s.tick = 1; // off the spawn period
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn holding_enemy(x: f32, y: f32, interval: u32) -> Enemy {
    Enemy {
        phase: EnemyPhase::Holding,
        vel: Vec2::ZERO,
        ..Enemy::new(Vec2::new(x, y), y, interval)
    }
}

fn idle() -> TickInput {
    TickInput::default()
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = init_state(&GameConfig::default());
    assert_eq!(s.player.pos, Vec2::new(900.0, 400.0));
    assert_eq!(s.player.facing, Facing::East);
    assert_eq!(s.player.mode, PlayerMode::Normal);
}

#[test]
fn init_state_empty_collections() {
    let s = init_state(&GameConfig::default());
    assert!(s.enemies.is_empty());
    assert!(s.bombs.is_empty());
    assert!(s.beams.is_empty());
    assert!(s.shield.is_none());
    assert_eq!(s.score, 0);
    assert_eq!(s.tick, 0);
    assert_eq!(s.status, GameStatus::Running);
}

#[test]
fn init_state_keeps_player_inside_small_area() {
    let config = GameConfig {
        width: 400.0,
        height: 300.0,
        ..GameConfig::default()
    };
    let s = init_state(&config);
    assert!(s.area.contains(&s.player.bounds()));
}

// ── tick: counter & purity ────────────────────────────────────────────────────

#[test]
fn tick_increments_counter() {
    let mut s = make_state();
    s.tick = 5;
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.tick, 6);
}

#[test]
fn tick_does_not_mutate_original() {
    let mut s = make_state();
    s.beams.push(Beam::fired_by(&s.player, 90.0));
    let before = s.clone();
    let _ = tick(&s, &TickInput::default().press(Key::Fire), &mut seeded_rng());
    assert_eq!(s, before);
}

#[test]
fn finished_game_does_not_advance() {
    let mut s = make_state();
    s.status = GameStatus::Over;
    let s2 = tick(&s, &TickInput::default().press(Key::Fire), &mut seeded_rng());
    assert_eq!(s2, s);
}

// ── tick: spawning ────────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_on_period() {
    let mut s = make_state();
    s.tick = ENEMY_SPAWN_PERIOD;
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 1);
    // spawned at the top, then fell one step in the same tick
    assert_eq!(s2.enemies[0].pos.y, ENEMY_FALL_SPEED);
}

#[test]
fn first_tick_spawns() {
    let s = init_state(&GameConfig::default());
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 1);
}

#[test]
fn no_spawn_off_period() {
    let s = make_state();
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert!(s2.enemies.is_empty());
}

// ── tick: bomb drops ──────────────────────────────────────────────────────────

#[test]
fn holding_enemy_drops_bomb_at_player() {
    let mut s = make_state();
    s.tick = 100;
    s.enemies.push(holding_enemy(200.0, 100.0, 50));
    let s2 = tick(&s, &idle(), &mut seeded_rng());

    assert_eq!(s2.bombs.len(), 1);
    let expected = (s.player.pos - Vec2::new(200.0, 100.0)).normalize();
    assert!((s2.bombs[0].direction - expected).length() < 1e-5);
}

#[test]
fn holding_enemy_waits_off_cadence() {
    let mut s = make_state();
    s.tick = 101;
    s.enemies.push(holding_enemy(200.0, 100.0, 50));
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert!(s2.bombs.is_empty());
}

#[test]
fn jammed_enemy_stops_bombing() {
    let mut s = make_state();
    s.tick = 100;
    let mut e = holding_enemy(200.0, 100.0, 50);
    e.jam();
    s.enemies.push(e);
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert!(s2.bombs.is_empty());
}

#[test]
fn descending_enemy_never_drops() {
    let mut s = make_state();
    s.tick = 100;
    s.enemies.push(Enemy::new(Vec2::new(200.0, 10.0), 300.0, 50));
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert!(s2.bombs.is_empty());
}

// ── tick: collisions & motion ─────────────────────────────────────────────────

#[test]
fn collisions_resolve_before_motion() {
    let mut s = make_state();
    s.enemies.push(holding_enemy(300.0, 200.0, 50));
    s.beams.push(Beam {
        pos: Vec2::new(300.0, 200.0),
        direction: Vec2::X,
        angle: 0.0,
    });
    let s2 = tick(&s, &idle(), &mut seeded_rng());

    assert!(s2.enemies.is_empty());
    assert!(s2.beams.is_empty());
    assert_eq!(s2.score, SCORE_ENEMY_BEAM);
    // explosion already counted down once
    assert_eq!(s2.explosions[0].life, EXPLOSION_LONG - 1);
}

#[test]
fn player_follows_held_keys() {
    let s = make_state();
    let input = TickInput::with_held(HeldKeys {
        left: true,
        ..Default::default()
    });
    let s2 = tick(&s, &input, &mut seeded_rng());
    assert_eq!(s2.player.pos, Vec2::new(890.0, 400.0));
    assert_eq!(s2.player.facing, Facing::West);
}

#[test]
fn fired_beam_flies_same_tick() {
    let s = make_state();
    let s2 = tick(&s, &TickInput::default().press(Key::Fire), &mut seeded_rng());
    assert_eq!(s2.beams.len(), 1);
    assert_eq!(s2.beams[0].pos.x, 900.0 + 100.0 + BEAM_SPEED);
}

#[test]
fn burnt_out_explosion_is_removed() {
    let mut s = make_state();
    s.explosions.push(Explosion::new(Vec2::new(100.0, 100.0), 1));
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert!(s2.explosions.is_empty());
}

#[test]
fn bomb_on_player_ends_game() {
    let mut s = make_state();
    s.bombs.push(Bomb::new(s.player.pos, Vec2::Y, 10.0));
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Over);
    assert_eq!(s2.player.mood, Mood::Defeated);
}

#[test]
fn invincible_player_shrugs_off_bomb() {
    let mut s = make_state();
    s.score = 7;
    s.player.make_invincible(INVINCIBLE_TICKS);
    s.bombs.push(Bomb::new(s.player.pos, Vec2::Y, 10.0));
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Running);
    assert_eq!(s2.score, 8);
    assert!(s2.bombs.is_empty());
    assert_eq!(s2.explosions.len(), 1);
}

#[test]
fn step_reports_what_happened() {
    let mut s = make_state();
    s.tick = 100;
    s.score = 30;
    s.enemies.push(holding_enemy(200.0, 100.0, 50));
    let report = step(
        &mut s,
        &TickInput::default().press(Key::Emp),
        &mut seeded_rng(),
    );
    assert_eq!(report.activations.len(), 1);
    assert!(!report.enemy_spawned);
    // the EMP landed before the drop check
    assert_eq!(report.bombs_dropped, 0);
    assert!(report.collisions.is_empty());
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_game() {
    let config = GameConfig {
        seed: 99,
        ..GameConfig::default()
    };
    let mut a = init_state(&config);
    let mut b = init_state(&config);
    let mut rng_a = StdRng::seed_from_u64(config.seed);
    let mut rng_b = StdRng::seed_from_u64(config.seed);

    for i in 0..600u32 {
        let input = if i % 25 == 0 {
            TickInput::default().press(Key::Fire)
        } else {
            TickInput::with_held(HeldKeys {
                up: i % 100 < 50,
                down: i % 100 >= 50,
                ..Default::default()
            })
        };
        a = tick(&a, &input, &mut rng_a);
        b = tick(&b, &input, &mut rng_b);
    }

    assert_eq!(a, b);
}
