use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sky_barrage::abilities::{try_activate, Ability, Activation};
use sky_barrage::compute::tick;
use sky_barrage::consts::*;
use sky_barrage::entities::*;
use sky_barrage::{HeldKeys, TickInput};

fn held_keys() -> impl Strategy<Value = HeldKeys> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right)| HeldKeys {
            up,
            down,
            left,
            right,
            fan_modifier: false,
        },
    )
}

proptest! {
    #[test]
    fn enemy_settles_once_and_stays(hold in ENEMY_HOLD_MIN..325.0f32, steps in 1usize..120) {
        let mut enemy = Enemy::new(Vec2::new(300.0, 0.0), hold, 50);
        let mut switches = 0;
        let mut was_holding = enemy.is_holding();
        for _ in 0..steps {
            enemy.update();
            if enemy.is_holding() != was_holding {
                switches += 1;
                prop_assert!(enemy.is_holding());
            }
            was_holding = enemy.is_holding();
        }
        prop_assert!(switches <= 1);
        if enemy.is_holding() {
            prop_assert!(enemy.pos.y >= hold);
            prop_assert!(enemy.pos.y < hold + ENEMY_FALL_SPEED);
        }
    }

    #[test]
    fn bomb_keeps_its_aim(
        ex in 0.0f32..1100.0, ey in 50.0f32..325.0,
        tx in 0.0f32..1100.0, ty in 0.0f32..650.0,
        seed in any::<u64>(),
    ) {
        let enemy = Enemy::new(Vec2::new(ex, ey), ey, 50);
        let target = Vec2::new(tx, ty);
        prop_assume!(enemy.pos.distance(target) > 1.0);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut bomb = Bomb::dropped_by(&enemy, target, &mut rng);
        let aim = (target - enemy.pos).normalize();
        prop_assert!((bomb.direction - aim).length() < 1e-4);

        let area = sky_barrage::geometry::Bounds::play_area(PLAY_WIDTH, PLAY_HEIGHT);
        let start = bomb.direction;
        for _ in 0..20 {
            bomb.update(&area);
        }
        prop_assert_eq!(bomb.direction, start);
    }

    #[test]
    fn player_never_leaves_play_area(keys in prop::collection::vec(held_keys(), 1..200)) {
        let mut state = GameState::new(PLAY_WIDTH, PLAY_HEIGHT);
        let area = state.area;
        for held in keys {
            state.player.update(&held, &area);
            prop_assert!(state.area.contains(&state.player.bounds()));
        }
    }

    #[test]
    fn refused_gravity_changes_nothing(score in 0u32..=COST_GRAVITY) {
        let mut state = GameState::new(PLAY_WIDTH, PLAY_HEIGHT);
        state.score = score;
        let before = state.clone();
        prop_assert_eq!(try_activate(&mut state, Ability::Gravity), Activation::Refused);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn score_never_drops_without_a_purchase(seed in any::<u64>(), fire_every in 1u64..30) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new(PLAY_WIDTH, PLAY_HEIGHT);
        for i in 0..400u64 {
            let input = if i % fire_every == 0 {
                TickInput::default().press(sky_barrage::Key::Fire)
            } else {
                TickInput::default()
            };
            let next = tick(&state, &input, &mut rng);
            prop_assert!(next.score >= state.score);
            prop_assert!(next.shield.is_none());
            state = next;
        }
    }
}
