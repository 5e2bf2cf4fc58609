//! Score-gated abilities.
//!
//! Score doubles as currency. Each paid ability checks its precondition and
//! deducts its cost in the same step; a refused activation changes nothing.

use crate::consts::*;
use crate::entities::{Beam, GameState, GravityField, Shield};
use crate::input::{Key, TickInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ability {
    Beam,
    FanBeam,
    Gravity,
    Emp,
    Invincibility,
    Shield,
}

impl Ability {
    /// Ability triggered by a key-down, given the modifier state.
    pub fn for_key(key: Key, fan_modifier: bool) -> Option<Ability> {
        match key {
            Key::Fire if fan_modifier => Some(Ability::FanBeam),
            Key::Fire => Some(Ability::Beam),
            Key::Gravity => Some(Ability::Gravity),
            Key::Emp => Some(Ability::Emp),
            Key::Invincible => Some(Ability::Invincibility),
            Key::Shield => Some(Ability::Shield),
            _ => None,
        }
    }

    pub fn cost(self) -> u32 {
        match self {
            Ability::Beam | Ability::FanBeam => 0,
            Ability::Gravity => COST_GRAVITY,
            Ability::Emp => COST_EMP,
            Ability::Invincibility => COST_INVINCIBLE,
            Ability::Shield => COST_SHIELD,
        }
    }

    /// Precondition checked at the instant of the key-down.
    fn allowed(self, state: &GameState) -> bool {
        match self {
            Ability::Beam | Ability::FanBeam => true,
            Ability::Shield => state.shield.is_none() && state.score > self.cost(),
            _ => state.score > self.cost(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Applied,
    Refused,
}

/// Try to activate `ability`, paying for it out of the score.
pub fn try_activate(state: &mut GameState, ability: Ability) -> Activation {
    if !ability.allowed(state) {
        log::debug!(
            "{:?} refused (score {}, cost {})",
            ability,
            state.score,
            ability.cost()
        );
        return Activation::Refused;
    }
    state.score -= ability.cost();

    match ability {
        Ability::Beam => state.beams.push(Beam::fired_by(&state.player, 0.0)),
        Ability::FanBeam => state.beams.extend(Beam::fan(&state.player, FAN_BEAMS)),
        Ability::Gravity => state
            .gravity_fields
            .push(GravityField::covering(state.area, GRAVITY_LIFE)),
        Ability::Emp => emp_pulse(state),
        Ability::Invincibility => state.player.make_invincible(INVINCIBLE_TICKS),
        Ability::Shield => state.shield = Some(Shield::raised_by(&state.player, SHIELD_LIFE)),
    }

    if ability.cost() > 0 {
        log::info!("{:?} activated, score now {}", ability, state.score);
    }
    Activation::Applied
}

/// Jam every enemy and defuse every bomb currently alive. Nothing persists
/// apart from a short screen flash.
fn emp_pulse(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.jam();
    }
    for bomb in &mut state.bombs {
        bomb.deactivate();
    }
    state.emp_flash = EMP_FLASH_TICKS;
}

/// Apply every key-down of this tick, in arrival order.
pub fn apply_input(state: &mut GameState, input: &TickInput) -> Vec<(Ability, Activation)> {
    input
        .pressed
        .iter()
        .filter_map(|&key| Ability::for_key(key, input.held.fan_modifier))
        .map(|ability| (ability, try_activate(state, ability)))
        .collect()
}
