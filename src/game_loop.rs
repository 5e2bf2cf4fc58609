//! Fixed-rate game loop driver.
//!
//! The loop is generic over where input comes from, where frames go and how
//! time passes, so the same driver runs the terminal game and the tests.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::Rng;

use crate::compute::step;
use crate::config::GameConfig;
use crate::entities::GameState;
use crate::input::TickInput;
use crate::render::{render_frame, RenderSink};

/// Supplies the input snapshot for each tick. Called exactly once per tick.
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Controls how real time passes between ticks.
pub trait Pacer {
    /// Block until the current tick's time slot has elapsed.
    fn wait_for_next_tick(&mut self);
    /// Hold the final frame after a loss.
    fn hold_defeat(&mut self);
}

/// Sleeps away whatever is left of each tick interval.
pub struct SleepPacer {
    interval: Duration,
    defeat_hold: Duration,
    tick_start: Instant,
}

impl SleepPacer {
    pub fn new(config: &GameConfig) -> Self {
        SleepPacer {
            interval: config.tick_interval(),
            defeat_hold: config.defeat_hold,
            tick_start: Instant::now(),
        }
    }
}

impl Pacer for SleepPacer {
    fn wait_for_next_tick(&mut self) {
        let elapsed = self.tick_start.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
        self.tick_start = Instant::now();
    }

    fn hold_defeat(&mut self) {
        std::thread::sleep(self.defeat_hold);
    }
}

/// How a run ended. Both are normal outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Quit { score: u32, ticks: u64 },
    Defeated { score: u32, ticks: u64 },
}

/// Run ticks until the player quits or is defeated.
///
/// Per tick: poll input, simulate (abilities, spawns, drops, collisions,
/// motion), render, advance the tick counter, wait for the next slot. On a
/// loss the final frame is rendered, held, and the loop returns.
pub fn run<I, S, P, R>(
    state: &mut GameState,
    input: &mut I,
    sink: &mut S,
    pacer: &mut P,
    rng: &mut R,
) -> Result<RunOutcome>
where
    I: InputSource + ?Sized,
    S: RenderSink + ?Sized,
    P: Pacer + ?Sized,
    R: Rng,
{
    log::info!("game loop started at tick {}", state.tick);
    loop {
        let tick_input = input.poll();
        if tick_input.quit {
            log::info!("quit at tick {} with score {}", state.tick, state.score);
            return Ok(RunOutcome::Quit {
                score: state.score,
                ticks: state.tick,
            });
        }

        let report = step(state, &tick_input, rng);
        if !report.collisions.is_empty() {
            log::debug!("tick {}: {:?}", state.tick, report.collisions);
        }

        render_frame(state, sink)
            .with_context(|| format!("rendering frame for tick {}", state.tick))?;

        if state.is_over() {
            pacer.hold_defeat();
            return Ok(RunOutcome::Defeated {
                score: state.score,
                ticks: state.tick,
            });
        }

        state.tick += 1;
        pacer.wait_for_next_tick();
    }
}
