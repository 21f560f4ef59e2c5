//! Object spawning
//!
//! Each spawn tick creates at most one object, plus an occasional second one
//! in a different column once waves get high enough.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Archetype, GameState};
use crate::consts::SPAWN_POSITION;

/// Rerolls allowed when looking for a distinct column for the second object
const MAX_COLUMN_REROLLS: u32 = 16;

/// Source of uniform `[0, 1)` samples
pub trait Dice {
    fn draw(&mut self) -> f64;

    /// Uniform index in `[0, n)`
    fn pick(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        ((self.draw() * n as f64) as usize).min(n.saturating_sub(1))
    }
}

/// Seeded deterministic dice
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: Pcg32,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Pick the archetype for a regular spawn
///
/// Every branch rolls its own sample, in this order. Later thresholds are
/// therefore tested against fresh draws, which skews the real frequencies
/// away from the nominal percentages. Keep it that way: spawn balance was
/// tuned against this behavior.
pub fn choose_archetype(wave: u32, dice: &mut impl Dice) -> Archetype {
    if wave >= 20 && dice.draw() < 0.10 {
        Archetype::EggCluster
    } else if wave >= 10 && dice.draw() < 0.10 {
        Archetype::Egg
    } else if dice.draw() < 0.05 {
        Archetype::Shield
    } else if dice.draw() < 0.10 {
        Archetype::Slow
    } else {
        choose_common(dice)
    }
}

/// Uniform pick from the common set
pub fn choose_common(dice: &mut impl Dice) -> Archetype {
    Archetype::COMMON[dice.pick(Archetype::COMMON.len())]
}

/// Probability of a second object on a spawn tick
pub fn dual_spawn_chance(wave: u32) -> f64 {
    (0.01 + wave as f64 / 100.0 - 1.0).max(0.0)
}

/// Speed for an archetype spawned during `state`'s wave
pub fn spawn_speed(state: &GameState, archetype: Archetype) -> f32 {
    archetype.base_speed() * state.speed_multiplier()
}

/// Column different from `taken`, or None if none can be found
fn distinct_column(num_columns: u32, taken: u32, dice: &mut impl Dice) -> Option<u32> {
    if num_columns < 2 {
        return None;
    }
    (0..MAX_COLUMN_REROLLS)
        .map(|_| dice.pick(num_columns as usize) as u32)
        .find(|&c| c != taken)
}

/// Run one spawn tick. Returns the IDs of objects created.
pub fn spawn_tick(state: &mut GameState, dice: &mut impl Dice) -> Vec<u64> {
    let num_columns = state.num_columns();
    if num_columns == 0 || state.objects.len() >= state.objects_per_wave() as usize {
        return Vec::new();
    }

    let archetype = choose_archetype(state.wave, dice);
    let dual = dice.draw() < dual_spawn_chance(state.wave);
    let column = dice.pick(num_columns as usize) as u32;

    let mut spawned = Vec::with_capacity(2);
    let speed = spawn_speed(state, archetype);
    spawned.push(state.push_object(archetype, column, SPAWN_POSITION, speed));
    log::debug!(
        "Spawned {} in column {} (speed {:.3})",
        archetype.name(),
        column,
        speed
    );

    if dual {
        let second = choose_common(dice);
        match distinct_column(num_columns, column, dice) {
            Some(column2) => {
                let speed = spawn_speed(state, second);
                spawned.push(state.push_object(second, column2, SPAWN_POSITION, speed));
                log::debug!("Dual spawn: {} in column {}", second.name(), column2);
            }
            None => log::debug!("Dual spawn skipped: no free column"),
        }
    }

    spawned
}
