//! Movement tick
//!
//! Advances every object, then removes whatever crossed the top boundary.
//! The boundary pass always sees the fully moved object set.

use super::state::{GameObject, GameState, PowerUpKind};
use crate::consts::*;

/// What a movement tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementReport {
    /// Objects that crossed the boundary this tick, in spawn order
    pub escaped: Vec<GameObject>,
    /// Lives actually lost
    pub lives_lost: u32,
}

/// Move every object up by its speed (halved while slowed)
pub fn move_objects(state: &mut GameState) {
    let factor = if state.active_power_up() == Some(PowerUpKind::Slow) {
        SLOW_FACTOR
    } else {
        1.0
    };
    for obj in &mut state.objects {
        obj.position += obj.speed * factor;
    }
}

/// Remove objects at or past the boundary and charge lives for them
pub fn enforce_boundary(state: &mut GameState) -> MovementReport {
    let mut report = MovementReport::default();
    if !state.objects.iter().any(|o| o.position >= BOUNDARY_POSITION) {
        return report;
    }

    let (escaped, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.objects)
        .into_iter()
        .partition(|o| o.position >= BOUNDARY_POSITION);
    state.objects = kept;

    let shielded = state.active_power_up() == Some(PowerUpKind::Shield);
    for obj in &escaped {
        if obj.archetype.is_power_up() {
            log::debug!("Missed power-up {} (no penalty)", obj.archetype.name());
            continue;
        }
        if shielded {
            log::debug!("Shield absorbed {} in column {}", obj.archetype.name(), obj.column);
            continue;
        }
        if state.over {
            continue;
        }
        report.lives_lost += 1;
        state.lose_life();
        log::debug!(
            "{} escaped column {}, lives left {}",
            obj.archetype.name(),
            obj.column,
            state.lives
        );
    }

    report.escaped = escaped;
    report
}

/// Full movement cadence: move, then boundary check
pub fn movement_tick(state: &mut GameState) -> MovementReport {
    move_objects(state);
    enforce_boundary(state)
}
