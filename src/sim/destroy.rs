//! Destroy resolution
//!
//! The player always hits the newest object in their column. What happens
//! next depends on the archetype that was hit.

use super::powerup;
use super::state::{Archetype, GameObject, GameState, PowerUpKind};
use crate::consts::*;

/// Side effect of a successful destroy
#[derive(Debug, Clone, PartialEq)]
pub enum DestroyEffect {
    /// Heart or extra-life pickup
    LifeGained,
    /// Two descendants were created (IDs in creation order)
    Split([u64; 2]),
    /// Timed power-up started
    PowerUp(PowerUpKind),
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestroyOutcome {
    pub destroyed: GameObject,
    pub effect: DestroyEffect,
}

/// Resolve a destroy in the player's column. None if the column is empty.
///
/// Caller gates on the run state; this only applies the rules.
pub fn resolve_destroy(state: &mut GameState) -> Option<DestroyOutcome> {
    let column = state.player_column;
    let idx = state.newest_in_column(column)?;
    let target = state.objects.remove(idx);

    let effect = match target.archetype {
        Archetype::Heart | Archetype::ExtraLife => {
            state.gain_life_capped();
            DestroyEffect::LifeGained
        }
        a if a.splits() => DestroyEffect::Split(split(state, &target)),
        Archetype::Slow => {
            powerup::activate(state, PowerUpKind::Slow);
            DestroyEffect::PowerUp(PowerUpKind::Slow)
        }
        Archetype::Shield => {
            powerup::activate(state, PowerUpKind::Shield);
            DestroyEffect::PowerUp(PowerUpKind::Shield)
        }
        _ => DestroyEffect::Plain,
    };

    // Hearts pay out a life instead of a point; they still count toward the quota
    if target.archetype != Archetype::Heart {
        state.score += 1;
    }
    state.objects_destroyed_this_wave += 1;
    log::debug!(
        "Destroyed {} #{} in column {} -> {:?} (score {})",
        target.archetype.name(),
        target.id,
        column,
        effect,
        state.score
    );

    Some(DestroyOutcome {
        destroyed: target,
        effect,
    })
}

/// Spawn the two descendants of a splitting object. Clusters break into eggs
/// placed ahead of the parent; eggs break into rockets at the parent's spot.
/// One lands in the player's column, the other in the next column (wrapping).
fn split(state: &mut GameState, parent: &GameObject) -> [u64; 2] {
    let num_columns = state.num_columns().max(1);
    let columns = [
        state.player_column,
        (state.player_column + 1) % num_columns,
    ];
    let (archetype, offsets) = if parent.archetype.is_cluster() {
        (Archetype::Egg, CLUSTER_OFFSETS)
    } else {
        (Archetype::Rocket, [0.0, 0.0])
    };

    let mut ids = [0; 2];
    for (i, id) in ids.iter_mut().enumerate() {
        *id = state.push_object(
            archetype,
            columns[i],
            parent.position + offsets[i],
            DESCENDANT_SPEED,
        );
    }
    ids
}
