//! Power-up countdown
//!
//! `none -> active(kind, seconds) -> none`. The engine only runs the
//! countdown cadence while unpaused, so a paused countdown simply holds.

use super::state::{ActivePowerUp, GameState, PowerUpKind};

/// Activate a timed power-up, replacing any current one and its timer
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    if let Some(previous) = state.power_up {
        log::debug!(
            "Power-up {} replaced with {} ({}s were left)",
            previous.kind.as_str(),
            kind.as_str(),
            previous.remaining_seconds
        );
    }
    state.power_up = Some(ActivePowerUp {
        kind,
        remaining_seconds: state.tuning.power_up_seconds,
    });
    log::debug!("Power-up {} active", kind.as_str());
}

/// One second of countdown. Returns the kind that expired, if any.
pub fn countdown(state: &mut GameState) -> Option<PowerUpKind> {
    let active = state.power_up.as_mut()?;
    active.remaining_seconds = active.remaining_seconds.saturating_sub(1);
    if active.remaining_seconds == 0 {
        let kind = active.kind;
        state.power_up = None;
        log::debug!("Power-up {} expired", kind.as_str());
        return Some(kind);
    }
    None
}

/// Drop the current power-up immediately
pub fn clear(state: &mut GameState) {
    state.power_up = None;
}
