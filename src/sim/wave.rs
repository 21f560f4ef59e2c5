//! Wave progression
//!
//! `Active -> Transitioning -> Active(wave + 1)`. The engine owns the
//! transition delay; these functions apply each edge.

use super::powerup;
use super::state::{GameState, WavePhase, wave_message};

/// Quota met while the wave is still active
pub fn quota_reached(state: &GameState) -> bool {
    state.wave_phase == WavePhase::Active
        && state.objects_destroyed_this_wave >= state.objects_per_wave()
}

/// Enter the transition if the quota is met. Returns true on the edge only,
/// so a wave can never transition twice.
pub fn begin_transition(state: &mut GameState) -> bool {
    if !quota_reached(state) {
        return false;
    }
    state.wave_phase = WavePhase::Transitioning;
    state.objects.clear();
    powerup::clear(state);
    state.wave_message = Some(wave_message(state.wave + 1));
    log::info!(
        "Wave {} cleared ({} destroyed), next wave incoming",
        state.wave,
        state.objects_destroyed_this_wave
    );
    true
}

/// Finish a pending transition. Returns false if none was pending.
pub fn complete_transition(state: &mut GameState) -> bool {
    if state.wave_phase != WavePhase::Transitioning {
        return false;
    }
    let tuning = &state.tuning;
    state.spawn_interval_ms = next_spawn_interval(
        state.spawn_interval_ms,
        tuning.spawn_interval_step_ms,
        tuning.min_spawn_interval_ms,
    );
    state.wave += 1;
    state.objects_destroyed_this_wave = 0;
    // Wave bonus ignores the usual life cap
    state.lives += 1;
    state.wave_phase = WavePhase::Active;
    log::info!(
        "Wave {} started: quota {}, spawn every {}ms, lives {}",
        state.wave,
        state.objects_per_wave(),
        state.spawn_interval_ms,
        state.lives
    );
    true
}

/// Spawn interval after one more wave
pub fn next_spawn_interval(current: u32, step: u32, floor: u32) -> u32 {
    if current > floor {
        current.saturating_sub(step).max(floor)
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ActivePowerUp, Archetype, Difficulty, PowerUpKind};
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.difficulty = Some(Difficulty::Easy);
        state.started = true;
        state
    }

    #[test]
    fn test_no_transition_below_quota() {
        let mut state = playing();
        state.objects_destroyed_this_wave = 19;
        assert!(!begin_transition(&mut state));
        assert_eq!(state.wave_phase, WavePhase::Active);
    }

    #[test]
    fn test_transition_once_per_wave() {
        let mut state = playing();
        state.push_object(Archetype::Rocket, 0, 40.0, 0.5);
        state.power_up = Some(ActivePowerUp {
            kind: PowerUpKind::Slow,
            remaining_seconds: 4,
        });
        state.objects_destroyed_this_wave = 20;

        assert!(begin_transition(&mut state));
        assert!(state.objects.is_empty());
        assert!(state.power_up.is_none());
        assert_eq!(state.wave_message.as_deref(), Some("Wave 2 starting"));

        state.objects_destroyed_this_wave = 25;
        assert!(!begin_transition(&mut state));

        assert!(complete_transition(&mut state));
        assert_eq!(state.wave, 2);
        assert_eq!(state.objects_per_wave(), 21);
        assert_eq!(state.objects_destroyed_this_wave, 0);
        assert_eq!(state.spawn_interval_ms, 900);
        assert_eq!(state.lives, 4);
        assert!(!complete_transition(&mut state));
    }

    #[test]
    fn test_wave_bonus_exceeds_cap() {
        let mut state = playing();
        state.lives = 10;
        state.objects_destroyed_this_wave = 20;
        begin_transition(&mut state);
        complete_transition(&mut state);
        assert_eq!(state.lives, 11);
    }

    #[test]
    fn test_spawn_interval_floor() {
        assert_eq!(next_spawn_interval(1000, 100, 200), 900);
        assert_eq!(next_spawn_interval(300, 100, 200), 200);
        assert_eq!(next_spawn_interval(250, 100, 200), 200);
        assert_eq!(next_spawn_interval(200, 100, 200), 200);
    }
}
