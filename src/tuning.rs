//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`]. A JSON
//! document may override any subset; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime-tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lives ===
    pub initial_lives: u32,
    /// Cap for destroy-triggered life gains (wave bonus ignores it)
    pub max_lives: u32,

    // === Cadences (milliseconds) ===
    pub base_spawn_interval_ms: u32,
    pub min_spawn_interval_ms: u32,
    pub spawn_interval_step_ms: u32,
    pub movement_interval_ms: u32,
    pub wave_delay_ms: u32,
    pub wave_message_ms: u32,

    // === Power-ups ===
    pub power_up_seconds: u32,

    // === Waves ===
    pub base_quota: u32,
    pub speed_growth_per_wave: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            max_lives: MAX_LIVES,

            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            movement_interval_ms: MOVEMENT_INTERVAL_MS,
            wave_delay_ms: WAVE_DELAY_MS,
            wave_message_ms: WAVE_MESSAGE_MS,

            power_up_seconds: POWER_UP_SECONDS,

            base_quota: BASE_WAVE_QUOTA,
            speed_growth_per_wave: SPEED_GROWTH_PER_WAVE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would stall or break the simulation
    pub fn sanitized(mut self) -> Self {
        for (name, value) in [
            ("base_spawn_interval_ms", &mut self.base_spawn_interval_ms),
            ("min_spawn_interval_ms", &mut self.min_spawn_interval_ms),
            ("movement_interval_ms", &mut self.movement_interval_ms),
            ("wave_delay_ms", &mut self.wave_delay_ms),
            ("wave_message_ms", &mut self.wave_message_ms),
        ] {
            if *value == 0 {
                log::warn!("Tuning {} must be positive, using 1", name);
                *value = 1;
            }
        }
        if self.max_lives == 0 {
            log::warn!("Tuning max_lives must be positive, using 1");
            self.max_lives = 1;
        }
        if self.initial_lives == 0 || self.initial_lives > self.max_lives {
            let clamped = self.initial_lives.clamp(1, self.max_lives);
            log::warn!(
                "Tuning initial_lives {} out of range, using {}",
                self.initial_lives,
                clamped
            );
            self.initial_lives = clamped;
        }
        if self.base_quota == 0 {
            log::warn!("Tuning base_quota must be positive, using 1");
            self.base_quota = 1;
        }
        if !self.speed_growth_per_wave.is_finite() || self.speed_growth_per_wave < 0.0 {
            log::warn!(
                "Tuning speed_growth_per_wave {} invalid, using default",
                self.speed_growth_per_wave
            );
            self.speed_growth_per_wave = SPEED_GROWTH_PER_WAVE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_lives": 5 }"#).unwrap();
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.base_spawn_interval_ms, BASE_SPAWN_INTERVAL_MS);
        assert_eq!(tuning.base_quota, BASE_WAVE_QUOTA);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ initial_lives: ").is_err());
    }

    #[test]
    fn test_sanitize_clamps() {
        let tuning = Tuning {
            movement_interval_ms: 0,
            max_lives: 4,
            initial_lives: 9,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.movement_interval_ms, 1);
        assert_eq!(tuning.initial_lives, 4);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
