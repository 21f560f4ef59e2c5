//! Send 'Em To Zero - A column-based reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, waves, power-ups)
//! - `engine`: Command surface consumed by the presentation layer
//! - `tuning`: Data-driven game balance
//! - `error`: Rejected command sequencing

pub mod engine;
pub mod error;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, Snapshot};
pub use error::CommandError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Position where every spawned object starts
    pub const SPAWN_POSITION: f32 = 10.0;
    /// Position at which an object has escaped through the top
    pub const BOUNDARY_POSITION: f32 = 100.0;

    /// Lives at the start of a run
    pub const INITIAL_LIVES: u32 = 3;
    /// Cap for lives gained by destroying hearts / extra-life pickups
    pub const MAX_LIVES: u32 = 10;

    /// Spawn cadence at wave 1 (milliseconds)
    pub const BASE_SPAWN_INTERVAL_MS: u32 = 1000;
    /// Spawn cadence never drops below this
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 200;
    /// Spawn cadence reduction per completed wave
    pub const SPAWN_INTERVAL_STEP_MS: u32 = 100;

    /// Movement cadence (~30 Hz)
    pub const MOVEMENT_INTERVAL_MS: u32 = 32;
    /// Power-up countdown cadence
    pub const POWER_UP_TICK_MS: u32 = 1000;
    /// Power-up duration in seconds
    pub const POWER_UP_SECONDS: u32 = 10;

    /// Delay between clearing a wave and starting the next one
    pub const WAVE_DELAY_MS: u32 = 2000;
    /// How long the wave announcement stays up
    pub const WAVE_MESSAGE_MS: u32 = 2000;

    /// Objects to destroy in wave 1; grows by one per wave
    pub const BASE_WAVE_QUOTA: u32 = 20;
    /// Speed multiplier growth per wave (5%)
    pub const SPEED_GROWTH_PER_WAVE: f32 = 0.05;

    /// Slow power-up speed factor
    pub const SLOW_FACTOR: f32 = 0.5;

    /// Split descendants always move at this speed
    pub const DESCENDANT_SPEED: f32 = 0.5;
    /// Cluster descendants are placed this far ahead of the parent
    pub const CLUSTER_OFFSETS: [f32; 2] = [5.0, 10.0];
}
