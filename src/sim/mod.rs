//! Deterministic game simulation
//!
//! All gameplay logic lives here:
//! - Object spawning with seeded dice
//! - Movement and boundary checks
//! - Destroy resolution (splits, power-ups, lives)
//! - Wave and power-up state machines
//! - Virtual-time task scheduling

pub mod autopilot;
pub mod destroy;
pub mod powerup;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod wave;

pub use destroy::{DestroyEffect, DestroyOutcome, resolve_destroy};
pub use schedule::{Scheduler, Task};
pub use spawn::{Dice, SeededDice, spawn_tick};
pub use state::*;
pub use tick::{MovementReport, movement_tick};
