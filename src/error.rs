//! Rejected command sequencing
//!
//! The simulation has no I/O, so the only failures are commands issued at the
//! wrong moment. A rejected command leaves the game state untouched.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// `start` before a difficulty was chosen
    NoDifficulty,
    /// Difficulty change or second `start` after the run began
    AlreadyStarted,
    /// Gameplay command before `start`
    NotStarted,
    /// Gameplay command while paused
    Paused,
    /// Command after the run ended
    GameOver,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDifficulty => write!(f, "no difficulty selected"),
            Self::AlreadyStarted => write!(f, "game already started"),
            Self::NotStarted => write!(f, "game not started"),
            Self::Paused => write!(f, "game is paused"),
            Self::GameOver => write!(f, "game is over"),
        }
    }
}

impl std::error::Error for CommandError {}
