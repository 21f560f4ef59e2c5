//! Game state and core simulation types
//!
//! All state the engine mutates lives here. Everything else reads or
//! changes it through `sim` functions driven by the engine.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Difficulty chosen before a run; fixes the column count for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Number of columns objects can rise in
    pub fn columns(&self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }
}

/// Kinds of rising objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Rocket,
    Balloon,
    Ufo,
    Alien,
    Meteor,
    Spaceship,
    Star,
    Heart,
    Egg,
    EggCluster,
    Slow,
    Shield,
    ExtraLife,
}

impl Archetype {
    /// Full catalog
    pub const ALL: [Archetype; 13] = [
        Archetype::Rocket,
        Archetype::Balloon,
        Archetype::Ufo,
        Archetype::Alien,
        Archetype::Meteor,
        Archetype::Spaceship,
        Archetype::Star,
        Archetype::Heart,
        Archetype::Egg,
        Archetype::EggCluster,
        Archetype::Slow,
        Archetype::Shield,
        Archetype::ExtraLife,
    ];

    /// Archetypes the spawner picks from when no special branch fires
    pub const COMMON: [Archetype; 7] = [
        Archetype::Rocket,
        Archetype::Balloon,
        Archetype::Ufo,
        Archetype::Alien,
        Archetype::Meteor,
        Archetype::Spaceship,
        Archetype::Star,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Rocket => "rocket",
            Archetype::Balloon => "balloon",
            Archetype::Ufo => "ufo",
            Archetype::Alien => "alien",
            Archetype::Meteor => "meteor",
            Archetype::Spaceship => "spaceship",
            Archetype::Star => "star",
            Archetype::Heart => "heart",
            Archetype::Egg => "egg",
            Archetype::EggCluster => "eggCluster",
            Archetype::Slow => "slow",
            Archetype::Shield => "shield",
            Archetype::ExtraLife => "extraLife",
        }
    }

    /// Speed at wave 1 (position units per movement tick)
    pub fn base_speed(&self) -> f32 {
        match self {
            Archetype::Rocket => 0.5,
            Archetype::Balloon => 0.3,
            Archetype::Ufo => 0.7,
            Archetype::Alien => 0.4,
            Archetype::Meteor => 0.6,
            Archetype::Spaceship => 0.45,
            Archetype::Star => 0.35,
            Archetype::Heart => 0.25,
            Archetype::Egg
            | Archetype::EggCluster
            | Archetype::Slow
            | Archetype::Shield
            | Archetype::ExtraLife => 0.5,
        }
    }

    /// Destroying this object yields two descendants
    pub fn splits(&self) -> bool {
        matches!(self, Archetype::Egg | Archetype::EggCluster)
    }

    pub fn is_cluster(&self) -> bool {
        *self == Archetype::EggCluster
    }

    /// Power-up pickups escape the boundary without costing a life
    pub fn is_power_up(&self) -> bool {
        matches!(
            self,
            Archetype::Slow | Archetype::Shield | Archetype::ExtraLife
        )
    }
}

/// A rising object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u64,
    /// 0 = spawn edge, 100 = boundary
    pub position: f32,
    pub column: u32,
    pub archetype: Archetype,
    /// Fixed at spawn time
    pub speed: f32,
}

/// Timed power-up kinds (extra life is instant and never becomes active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Halves every object's speed
    Slow,
    /// Boundary crossings cost no lives
    Shield,
}

impl PowerUpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Slow => "slow",
            PowerUpKind::Shield => "shield",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining_seconds: u32,
}

/// Abstract player intents delivered by input wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectDifficulty(Difficulty),
    Start,
    MoveLeft,
    MoveRight,
    Destroy,
    Pause,
    Resume,
    TogglePause,
    Restart,
}

/// Wave controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WavePhase {
    #[default]
    Active,
    /// Field cleared, waiting out the delay before the next wave
    Transitioning,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance values this run was created with
    pub tuning: Tuning,
    /// None until the player picks one
    pub difficulty: Option<Difficulty>,
    /// Column the player currently occupies
    pub player_column: u32,
    /// Live objects in spawn order (oldest first)
    pub objects: Vec<GameObject>,
    pub score: u64,
    pub lives: u32,
    /// Current wave (1-based)
    pub wave: u32,
    pub objects_destroyed_this_wave: u32,
    pub spawn_interval_ms: u32,
    pub power_up: Option<ActivePowerUp>,
    pub wave_phase: WavePhase,
    /// Wave announcement, if showing
    pub wave_message: Option<String>,
    /// Pause overlay text, if showing
    pub pause_message: Option<String>,
    pub started: bool,
    pub paused: bool,
    pub over: bool,
    /// Next entity ID
    next_id: u64,
}

impl GameState {
    /// Create a fresh pre-start state
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            difficulty: None,
            player_column: 0,
            objects: Vec::new(),
            score: 0,
            lives: tuning.initial_lives,
            wave: 1,
            objects_destroyed_this_wave: 0,
            spawn_interval_ms: tuning.base_spawn_interval_ms,
            power_up: None,
            wave_phase: WavePhase::Active,
            wave_message: None,
            pause_message: None,
            started: false,
            paused: false,
            over: false,
            next_id: 1,
            tuning,
        }
    }

    /// Reset everything to pre-start, keeping the ID counter so IDs stay
    /// unique across runs of the same engine
    pub fn reset(&mut self) {
        let next_id = self.next_id;
        *self = Self::new(self.tuning.clone());
        self.next_id = next_id;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Column count for the chosen difficulty (0 before one is chosen)
    pub fn num_columns(&self) -> u32 {
        self.difficulty.map(|d| d.columns()).unwrap_or(0)
    }

    /// Destroy quota for the current wave
    pub fn objects_per_wave(&self) -> u32 {
        self.tuning.base_quota + self.wave - 1
    }

    /// Periodic tasks only run in this state
    pub fn is_running(&self) -> bool {
        self.started && !self.paused && !self.over
    }

    pub fn active_power_up(&self) -> Option<PowerUpKind> {
        self.power_up.map(|p| p.kind)
    }

    /// Speed multiplier applied to objects spawned this wave
    pub fn speed_multiplier(&self) -> f32 {
        1.0 + (self.wave - 1) as f32 * self.tuning.speed_growth_per_wave
    }

    /// Append an object at the given spot, allocating its ID
    pub fn push_object(
        &mut self,
        archetype: Archetype,
        column: u32,
        position: f32,
        speed: f32,
    ) -> u64 {
        let id = self.next_entity_id();
        self.objects.push(GameObject {
            id,
            position,
            column,
            archetype,
            speed,
        });
        id
    }

    /// Index of the most recently spawned object in `column`
    pub fn newest_in_column(&self, column: u32) -> Option<usize> {
        self.objects.iter().rposition(|o| o.column == column)
    }

    /// Lose a life, ending the run at zero
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.over = true;
            log::info!("Game over at wave {} with score {}", self.wave, self.score);
        }
    }

    /// Gain a life up to the normal cap
    pub fn gain_life_capped(&mut self) {
        self.lives = (self.lives + 1).min(self.tuning.max_lives);
    }
}

/// Announcement shown when a wave begins
pub fn wave_message(wave: u32) -> String {
    format!("Wave {} starting", wave)
}

/// Overlay shown while paused
pub const PAUSE_MESSAGE: &str = "Game Paused";

/// Initial player column for a column count
pub fn center_column(num_columns: u32) -> u32 {
    num_columns / 2
}
