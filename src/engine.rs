//! Game engine - the command surface the presentation layer talks to
//!
//! Owns the one `GameState`, the task scheduler and the dice. Every mutation
//! goes through here, one pass at a time, so no two periodic tasks ever
//! interleave.

use serde::Serialize;

use crate::consts::{BOUNDARY_POSITION, POWER_UP_TICK_MS};
use crate::error::CommandError;
use crate::sim::spawn::{self, Dice, SeededDice};
use crate::sim::state::{
    ActivePowerUp, Archetype, Difficulty, GameObject, GameState, PAUSE_MESSAGE, WavePhase,
    center_column, wave_message,
};
pub use crate::sim::state::Intent;
use crate::sim::{DestroyEffect, DestroyOutcome, Scheduler, Task, powerup, tick, wave};
use crate::tuning::Tuning;

/// Read-only view for the renderer, taken once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub difficulty: Option<Difficulty>,
    pub num_columns: u32,
    pub player_column: u32,
    pub score: u64,
    pub lives: u32,
    pub wave: u32,
    pub objects_destroyed_this_wave: u32,
    pub objects_per_wave: u32,
    pub spawn_interval_ms: u32,
    pub objects: Vec<GameObject>,
    pub power_up: Option<ActivePowerUp>,
    pub wave_message: Option<String>,
    pub pause_message: Option<String>,
    pub started: bool,
    pub paused: bool,
    pub over: bool,
}

/// Single-threaded game engine
#[derive(Debug, Clone)]
pub struct Engine<D: Dice = SeededDice> {
    state: GameState,
    scheduler: Scheduler,
    dice: D,
}

impl Engine<SeededDice> {
    /// Engine with default tuning and seeded dice
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_dice(SeededDice::new(seed), tuning)
    }
}

impl<D: Dice> Engine<D> {
    /// Engine drawing from a caller-supplied random source
    pub fn with_dice(dice: D, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            scheduler: Scheduler::new(),
            dice,
        }
    }

    // === Lifecycle ===

    /// Choose the column count. Only allowed before `start`.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<(), CommandError> {
        if self.state.started {
            return reject("select_difficulty", CommandError::AlreadyStarted);
        }
        self.state.difficulty = Some(difficulty);
        self.state.player_column = center_column(difficulty.columns());
        log::info!(
            "Difficulty {} selected ({} columns)",
            difficulty.as_str(),
            difficulty.columns()
        );
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), CommandError> {
        if self.state.started {
            return reject("start", CommandError::AlreadyStarted);
        }
        if self.state.difficulty.is_none() {
            return reject("start", CommandError::NoDifficulty);
        }

        self.state.started = true;
        self.show_wave_message(wave_message(self.state.wave));
        self.scheduler
            .arm_periodic(Task::Spawn, self.state.spawn_interval_ms);
        self.scheduler
            .arm_periodic(Task::Movement, self.state.tuning.movement_interval_ms);
        log::info!(
            "Game started: {} columns, {} lives",
            self.state.num_columns(),
            self.state.lives
        );
        Ok(())
    }

    /// Full reset to the pre-start state; difficulty must be chosen again
    pub fn restart(&mut self) {
        self.scheduler.disarm_all();
        self.state.reset();
        log::info!("Game restarted");
    }

    /// Freeze every cadence. Pausing while paused is a no-op.
    pub fn pause(&mut self) -> Result<(), CommandError> {
        self.check_live("pause")?;
        if !self.state.paused {
            self.state.paused = true;
            self.state.pause_message = Some(PAUSE_MESSAGE.to_string());
            log::debug!("Paused at {}ms", self.scheduler.now_ms());
        }
        Ok(())
    }

    /// Unfreeze. Timers continue from their remaining delays.
    pub fn resume(&mut self) -> Result<(), CommandError> {
        self.check_live("resume")?;
        if self.state.paused {
            self.state.paused = false;
            self.state.pause_message = None;
            log::debug!("Resumed at {}ms", self.scheduler.now_ms());
        }
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<(), CommandError> {
        if self.state.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    // === Player ===

    pub fn move_left(&mut self) -> Result<(), CommandError> {
        self.check_running("move_left")?;
        self.state.player_column = self.state.player_column.saturating_sub(1);
        Ok(())
    }

    pub fn move_right(&mut self) -> Result<(), CommandError> {
        self.check_running("move_right")?;
        let last = self.state.num_columns().saturating_sub(1);
        self.state.player_column = (self.state.player_column + 1).min(last);
        Ok(())
    }

    /// Hit the newest object in the player's column. `Ok(None)` when the
    /// column is empty.
    pub fn destroy(&mut self) -> Result<Option<DestroyOutcome>, CommandError> {
        self.check_running("destroy")?;
        let outcome = crate::sim::resolve_destroy(&mut self.state);
        if let Some(DestroyOutcome {
            effect: DestroyEffect::PowerUp(_),
            ..
        }) = outcome
        {
            // Fresh timer restarts the countdown cadence too
            self.scheduler.arm_periodic(Task::PowerUp, POWER_UP_TICK_MS);
        }
        if outcome.is_some() {
            self.check_wave();
        }
        Ok(outcome)
    }

    /// Dispatch an intent from input wiring
    pub fn apply(&mut self, intent: Intent) -> Result<(), CommandError> {
        match intent {
            Intent::SelectDifficulty(d) => self.select_difficulty(d),
            Intent::Start => self.start(),
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::Destroy => self.destroy().map(|_| ()),
            Intent::Pause => self.pause(),
            Intent::Resume => self.resume(),
            Intent::TogglePause => self.toggle_pause(),
            Intent::Restart => {
                self.restart();
                Ok(())
            }
        }
    }

    /// Place an object directly (power-up drops, scripted scenarios).
    /// Returns None if no difficulty is chosen, the column is invalid or the
    /// position is outside `[0, 100)`.
    pub fn inject_object(
        &mut self,
        archetype: Archetype,
        column: u32,
        position: f32,
    ) -> Option<u64> {
        if column >= self.state.num_columns()
            || self.state.over
            || !(0.0..BOUNDARY_POSITION).contains(&position)
        {
            return None;
        }
        let speed = spawn::spawn_speed(&self.state, archetype);
        Some(self.state.push_object(archetype, column, position, speed))
    }

    // === Time ===

    /// Fire one task now. Returns false if the game isn't running.
    pub fn tick(&mut self, task: Task) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.dispatch(task);
        true
    }

    /// Let `elapsed_ms` of game time pass, firing every task that comes due
    /// in chronological order. Does nothing while paused, stopped or over.
    pub fn advance(&mut self, elapsed_ms: u32) {
        let mut budget = elapsed_ms;
        while self.state.is_running() {
            let Some(next) = self.scheduler.until_next() else {
                break;
            };
            if next > budget {
                self.scheduler.elapse(budget);
                break;
            }
            self.scheduler.elapse(next);
            budget -= next;
            while self.state.is_running() {
                let Some(task) = self.scheduler.pop_due() else {
                    break;
                };
                self.dispatch(task);
            }
        }
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::Spawn => {
                spawn::spawn_tick(&mut self.state, &mut self.dice);
            }
            Task::Movement => {
                tick::movement_tick(&mut self.state);
                if self.state.over {
                    self.scheduler.disarm_all();
                    return;
                }
                self.check_wave();
            }
            Task::PowerUp => {
                powerup::countdown(&mut self.state);
                if self.state.power_up.is_none() {
                    self.scheduler.disarm(Task::PowerUp);
                }
            }
            Task::WaveMessage => {
                self.state.wave_message = None;
                self.scheduler.disarm(Task::WaveMessage);
            }
            Task::WaveTransition => {
                if wave::complete_transition(&mut self.state) {
                    self.scheduler
                        .arm_periodic(Task::Spawn, self.state.spawn_interval_ms);
                }
                self.scheduler.disarm(Task::WaveTransition);
            }
        }
    }

    fn check_wave(&mut self) {
        if wave::begin_transition(&mut self.state) {
            self.scheduler.disarm(Task::PowerUp);
            self.scheduler
                .arm_once(Task::WaveMessage, self.state.tuning.wave_message_ms);
            self.scheduler
                .arm_once(Task::WaveTransition, self.state.tuning.wave_delay_ms);
        }
    }

    fn show_wave_message(&mut self, message: String) {
        self.state.wave_message = Some(message);
        self.scheduler
            .arm_once(Task::WaveMessage, self.state.tuning.wave_message_ms);
    }

    /// Started and not over
    fn check_live(&self, command: &str) -> Result<(), CommandError> {
        if !self.state.started {
            return reject(command, CommandError::NotStarted);
        }
        if self.state.over {
            return reject(command, CommandError::GameOver);
        }
        Ok(())
    }

    /// Started, not over, not paused
    fn check_running(&self, command: &str) -> Result<(), CommandError> {
        self.check_live(command)?;
        if self.state.paused {
            return reject(command, CommandError::Paused);
        }
        Ok(())
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn wave(&self) -> u32 {
        self.state.wave
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.state.objects
    }

    pub fn power_up(&self) -> Option<ActivePowerUp> {
        self.state.power_up
    }

    pub fn wave_message(&self) -> Option<&str> {
        self.state.wave_message.as_deref()
    }

    pub fn pause_message(&self) -> Option<&str> {
        self.state.pause_message.as_deref()
    }

    pub fn player_column(&self) -> u32 {
        self.state.player_column
    }

    pub fn is_started(&self) -> bool {
        self.state.started
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn is_over(&self) -> bool {
        self.state.over
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.wave_phase == WavePhase::Transitioning
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.state;
        Snapshot {
            difficulty: s.difficulty,
            num_columns: s.num_columns(),
            player_column: s.player_column,
            score: s.score,
            lives: s.lives,
            wave: s.wave,
            objects_destroyed_this_wave: s.objects_destroyed_this_wave,
            objects_per_wave: s.objects_per_wave(),
            spawn_interval_ms: s.spawn_interval_ms,
            objects: s.objects.clone(),
            power_up: s.power_up,
            wave_message: s.wave_message.clone(),
            pause_message: s.pause_message.clone(),
            started: s.started,
            paused: s.paused,
            over: s.over,
        }
    }
}

fn reject(command: &str, err: CommandError) -> Result<(), CommandError> {
    log::debug!("Rejected {}: {}", command, err);
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;
    use crate::sim::spawn::tests::ScriptedDice;

    /// Engine whose spawns are always aliens in the middle column
    fn quiet_engine(difficulty: Difficulty) -> Engine<ScriptedDice> {
        let mut engine = Engine::with_dice(ScriptedDice::new(&[], 0.5), Tuning::default());
        engine.select_difficulty(difficulty).unwrap();
        engine.start().unwrap();
        engine
    }

    #[test]
    fn test_start_requires_difficulty() {
        let mut engine = Engine::new(1);
        assert_eq!(engine.start(), Err(CommandError::NoDifficulty));
        assert!(!engine.is_started());
        engine.select_difficulty(Difficulty::Easy).unwrap();
        assert_eq!(engine.player_column(), 1);
        engine.start().unwrap();
        assert_eq!(engine.wave_message(), Some("Wave 1 starting"));
        assert_eq!(engine.start(), Err(CommandError::AlreadyStarted));
        assert_eq!(
            engine.select_difficulty(Difficulty::Hard),
            Err(CommandError::AlreadyStarted)
        );
    }

    #[test]
    fn test_commands_rejected_before_start() {
        let mut engine = Engine::new(1);
        engine.select_difficulty(Difficulty::Medium).unwrap();
        assert_eq!(engine.move_left(), Err(CommandError::NotStarted));
        assert_eq!(engine.destroy(), Err(CommandError::NotStarted));
        assert_eq!(engine.pause(), Err(CommandError::NotStarted));
        assert_eq!(engine.player_column(), 2);
        assert!(!engine.tick(Task::Spawn));
        assert!(engine.objects().is_empty());
    }

    #[test]
    fn test_column_clamping() {
        let mut engine = quiet_engine(Difficulty::Easy);
        for _ in 0..5 {
            engine.move_right().unwrap();
        }
        assert_eq!(engine.player_column(), 2);
        for _ in 0..5 {
            engine.move_left().unwrap();
        }
        assert_eq!(engine.player_column(), 0);
    }

    #[test]
    fn test_paused_blocks_player_commands() {
        let mut engine = quiet_engine(Difficulty::Medium);
        engine.pause().unwrap();
        engine.pause().unwrap();
        assert_eq!(engine.pause_message(), Some(PAUSE_MESSAGE));
        assert_eq!(engine.move_right(), Err(CommandError::Paused));
        assert_eq!(engine.destroy(), Err(CommandError::Paused));
        engine.resume().unwrap();
        engine.resume().unwrap();
        assert_eq!(engine.pause_message(), None);
        engine.move_right().unwrap();
    }

    #[test]
    fn test_spawn_cadence() {
        let mut engine = quiet_engine(Difficulty::Medium);
        engine.advance(999);
        assert!(engine.objects().is_empty());
        engine.advance(1);
        assert_eq!(engine.objects().len(), 1);
        assert_eq!(engine.objects()[0].archetype, Archetype::Alien);
        assert_eq!(engine.objects()[0].column, 2);
    }

    #[test]
    fn test_wave_message_clears_after_two_seconds() {
        let mut engine = quiet_engine(Difficulty::Medium);
        engine.advance(1999);
        assert!(engine.wave_message().is_some());
        engine.advance(1);
        assert!(engine.wave_message().is_none());
    }

    #[test]
    fn test_pause_freezes_wave_message() {
        let mut engine = quiet_engine(Difficulty::Medium);
        engine.advance(1500);
        engine.pause().unwrap();
        engine.advance(10_000);
        assert!(engine.wave_message().is_some());
        engine.resume().unwrap();
        engine.advance(499);
        assert!(engine.wave_message().is_some());
        engine.advance(1);
        assert!(engine.wave_message().is_none());
    }

    #[test]
    fn test_power_up_countdown_via_scheduler() {
        let mut engine = quiet_engine(Difficulty::Medium);
        engine.inject_object(Archetype::Slow, 2, 20.0).unwrap();
        let outcome = engine.destroy().unwrap().unwrap();
        assert_eq!(outcome.effect, DestroyEffect::PowerUp(PowerUpKind::Slow));
        engine.advance(3000);
        assert_eq!(engine.power_up().unwrap().remaining_seconds, 7);
        engine.advance(7000);
        assert!(engine.power_up().is_none());
        assert!(!engine.scheduler().is_armed(Task::PowerUp));
    }

    #[test]
    fn test_restart_cancels_everything() {
        let mut engine = quiet_engine(Difficulty::Hard);
        engine.advance(5000);
        engine.restart();
        assert!(!engine.is_started());
        assert!(engine.state().difficulty.is_none());
        assert_eq!(engine.scheduler().until_next(), None);
        assert!(engine.objects().is_empty());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.wave(), 1);
    }

    #[test]
    fn test_intents() {
        let mut engine = Engine::new(7);
        engine
            .apply(Intent::SelectDifficulty(Difficulty::Hard))
            .unwrap();
        engine.apply(Intent::Start).unwrap();
        engine.apply(Intent::MoveLeft).unwrap();
        assert_eq!(engine.player_column(), 1);
        engine.apply(Intent::TogglePause).unwrap();
        assert!(engine.is_paused());
        engine.apply(Intent::TogglePause).unwrap();
        assert!(!engine.is_paused());
        engine.apply(Intent::Destroy).unwrap();
        engine.apply(Intent::Restart).unwrap();
        assert!(!engine.is_started());
    }
}
