//! Virtual-time scheduler
//!
//! Every periodic process of the game is a named task with its own timer.
//! Time only moves when the engine advances it, and the engine never advances
//! it while paused, so each timer resumes from exactly where it stopped.

use serde::{Deserialize, Serialize};

/// Named tasks. Declaration order is the dispatch order for tasks due at the
/// same instant: movement settles positions before waves and power-ups act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    Spawn,
    Movement,
    WaveTransition,
    PowerUp,
    WaveMessage,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::Spawn,
        Task::Movement,
        Task::WaveTransition,
        Task::PowerUp,
        Task::WaveMessage,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Timer {
    /// Time until the next firing; None when disarmed
    remaining_ms: Option<u32>,
    /// Re-arm period; None for one-shots
    period_ms: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    timers: [Timer; 5],
    /// Virtual time consumed so far
    now_ms: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `task` every `period_ms`, first firing one period from now
    pub fn arm_periodic(&mut self, task: Task, period_ms: u32) {
        let period_ms = period_ms.max(1);
        self.timers[task.index()] = Timer {
            remaining_ms: Some(period_ms),
            period_ms: Some(period_ms),
        };
    }

    /// Fire `task` once after `delay_ms`
    pub fn arm_once(&mut self, task: Task, delay_ms: u32) {
        self.timers[task.index()] = Timer {
            remaining_ms: Some(delay_ms),
            period_ms: None,
        };
    }

    pub fn disarm(&mut self, task: Task) {
        self.timers[task.index()] = Timer::default();
    }

    /// Cancel everything (restart / game over)
    pub fn disarm_all(&mut self) {
        self.timers = [Timer::default(); 5];
    }

    pub fn is_armed(&self, task: Task) -> bool {
        self.timers[task.index()].remaining_ms.is_some()
    }

    pub fn remaining_ms(&self, task: Task) -> Option<u32> {
        self.timers[task.index()].remaining_ms
    }

    /// Time until the earliest armed timer fires
    pub fn until_next(&self) -> Option<u32> {
        self.timers.iter().filter_map(|t| t.remaining_ms).min()
    }

    /// Let `ms` pass. Callers never elapse past the next firing.
    pub fn elapse(&mut self, ms: u32) {
        debug_assert!(self.until_next().is_none_or(|next| ms <= next));
        for timer in &mut self.timers {
            if let Some(remaining) = timer.remaining_ms.as_mut() {
                *remaining = remaining.saturating_sub(ms);
            }
        }
        self.now_ms += ms as u64;
    }

    /// Take the first due task in dispatch order, re-arming it if periodic
    pub fn pop_due(&mut self) -> Option<Task> {
        let task = Task::ALL
            .into_iter()
            .find(|t| self.timers[t.index()].remaining_ms == Some(0))?;
        let timer = &mut self.timers[task.index()];
        timer.remaining_ms = timer.period_ms;
        Some(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_rearms() {
        let mut sched = Scheduler::new();
        sched.arm_periodic(Task::Movement, 32);
        assert_eq!(sched.until_next(), Some(32));
        sched.elapse(32);
        assert_eq!(sched.pop_due(), Some(Task::Movement));
        assert_eq!(sched.remaining_ms(Task::Movement), Some(32));
        assert_eq!(sched.pop_due(), None);
        assert_eq!(sched.now_ms(), 32);
    }

    #[test]
    fn test_one_shot_disarms() {
        let mut sched = Scheduler::new();
        sched.arm_once(Task::WaveMessage, 2000);
        sched.elapse(2000);
        assert_eq!(sched.pop_due(), Some(Task::WaveMessage));
        assert!(!sched.is_armed(Task::WaveMessage));
        assert_eq!(sched.until_next(), None);
    }

    #[test]
    fn test_same_instant_dispatch_order() {
        let mut sched = Scheduler::new();
        sched.arm_once(Task::WaveMessage, 100);
        sched.arm_periodic(Task::PowerUp, 100);
        sched.arm_periodic(Task::Movement, 100);
        sched.arm_periodic(Task::Spawn, 100);
        sched.elapse(100);
        let order: Vec<_> = std::iter::from_fn(|| sched.pop_due()).collect();
        assert_eq!(
            order,
            vec![Task::Spawn, Task::Movement, Task::PowerUp, Task::WaveMessage]
        );
    }

    #[test]
    fn test_disarm_all() {
        let mut sched = Scheduler::new();
        sched.arm_periodic(Task::Spawn, 1000);
        sched.arm_once(Task::WaveTransition, 2000);
        sched.disarm_all();
        assert_eq!(sched.until_next(), None);
    }
}
