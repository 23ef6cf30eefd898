//! # Scheduler
//!
//! One-shot delayed tasks on a virtual clock. Nothing here reads the wall
//! clock: the owner advances time explicitly, either from a UI tick or
//! from a test. Tasks due at the same instant fire in the order they were
//! scheduled.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use calc_core::scheduler::Scheduler;
//!
//! let mut timers = Scheduler::new();
//! let flash = timers.schedule(Duration::from_millis(3000), "clear error");
//! timers.schedule(Duration::from_millis(200), "recompute");
//!
//! assert_eq!(timers.advance(Duration::from_millis(500)), vec!["recompute"]);
//! assert!(timers.cancel(flash));
//! assert!(timers.advance(Duration::from_secs(10)).is_empty());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle to a scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TaskId,
    due: Duration,
    task: T,
}

/// Virtual-clock queue of one-shot tasks.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Run `task` once, `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    /// Drop a pending task. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|s| s.id == id) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time. Returns `None` once nothing more is due; the clock is
    /// then left where the last fired task put it.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.id))
            .map(|(i, _)| i)?;
        let scheduled = self.pending.remove(index);
        self.now = self.now.max(scheduled.due);
        Some(scheduled.task)
    }

    /// Move the clock forward without firing anything.
    ///
    /// Callers normally drain [`Scheduler::pop_due`] first; tasks left
    /// behind stay pending and fire on the next pop.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance by `by` and return every task that came due, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        let until = self.now + by;
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(until) {
            fired.push(task);
        }
        self.set_now(until);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(300), 3);
        timers.schedule(ms(100), 1);
        timers.schedule(ms(200), 2);
        assert_eq!(timers.advance(ms(1000)), vec![1, 2, 3]);
        assert_eq!(timers.now(), ms(1000));
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(100), "a");
        timers.schedule(ms(100), "b");
        assert_eq!(timers.advance(ms(100)), vec!["a", "b"]);
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(200), ());
        assert!(timers.advance(ms(199)).is_empty());
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.next_due(), Some(ms(200)));
        assert_eq!(timers.advance(ms(1)).len(), 1);
        assert!(timers.is_idle());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut timers = Scheduler::new();
        timers.advance(ms(1000));
        timers.schedule(ms(200), ());
        assert_eq!(timers.next_due(), Some(ms(1200)));
    }

    #[test]
    fn test_cancel() {
        let mut timers = Scheduler::new();
        let id = timers.schedule(ms(100), ());
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(ms(500)).is_empty());
    }

    #[test]
    fn test_pop_due_moves_clock_to_task() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(150), ());
        assert_eq!(timers.pop_due(ms(1000)), Some(()));
        assert_eq!(timers.now(), ms(150));
        assert_eq!(timers.pop_due(ms(1000)), None);
    }
}
