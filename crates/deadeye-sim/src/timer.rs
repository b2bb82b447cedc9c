//! Scheduled-task queue — cooperative delayed execution.
//!
//! Delayed work (spawns, level-end evaluation) is stored as (due_tick,
//! task) entries and polled once per tick. Deadlines are denominated in
//! sim ticks and sim time only advances while the game is Playing, so
//! pausing preserves every remaining delay exactly: nothing fires early
//! on resume and no interval is lost.

use deadeye_core::constants::TICK_RATE;

/// Work that can be scheduled for a future tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Ask the spawner for the next target.
    SpawnTarget,
    /// Re-check the level-end condition after the grace period.
    EvaluateLevelEnd,
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    due_tick: u64,
    task: TimerTask,
}

/// Pending delayed tasks, fired in due order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    /// Schedule a task for the given absolute tick.
    pub fn schedule(&mut self, due_tick: u64, task: TimerTask) {
        self.entries.push(TimerEntry { due_tick, task });
    }

    /// Whether a task of this kind is already pending.
    pub fn has(&self, task: TimerTask) -> bool {
        self.entries.iter().any(|e| e.task == task)
    }

    /// Drop all pending tasks (level teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return all tasks due at or before `current_tick`,
    /// ordered by fire time (insertion order breaks ties).
    pub fn poll(&mut self, current_tick: u64) -> Vec<TimerTask> {
        let mut due: Vec<TimerEntry> = Vec::new();
        self.entries.retain(|e| {
            if e.due_tick <= current_tick {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| e.due_tick);
        due.into_iter().map(|e| e.task).collect()
    }
}

/// Convert seconds to ticks.
pub fn secs_to_ticks(secs: f64) -> u64 {
    (secs * TICK_RATE as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_fires_in_due_order() {
        let mut queue = TimerQueue::default();
        queue.schedule(20, TimerTask::EvaluateLevelEnd);
        queue.schedule(10, TimerTask::SpawnTarget);
        queue.schedule(15, TimerTask::SpawnTarget);

        assert!(queue.poll(5).is_empty());
        let due = queue.poll(20);
        assert_eq!(
            due,
            vec![
                TimerTask::SpawnTarget,
                TimerTask::SpawnTarget,
                TimerTask::EvaluateLevelEnd
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_poll_leaves_future_entries() {
        let mut queue = TimerQueue::default();
        queue.schedule(10, TimerTask::SpawnTarget);
        queue.schedule(30, TimerTask::SpawnTarget);

        assert_eq!(queue.poll(10), vec![TimerTask::SpawnTarget]);
        assert!(queue.has(TimerTask::SpawnTarget));
        assert_eq!(queue.poll(30), vec![TimerTask::SpawnTarget]);
    }

    #[test]
    fn test_has_and_clear() {
        let mut queue = TimerQueue::default();
        assert!(!queue.has(TimerTask::EvaluateLevelEnd));
        queue.schedule(100, TimerTask::EvaluateLevelEnd);
        assert!(queue.has(TimerTask::EvaluateLevelEnd));
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0), TICK_RATE as u64);
        assert_eq!(secs_to_ticks(0.5), TICK_RATE as u64 / 2);
    }
}
