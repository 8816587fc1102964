//! # Timer Queue
//!
//! A virtual-clock timer facility: one-shot and repeating timers holding a
//! task value, fired in `(due_at, order)` order as the clock is advanced.
//!
//! Nothing here knows what a task does. The owner pops due timers and runs
//! them, which keeps the queue free of closures and borrow gymnastics:
//!
//! ```text
//! set_timeout / set_interval ──► [Scheduled { due_at, order, task }]
//!                                          │
//! advance(owner) ── pop_due(target) ◄──────┘  (repeat until none due)
//! ```

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TimerId,
    due_at: u64,
    order: u64,
    interval_ms: Option<u64>,
    task: T,
}

/// Snapshot of a timer that has not fired yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: u64,
    pub interval_ms: Option<u64>,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub at_ms: u64,
    pub task: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    next_order: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            next_order: 0,
            tasks: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run `task` once, `delay_ms` from now.
    pub fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerId {
        self.schedule(delay_ms, None, task)
    }

    /// Run `task` every `period_ms`, first time one period from now.
    /// A zero period is treated as 1ms so the clock always makes progress.
    pub fn set_interval(&mut self, period_ms: u64, task: T) -> TimerId {
        let period = period_ms.max(1);
        self.schedule(period, Some(period), task)
    }

    fn schedule(&mut self, delay_ms: u64, interval_ms: Option<u64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due_at = self.now_ms.saturating_add(delay_ms);
        self.push(id, due_at, interval_ms, task);
        id
    }

    fn push(&mut self, id: TimerId, due_at: u64, interval_ms: Option<u64>, task: T) {
        let order = self.next_order;
        self.next_order += 1;
        self.tasks.push(Scheduled {
            id,
            due_at,
            order,
            interval_ms,
            task,
        });
    }

    /// Cancel a pending timer. Returns false if it already fired (one-shot)
    /// or was never scheduled.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let cleared = self.tasks.len() != before;
        if cleared {
            debug!("[timer] cleared {:?}", id);
        }
        cleared
    }

    pub fn clear_all(&mut self) -> usize {
        let cleared = self.tasks.len();
        self.tasks.clear();
        cleared
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Pending timers sorted by firing order.
    pub fn pending(&self) -> Vec<PendingTimer> {
        let mut sorted: Vec<&Scheduled<T>> = self.tasks.iter().collect();
        sorted.sort_by_key(|t| (t.due_at, t.order));
        sorted
            .into_iter()
            .map(|t| PendingTimer {
                id: t.id,
                due_at: t.due_at,
                interval_ms: t.interval_ms,
            })
            .collect()
    }

    /// Milliseconds until the next timer fires, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.tasks
            .iter()
            .map(|t| t.due_at.saturating_sub(self.now_ms))
            .min()
    }

    fn next_index(&self, until_ms: u64) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= until_ms)
            .min_by_key(|(_, t)| (t.due_at, t.order))
            .map(|(idx, _)| idx)
    }

    /// Remove and return the earliest timer due at or before `until_ms`,
    /// moving the clock to its due time. Repeating timers are re-armed one
    /// period later under the same id.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        let idx = self.next_index(until_ms)?;
        let scheduled = self.tasks.remove(idx);
        if scheduled.due_at > self.now_ms {
            self.now_ms = scheduled.due_at;
        }
        if let Some(period) = scheduled.interval_ms {
            self.push(
                scheduled.id,
                scheduled.due_at.saturating_add(period),
                Some(period),
                scheduled.task.clone(),
            );
        }
        Some(Fired {
            id: scheduled.id,
            at_ms: scheduled.due_at,
            task: scheduled.task,
        })
    }

    /// Move the clock forward without firing anything. Never moves it back.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, until: u64) -> Vec<(u64, &'static str)> {
        let mut fired = Vec::new();
        while let Some(f) = queue.pop_due(until) {
            fired.push((f.at_ms, f.task));
        }
        queue.set_now(until);
        fired
    }

    #[test]
    fn test_timeouts_fire_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(400, "c");
        queue.set_timeout(0, "a");
        queue.set_timeout(200, "b");

        assert_eq!(drain(&mut queue, 199), vec![(0, "a")]);
        assert_eq!(drain(&mut queue, 1000), vec![(200, "b"), (400, "c")]);
        assert!(queue.is_empty());
        assert_eq!(queue.now_ms(), 1000);
    }

    #[test]
    fn test_same_due_time_keeps_insertion_order() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(10, "first");
        queue.set_timeout(10, "second");
        assert_eq!(drain(&mut queue, 10), vec![(10, "first"), (10, "second")]);
    }

    #[test]
    fn test_interval_repeats_until_cleared() {
        let mut queue = TimerQueue::new();
        let id = queue.set_interval(16, "tick");
        assert_eq!(drain(&mut queue, 48).len(), 3);
        assert!(queue.clear(id));
        assert!(drain(&mut queue, 1000).is_empty());
        assert!(!queue.clear(id));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut queue = TimerQueue::new();
        queue.set_interval(0, "spin");
        assert_eq!(drain(&mut queue, 5).len(), 5);
    }

    #[test]
    fn test_clear_one_shot() {
        let mut queue = TimerQueue::new();
        let id = queue.set_timeout(100, "never");
        assert!(queue.is_pending(id));
        assert!(queue.clear(id));
        assert!(drain(&mut queue, 500).is_empty());
    }

    #[test]
    fn test_delays_are_relative_to_current_time() {
        let mut queue = TimerQueue::new();
        queue.set_now(1000);
        queue.set_timeout(50, "later");
        assert_eq!(queue.next_due_in(), Some(50));
        assert_eq!(drain(&mut queue, 1050), vec![(1050, "later")]);
    }

    #[test]
    fn test_pending_snapshot_sorted() {
        let mut queue = TimerQueue::new();
        let late = queue.set_timeout(300, "late");
        let early = queue.set_timeout(100, "early");
        let ids: Vec<TimerId> = queue.pending().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![early, late]);
    }

    #[test]
    fn test_set_now_never_rewinds() {
        let mut queue: TimerQueue<&str> = TimerQueue::new();
        queue.set_now(100);
        queue.set_now(50);
        assert_eq!(queue.now_ms(), 100);
    }
}
