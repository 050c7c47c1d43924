//! Millisecond task queue with cancellable handles.

use std::collections::BTreeMap;

/// Identifies one scheduled task. Handles are never reused, so cancelling a
/// task that already fired is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle {
    due_ms: u64,
    seq: u64,
}

impl TaskHandle {
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

/// Tasks fire in due-time order; tasks due at the same instant fire in the
/// order they were scheduled.
#[derive(Debug)]
pub struct Timeline<T> {
    tasks: BTreeMap<TaskHandle, T>,
    next_seq: u64,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Timeline {
            tasks: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule_at(&mut self, due_ms: u64, task: T) -> TaskHandle {
        let handle = TaskHandle {
            due_ms,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.tasks.insert(handle, task);
        handle
    }

    pub fn schedule_after(&mut self, now_ms: u64, delay_ms: u64, task: T) -> TaskHandle {
        self.schedule_at(now_ms.saturating_add(delay_ms), task)
    }

    /// Returns `true` if the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.tasks.remove(&handle).is_some()
    }

    /// Drops every pending task, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Removes and returns the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TaskHandle, T)> {
        let (handle, _) = self.tasks.first_key_value()?;
        if handle.due_ms > now_ms {
            return None;
        }
        self.tasks.pop_first()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.tasks.keys().next().map(|h| h.due_ms)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
