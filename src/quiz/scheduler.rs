use std::time::{Duration, Instant};

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken(u64);

#[derive(Debug)]
struct ScheduledTask<T> {
    id: u64,
    due: Instant,
    task: T,
}

/// Deadline queue polled from the UI loop. Nothing runs on its own: the owner
/// calls `take_due` and acts on whatever has come due.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> CancelToken {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due: now + delay,
            task,
        });
        CancelToken(id)
    }

    /// Returns false if the task already ran or was cancelled.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != token.0);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, token: CancelToken) -> bool {
        self.tasks.iter().any(|t| t.id == token.0)
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = pending;
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|t| t.due).min()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
