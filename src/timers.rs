use std::time::Duration;

use tokio::time::{sleep_until, Instant};

use crate::dispatcher::TimerAction;

struct Entry {
    deadline: Instant,
    seq: u64,
    action: TimerAction,
}

/// Fixed-delay timers on the tokio clock. Actions with the same deadline
/// fire in the order they were scheduled.
#[derive(Default)]
pub struct Timers {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, after: Duration, action: TimerAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            deadline: Instant::now() + after,
            seq,
            action,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending actions in firing order.
    pub fn pending(&self) -> Vec<&TimerAction> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by_key(|e| (e.deadline, e.seq));
        entries.into_iter().map(|e| &e.action).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.earliest().map(|i| self.entries[i].deadline)
    }

    fn earliest(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.deadline, e.seq))
            .map(|(i, _)| i)
    }

    /// Wait for the earliest timer and take its action. Never resolves when
    /// nothing is scheduled. Cancelling the wait keeps the timer.
    pub async fn next_due(&mut self) -> TimerAction {
        let Some(deadline) = self.next_deadline() else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        match self.earliest() {
            Some(i) => self.entries.remove(i).action,
            None => std::future::pending().await,
        }
    }
}
