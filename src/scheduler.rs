use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::event::AppEvent;

/// Upper bound on how long the main loop blocks when nothing is scheduled.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

struct Pending {
    due: Instant,
    event: AppEvent,
}

/// Delayed-event queue owned by the main loop.
///
/// Every call to [`Scheduler::schedule`] yields exactly one event from
/// [`Scheduler::pop_due`], in deadline order. Nothing is ever cancelled.
#[derive(Default)]
pub struct Scheduler {
    pending: VecDeque<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the event built by `factory` for delivery `delay` after `now`.
    pub fn schedule<F>(&mut self, now: Instant, delay: Duration, factory: F)
    where
        F: FnOnce() -> AppEvent,
    {
        let due = now + delay;
        // Keep the queue sorted; ties keep insertion order.
        let idx = self
            .pending
            .iter()
            .position(|p| p.due > due)
            .unwrap_or(self.pending.len());
        self.pending.insert(idx, Pending { due, event: factory() });
    }

    /// How long the caller may block before the next deadline.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.pending
            .front()
            .map(|p| p.due.saturating_duration_since(now))
            .unwrap_or(IDLE_WAIT)
    }

    /// Remove and return the earliest event whose deadline has passed.
    pub fn pop_due(&mut self, now: Instant) -> Option<AppEvent> {
        if self.pending.front()?.due <= now {
            self.pending.pop_front().map(|p| p.event)
        } else {
            None
        }
    }
}

#[cfg(test)]
impl Scheduler {
    fn len(&self) -> usize {
        self.pending.len()
    }
}
