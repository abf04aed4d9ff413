//! Delayed actions waiting on the store clock.

use chrono::{DateTime, Utc};
use composable_todo_core::effect::EffectId;
use std::time::Duration;

pub(crate) struct Timer<A> {
    /// `None` when the deadline does not fit in a `DateTime`; such timers never fire.
    deadline: Option<DateTime<Utc>>,
    id: Option<EffectId>,
    pub(crate) action: A,
}

/// Pending [`Effect::Delay`](composable_todo_core::effect::Effect::Delay) actions,
/// in scheduling order.
pub(crate) struct TimerQueue<A> {
    timers: Vec<Timer<A>>,
}

impl<A> TimerQueue<A> {
    pub(crate) const fn new() -> Self {
        Self { timers: Vec::new() }
    }

    pub(crate) fn schedule(
        &mut self,
        now: DateTime<Utc>,
        delay: Duration,
        id: Option<EffectId>,
        action: A,
    ) {
        let deadline = chrono::Duration::from_std(delay)
            .ok()
            .and_then(|delay| now.checked_add_signed(delay));
        self.timers.push(Timer {
            deadline,
            id,
            action,
        });
    }

    /// Drop every timer scheduled under `id`, returning how many were dropped.
    pub(crate) fn cancel(&mut self, id: EffectId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != Some(id));
        before - self.timers.len()
    }

    /// Remove and return the timers due at `now`, earliest deadline first.
    pub(crate) fn take_due(&mut self, now: DateTime<Utc>) -> Vec<Timer<A>> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|timer| timer.deadline.is_some_and(|deadline| deadline <= now));
        self.timers = pending;

        // stable: equal deadlines keep scheduling order
        due.sort_by_key(|timer| timer.deadline);
        due
    }

    /// Put back timers taken by [`TimerQueue::take_due`] that were not delivered.
    pub(crate) fn restore(&mut self, timers: impl IntoIterator<Item = Timer<A>>) {
        let mut restored: Vec<_> = timers.into_iter().collect();
        restored.append(&mut self.timers);
        self.timers = restored;
    }

    pub(crate) fn len(&self) -> usize {
        self.timers.len()
    }
}
