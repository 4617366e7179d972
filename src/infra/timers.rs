//! Virtual-clock timer queue backing every session's scheduler.

use std::time::Duration;

use crate::usecases::contracts::{Scheduler, TimerId};

#[derive(Debug)]
struct PendingTimer<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

/// Deterministic one-shot timers measured against a virtual clock.
///
/// The clock only moves through [`Scheduler::advance`], so tests drive it
/// directly and the UI loop feeds it measured wall-clock time. Dropping the
/// queue drops every pending event.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    horizon: Duration,
    next_id: u64,
    pending: Vec<PendingTimer<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            horizon: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    fn earliest_due_index(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= self.horizon)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)
    }
}

impl<E> Scheduler<E> for TimerQueue<E> {
    fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            due: self.now + delay,
            event,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        self.pending.len() != before
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }

    fn advance(&mut self, elapsed: Duration) {
        self.horizon = self.horizon.max(self.now) + elapsed;
    }

    fn next_due(&mut self) -> Option<E> {
        match self.earliest_due_index() {
            Some(index) => {
                let timer = self.pending.swap_remove(index);
                self.now = timer.due;
                Some(timer.event)
            }
            None => {
                self.now = self.horizon;
                None
            }
        }
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn drain(queue: &mut TimerQueue<&'static str>) -> Vec<&'static str> {
        std::iter::from_fn(|| queue.next_due()).collect()
    }

    #[test]
    fn nothing_fires_before_its_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), "tick");

        queue.advance(ms(99));
        assert!(drain(&mut queue).is_empty());

        queue.advance(ms(1));
        assert_eq!(drain(&mut queue), vec!["tick"]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn fires_in_deadline_then_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(300), "late");
        queue.schedule(ms(100), "first");
        queue.schedule(ms(100), "second");

        queue.advance(ms(500));

        assert_eq!(drain(&mut queue), vec!["first", "second", "late"]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut queue = TimerQueue::new();
        let keep = queue.schedule(ms(10), "keep");
        let drop = queue.schedule(ms(10), "drop");

        assert!(queue.cancel(drop));
        assert!(!queue.cancel(drop));
        queue.advance(ms(50));

        assert_eq!(drain(&mut queue), vec!["keep"]);
        assert!(!queue.cancel(keep));
    }

    #[test]
    fn cancel_all_clears_every_pending_timer() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(10), "a");
        queue.schedule(ms(20), "b");

        queue.cancel_all();
        queue.advance(ms(100));

        assert!(drain(&mut queue).is_empty());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn timers_scheduled_while_draining_are_relative_to_the_firing_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), "tick");
        queue.advance(ms(250));

        assert_eq!(queue.next_due(), Some("tick"));
        assert_eq!(queue.now(), ms(100));

        queue.schedule(ms(100), "tick");
        assert_eq!(queue.next_due(), Some("tick"));
        assert_eq!(queue.now(), ms(200));

        queue.schedule(ms(100), "tick");
        assert_eq!(queue.next_due(), None);
        assert_eq!(queue.now(), ms(250));

        queue.advance(ms(50));
        assert_eq!(queue.next_due(), Some("tick"));
    }
}
