use std::time::Duration;

use anyhow::Result;

use crate::{domain::events::AppEvent, usecases::shell_state::ShellState};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
    fn shutdown(&mut self);
}

/// Handle returned by [`Scheduler::schedule`]; pass it to
/// [`Scheduler::cancel`] to drop the pending event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// One-shot timer capability owned by a session.
///
/// Time only moves when the owner calls [`Scheduler::advance`]; due events
/// are then drained one at a time with [`Scheduler::next_due`], in deadline
/// order with ties broken by scheduling order. Events scheduled while
/// draining are measured from the deadline of the event being handled.
pub trait Scheduler<E> {
    fn schedule(&mut self, delay: Duration, event: E) -> TimerId;
    fn cancel(&mut self, id: TimerId) -> bool;
    fn cancel_all(&mut self);
    fn advance(&mut self, elapsed: Duration);
    fn next_due(&mut self) -> Option<E>;
    fn pending(&self) -> usize;
}

/// Source of uniform randomness for fallback replies, thinking delays and
/// progress increments.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }

        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}
