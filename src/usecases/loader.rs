use std::time::Duration;

use crate::{
    domain::progress::{ActivityPhase, LoaderProgress},
    infra::{config::LoaderConfig, timers::TimerQueue},
    usecases::contracts::{RandomSource, Scheduler},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderTimer {
    Tick,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderEvent {
    Completed,
}

/// Splash loader: random progress steps on a fixed tick, then a short grace
/// period at 100% before completion is signalled.
pub struct LoaderSession<S = TimerQueue<LoaderTimer>>
where
    S: Scheduler<LoaderTimer>,
{
    tick: Duration,
    max_increment: f64,
    grace: Duration,
    scheduler: S,
    progress: LoaderProgress,
    phase: ActivityPhase,
}

impl LoaderSession<TimerQueue<LoaderTimer>> {
    pub fn new(config: &LoaderConfig) -> Self {
        Self::with_scheduler(config, TimerQueue::new())
    }
}

impl<S> LoaderSession<S>
where
    S: Scheduler<LoaderTimer>,
{
    pub fn with_scheduler(config: &LoaderConfig, scheduler: S) -> Self {
        Self {
            tick: config.tick(),
            max_increment: config.max_increment,
            grace: config.grace(),
            scheduler,
            progress: LoaderProgress::default(),
            phase: ActivityPhase::Idle,
        }
    }

    pub fn phase(&self) -> ActivityPhase {
        self.phase
    }

    /// Stays true through the grace period at 100%.
    pub fn is_active(&self) -> bool {
        self.phase == ActivityPhase::Active
    }

    pub fn progress(&self) -> &LoaderProgress {
        &self.progress
    }

    /// Starts from zero. Ignored while already running.
    pub fn start(&mut self) -> bool {
        if !self.phase.can_start() {
            return false;
        }

        self.scheduler.cancel_all();
        self.progress.reset();
        self.phase = ActivityPhase::Active;
        self.scheduler.schedule(self.tick, LoaderTimer::Tick);
        true
    }

    pub fn advance(&mut self, elapsed: Duration, rng: &mut dyn RandomSource) -> Option<LoaderEvent> {
        self.scheduler.advance(elapsed);

        let mut event = None;
        while let Some(timer) = self.scheduler.next_due() {
            match timer {
                LoaderTimer::Tick => {
                    let value = self.progress.step(rng.uniform(0.0, self.max_increment));
                    if self.progress.is_full() {
                        self.scheduler.schedule(self.grace, LoaderTimer::Finish);
                    } else {
                        self.scheduler.schedule(self.tick, LoaderTimer::Tick);
                    }
                    tracing::trace!(value, "loader tick");
                }
                LoaderTimer::Finish => {
                    self.phase = ActivityPhase::Complete;
                    event = Some(LoaderEvent::Completed);
                    tracing::debug!("loader completed");
                }
            }
        }

        event
    }

    /// Stops the loader without signalling completion.
    pub fn cancel(&mut self) {
        self.scheduler.cancel_all();
        if self.phase == ActivityPhase::Active {
            self.phase = ActivityPhase::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.progress.reset();
        self.phase = ActivityPhase::Idle;
    }
}

impl<S> Drop for LoaderSession<S>
where
    S: Scheduler<LoaderTimer>,
{
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}
