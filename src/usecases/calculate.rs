use std::time::Duration;

use crate::{
    domain::{
        calculator::{
            self, CalculationInput, CalculationResult, Conversion, CryptoAsset, YearPoint,
        },
        progress::ActivityPhase,
    },
    infra::{config::CalculatorConfig, timers::TimerQueue},
    usecases::contracts::Scheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorTimer {
    ResultsReady,
}

/// Investment calculator with a fixed "processing" delay before results
/// are revealed.
pub struct CalculatorSession<S = TimerQueue<CalculatorTimer>>
where
    S: Scheduler<CalculatorTimer>,
{
    input: CalculationInput,
    delay: Duration,
    scheduler: S,
    phase: ActivityPhase,
}

impl CalculatorSession<TimerQueue<CalculatorTimer>> {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self::with_scheduler(config, TimerQueue::new())
    }
}

impl<S> CalculatorSession<S>
where
    S: Scheduler<CalculatorTimer>,
{
    pub fn with_scheduler(config: &CalculatorConfig, scheduler: S) -> Self {
        Self {
            input: CalculationInput::default(),
            delay: config.delay(),
            scheduler,
            phase: ActivityPhase::Idle,
        }
    }

    pub fn input(&self) -> &CalculationInput {
        &self.input
    }

    pub fn is_calculating(&self) -> bool {
        self.phase == ActivityPhase::Active
    }

    pub fn show_results(&self) -> bool {
        self.phase == ActivityPhase::Complete
    }

    /// Recomputed from the current input on every call.
    pub fn results(&self) -> CalculationResult {
        calculator::calculate(&self.input)
    }

    pub fn projection(&self) -> Vec<YearPoint> {
        calculator::yearly_projection(&self.input)
    }

    pub fn conversions(&self) -> Vec<Conversion> {
        calculator::conversion_table(self.input.principal)
    }

    /// Starts the processing delay. Ignored while a calculation is pending.
    pub fn calculate(&mut self) -> bool {
        if !self.phase.can_start() {
            tracing::debug!("calculate ignored while already calculating");
            return false;
        }

        self.phase = ActivityPhase::Active;
        self.scheduler
            .schedule(self.delay, CalculatorTimer::ResultsReady);
        true
    }

    /// Returns true when results became visible during this advance.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.scheduler.advance(elapsed);

        let mut revealed = false;
        while let Some(CalculatorTimer::ResultsReady) = self.scheduler.next_due() {
            if self.phase == ActivityPhase::Active {
                self.phase = ActivityPhase::Complete;
                revealed = true;
            }
        }

        revealed
    }

    pub fn set_principal(&mut self, principal: f64) {
        self.input.principal = principal.max(0.0);
    }

    pub fn set_years(&mut self, years: u32) {
        self.input.years = calculator::clamp_years(years);
    }

    pub fn set_rate(&mut self, rate_percent: f64) {
        self.input.annual_rate_percent = calculator::clamp_rate(rate_percent);
    }

    pub fn set_asset(&mut self, asset: CryptoAsset) {
        self.input.asset = asset;
    }

    /// Steps through the property value presets, wrapping at the end.
    pub fn cycle_principal_preset(&mut self) {
        let presets = calculator::PROPERTY_VALUE_PRESETS;
        let next = presets
            .iter()
            .position(|value| *value == self.input.principal)
            .map_or(0, |index| (index + 1) % presets.len());
        self.set_principal(presets[next]);
    }

    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.phase = ActivityPhase::Idle;
    }
}

impl<S> Drop for CalculatorSession<S>
where
    S: Scheduler<CalculatorTimer>,
{
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}
