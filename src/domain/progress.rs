/// Shared lifecycle of the simulated activities:
/// `Idle -> Active -> Complete`, and back to `Idle` on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityPhase {
    #[default]
    Idle,
    Active,
    Complete,
}

impl ActivityPhase {
    /// `Active` may only be entered from `Idle` or `Complete`.
    pub fn can_start(self) -> bool {
        !matches!(self, Self::Active)
    }
}

pub const PROGRESS_MAX: f64 = 100.0;

/// Next progress value, clamped so it never passes [`PROGRESS_MAX`].
pub fn next_progress(value: f64, increment: f64) -> f64 {
    (value + increment.max(0.0)).min(PROGRESS_MAX)
}

/// Loader progress in `[0, 100]`; only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoaderProgress {
    value: f64,
}

impl LoaderProgress {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_full(&self) -> bool {
        self.value >= PROGRESS_MAX
    }

    pub fn step(&mut self, increment: f64) -> f64 {
        self.value = next_progress(self.value, increment);
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Whole percent for display.
    pub fn percent(&self) -> u16 {
        self.value.floor() as u16
    }
}
