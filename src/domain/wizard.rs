//! Linear step wizard: `Step(0) .. Step(N-1) -> Submitting -> Complete`.

/// Form data carried by a [`StepWizard`].
pub trait WizardForm: Clone {
    /// Names of required fields that are still blank. Checked only when
    /// leaving the last step.
    fn missing_required(&self) -> Vec<&'static str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Step(usize),
    Submitting,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardTransition {
    Advanced(usize),
    Retreated(usize),
    /// Left the last step; the owner must schedule the submission.
    SubmitRequested,
    /// Required fields were blank; nothing changed.
    Blocked(Vec<&'static str>),
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepWizard<F> {
    phase: WizardPhase,
    total_steps: usize,
    fields: F,
    defaults: F,
}

impl<F: WizardForm> StepWizard<F> {
    /// A zero step count is treated as a single step.
    pub fn new(total_steps: usize, defaults: F) -> Self {
        Self {
            phase: WizardPhase::Step(0),
            total_steps: total_steps.max(1),
            fields: defaults.clone(),
            defaults,
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn current_step(&self) -> Option<usize> {
        match self.phase {
            WizardPhase::Step(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    pub fn is_complete(&self) -> bool {
        self.phase == WizardPhase::Complete
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Field edits are accepted only while a step is shown.
    pub fn fields_mut(&mut self) -> Option<&mut F> {
        match self.phase {
            WizardPhase::Step(_) => Some(&mut self.fields),
            _ => None,
        }
    }

    pub fn next(&mut self) -> WizardTransition {
        let WizardPhase::Step(index) = self.phase else {
            return WizardTransition::Ignored;
        };

        if index + 1 < self.total_steps {
            self.phase = WizardPhase::Step(index + 1);
            return WizardTransition::Advanced(index + 1);
        }

        let missing = self.fields.missing_required();
        if !missing.is_empty() {
            return WizardTransition::Blocked(missing);
        }

        self.phase = WizardPhase::Submitting;
        WizardTransition::SubmitRequested
    }

    pub fn back(&mut self) -> WizardTransition {
        match self.phase {
            WizardPhase::Step(index) if index > 0 => {
                self.phase = WizardPhase::Step(index - 1);
                WizardTransition::Retreated(index - 1)
            }
            _ => WizardTransition::Ignored,
        }
    }

    /// Timer-driven `Submitting -> Complete`. Returns false from any other phase.
    pub fn complete_submission(&mut self) -> bool {
        if self.phase != WizardPhase::Submitting {
            return false;
        }

        self.phase = WizardPhase::Complete;
        true
    }

    /// Back to `Step(0)` with default fields, discarding any entered data.
    pub fn reset(&mut self) {
        self.phase = WizardPhase::Step(0);
        self.fields = self.defaults.clone();
    }
}
