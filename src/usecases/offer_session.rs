use std::time::Duration;

use crate::{
    domain::{
        offer::{
            self, OfferField, OfferFields, PaymentMethod, PreferredCrypto, OFFER_PRESETS,
            OFFER_STEPS,
        },
        wizard::{StepWizard, WizardPhase, WizardTransition},
    },
    infra::{config::OfferConfig, timers::TimerQueue},
    usecases::contracts::{RandomSource, Scheduler, TimerId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferTimer {
    SubmissionFinished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferOutcome {
    Completed { reference: String },
}

/// Offer wizard with a simulated submission delay.
pub struct OfferSession<S = TimerQueue<OfferTimer>>
where
    S: Scheduler<OfferTimer>,
{
    wizard: StepWizard<OfferFields>,
    list_price: u64,
    submit_delay: Duration,
    scheduler: S,
    submission: Option<TimerId>,
    reference: Option<String>,
}

impl OfferSession<TimerQueue<OfferTimer>> {
    pub fn new(config: &OfferConfig) -> Self {
        Self::with_scheduler(config, TimerQueue::new())
    }
}

impl<S> OfferSession<S>
where
    S: Scheduler<OfferTimer>,
{
    pub fn with_scheduler(config: &OfferConfig, scheduler: S) -> Self {
        Self {
            wizard: StepWizard::new(
                OFFER_STEPS.len(),
                OfferFields::for_listing(&config.listing_price),
            ),
            list_price: offer::list_price(&config.listing_price),
            submit_delay: config.submit_delay(),
            scheduler,
            submission: None,
            reference: None,
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.wizard.phase()
    }

    pub fn phase_step(&self) -> Option<usize> {
        self.wizard.current_step()
    }

    pub fn fields(&self) -> &OfferFields {
        self.wizard.fields()
    }

    pub fn list_price(&self) -> u64 {
        self.list_price
    }

    /// Reference issued when the submission completed.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// The submit control is disabled while the submission is in flight.
    pub fn can_continue(&self) -> bool {
        !self.wizard.is_submitting() && !self.wizard.is_complete()
    }

    pub fn offer_is_low(&self) -> bool {
        offer::is_offer_low(self.fields().amount(), self.list_price)
    }

    pub fn next(&mut self) -> WizardTransition {
        let transition = self.wizard.next();

        match &transition {
            WizardTransition::SubmitRequested => {
                self.submission = Some(
                    self.scheduler
                        .schedule(self.submit_delay, OfferTimer::SubmissionFinished),
                );
                tracing::info!(
                    amount = self.fields().amount(),
                    payment = ?self.fields().payment_method,
                    "offer submission started"
                );
            }
            WizardTransition::Blocked(missing) => {
                tracing::debug!(?missing, "offer submission blocked by blank fields");
            }
            _ => {}
        }

        transition
    }

    pub fn back(&mut self) -> WizardTransition {
        self.wizard.back()
    }

    /// Returns false when the wizard is not accepting edits.
    pub fn update_field(&mut self, field: OfferField, value: &str) -> bool {
        match self.wizard.fields_mut() {
            Some(fields) => {
                fields.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn apply_preset(&mut self, index: usize) -> bool {
        let Some(preset) = OFFER_PRESETS.get(index) else {
            return false;
        };

        let amount = offer::preset_amount(self.list_price, preset.multiplier);
        self.update_field(OfferField::OfferAmount, &amount.to_string())
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) -> bool {
        match self.wizard.fields_mut() {
            Some(fields) => {
                fields.payment_method = method;
                true
            }
            None => false,
        }
    }

    pub fn select_crypto(&mut self, crypto: PreferredCrypto) -> bool {
        match self.wizard.fields_mut() {
            Some(fields) => {
                fields.preferred_crypto = crypto;
                true
            }
            None => false,
        }
    }

    /// Finishes a due submission. The outcome is reported once per submission.
    pub fn advance(&mut self, elapsed: Duration, rng: &mut dyn RandomSource) -> Option<OfferOutcome> {
        self.scheduler.advance(elapsed);

        let mut outcome = None;
        while let Some(OfferTimer::SubmissionFinished) = self.scheduler.next_due() {
            self.submission = None;
            if self.wizard.complete_submission() {
                let reference = offer::reference_code(rng);
                tracing::info!(reference = %reference, "offer submitted");
                self.reference = Some(reference.clone());
                outcome = Some(OfferOutcome::Completed { reference });
            }
        }

        outcome
    }

    /// Discards all entered data and any in-flight submission.
    pub fn reset(&mut self) {
        if let Some(id) = self.submission.take() {
            self.scheduler.cancel(id);
            tracing::debug!("pending offer submission cancelled");
        }
        self.reference = None;
        self.wizard.reset();
    }

    pub fn close(&mut self) {
        self.reset();
    }
}

impl<S> Drop for OfferSession<S>
where
    S: Scheduler<OfferTimer>,
{
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRandom;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn session() -> OfferSession {
        OfferSession::new(&OfferConfig::default())
    }

    fn fill_contact(session: &mut OfferSession) {
        session.update_field(OfferField::Name, "Ada Lovelace");
        session.update_field(OfferField::Email, "ada@example.com");
        session.update_field(OfferField::Phone, "+971 50 000 0000");
    }

    fn walk_to_review(session: &mut OfferSession) {
        session.next();
        session.next();
        fill_contact(session);
        session.next();
    }

    #[test]
    fn minus_ten_percent_preset_sets_exact_amount() {
        let mut session = session();

        assert!(session.apply_preset(0));

        assert_eq!(session.fields().offer_amount, "13950000");
        assert!(session.offer_is_low());
    }

    #[test]
    fn list_price_offer_is_not_low() {
        let mut session = session();
        session.apply_preset(2);

        assert!(!session.offer_is_low());
        assert!(!session.apply_preset(4));
    }

    #[test]
    fn amount_field_strips_non_digits() {
        let mut session = session();

        session.update_field(OfferField::OfferAmount, "AED 14,000,000");

        assert_eq!(session.fields().offer_amount, "14000000");
    }

    #[test]
    fn submission_completes_after_delay_and_only_reset_leaves_complete() {
        let mut session = session();
        let mut rng = ScriptedRandom::constant(0.1);
        walk_to_review(&mut session);
        assert_eq!(session.phase(), WizardPhase::Step(3));

        assert_eq!(session.next(), WizardTransition::SubmitRequested);
        assert_eq!(session.phase(), WizardPhase::Submitting);
        assert!(!session.can_continue());

        assert_eq!(session.advance(ms(1_999), &mut rng), None);
        let outcome = session.advance(ms(1), &mut rng);
        assert_eq!(
            outcome,
            Some(OfferOutcome::Completed {
                reference: "CH-33333333".to_owned()
            })
        );
        assert_eq!(session.phase(), WizardPhase::Complete);
        assert_eq!(session.reference(), Some("CH-33333333"));

        assert_eq!(session.next(), WizardTransition::Ignored);
        assert_eq!(session.back(), WizardTransition::Ignored);
        assert_eq!(session.advance(ms(10_000), &mut rng), None);
        assert_eq!(session.phase(), WizardPhase::Complete);

        session.reset();
        assert_eq!(session.phase(), WizardPhase::Step(0));
        assert_eq!(session.reference(), None);
    }

    #[test]
    fn edits_are_rejected_while_submitting() {
        let mut session = session();
        walk_to_review(&mut session);
        session.next();

        assert!(!session.update_field(OfferField::Name, "Mallory"));
        assert!(!session.apply_preset(0));
        assert!(!session.select_payment_method(PaymentMethod::Bank));
        assert_eq!(session.fields().name, "Ada Lovelace");
    }

    #[test]
    fn blank_contact_fields_block_submission() {
        let mut session = session();
        session.next();
        session.next();
        session.next();

        assert_eq!(
            session.next(),
            WizardTransition::Blocked(vec!["name", "email", "phone"])
        );
        assert_eq!(session.phase(), WizardPhase::Step(3));
    }

    #[test]
    fn close_mid_submission_cancels_timer_and_discards_data() {
        let mut session = session();
        let mut rng = ScriptedRandom::constant(0.0);
        walk_to_review(&mut session);
        session.select_crypto(PreferredCrypto::Eth);
        session.next();

        session.close();

        assert_eq!(session.advance(ms(5_000), &mut rng), None);
        assert_eq!(session.phase(), WizardPhase::Step(0));
        assert_eq!(
            session.fields(),
            &OfferFields::for_listing(&OfferConfig::default().listing_price)
        );
    }

    #[test]
    fn reset_restores_defaults_after_deep_edits() {
        let mut session = session();
        session.apply_preset(3);
        session.next();
        session.select_payment_method(PaymentMethod::Mortgage);
        session.next();
        fill_contact(&mut session);
        session.next();
        session.update_field(OfferField::Message, "Flexible on dates");

        session.reset();

        assert_eq!(
            session.fields(),
            &OfferFields::for_listing(&OfferConfig::default().listing_price)
        );
    }
}
