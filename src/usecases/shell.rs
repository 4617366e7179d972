use std::time::Duration;

use anyhow::Result;

use crate::{
    domain::{
        events::{AppEvent, KeyInput},
        offer::{OfferField, PaymentMethod, PreferredCrypto},
        text_input::TextInputState,
        wizard::{WizardPhase, WizardTransition},
    },
    infra::config::AppConfig,
    usecases::{
        contracts::{RandomSource, ShellOrchestrator},
        loader::LoaderEvent,
        offer_session::OfferOutcome,
        shell_state::{Screen, ShellState},
    },
};

pub struct DefaultShellOrchestrator<R>
where
    R: RandomSource,
{
    state: ShellState,
    rng: R,
}

impl<R> DefaultShellOrchestrator<R>
where
    R: RandomSource,
{
    /// Builds every session and starts the splash loader.
    pub fn new(config: &AppConfig, rng: R) -> Self {
        let mut state = ShellState::new(config);
        state.loader.start();
        sync_offer_input(&mut state);

        Self { state, rng }
    }

    fn advance(&mut self, elapsed: Duration) {
        let state = &mut self.state;

        if let Some(LoaderEvent::Completed) = state.loader.advance(elapsed, &mut self.rng) {
            if state.screen() == Screen::Loading {
                state.set_screen(Screen::Chat);
                tracing::info!("loader finished, showing assistant");
            }
        }

        if state.chat.advance(elapsed, &mut self.rng) > 0 {
            state.selected_option = None;
        }

        state.calculator.advance(elapsed);

        if let Some(OfferOutcome::Completed { reference }) =
            state.offer.advance(elapsed, &mut self.rng)
        {
            state.notice = Some(format!("Offer submitted. Reference #{reference}"));
        }
    }

    fn switch_screen(&mut self, target: Screen) {
        let current = self.state.screen();
        if current == target {
            return;
        }

        if current == Screen::Offer {
            self.state.offer.close();
            self.state.offer_focus = 0;
            sync_offer_input(&mut self.state);
        }

        self.state.notice = None;
        self.state.set_screen(target);
        tracing::debug!(from = current.title(), to = target.title(), "screen switched");
    }

    fn handle_key(&mut self, key: KeyInput) {
        if self.state.screen() == Screen::Loading {
            return;
        }

        if key.key == "tab" {
            self.switch_screen(self.state.screen().next_tab());
            return;
        }

        match self.state.screen() {
            Screen::Loading => {}
            Screen::Chat => self.handle_chat_key(&key),
            Screen::Calculator => self.handle_calculator_key(&key),
            Screen::Offer => self.handle_offer_key(&key),
        }
    }

    fn handle_chat_key(&mut self, key: &KeyInput) {
        let state = &mut self.state;

        if let Some(index) = function_key_index(key) {
            state.chat.quick_action(index, &mut self.rng);
            return;
        }

        match key.key.as_str() {
            "enter" => {
                if let Some(text) = state.chat_input.take_submission() {
                    state.chat.send(&text, &mut self.rng);
                } else if let Some(index) = state.selected_option.take() {
                    if let Some((message_id, _)) = latest_assistant_options(state) {
                        state.chat.select_option(message_id, index, &mut self.rng);
                    }
                }
            }
            "down" => {
                let count = latest_assistant_options(state).map_or(0, |(_, count)| count);
                if count > 0 {
                    state.selected_option = Some(match state.selected_option {
                        None => 0,
                        Some(index) => (index + 1).min(count - 1),
                    });
                }
            }
            "up" => {
                state.selected_option = match state.selected_option {
                    None | Some(0) => None,
                    Some(index) => Some(index - 1),
                };
            }
            _ => edit_text(&mut state.chat_input, key),
        }
    }

    fn handle_calculator_key(&mut self, key: &KeyInput) {
        let calculator = &mut self.state.calculator;
        let input = *calculator.input();

        match key.key.as_str() {
            "enter" => {
                calculator.calculate();
            }
            "up" => calculator.set_years(input.years.saturating_add(1)),
            "down" => calculator.set_years(input.years.saturating_sub(1)),
            "right" => calculator.set_rate(input.annual_rate_percent + 1.0),
            "left" => calculator.set_rate(input.annual_rate_percent - 1.0),
            "v" => calculator.cycle_principal_preset(),
            "c" => calculator.set_asset(input.asset.next()),
            _ => {}
        }
    }

    fn handle_offer_key(&mut self, key: &KeyInput) {
        match self.state.offer.phase() {
            WizardPhase::Submitting => {}
            WizardPhase::Complete => {
                if key.key == "enter" {
                    self.state.offer.reset();
                    self.state.notice = None;
                    self.state.offer_focus = 0;
                    sync_offer_input(&mut self.state);
                }
            }
            WizardPhase::Step(step) => {
                self.state.notice = None;
                self.handle_offer_step_key(step, key);
            }
        }
    }

    fn handle_offer_step_key(&mut self, step: usize, key: &KeyInput) {
        let state = &mut self.state;

        match key.key.as_str() {
            "enter" => {
                match state.offer.next() {
                    WizardTransition::Advanced(_) => state.offer_focus = 0,
                    WizardTransition::Blocked(missing) => {
                        state.notice = Some(format!("Please fill in: {}", missing.join(", ")));
                    }
                    WizardTransition::SubmitRequested => {
                        state.notice = Some("Submitting offer...".to_owned());
                    }
                    WizardTransition::Retreated(_) | WizardTransition::Ignored => {}
                }
                sync_offer_input(state);
                return;
            }
            "esc" => {
                if let WizardTransition::Retreated(_) = state.offer.back() {
                    state.offer_focus = 0;
                    sync_offer_input(state);
                }
                return;
            }
            _ => {}
        }

        if step == 0 {
            if let Some(index) = function_key_index(key) {
                state.offer.apply_preset(index);
                sync_offer_input(state);
                return;
            }
        }

        if step == 1 {
            let fields = state.offer.fields();
            match key.key.as_str() {
                "up" | "down" => {
                    let method = cycle(&PaymentMethod::ALL, fields.payment_method, key.key == "down");
                    state.offer.select_payment_method(method);
                }
                "left" | "right" if fields.payment_method == PaymentMethod::Crypto => {
                    let crypto =
                        cycle(&PreferredCrypto::ALL, fields.preferred_crypto, key.key == "right");
                    state.offer.select_crypto(crypto);
                }
                _ => {}
            }
            return;
        }

        let field_count = OfferField::for_step(step).len();
        match key.key.as_str() {
            "down" if field_count > 0 => {
                state.offer_focus = (state.offer_focus + 1) % field_count;
                sync_offer_input(state);
            }
            "up" if field_count > 0 => {
                state.offer_focus = (state.offer_focus + field_count - 1) % field_count;
                sync_offer_input(state);
            }
            _ => {
                let Some(field) = state.focused_offer_field() else {
                    return;
                };
                let before = state.offer_input.text().to_owned();
                edit_text(&mut state.offer_input, key);
                if state.offer_input.text() != before {
                    state.offer.update_field(field, state.offer_input.text());
                    if field == OfferField::OfferAmount {
                        sync_offer_input(state);
                    }
                }
            }
        }
    }
}

impl<R> ShellOrchestrator for DefaultShellOrchestrator<R>
where
    R: RandomSource,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick(elapsed) => self.advance(elapsed),
            AppEvent::QuitRequested => {
                self.shutdown();
                self.state.stop();
            }
            AppEvent::InputKey(key) => self.handle_key(key),
        }

        Ok(())
    }

    fn shutdown(&mut self) {
        self.state.loader.cancel();
        self.state.chat.close();
        self.state.offer.close();
        self.state.calculator.reset();
        tracing::info!("sessions torn down");
    }
}

/// Loads the focused offer field into the edit buffer.
fn sync_offer_input(state: &mut ShellState) {
    let text = state
        .focused_offer_field()
        .map(|field| state.offer.fields().get(field).to_owned())
        .unwrap_or_default();
    state.offer_input = TextInputState::with_text(&text);
}

/// Id and option count of the newest assistant message, if it has options.
fn latest_assistant_options(state: &ShellState) -> Option<(i64, usize)> {
    state
        .chat
        .messages()
        .iter()
        .rev()
        .find(|message| message.is_from_assistant())
        .and_then(|message| {
            message
                .options
                .as_ref()
                .map(|options| (message.id, options.len()))
        })
}

/// Maps F1..F4 to 0..3.
fn function_key_index(key: &KeyInput) -> Option<usize> {
    match key.key.as_str() {
        "f1" => Some(0),
        "f2" => Some(1),
        "f3" => Some(2),
        "f4" => Some(3),
        _ => None,
    }
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> T {
    let index = items.iter().position(|item| *item == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % items.len()
    } else {
        (index + items.len() - 1) % items.len()
    };
    items[next]
}

fn edit_text(input: &mut TextInputState, key: &KeyInput) {
    match key.key.as_str() {
        "backspace" => input.backspace(),
        "delete" => input.delete(),
        "left" => input.move_left(),
        "right" => input.move_right(),
        "home" => input.move_home(),
        "end" => input.move_end(),
        _ => {
            if let Some(ch) = key.as_char() {
                input.insert(ch);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRandom;

    fn orchestrator() -> DefaultShellOrchestrator<ScriptedRandom> {
        DefaultShellOrchestrator::new(&AppConfig::default(), ScriptedRandom::constant(0.999_999))
    }

    fn ready_orchestrator() -> DefaultShellOrchestrator<ScriptedRandom> {
        let mut orchestrator = orchestrator();
        tick(&mut orchestrator, 5_000);
        orchestrator
    }

    fn tick(orchestrator: &mut DefaultShellOrchestrator<ScriptedRandom>, millis: u64) {
        orchestrator
            .handle_event(AppEvent::Tick(Duration::from_millis(millis)))
            .expect("tick must be handled");
    }

    fn press(orchestrator: &mut DefaultShellOrchestrator<ScriptedRandom>, key: &str) {
        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new(key, false)))
            .expect("key must be handled");
    }

    fn type_text(orchestrator: &mut DefaultShellOrchestrator<ScriptedRandom>, text: &str) {
        for ch in text.chars() {
            press(orchestrator, &ch.to_string());
        }
    }

    #[test]
    fn stops_on_quit_event() {
        let mut orchestrator = orchestrator();

        orchestrator
            .handle_event(AppEvent::QuitRequested)
            .expect("event must be handled");

        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn loader_completion_reveals_chat() {
        let mut orchestrator = orchestrator();
        assert_eq!(orchestrator.state().screen(), Screen::Loading);

        press(&mut orchestrator, "tab");
        assert_eq!(orchestrator.state().screen(), Screen::Loading);

        tick(&mut orchestrator, 5_000);
        assert_eq!(orchestrator.state().screen(), Screen::Chat);
    }

    #[test]
    fn typed_message_gets_a_reply_after_ticks() {
        let mut orchestrator = ready_orchestrator();

        type_text(&mut orchestrator, "tell me about palm villas");
        press(&mut orchestrator, "enter");

        assert_eq!(orchestrator.state().chat_input().text(), "");
        assert!(orchestrator.state().chat().is_typing());

        tick(&mut orchestrator, 2_500);
        let last = orchestrator.state().chat().messages().last().expect("reply");
        assert!(last.text.starts_with("Palm Jumeirah"));
    }

    #[test]
    fn whitespace_enter_sends_nothing() {
        let mut orchestrator = ready_orchestrator();

        type_text(&mut orchestrator, "   ");
        press(&mut orchestrator, "enter");

        assert_eq!(orchestrator.state().chat().messages().len(), 1);
        assert!(!orchestrator.state().chat().is_typing());
    }

    #[test]
    fn arrow_keys_pick_a_quick_reply() {
        let mut orchestrator = ready_orchestrator();

        press(&mut orchestrator, "down");
        press(&mut orchestrator, "down");
        assert_eq!(orchestrator.state().selected_option(), Some(1));
        press(&mut orchestrator, "enter");

        let messages = orchestrator.state().chat().messages();
        assert_eq!(messages[1].text, "Investment Tips");
        assert_eq!(orchestrator.state().selected_option(), None);
    }

    #[test]
    fn function_keys_send_quick_actions() {
        let mut orchestrator = ready_orchestrator();

        press(&mut orchestrator, "f2");

        assert_eq!(
            orchestrator.state().chat().messages()[1].text,
            "Investment advice"
        );
    }

    #[test]
    fn calculator_keys_adjust_and_calculate() {
        let mut orchestrator = ready_orchestrator();
        press(&mut orchestrator, "tab");
        assert_eq!(orchestrator.state().screen(), Screen::Calculator);

        press(&mut orchestrator, "up");
        press(&mut orchestrator, "left");
        press(&mut orchestrator, "c");
        press(&mut orchestrator, "enter");
        press(&mut orchestrator, "enter");

        let calculator = orchestrator.state().calculator();
        assert_eq!(calculator.input().years, 6);
        assert_eq!(calculator.input().annual_rate_percent, 11.0);
        assert!(calculator.is_calculating());

        tick(&mut orchestrator, 1_500);
        assert!(orchestrator.state().calculator().show_results());
    }

    fn open_offer(orchestrator: &mut DefaultShellOrchestrator<ScriptedRandom>) {
        press(orchestrator, "tab");
        press(orchestrator, "tab");
        assert_eq!(orchestrator.state().screen(), Screen::Offer);
    }

    #[test]
    fn offer_amount_typing_keeps_digits_only() {
        let mut orchestrator = ready_orchestrator();
        open_offer(&mut orchestrator);

        for _ in 0..8 {
            press(&mut orchestrator, "backspace");
        }
        type_text(&mut orchestrator, "12a,5");

        assert_eq!(orchestrator.state().offer().fields().offer_amount, "125");
        assert_eq!(orchestrator.state().offer_input().text(), "125");
    }

    #[test]
    fn offer_preset_key_sets_amount() {
        let mut orchestrator = ready_orchestrator();
        open_offer(&mut orchestrator);

        press(&mut orchestrator, "f1");

        assert_eq!(orchestrator.state().offer().fields().offer_amount, "13950000");
        assert!(orchestrator.state().offer().offer_is_low());
    }

    #[test]
    fn offer_flow_submits_and_completes() {
        let mut orchestrator = ready_orchestrator();
        open_offer(&mut orchestrator);

        press(&mut orchestrator, "enter");
        press(&mut orchestrator, "down");
        press(&mut orchestrator, "enter");
        type_text(&mut orchestrator, "Ada");
        press(&mut orchestrator, "down");
        type_text(&mut orchestrator, "ada@example.com");
        press(&mut orchestrator, "down");
        type_text(&mut orchestrator, "+971500000000");
        press(&mut orchestrator, "enter");
        press(&mut orchestrator, "enter");

        let offer = orchestrator.state().offer();
        assert_eq!(offer.phase(), WizardPhase::Submitting);
        assert_eq!(offer.fields().payment_method, PaymentMethod::Bank);
        assert_eq!(offer.fields().email, "ada@example.com");

        tick(&mut orchestrator, 2_000);
        assert_eq!(orchestrator.state().offer().phase(), WizardPhase::Complete);
        assert!(orchestrator
            .state()
            .notice()
            .is_some_and(|notice| notice.contains("#CH-")));

        press(&mut orchestrator, "enter");
        assert_eq!(orchestrator.state().offer().phase(), WizardPhase::Step(0));
    }

    #[test]
    fn review_step_with_blank_contact_shows_notice() {
        let mut orchestrator = ready_orchestrator();
        open_offer(&mut orchestrator);

        for _ in 0..4 {
            press(&mut orchestrator, "enter");
        }

        assert_eq!(orchestrator.state().offer().phase(), WizardPhase::Step(3));
        assert_eq!(
            orchestrator.state().notice(),
            Some("Please fill in: name, email, phone")
        );
    }

    #[test]
    fn leaving_offer_screen_discards_wizard_data() {
        let mut orchestrator = ready_orchestrator();
        open_offer(&mut orchestrator);
        press(&mut orchestrator, "f1");
        press(&mut orchestrator, "enter");

        press(&mut orchestrator, "tab");

        let offer = orchestrator.state().offer();
        assert_eq!(offer.phase(), WizardPhase::Step(0));
        assert_eq!(offer.fields().offer_amount, "15500000");
    }

    #[test]
    fn shutdown_cancels_pending_work() {
        let mut orchestrator = ready_orchestrator();
        type_text(&mut orchestrator, "hello");
        press(&mut orchestrator, "enter");

        orchestrator.shutdown();
        tick(&mut orchestrator, 10_000);

        assert_eq!(orchestrator.state().chat().messages().len(), 2);
        assert!(!orchestrator.state().chat().is_typing());
    }
}
