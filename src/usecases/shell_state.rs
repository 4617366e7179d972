use crate::{
    domain::{offer::OfferField, text_input::TextInputState},
    infra::config::AppConfig,
    usecases::{
        calculate::CalculatorSession, chat_session::ChatSession, loader::LoaderSession,
        offer_session::OfferSession,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Chat,
    Calculator,
    Offer,
}

impl Screen {
    pub const TABS: [Screen; 3] = [Self::Chat, Self::Calculator, Self::Offer];

    pub fn title(self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::Chat => "Luna AI",
            Self::Calculator => "Calculator",
            Self::Offer => "Make an Offer",
        }
    }

    /// Next tab in order; the loading screen has no tab.
    pub fn next_tab(self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Chat => Self::Calculator,
            Self::Calculator => Self::Offer,
            Self::Offer => Self::Chat,
        }
    }
}

/// Everything the view renders: the active screen plus every session.
pub struct ShellState {
    running: bool,
    screen: Screen,
    pub(crate) loader: LoaderSession,
    pub(crate) chat: ChatSession,
    pub(crate) chat_input: TextInputState,
    pub(crate) selected_option: Option<usize>,
    pub(crate) calculator: CalculatorSession,
    pub(crate) offer: OfferSession,
    pub(crate) offer_focus: usize,
    pub(crate) offer_input: TextInputState,
    pub(crate) notice: Option<String>,
}

impl ShellState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            running: true,
            screen: Screen::Loading,
            loader: LoaderSession::new(&config.loader),
            chat: ChatSession::new(config.chat.clone()),
            chat_input: TextInputState::default(),
            selected_option: None,
            calculator: CalculatorSession::new(&config.calculator),
            offer: OfferSession::new(&config.offer),
            offer_focus: 0,
            offer_input: TextInputState::default(),
            notice: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn loader(&self) -> &LoaderSession {
        &self.loader
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_input(&self) -> &TextInputState {
        &self.chat_input
    }

    /// Highlighted quick-reply of the latest assistant message.
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn calculator(&self) -> &CalculatorSession {
        &self.calculator
    }

    pub fn offer(&self) -> &OfferSession {
        &self.offer
    }

    /// Text field currently receiving keystrokes on the offer screen.
    pub fn focused_offer_field(&self) -> Option<OfferField> {
        let step = self.offer.phase_step()?;
        OfferField::for_step(step).get(self.offer_focus).copied()
    }

    pub fn offer_focus(&self) -> usize {
        self.offer_focus
    }

    pub fn offer_input(&self) -> &TextInputState {
        &self.offer_input
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
