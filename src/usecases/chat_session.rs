use std::time::Duration;

use crate::{
    domain::{
        chat::{now_unix_ms, ChatMessage, ChatOption, MessageIdSource, Sender},
        response_rules::{self, Reply},
    },
    infra::{config::ChatConfig, timers::TimerQueue},
    usecases::contracts::{RandomSource, Scheduler},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTimer {
    Reply { prompt: String },
}

/// Assistant chat: an append-only message log plus simulated thinking time
/// before each canned reply.
pub struct ChatSession<S = TimerQueue<ChatTimer>>
where
    S: Scheduler<ChatTimer>,
{
    config: ChatConfig,
    scheduler: S,
    clock: fn() -> i64,
    ids: MessageIdSource,
    messages: Vec<ChatMessage>,
    pending_replies: usize,
}

impl ChatSession<TimerQueue<ChatTimer>> {
    pub fn new(config: ChatConfig) -> Self {
        Self::with_scheduler(config, TimerQueue::new(), now_unix_ms)
    }
}

impl<S> ChatSession<S>
where
    S: Scheduler<ChatTimer>,
{
    pub fn with_scheduler(config: ChatConfig, scheduler: S, clock: fn() -> i64) -> Self {
        let mut session = Self {
            config,
            scheduler,
            clock,
            ids: MessageIdSource::default(),
            messages: Vec::new(),
            pending_replies: 0,
        };
        session.push_reply(response_rules::welcome_reply());
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while at least one reply is still "thinking".
    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn quick_actions(&self) -> Vec<ChatOption> {
        response_rules::quick_action_options()
    }

    /// Appends the user's message and schedules the assistant reply.
    /// Blank input is dropped and returns false.
    pub fn send(&mut self, text: &str, rng: &mut dyn RandomSource) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }

        self.push_message(trimmed.to_owned(), Sender::User, None);

        let (min_ms, max_ms) = self.config.thinking_range_ms();
        let thinking = Duration::from_secs_f64(rng.uniform(min_ms, max_ms) / 1_000.0);
        self.scheduler.schedule(
            thinking,
            ChatTimer::Reply {
                prompt: trimmed.to_owned(),
            },
        );
        self.pending_replies += 1;

        tracing::debug!(
            thinking_ms = thinking.as_millis() as u64,
            pending = self.pending_replies,
            "chat reply scheduled"
        );
        true
    }

    /// Sends the chosen quick-reply of an assistant message.
    pub fn select_option(
        &mut self,
        message_id: i64,
        option_index: usize,
        rng: &mut dyn RandomSource,
    ) -> bool {
        let text = self
            .messages
            .iter()
            .find(|message| message.id == message_id)
            .and_then(|message| message.options.as_ref())
            .and_then(|options| options.get(option_index))
            .map(|option| option.outgoing_text().to_owned());

        match text {
            Some(text) => self.send(&text, rng),
            None => false,
        }
    }

    pub fn quick_action(&mut self, index: usize, rng: &mut dyn RandomSource) -> bool {
        match response_rules::QUICK_ACTIONS.get(index) {
            Some((_, prompt)) => self.send(prompt, rng),
            None => false,
        }
    }

    /// Moves the session clock forward and delivers every reply that is due.
    /// Returns how many replies were appended.
    pub fn advance(&mut self, elapsed: Duration, rng: &mut dyn RandomSource) -> usize {
        self.scheduler.advance(elapsed);

        let mut delivered = 0;
        while let Some(ChatTimer::Reply { prompt }) = self.scheduler.next_due() {
            self.pending_replies = self.pending_replies.saturating_sub(1);
            let reply = response_rules::respond(&prompt, rng);
            tracing::debug!(rule = reply.rule.unwrap_or("fallback"), "chat reply delivered");
            self.push_reply(reply);
            delivered += 1;
        }

        delivered
    }

    /// Drops every pending reply. Nothing is delivered after this.
    pub fn close(&mut self) {
        if self.pending_replies > 0 {
            tracing::debug!(pending = self.pending_replies, "dropping pending chat replies");
        }
        self.scheduler.cancel_all();
        self.pending_replies = 0;
    }

    fn push_reply(&mut self, reply: Reply) {
        self.push_message(reply.text, Sender::Assistant, reply.options);
    }

    fn push_message(&mut self, text: String, sender: Sender, options: Option<Vec<ChatOption>>) {
        let now = (self.clock)();
        self.messages.push(ChatMessage {
            id: self.ids.next_id(now),
            text,
            sender,
            options,
            sent_at_ms: now,
        });
    }
}

impl<S> Drop for ChatSession<S>
where
    S: Scheduler<ChatTimer>,
{
    fn drop(&mut self) {
        self.close();
    }
}
