#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// What a quick-reply button does when chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    /// Sends the given text as if the user had typed it.
    Send(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOption {
    pub label: String,
    pub icon: Option<&'static str>,
    pub action: Option<ChatAction>,
}

impl ChatOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            action: None,
        }
    }

    pub fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Text sent when the option is chosen: the action's payload, or the label.
    pub fn outgoing_text(&self) -> &str {
        match &self.action {
            Some(ChatAction::Send(text)) => text,
            None => &self.label,
        }
    }

    pub fn display_label(&self) -> String {
        match self.icon {
            Some(icon) => format!("{icon} {}", self.label),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: i64,
    pub text: String,
    pub sender: Sender,
    pub options: Option<Vec<ChatOption>>,
    pub sent_at_ms: i64,
}

impl ChatMessage {
    pub fn is_from_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

/// Issues message ids from the wall clock, bumping past collisions so ids
/// stay strictly increasing within a session.
#[derive(Debug, Clone, Default)]
pub struct MessageIdSource {
    last: Option<i64>,
}

impl MessageIdSource {
    pub fn next_id(&mut self, now_ms: i64) -> i64 {
        let id = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(id);
        id
    }
}

pub fn now_unix_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_the_clock_when_it_moves_forward() {
        let mut ids = MessageIdSource::default();

        assert_eq!(ids.next_id(1_000), 1_000);
        assert_eq!(ids.next_id(2_000), 2_000);
    }

    #[test]
    fn ids_stay_monotonic_when_the_clock_stalls_or_rewinds() {
        let mut ids = MessageIdSource::default();

        assert_eq!(ids.next_id(5_000), 5_000);
        assert_eq!(ids.next_id(5_000), 5_001);
        assert_eq!(ids.next_id(4_000), 5_002);
    }

    #[test]
    fn option_sends_action_text_before_label() {
        let plain = ChatOption::new("Villa");
        let quick = ChatOption {
            label: "Budget".to_owned(),
            icon: None,
            action: Some(ChatAction::Send("Properties under 5 million".to_owned())),
        };

        assert_eq!(plain.outgoing_text(), "Villa");
        assert_eq!(quick.outgoing_text(), "Properties under 5 million");
    }

    #[test]
    fn display_label_prefixes_icon() {
        let option = ChatOption::new("Villa").with_icon("🏠");

        assert_eq!(option.display_label(), "🏠 Villa");
    }
}
