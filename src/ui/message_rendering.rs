//! Chat log rendering.
//!
//! Messages are grouped by sender with a header on the first message of each
//! run, date separators split days, and the newest assistant message lists
//! its quick replies underneath.

use chrono::{Local, TimeZone};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::chat::{ChatMessage, Sender};

use super::styles;

const ASSISTANT_NAME: &str = "Luna";
const USER_NAME: &str = "You";
const TYPING_TEXT: &str = "Luna is typing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatListElement {
    /// Date separator line (e.g., "——— 14 Feb 2026 ———").
    DateSeparator(String),
    Message {
        time: String,
        sender: Option<String>,
        content: String,
        from_assistant: bool,
    },
    /// Quick replies of the latest assistant message.
    Options {
        labels: Vec<String>,
        selected: Option<usize>,
    },
    Typing,
}

/// Builds the visual chat log. `selected` highlights one option of the
/// latest assistant message.
pub fn build_chat_list_elements(
    messages: &[ChatMessage],
    selected: Option<usize>,
    typing: bool,
) -> Vec<ChatListElement> {
    let mut elements = Vec::new();
    let mut prev_date: Option<chrono::NaiveDate> = None;
    let mut prev_sender: Option<Sender> = None;

    let latest_assistant = messages
        .iter()
        .rposition(ChatMessage::is_from_assistant);

    for (index, message) in messages.iter().enumerate() {
        let date = timestamp_to_date(message.sent_at_ms);

        if prev_date != Some(date) {
            elements.push(ChatListElement::DateSeparator(format_date(date)));
            prev_sender = None;
        }

        let sender = (prev_sender != Some(message.sender)).then(|| sender_name(message.sender).to_owned());

        elements.push(ChatListElement::Message {
            time: format_time(message.sent_at_ms),
            sender,
            content: message.text.clone(),
            from_assistant: message.is_from_assistant(),
        });

        if Some(index) == latest_assistant {
            if let Some(options) = &message.options {
                elements.push(ChatListElement::Options {
                    labels: options.iter().map(|option| option.display_label()).collect(),
                    selected,
                });
            }
        }

        prev_date = Some(date);
        prev_sender = Some(message.sender);
    }

    if typing {
        elements.push(ChatListElement::Typing);
    }

    elements
}

pub fn element_to_list_item(element: &ChatListElement) -> ListItem<'static> {
    match element {
        ChatListElement::DateSeparator(date) => date_separator_item(date),
        ChatListElement::Message {
            time,
            sender,
            content,
            from_assistant,
        } => message_item(time, sender.as_deref(), content, *from_assistant),
        ChatListElement::Options { labels, selected } => options_item(labels, *selected),
        ChatListElement::Typing => ListItem::new(Line::from(Span::styled(
            format!("      {TYPING_TEXT}"),
            styles::typing_indicator_style(),
        ))),
    }
}

fn date_separator_item(date: &str) -> ListItem<'static> {
    let separator = format!("——— {} ———", date);
    let line = Line::from(vec![Span::styled(
        separator,
        styles::date_separator_style(),
    )])
    .alignment(Alignment::Center);
    ListItem::new(vec![Line::default(), line, Line::default()])
}

fn message_item(
    time: &str,
    sender: Option<&str>,
    content: &str,
    from_assistant: bool,
) -> ListItem<'static> {
    let indent = "      "; // aligns with the time column
    let text_style = styles::message_text_style(from_assistant);
    let mut lines = Vec::new();
    let mut content_lines = content.lines();

    match sender {
        Some(name) => {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>5} ", time), styles::message_time_style()),
                Span::styled(format!("{}:", name), styles::message_sender_style(from_assistant)),
            ]));
        }
        None => {
            let first = content_lines.next().unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(format!("{:>5} ", time), styles::message_time_style()),
                Span::styled(first.to_owned(), text_style),
            ]));
        }
    }

    for text_line in content_lines {
        lines.push(Line::from(vec![
            Span::raw(indent.to_owned()),
            Span::styled(text_line.to_owned(), text_style),
        ]));
    }

    ListItem::new(lines)
}

fn options_item(labels: &[String], selected: Option<usize>) -> ListItem<'static> {
    let lines = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let is_selected = selected == Some(index);
            let marker = if is_selected { "▸ " } else { "  " };
            Line::from(vec![
                Span::raw("      ".to_owned()),
                Span::styled(
                    format!("{marker}[{label}]"),
                    styles::option_style(is_selected),
                ),
            ])
        })
        .collect::<Vec<_>>();

    ListItem::new(lines)
}

fn sender_name(sender: Sender) -> &'static str {
    match sender {
        Sender::User => USER_NAME,
        Sender::Assistant => ASSISTANT_NAME,
    }
}

fn timestamp_to_date(timestamp_ms: i64) -> chrono::NaiveDate {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.date_naive(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.date_naive(),
        chrono::LocalResult::None => Local::now().date_naive(),
    }
}

fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M").to_string(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.format("%H:%M").to_string(),
        chrono::LocalResult::None => "??:??".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ChatOption;

    // UTC timestamps; the displayed time depends on the local zone but the
    // day boundary between them holds everywhere.
    const FEB_14_2026_10AM: i64 = 1771063200000;
    const FEB_15_2026_1PM: i64 = 1771160400000;

    fn msg(id: i64, sender: Sender, text: &str, sent_at_ms: i64) -> ChatMessage {
        ChatMessage {
            id,
            text: text.to_owned(),
            sender,
            options: None,
            sent_at_ms,
        }
    }

    fn with_options(mut message: ChatMessage, labels: &[&str]) -> ChatMessage {
        message.options = Some(labels.iter().map(|label| ChatOption::new(*label)).collect());
        message
    }

    #[test]
    fn builds_date_separator_for_first_message() {
        let messages = vec![msg(1, Sender::Assistant, "Hello", FEB_14_2026_10AM)];

        let elements = build_chat_list_elements(&messages, None, false);

        assert_eq!(elements.len(), 2);
        assert!(matches!(&elements[0], ChatListElement::DateSeparator(_)));
    }

    #[test]
    fn groups_consecutive_messages_from_same_sender() {
        let messages = vec![
            msg(1, Sender::User, "First", FEB_14_2026_10AM),
            msg(2, Sender::User, "Second", FEB_14_2026_10AM + 60_000),
            msg(3, Sender::Assistant, "Reply", FEB_14_2026_10AM + 120_000),
        ];

        let elements = build_chat_list_elements(&messages, None, false);

        let senders: Vec<Option<&str>> = elements
            .iter()
            .filter_map(|element| match element {
                ChatListElement::Message { sender, .. } => Some(sender.as_deref()),
                _ => None,
            })
            .collect();
        assert_eq!(senders, vec![Some("You"), None, Some("Luna")]);
    }

    #[test]
    fn inserts_date_separator_on_date_change() {
        let messages = vec![
            msg(1, Sender::User, "Day 1", FEB_14_2026_10AM),
            msg(2, Sender::User, "Day 2", FEB_15_2026_1PM),
        ];

        let elements = build_chat_list_elements(&messages, None, false);

        assert_eq!(elements.len(), 4);
        assert!(matches!(&elements[2], ChatListElement::DateSeparator(_)));
        assert!(matches!(
            &elements[3],
            ChatListElement::Message { sender: Some(_), .. }
        ));
    }

    #[test]
    fn only_latest_assistant_message_lists_options() {
        let messages = vec![
            with_options(msg(1, Sender::Assistant, "Old", FEB_14_2026_10AM), &["A"]),
            msg(2, Sender::User, "A", FEB_14_2026_10AM + 1_000),
            with_options(
                msg(3, Sender::Assistant, "New", FEB_14_2026_10AM + 2_000),
                &["B", "C"],
            ),
        ];

        let elements = build_chat_list_elements(&messages, Some(1), false);

        let options: Vec<&ChatListElement> = elements
            .iter()
            .filter(|element| matches!(element, ChatListElement::Options { .. }))
            .collect();
        assert_eq!(
            options,
            vec![&ChatListElement::Options {
                labels: vec!["B".to_owned(), "C".to_owned()],
                selected: Some(1),
            }]
        );
    }

    #[test]
    fn typing_indicator_is_appended_last() {
        let messages = vec![msg(1, Sender::User, "Hi", FEB_14_2026_10AM)];

        let elements = build_chat_list_elements(&messages, None, true);

        assert_eq!(elements.last(), Some(&ChatListElement::Typing));
    }

    #[test]
    fn format_date_produces_correct_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date");

        assert_eq!(format_date(date), "14 Feb 2026");
    }

    #[test]
    fn format_time_produces_hh_mm() {
        let time = format_time(FEB_14_2026_10AM);

        assert_eq!(time.len(), 5);
        assert!(time.contains(':'));
    }
}
