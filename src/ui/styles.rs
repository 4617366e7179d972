//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Frame styles
// =============================================================================

pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the selected tab title.
pub fn active_tab_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn status_bar_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for one-line notices such as validation hints.
pub fn notice_style() -> Style {
    Style::default().fg(Color::LightYellow)
}

pub fn warning_style() -> Style {
    Style::default().fg(Color::LightRed)
}

// =============================================================================
// Chat styles
// =============================================================================

/// Assistant names are gold, the user's are white; both bold.
pub fn message_sender_style(from_assistant: bool) -> Style {
    let color = if from_assistant {
        Color::Yellow
    } else {
        Color::White
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn message_text_style(from_assistant: bool) -> Style {
    if from_assistant {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn option_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

pub fn typing_indicator_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

pub fn date_separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Input styles
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Calculator and offer styles
// =============================================================================

/// Labels such as "Property Value".
pub fn field_label_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Headline figures such as the projected value.
pub fn highlight_value_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn bar_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn gauge_style() -> Style {
    Style::default().fg(Color::Yellow).bg(Color::Black)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_sender_is_bold_yellow() {
        let style = message_sender_style(true);
        assert_eq!(style.fg, Some(Color::Yellow));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn user_sender_is_bold_white() {
        let style = message_sender_style(false);
        assert_eq!(style.fg, Some(Color::White));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn selected_option_is_inverted() {
        let style = option_style(true);
        assert_eq!(style.bg, Some(Color::Yellow));
        assert_eq!(option_style(false).bg, None);
    }

    #[test]
    fn date_separator_style_is_dark_gray() {
        assert_eq!(date_separator_style().fg, Some(Color::DarkGray));
    }
}
