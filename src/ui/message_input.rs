//! Single-line input field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::text_input::TextInputState;

use super::styles;

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

/// Renders an input box and places the terminal cursor when focused.
pub fn render_text_input(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    input: &TextInputState,
    placeholder: &str,
    is_focused: bool,
) {
    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let paragraph = Paragraph::new(build_input_line(input, placeholder)).block(
        Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, area);

    if is_focused {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(PROMPT_SYMBOL.len() as u16)
            .saturating_add(cursor_column(input).min(u16::MAX as usize) as u16);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Display column of the cursor; wide glyphs take two cells.
fn cursor_column(input: &TextInputState) -> usize {
    input.text_before_cursor().width()
}

fn build_input_line(input: &TextInputState, placeholder: &str) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if input.text().is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(placeholder.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(input.text().to_owned(), styles::input_text_style()),
        ])
    }
}
