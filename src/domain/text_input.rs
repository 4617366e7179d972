//! Single-line editable text with a character-indexed cursor.

/// Longest text a single input accepts.
const MAX_INPUT_CHARS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextInputState {
    text: String,
    /// Character index, not byte index.
    cursor: usize,
}

impl TextInputState {
    pub fn with_text(text: &str) -> Self {
        let mut state = Self::default();
        state.replace(text);
        state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before the cursor, for placing the terminal caret.
    pub fn text_before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns false when the input is already full.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.char_len() >= MAX_INPUT_CHARS {
            return false;
        }

        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }

        self.cursor -= 1;
        self.remove_at_cursor();
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            self.remove_at_cursor();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replaces the content and puts the cursor at the end, truncating to
    /// the input limit.
    pub fn replace(&mut self, text: &str) {
        self.text = text.chars().take(MAX_INPUT_CHARS).collect();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Takes the trimmed text for sending and clears the input. Blank input
    /// stays untouched and yields `None`.
    pub fn take_submission(&mut self) -> Option<String> {
        if self.is_blank() {
            return None;
        }

        let submitted = self.text.trim().to_owned();
        self.clear();
        Some(submitted)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn remove_at_cursor(&mut self) {
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}
