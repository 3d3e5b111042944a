//! Input field handling for the terminal user interface.

use unicode_width::UnicodeWidthStr;

/// A single-line text input with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte text edits cleanly.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Terminal columns taken by the text before the cursor.
    ///
    /// Wide characters such as CJK count as two columns.
    pub fn display_column(&self) -> usize {
        self.value[..self.byte_offset(self.cursor)].width()
    }

    /// Return the current text and reset the field.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_multibyte_text() {
        let mut field = InputField::with_value("学習");
        assert_eq!(field.cursor, 2);
        field.handle_char('!');
        assert_eq!(field.value, "学習!");
        field.move_cursor_left();
        field.move_cursor_left();
        field.handle_backspace();
        assert_eq!(field.value, "習!");
        assert_eq!(field.cursor, 0);
        field.handle_delete();
        assert_eq!(field.value, "!");
    }

    #[test]
    fn display_column_counts_wide_characters() {
        let mut field = InputField::with_value("学習 go");
        assert_eq!(field.cursor, 5);
        assert_eq!(field.display_column(), 7);
        field.move_cursor_left();
        field.move_cursor_left();
        field.move_cursor_left();
        assert_eq!(field.display_column(), 4);
        assert_eq!(InputField::new().display_column(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut field = InputField::new();
        field.move_cursor_left();
        field.handle_backspace();
        field.handle_delete();
        field.move_cursor_right();
        assert_eq!(field.cursor, 0);
        assert!(field.value.is_empty());
    }

    #[test]
    fn take_resets() {
        let mut field = InputField::with_value("Read");
        assert_eq!(field.take(), "Read");
        assert!(field.value.is_empty());
        assert_eq!(field.cursor, 0);
    }
}
