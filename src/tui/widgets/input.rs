//! Text input widget
//!
//! A single-line text field with a character cursor and optional length cap.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A simple text input widget
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position, in characters
    pub cursor: usize,
    /// Whether the input is focused
    pub focused: bool,
    /// Placeholder text shown while empty
    pub placeholder: String,
    /// Label
    pub label: String,
    /// Maximum number of characters accepted
    pub max_length: Option<usize>,
}

impl TextInput {
    /// Create a new text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set content, moving the cursor to the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.cursor = self.char_count();
        self
    }

    /// Cap the number of characters
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    ///
    /// Ignored once the length cap is reached.
    pub fn insert(&mut self, c: char) {
        if self.max_length.is_some_and(|max| self.char_count() >= max) {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }

    /// Whether nothing but whitespace was typed
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() + 2
        };

        if !self.label.is_empty() {
            let label_style = if self.focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            let label_line = Line::from(vec![
                Span::styled(self.label.as_str(), label_style),
                Span::raw(": "),
            ]);
            buf.set_line(area.x, area.y, &label_line, label_width as u16);
        }

        let input_start = area.x + label_width as u16;

        if self.content.is_empty() && !self.focused {
            buf.set_string(
                input_start,
                area.y,
                &self.placeholder,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        buf.set_string(
            input_start,
            area.y,
            &self.content,
            Style::default().fg(Color::White),
        );

        if self.focused {
            let cursor_x = input_start + self.cursor as u16;
            if cursor_x < area.x + area.width {
                let cursor_char = self.content.chars().nth(self.cursor).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    cursor_char.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = TextInput::new();
        for c in "makan".chars() {
            input.insert(c);
        }
        assert_eq!(input.value(), "makan");

        input.backspace();
        assert_eq!(input.value(), "maka");
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn test_cursor_editing_in_the_middle() {
        let mut input = TextInput::new().content("0503-2025");
        input.move_start();
        input.move_right();
        input.move_right();
        input.insert('-');
        assert_eq!(input.value(), "05-03-2025");

        input.move_end();
        input.delete();
        assert_eq!(input.value(), "05-03-2025");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = TextInput::new().content("kafé");
        input.backspace();
        assert_eq!(input.value(), "kaf");
        input.insert('é');
        input.move_left();
        input.delete();
        assert_eq!(input.value(), "kaf");
    }

    #[test]
    fn test_max_length() {
        let mut input = TextInput::new().max_length(3);
        for c in "abcd".chars() {
            input.insert(c);
        }
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_blank() {
        assert!(TextInput::new().content("   ").is_blank());
        assert!(!TextInput::new().content(" x ").is_blank());
    }
}
