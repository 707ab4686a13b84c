//! Single-line text input with cursor

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// One editable line of text
///
/// The cursor is tracked in characters, not bytes, so accented input
/// moves and deletes cleanly.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    content: String,
    cursor: usize,
    focused: bool,
    placeholder: String,
    label: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the content and park the cursor after it
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.cursor = self.content.chars().count();
        self
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the cursor into the content
    fn byte_offset(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset();
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset();
            self.content.remove(at);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset();
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }
}

impl Widget for TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() as u16 + 2
        };

        if label_width > 0 {
            let label_line = Line::from(vec![
                Span::styled(&self.label, Style::default().fg(Color::Cyan)),
                Span::raw(": "),
            ]);
            buf.set_line(area.x, area.y, &label_line, label_width);
        }

        let input_start = area.x + label_width;
        let input_width = area.width.saturating_sub(label_width);

        let show_placeholder = self.content.is_empty() && !self.placeholder.is_empty();
        let (display_text, text_style) = if show_placeholder {
            (self.placeholder.as_str(), Style::default().fg(Color::DarkGray))
        } else if self.focused {
            (self.content.as_str(), Style::default().fg(Color::White))
        } else {
            (self.content.as_str(), Style::default().fg(Color::Yellow))
        };
        buf.set_stringn(input_start, area.y, display_text, input_width as usize, text_style);

        if self.focused {
            let cursor_x = input_start + self.cursor as u16;
            if cursor_x < input_start + input_width {
                let under = self.content.chars().nth(self.cursor).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    under.to_string(),
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
    fn test_insert_and_value() {
        let mut input = TextInput::new();
        for c in "rent".chars() {
            input.insert(c);
        }
        assert_eq!(input.value(), "rent");
    }

    #[test]
    fn test_backspace_handles_multibyte() {
        let mut input = TextInput::new().content("café");
        input.backspace();
        assert_eq!(input.value(), "caf");
        input.backspace();
        assert_eq!(input.value(), "ca");
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut input = TextInput::new().content("cfé");
        input.move_start();
        input.move_right();
        input.insert('a');
        assert_eq!(input.value(), "café");
    }

    #[test]
    fn test_delete_under_cursor() {
        let mut input = TextInput::new().content("abc");
        input.move_start();
        input.delete();
        assert_eq!(input.value(), "bc");
        input.move_end();
        input.delete();
        assert_eq!(input.value(), "bc");
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut input = TextInput::new().content("xy");
        input.move_left();
        input.move_left();
        input.move_left();
        input.insert('a');
        assert_eq!(input.value(), "axy");
        input.move_end();
        input.move_right();
        input.insert('z');
        assert_eq!(input.value(), "axyz");
    }
}
