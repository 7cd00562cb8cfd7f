//! TextField widget - a single-line text input field

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Color;

/// Result of handling an event in a text field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldResult {
    /// Text was edited
    Changed,
    /// Cursor moved
    Consumed,
    /// Enter pressed
    Submit,
    /// Event not for this field
    Ignored,
}

/// A single-line text input widget
pub struct TextField {
    /// Text content
    text: String,
    /// Cursor position (character index)
    cursor_pos: usize,
    /// Horizontal scroll offset
    scroll_offset: usize,
    /// Whether widget has focus
    focused: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            focused: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and put the cursor at the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor_pos = self.len();
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_pos(&self, pos: usize) -> usize {
        self.text.char_indices().nth(pos).map(|(i, _)| i).unwrap_or(self.text.len())
    }

    fn ensure_cursor_visible(&mut self, visible_width: usize) {
        if visible_width == 0 {
            return;
        }

        // Leave one character at the end for the cursor when at end of text
        let usable_width = visible_width.saturating_sub(1);

        if self.cursor_pos < self.scroll_offset {
            self.scroll_offset = self.cursor_pos;
        } else if self.cursor_pos > self.scroll_offset + usable_width {
            self.scroll_offset = self.cursor_pos.saturating_sub(usable_width);
        }
    }

    /// Handle a key when focused; `width` is the visible field width
    pub fn handle_event(&mut self, event: &InputEvent, width: usize) -> FieldResult {
        if !self.focused {
            return FieldResult::Ignored;
        }

        let result = match event {
            InputEvent::Char(ch) => {
                let idx = self.byte_pos(self.cursor_pos);
                self.text.insert(idx, *ch);
                self.cursor_pos += 1;
                FieldResult::Changed
            }
            InputEvent::Backspace => {
                if self.cursor_pos == 0 {
                    return FieldResult::Consumed;
                }
                self.cursor_pos -= 1;
                let idx = self.byte_pos(self.cursor_pos);
                self.text.remove(idx);
                FieldResult::Changed
            }
            InputEvent::Delete => {
                if self.cursor_pos >= self.len() {
                    return FieldResult::Consumed;
                }
                let idx = self.byte_pos(self.cursor_pos);
                self.text.remove(idx);
                FieldResult::Changed
            }
            InputEvent::CursorLeft => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                FieldResult::Consumed
            }
            InputEvent::CursorRight => {
                self.cursor_pos = (self.cursor_pos + 1).min(self.len());
                FieldResult::Consumed
            }
            InputEvent::Home => {
                self.cursor_pos = 0;
                FieldResult::Consumed
            }
            InputEvent::End => {
                self.cursor_pos = self.len();
                FieldResult::Consumed
            }
            InputEvent::Enter => FieldResult::Submit,
            _ => FieldResult::Ignored,
        };

        self.ensure_cursor_visible(width);
        result
    }

    /// Draw the field on one row (1-based coordinates)
    pub fn draw(&mut self, screen: &mut Screen, row: u16, col: u16, width: u16) {
        self.ensure_cursor_visible(width as usize);

        let visible: Vec<char> = self.text.chars().skip(self.scroll_offset).take(width as usize).collect();
        for i in 0..width as usize {
            let ch = visible.get(i).copied().unwrap_or(' ');
            let (fg, bg) = if self.focused && self.scroll_offset + i == self.cursor_pos {
                (Color::Cyan, Color::Black)
            } else {
                (Color::Black, Color::Cyan)
            };
            screen.set(row, col + i as u16, ch, fg, bg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(text: &str) -> TextField {
        let mut field = TextField::new().with_text(text);
        field.set_focus(true);
        field
    }

    #[test]
    fn test_unfocused_field_ignores_keys() {
        let mut field = TextField::new();
        assert_eq!(field.handle_event(&InputEvent::Char('a'), 10), FieldResult::Ignored);
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_edit_in_middle() {
        let mut field = focused("report.dat");
        for _ in 0..4 {
            field.handle_event(&InputEvent::CursorLeft, 20);
        }
        assert_eq!(field.handle_event(&InputEvent::Char('s'), 20), FieldResult::Changed);
        assert_eq!(field.text(), "reports.dat");
        assert_eq!(field.handle_event(&InputEvent::Backspace, 20), FieldResult::Changed);
        assert_eq!(field.handle_event(&InputEvent::Delete, 20), FieldResult::Changed);
        assert_eq!(field.text(), "reportdat");
        assert_eq!(field.handle_event(&InputEvent::Enter, 20), FieldResult::Submit);
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        let mut field = focused("");
        for c in "a-long-file-name.txt".chars() {
            field.handle_event(&InputEvent::Char(c), 8);
        }
        assert_eq!(field.cursor_pos(), 20);
        assert_eq!(field.scroll_offset, 13);
        field.handle_event(&InputEvent::Home, 8);
        assert_eq!(field.scroll_offset, 0);
    }
}
