//! Multi-line text box holding the document content

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Color;

/// Byte offset of the `col`-th character in `line` (clamped to the line end)
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Text buffer for the text box
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    pub lines: Vec<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Split text into lines; CRLF line endings are read as LF
    pub fn from_string(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, n: usize) -> Option<&str> {
        self.lines.get(n).map(|s| s.as_str())
    }

    pub fn line_len(&self, n: usize) -> usize {
        self.line(n).map(char_len).unwrap_or(0)
    }

    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        if let Some(l) = self.lines.get_mut(line) {
            let idx = byte_index(l, col);
            l.insert(idx, ch);
        }
    }

    /// Delete the character at (line, col); joins with the next line at end of line
    pub fn delete_char(&mut self, line: usize, col: usize) -> bool {
        let len = self.line_len(line);
        if col < len {
            let l = &mut self.lines[line];
            let idx = byte_index(l, col);
            l.remove(idx);
            true
        } else if line + 1 < self.lines.len() {
            let next = self.lines.remove(line + 1);
            self.lines[line].push_str(&next);
            true
        } else {
            false
        }
    }

    /// Delete before (line, col), returning the new cursor position
    pub fn backspace(&mut self, line: usize, col: usize) -> (usize, usize) {
        if col > 0 {
            self.delete_char(line, col - 1);
            (line, col - 1)
        } else if line > 0 {
            let current = self.lines.remove(line);
            let prev_len = self.line_len(line - 1);
            self.lines[line - 1].push_str(&current);
            (line - 1, prev_len)
        } else {
            (line, col)
        }
    }

    pub fn insert_newline(&mut self, line: usize, col: usize) -> (usize, usize) {
        if let Some(l) = self.lines.get_mut(line) {
            let idx = byte_index(l, col);
            let rest = l.split_off(idx);
            self.lines.insert(line + 1, rest);
        }
        (line + 1, 0)
    }

    /// Remove a line and return it; the buffer always keeps at least one line
    pub fn remove_line(&mut self, line: usize) -> Option<String> {
        if line >= self.lines.len() {
            return None;
        }
        if self.lines.len() == 1 {
            return Some(std::mem::take(&mut self.lines[0]));
        }
        Some(self.lines.remove(line))
    }

    pub fn insert_line(&mut self, line: usize, text: String) {
        let at = line.min(self.lines.len());
        self.lines.insert(at, text);
    }

    pub fn to_string(&self) -> String {
        self.lines.join("\n")
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// What an input event did to the text box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditResult {
    /// Content changed (the document is now modified)
    Changed,
    /// Only the cursor moved
    Moved,
    /// Event not handled by the text box
    Ignored,
}

/// The editable text area
pub struct TextBox {
    pub buffer: TextBuffer,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub scroll_row: usize,
    pub scroll_col: usize,
    /// Last visible height, used for page up/down
    page_size: usize,
}

impl TextBox {
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor_line: 0,
            cursor_col: 0,
            scroll_row: 0,
            scroll_col: 0,
            page_size: 20,
        }
    }

    /// Replace the content and reset the view
    pub fn load(&mut self, content: &str) {
        self.buffer = TextBuffer::from_string(content);
        self.reset_view();
    }

    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.cursor_line = 0;
        self.cursor_col = 0;
        self.scroll_row = 0;
        self.scroll_col = 0;
    }

    fn clamp_cursor(&mut self) {
        self.cursor_line = self.cursor_line.min(self.buffer.line_count().saturating_sub(1));
        self.cursor_col = self.cursor_col.min(self.buffer.line_len(self.cursor_line));
    }

    /// Insert text at the cursor (newlines split lines)
    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                let (line, col) = self.buffer.insert_newline(self.cursor_line, self.cursor_col);
                self.cursor_line = line;
                self.cursor_col = col;
            } else if ch != '\r' {
                self.buffer.insert_char(self.cursor_line, self.cursor_col, ch);
                self.cursor_col += 1;
            }
        }
    }

    /// Remove the cursor line, returning its text with a trailing newline
    pub fn cut_line(&mut self) -> String {
        let mut text = self.buffer.remove_line(self.cursor_line).unwrap_or_default();
        text.push('\n');
        self.cursor_col = 0;
        self.clamp_cursor();
        text
    }

    /// Insert cut lines above the cursor line
    pub fn paste_lines(&mut self, text: &str) {
        let text = text.strip_suffix('\n').unwrap_or(text);
        for (i, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            self.buffer.insert_line(self.cursor_line + i, line.to_string());
        }
        self.cursor_line += text.split('\n').count();
        self.cursor_col = 0;
        self.clamp_cursor();
    }

    /// Apply an editing or navigation key
    pub fn handle_event(&mut self, event: &InputEvent) -> EditResult {
        match event {
            InputEvent::Char(c) => {
                self.buffer.insert_char(self.cursor_line, self.cursor_col, *c);
                self.cursor_col += 1;
                EditResult::Changed
            }
            InputEvent::Tab => {
                self.insert_text("    ");
                EditResult::Changed
            }
            InputEvent::Enter => {
                let (line, col) = self.buffer.insert_newline(self.cursor_line, self.cursor_col);
                self.cursor_line = line;
                self.cursor_col = col;
                EditResult::Changed
            }
            InputEvent::Backspace => {
                if self.cursor_line == 0 && self.cursor_col == 0 {
                    return EditResult::Ignored;
                }
                let (line, col) = self.buffer.backspace(self.cursor_line, self.cursor_col);
                self.cursor_line = line;
                self.cursor_col = col;
                EditResult::Changed
            }
            InputEvent::Delete => {
                if self.buffer.delete_char(self.cursor_line, self.cursor_col) {
                    EditResult::Changed
                } else {
                    EditResult::Ignored
                }
            }
            InputEvent::CursorUp => {
                self.cursor_line = self.cursor_line.saturating_sub(1);
                self.clamp_cursor();
                EditResult::Moved
            }
            InputEvent::CursorDown => {
                self.cursor_line += 1;
                self.clamp_cursor();
                EditResult::Moved
            }
            InputEvent::CursorLeft => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_line > 0 {
                    self.cursor_line -= 1;
                    self.cursor_col = self.buffer.line_len(self.cursor_line);
                }
                EditResult::Moved
            }
            InputEvent::CursorRight => {
                if self.cursor_col < self.buffer.line_len(self.cursor_line) {
                    self.cursor_col += 1;
                } else if self.cursor_line + 1 < self.buffer.line_count() {
                    self.cursor_line += 1;
                    self.cursor_col = 0;
                }
                EditResult::Moved
            }
            InputEvent::Home => {
                self.cursor_col = 0;
                EditResult::Moved
            }
            InputEvent::End => {
                self.cursor_col = self.buffer.line_len(self.cursor_line);
                EditResult::Moved
            }
            InputEvent::PageUp => {
                self.cursor_line = self.cursor_line.saturating_sub(self.page_size);
                self.clamp_cursor();
                EditResult::Moved
            }
            InputEvent::PageDown => {
                self.cursor_line += self.page_size;
                self.clamp_cursor();
                EditResult::Moved
            }
            InputEvent::CtrlHome => {
                self.reset_view();
                EditResult::Moved
            }
            InputEvent::CtrlEnd => {
                self.cursor_line = self.buffer.line_count().saturating_sub(1);
                self.cursor_col = self.buffer.line_len(self.cursor_line);
                EditResult::Moved
            }
            _ => EditResult::Ignored,
        }
    }

    /// Adjust scroll position to keep cursor visible
    pub fn ensure_cursor_visible(&mut self, visible_lines: usize, visible_cols: usize) {
        if visible_lines == 0 || visible_cols == 0 {
            return;
        }
        self.page_size = visible_lines.saturating_sub(1).max(1);

        if self.cursor_line < self.scroll_row {
            self.scroll_row = self.cursor_line;
        } else if self.cursor_line >= self.scroll_row + visible_lines {
            self.scroll_row = self.cursor_line - visible_lines + 1;
        }

        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.cursor_col >= self.scroll_col + visible_cols {
            self.scroll_col = self.cursor_col - visible_cols + 1;
        }
    }

    /// Draw the text area with a border and centered title (1-based coordinates)
    pub fn draw(&mut self, screen: &mut Screen, row: u16, col: u16, width: u16, height: u16, title: &str) {
        screen.draw_box(row, col, width, height, Color::White, Color::Blue);

        let title = format!(" {} ", title);
        let title_len = title.chars().count() as u16;
        let title_x = col + width.saturating_sub(title_len) / 2;
        screen.write_str(row, title_x, &title, Color::Blue, Color::White);

        let content_row = row + 1;
        let content_col = col + 1;
        let content_width = width.saturating_sub(2);
        let content_height = height.saturating_sub(2);
        self.ensure_cursor_visible(content_height as usize, content_width as usize);

        for r in 0..content_height as usize {
            if let Some(line) = self.buffer.line(self.scroll_row + r) {
                let visible: String = line
                    .chars()
                    .skip(self.scroll_col)
                    .take(content_width as usize)
                    .collect();
                screen.write_str(content_row + r as u16, content_col, &visible, Color::LightGray, Color::Blue);
            }
        }

        // Nothing to place the cursor in when the terminal is this small
        if content_height == 0 || content_width == 0 {
            screen.set_cursor_visible(false);
            return;
        }

        let cursor_row = content_row + self.cursor_line.saturating_sub(self.scroll_row) as u16;
        let cursor_col = content_col + self.cursor_col.saturating_sub(self.scroll_col) as u16;
        screen.set_cursor(cursor_row, cursor_col);
        screen.set_cursor_visible(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextBox {
        let mut tb = TextBox::new();
        for c in text.chars() {
            let event = if c == '\n' { InputEvent::Enter } else { InputEvent::Char(c) };
            assert_eq!(tb.handle_event(&event), EditResult::Changed);
        }
        tb
    }

    #[test]
    fn test_typing_builds_content() {
        let tb = typed("hello\nworld");
        assert_eq!(tb.content(), "hello\nworld");
        assert_eq!((tb.cursor_line, tb.cursor_col), (1, 5));
    }

    #[test]
    fn test_load_round_trips_trailing_newline() {
        let mut tb = TextBox::new();
        tb.load("one\r\ntwo\n");
        assert_eq!(tb.buffer.lines, vec!["one", "two", ""]);
        assert_eq!(tb.content(), "one\ntwo\n");
        assert_eq!((tb.cursor_line, tb.cursor_col), (0, 0));
    }

    #[test]
    fn test_navigation_is_not_a_change() {
        let mut tb = typed("ab\ncd");
        assert_eq!(tb.handle_event(&InputEvent::CursorUp), EditResult::Moved);
        assert_eq!(tb.handle_event(&InputEvent::Home), EditResult::Moved);
        assert_eq!(tb.handle_event(&InputEvent::CursorLeft), EditResult::Moved);
        assert_eq!((tb.cursor_line, tb.cursor_col), (0, 0));
        assert_eq!(tb.handle_event(&InputEvent::Backspace), EditResult::Ignored);
        assert_eq!(tb.handle_event(&InputEvent::F12), EditResult::Ignored);
    }

    #[test]
    fn test_backspace_and_delete_join_lines() {
        let mut tb = typed("ab\ncd");
        tb.handle_event(&InputEvent::Home);
        assert_eq!(tb.handle_event(&InputEvent::Backspace), EditResult::Changed);
        assert_eq!(tb.content(), "abcd");
        assert_eq!((tb.cursor_line, tb.cursor_col), (0, 2));

        tb.handle_event(&InputEvent::Enter);
        tb.handle_event(&InputEvent::CursorUp);
        tb.handle_event(&InputEvent::End);
        assert_eq!(tb.handle_event(&InputEvent::Delete), EditResult::Changed);
        assert_eq!(tb.content(), "abcd");
        tb.handle_event(&InputEvent::CtrlEnd);
        assert_eq!(tb.handle_event(&InputEvent::Delete), EditResult::Ignored);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut tb = typed("héllo");
        tb.handle_event(&InputEvent::CursorLeft);
        tb.handle_event(&InputEvent::Backspace);
        assert_eq!(tb.content(), "hélo");
        tb.handle_event(&InputEvent::Home);
        tb.handle_event(&InputEvent::CursorRight);
        tb.handle_event(&InputEvent::Delete);
        assert_eq!(tb.content(), "hlo");
    }

    #[test]
    fn test_cut_and_paste_line() {
        let mut tb = TextBox::new();
        tb.load("first\nsecond\nthird");
        tb.handle_event(&InputEvent::CursorDown);
        let cut = tb.cut_line();
        assert_eq!(cut, "second\n");
        assert_eq!(tb.content(), "first\nthird");

        tb.handle_event(&InputEvent::CtrlHome);
        tb.paste_lines(&cut);
        assert_eq!(tb.content(), "second\nfirst\nthird");
        assert_eq!(tb.cursor_line, 1);
    }

    #[test]
    fn test_cut_last_line_keeps_one_line() {
        let mut tb = TextBox::new();
        tb.load("only");
        assert_eq!(tb.cut_line(), "only\n");
        assert_eq!(tb.buffer.line_count(), 1);
        assert_eq!(tb.content(), "");
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut tb = TextBox::new();
        tb.load(&"line\n".repeat(50));
        tb.handle_event(&InputEvent::CtrlEnd);
        tb.ensure_cursor_visible(10, 40);
        assert_eq!(tb.scroll_row, 41);
        tb.handle_event(&InputEvent::CtrlHome);
        tb.ensure_cursor_visible(10, 40);
        assert_eq!(tb.scroll_row, 0);
    }

    #[test]
    fn test_draw_on_tiny_terminal_after_scrolling() {
        let mut tb = TextBox::new();
        tb.load(&"line\n".repeat(50));
        tb.handle_event(&InputEvent::CtrlEnd);
        tb.ensure_cursor_visible(10, 40);
        for _ in 0..45 {
            tb.handle_event(&InputEvent::CursorUp);
        }
        assert_eq!(tb.cursor_line, 5);

        let mut screen = Screen::new(20, 2);
        tb.draw(&mut screen, 1, 1, 20, 2, "t");
        assert_eq!(tb.scroll_row, 41);

        let mut screen = Screen::new(20, 5);
        tb.draw(&mut screen, 1, 1, 20, 5, "t");
        assert_eq!(tb.scroll_row, 5);
    }
}
