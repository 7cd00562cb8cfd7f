//! Modal dialog system
//!
//! Modal dialogs capture all input events while open. The host loop
//! doesn't need to know which dialog is showing: it draws it, routes
//! events to it and stops once the dialog closes with a value.

mod confirm;
mod file_dialog;
mod message;

pub use confirm::ConfirmDialog;
pub use file_dialog::FileDialog;
pub use message::MessageDialog;

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Color;

/// Result of handling an event in a modal dialog
#[derive(Debug, PartialEq, Eq)]
pub enum ModalResult<T> {
    /// Event handled, keep dialog open
    Continue,
    /// Close dialog with a typed result
    Close(T),
}

/// A modal dialog that captures all events when open
pub trait ModalDialog {
    type Output;

    /// Draw the dialog centered on the screen
    fn draw(&mut self, screen: &mut Screen);

    /// Handle an input event
    fn handle_event(&mut self, event: &InputEvent) -> ModalResult<Self::Output>;

    /// Get the dialog title (for logging)
    fn title(&self) -> &str;
}

const DIALOG_FG: Color = Color::Black;
const DIALOG_BG: Color = Color::LightGray;

/// Draw a centered dialog frame with shadow, returning its top-left corner
pub(crate) fn draw_frame(screen: &mut Screen, title: &str, width: u16, height: u16) -> (u16, u16) {
    let (screen_w, screen_h) = screen.size();
    let width = width.min(screen_w.saturating_sub(2)).max(4);
    let height = height.min(screen_h.saturating_sub(1)).max(3);
    let row = (screen_h.saturating_sub(height)) / 2 + 1;
    let col = (screen_w.saturating_sub(width)) / 2 + 1;

    screen.draw_box(row, col, width, height, DIALOG_FG, DIALOG_BG);
    screen.draw_shadow(row, col, width, height);

    if !title.is_empty() {
        let text = format!(" {} ", title);
        let len = text.chars().count() as u16;
        let title_col = col + width.saturating_sub(len) / 2;
        screen.write_str(row, title_col, &text, DIALOG_FG, DIALOG_BG);
    }

    (row, col)
}

/// Display width of a row of `< label >` buttons separated by two spaces
pub(crate) fn buttons_width(labels: &[&str]) -> u16 {
    let inner: usize = labels.iter().map(|l| l.chars().count() + 4).sum();
    (inner + labels.len().saturating_sub(1) * 2) as u16
}

/// Draw a centered row of buttons, highlighting the focused one
pub(crate) fn draw_buttons(screen: &mut Screen, row: u16, col: u16, width: u16, labels: &[&str], focused: Option<usize>) {
    let mut x = col + width.saturating_sub(buttons_width(labels)) / 2;
    for (idx, label) in labels.iter().enumerate() {
        let text = format!("< {} >", label);
        let (fg, bg) = if focused == Some(idx) {
            (Color::White, Color::Black)
        } else {
            (DIALOG_FG, DIALOG_BG)
        };
        screen.write_str(row, x, &text, fg, bg);
        x += text.chars().count() as u16 + 2;
    }
}

/// Message lines, split on newlines and clipped to the dialog width
pub(crate) fn wrap_lines(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .map(|line| line.chars().take(max_width).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_centered() {
        let mut screen = Screen::new(40, 20);
        let (row, col) = draw_frame(&mut screen, "Error", 20, 6);
        assert_eq!((row, col), (8, 11));
        assert_eq!(screen.get(row, col).map(|c| c.ch), Some('┌'));
        assert_eq!(screen.get(row, col + 6).map(|c| c.ch), Some(' '));
        assert_eq!(screen.get(row, col + 7).map(|c| c.ch), Some('E'));
    }

    #[test]
    fn test_frame_clips_to_small_screen() {
        let mut screen = Screen::new(10, 5);
        let (row, col) = draw_frame(&mut screen, "", 60, 18);
        assert_eq!((row, col), (1, 2));
        assert_eq!(screen.get(4, 9).map(|c| c.ch), Some('┘'));
    }

    #[test]
    fn test_buttons_width() {
        assert_eq!(buttons_width(&["OK"]), 6);
        assert_eq!(buttons_width(&["Yes", "No", "Cancel"]), 7 + 6 + 10 + 4);
    }
}
