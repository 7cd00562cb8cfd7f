//! Message dialog.

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Color;

use super::{buttons_width, draw_buttons, draw_frame, wrap_lines, ModalDialog, ModalResult};

pub struct MessageDialog {
    title: String,
    text: String,
}

impl MessageDialog {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

impl ModalDialog for MessageDialog {
    type Output = ();

    fn draw(&mut self, screen: &mut Screen) {
        let (screen_w, _) = screen.size();
        let lines = wrap_lines(&self.text, screen_w.saturating_sub(8) as usize);
        let text_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let width = text_width.max(buttons_width(&["OK"])).max(self.title.chars().count() as u16 + 2) + 6;
        let height = lines.len() as u16 + 5;

        let (row, col) = draw_frame(screen, &self.title, width, height);
        for (idx, line) in lines.iter().enumerate() {
            screen.write_str(row + 2 + idx as u16, col + 3, line, Color::Black, Color::LightGray);
        }
        draw_buttons(screen, row + height - 2, col, width, &["OK"], Some(0));
        screen.set_cursor_visible(false);
    }

    fn handle_event(&mut self, event: &InputEvent) -> ModalResult<()> {
        match event {
            InputEvent::Enter | InputEvent::Escape | InputEvent::Char(' ') => ModalResult::Close(()),
            _ => ModalResult::Continue,
        }
    }

    fn title(&self) -> &str {
        &self.title
    }
}
