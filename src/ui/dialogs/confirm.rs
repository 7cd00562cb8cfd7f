//! Confirm dialog.

use docstate::ConfirmChoice;

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Color;

use super::{buttons_width, draw_buttons, draw_frame, wrap_lines, ModalDialog, ModalResult};

pub struct ConfirmDialog {
    title: String,
    text: String,
    choices: Vec<ConfirmChoice>,
    focused: usize,
}

impl ConfirmDialog {
    /// Yes / No / Cancel question, used for the save prompt
    pub fn yes_no_cancel(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_choices(title, text, vec![ConfirmChoice::Yes, ConfirmChoice::No, ConfirmChoice::Cancel])
    }

    /// Yes / No question, used for the overwrite prompt
    pub fn yes_no(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_choices(title, text, vec![ConfirmChoice::Yes, ConfirmChoice::No])
    }

    fn with_choices(title: impl Into<String>, text: impl Into<String>, choices: Vec<ConfirmChoice>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            choices,
            focused: 0,
        }
    }

    fn label(choice: ConfirmChoice) -> &'static str {
        match choice {
            ConfirmChoice::Yes => "Yes",
            ConfirmChoice::No => "No",
            ConfirmChoice::Cancel => "Cancel",
        }
    }

    /// Escape cancels when Cancel is offered, otherwise it answers No
    fn escape_choice(&self) -> ConfirmChoice {
        if self.choices.contains(&ConfirmChoice::Cancel) {
            ConfirmChoice::Cancel
        } else {
            ConfirmChoice::No
        }
    }

    fn hotkey(&self, ch: char) -> Option<ConfirmChoice> {
        let ch = ch.to_ascii_lowercase();
        self.choices
            .iter()
            .copied()
            .find(|choice| Self::label(*choice).to_ascii_lowercase().starts_with(ch))
    }
}

impl ModalDialog for ConfirmDialog {
    type Output = ConfirmChoice;

    fn draw(&mut self, screen: &mut Screen) {
        let labels: Vec<&str> = self.choices.iter().map(|c| Self::label(*c)).collect();
        let (screen_w, _) = screen.size();
        let max_text = screen_w.saturating_sub(8) as usize;
        let lines = wrap_lines(&self.text, max_text);

        let text_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let width = text_width
            .max(buttons_width(&labels))
            .max(self.title.chars().count() as u16 + 2)
            + 6;
        let height = lines.len() as u16 + 5;

        let (row, col) = draw_frame(screen, &self.title, width, height);
        for (idx, line) in lines.iter().enumerate() {
            screen.write_str(row + 2 + idx as u16, col + 3, line, Color::Black, Color::LightGray);
        }
        draw_buttons(screen, row + height - 2, col, width, &labels, Some(self.focused));
        screen.set_cursor_visible(false);
    }

    fn handle_event(&mut self, event: &InputEvent) -> ModalResult<ConfirmChoice> {
        match event {
            InputEvent::Enter => ModalResult::Close(self.choices[self.focused]),
            InputEvent::Escape => ModalResult::Close(self.escape_choice()),
            InputEvent::Tab | InputEvent::CursorRight => {
                self.focused = (self.focused + 1) % self.choices.len();
                ModalResult::Continue
            }
            InputEvent::ShiftTab | InputEvent::CursorLeft => {
                self.focused = (self.focused + self.choices.len() - 1) % self.choices.len();
                ModalResult::Continue
            }
            InputEvent::Char(ch) => match self.hotkey(*ch) {
                Some(choice) => ModalResult::Close(choice),
                None => ModalResult::Continue,
            },
            _ => ModalResult::Continue,
        }
    }

    fn title(&self) -> &str {
        &self.title
    }
}
