//! docpad's side of the document protocol
//!
//! `TerminalDialogs` shows the controller's dialogs as nested modal loops
//! over the current screen. `PadHandler` moves text between the editor and
//! the file system.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use docstate::{
    ConfirmChoice, DialogHost, FileChanged, FileHandler, FileRequest, FileResponse, OpenFileRequest, SaveFileRequest,
};
use log::{debug, warn};

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Terminal;
use crate::ui::dialogs::{ConfirmDialog, FileDialog, MessageDialog, ModalDialog, ModalResult};
use crate::ui::TextBox;

pub const APP_NAME: &str = "docpad";

/// Window title for a document
pub fn window_title(file_title: &str) -> String {
    format!("{} - {}", file_title, APP_NAME)
}

/// Modal dialogs drawn on the terminal
pub struct TerminalDialogs<'a> {
    terminal: &'a mut Terminal,
    screen: &'a mut Screen,
}

impl<'a> TerminalDialogs<'a> {
    pub fn new(terminal: &'a mut Terminal, screen: &'a mut Screen) -> Self {
        Self { terminal, screen }
    }

    /// Run a dialog until it closes. `None` means the terminal failed.
    fn run<D: ModalDialog>(&mut self, dialog: &mut D) -> Option<D::Output> {
        debug!("showing dialog '{}'", dialog.title());
        let background = self.screen.snapshot();

        let result = loop {
            self.screen.restore(&background);
            dialog.draw(self.screen);
            if let Err(err) = self.screen.flush(self.terminal) {
                warn!("dialog '{}' failed to draw: {}", dialog.title(), err);
                break None;
            }

            match self.terminal.read_keys() {
                Ok(keys) if keys.is_empty() => thread::sleep(Duration::from_millis(10)),
                Ok(keys) => {
                    let closed = keys.into_iter().find_map(|key| match dialog.handle_event(&InputEvent::from(key)) {
                        ModalResult::Close(value) => Some(value),
                        ModalResult::Continue => None,
                    });
                    if let Some(value) = closed {
                        break Some(value);
                    }
                }
                Err(err) => {
                    warn!("dialog '{}' failed to read input: {}", dialog.title(), err);
                    break None;
                }
            }
        };

        self.screen.restore(&background);
        result
    }
}

impl DialogHost for TerminalDialogs<'_> {
    fn open_file(&mut self, request: &OpenFileRequest) -> Option<PathBuf> {
        let mut dialog = FileDialog::open(request);
        self.run(&mut dialog).flatten()
    }

    fn save_file(&mut self, request: &SaveFileRequest) -> Option<PathBuf> {
        let background = self.screen.snapshot();
        let mut dialog = FileDialog::save(request);

        let chosen = loop {
            self.screen.restore(&background);
            let Some(path) = self.run(&mut dialog).flatten() else {
                break None;
            };
            if !dialog.confirms_overwrite(&path) {
                break Some(path);
            }

            // Ask on top of the file dialog
            dialog.draw(self.screen);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let mut confirm = ConfirmDialog::yes_no("Confirm Save As", format!("{} already exists.\nReplace it?", name));
            if self.run(&mut confirm) == Some(ConfirmChoice::Yes) {
                break Some(path);
            }
        };

        self.screen.restore(&background);
        chosen
    }

    fn confirm(&mut self, message: &str, title: &str) -> ConfirmChoice {
        let mut dialog = ConfirmDialog::yes_no_cancel(title, message);
        self.run(&mut dialog).unwrap_or(ConfirmChoice::Cancel)
    }

    fn show_error(&mut self, message: &str, title: &str) {
        let mut dialog = MessageDialog::new(title, message);
        self.run(&mut dialog);
    }
}

/// Loads and saves the editor's text
pub struct PadHandler<'a> {
    textbox: &'a mut TextBox,
    title: &'a mut String,
}

impl<'a> PadHandler<'a> {
    pub fn new(textbox: &'a mut TextBox, title: &'a mut String) -> Self {
        Self { textbox, title }
    }
}

impl FileHandler for PadHandler<'_> {
    fn on_new(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        self.textbox.clear();
        Ok(request.accept())
    }

    fn on_open(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        let path = request.file_path().context("no file name to open")?;
        let text = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
        self.textbox.load(&text);
        Ok(request.accept())
    }

    fn on_save(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        let path = request.file_path().context("no file name to save to")?;
        fs::write(path, self.textbox.content()).with_context(|| format!("cannot write {}", path.display()))?;
        Ok(request.accept())
    }

    fn on_file_changed(&mut self, event: &FileChanged) {
        *self.title = window_title(&event.file_title);
    }
}
