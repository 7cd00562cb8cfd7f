//! Main application module

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use docstate::{ControllerConfig, DocumentController, HostContext};
use log::{debug, info};

use crate::host::{self, PadHandler, TerminalDialogs};
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::{Color, Terminal};
use crate::ui::{EditResult, StatusBar, TextBox};

/// Main application
pub struct App {
    terminal: Terminal,
    screen: Screen,
    controller: DocumentController,
    textbox: TextBox,
    /// Window title, kept current by the file handler
    title: String,
    clipboard: Option<arboard::Clipboard>,
    /// Last cut line, used when the system clipboard is unavailable
    cut_buffer: String,
    running: bool,
}

impl App {
    pub fn new(config: ControllerConfig) -> anyhow::Result<Self> {
        let terminal = Terminal::new()?;
        let (width, height) = terminal.size();

        Ok(Self {
            terminal,
            screen: Screen::new(width, height),
            controller: DocumentController::with_config(config),
            textbox: TextBox::new(),
            title: host::window_title(docstate::document::UNTITLED),
            clipboard: arboard::Clipboard::new().ok(),
            cut_buffer: String::new(),
            running: true,
        })
    }

    /// Run the controller with this app's dialogs and file handler
    fn with_host<R>(&mut self, f: impl FnOnce(&mut DocumentController, &mut HostContext<'_>) -> R) -> R {
        // Dialogs overlay the latest frame
        self.draw();
        let mut dialogs = TerminalDialogs::new(&mut self.terminal, &mut self.screen);
        let mut handler = PadHandler::new(&mut self.textbox, &mut self.title);
        let mut host = HostContext::new(&mut dialogs, &mut handler);
        f(&mut self.controller, &mut host)
    }

    pub fn run(&mut self, file: Option<PathBuf>) -> anyhow::Result<()> {
        let outcome = self.with_host(|controller, host| controller.new_document(host));
        debug!("startup new document: {:?}", outcome);

        if let Some(path) = file {
            let outcome = self.with_host(|controller, host| controller.open_path(host, &path))?;
            debug!("startup open {}: {:?}", path.display(), outcome);
        }

        while self.running {
            self.terminal.update_size();
            let (width, height) = self.terminal.size();
            if (width, height) != self.screen.size() {
                self.screen.resize(width, height);
                self.screen.invalidate();
            }

            self.draw();
            self.screen.flush(&mut self.terminal)?;

            // Handle all pending input before the next draw
            let keys = self.terminal.read_keys()?;
            if keys.is_empty() {
                thread::sleep(Duration::from_millis(10));
                continue;
            }
            for key in keys {
                self.handle_event(InputEvent::from(key));
                if !self.running {
                    break;
                }
            }
        }

        info!("exiting");
        Ok(())
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CtrlN => {
                let outcome = self.with_host(|controller, host| controller.new_document(host));
                debug!("new: {:?}", outcome);
            }
            InputEvent::CtrlO => {
                let outcome = self.with_host(|controller, host| controller.open(host));
                debug!("open: {:?}", outcome);
            }
            InputEvent::CtrlS => {
                let outcome = self.with_host(|controller, host| controller.save(host));
                debug!("save: {:?}", outcome);
            }
            InputEvent::F12 => {
                let outcome = self.with_host(|controller, host| controller.save_as(host));
                debug!("save as: {:?}", outcome);
            }
            InputEvent::CtrlQ | InputEvent::AltX => {
                let outcome = self.with_host(|controller, host| controller.prompt_save_if_modified(host));
                if outcome.is_success() {
                    self.running = false;
                } else {
                    debug!("quit abandoned: {:?}", outcome);
                }
            }
            InputEvent::CtrlK => self.cut_line(),
            InputEvent::CtrlU => self.paste_line(),
            other => {
                if self.textbox.handle_event(&other) == EditResult::Changed {
                    self.controller.set_modified(true);
                }
            }
        }
    }

    fn cut_line(&mut self) {
        let buffer = &self.textbox.buffer;
        if buffer.line_count() == 1 && buffer.line_len(0) == 0 {
            return;
        }

        let text = self.textbox.cut_line();
        self.controller.set_modified(true);
        if let Some(ref mut clipboard) = self.clipboard {
            if let Err(err) = clipboard.set_text(&text) {
                debug!("clipboard unavailable: {}", err);
            }
        }
        self.cut_buffer = text;
    }

    fn paste_line(&mut self) {
        let text = match self.clipboard {
            Some(ref mut clipboard) => clipboard.get_text().unwrap_or_else(|_| self.cut_buffer.clone()),
            None => self.cut_buffer.clone(),
        };
        if text.is_empty() {
            return;
        }

        self.textbox.paste_lines(&text);
        self.controller.set_modified(true);
    }

    fn draw(&mut self) {
        let (width, height) = self.screen.size();
        self.screen.clear_with(Color::LightGray, Color::Blue);

        self.textbox.draw(&mut self.screen, 1, 1, width, height.saturating_sub(1), &self.title);
        StatusBar::draw(
            &mut self.screen,
            height,
            width,
            self.controller.is_modified(),
            self.textbox.cursor_line,
            self.textbox.cursor_col,
        );
    }
}
