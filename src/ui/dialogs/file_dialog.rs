//! File Open/Save dialog
//!
//! A file name field over a listing of the current directory. The listing
//! shows subdirectories first, then the files matching the selected filter.
//! The arrow keys on the "Type:" row step through the parsed filters.

use std::path::{Path, PathBuf};

use docstate::dialog::with_default_ext;
use docstate::filter::parse_filter;
use docstate::{FileFilter, OpenFileRequest, SaveFileRequest};
use log::warn;

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Color;
use crate::ui::textfield::{FieldResult, TextField};

use super::{draw_buttons, draw_frame, ModalDialog, ModalResult};

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 18;

/// Whether dialog is for opening or saving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialogMode {
    Open,
    Save,
}

/// Which part of the dialog has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Filename,
    Filter,
    List,
    OkButton,
    CancelButton,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Filename => Self::Filter,
            Self::Filter => Self::List,
            Self::List => Self::OkButton,
            Self::OkButton => Self::CancelButton,
            Self::CancelButton => Self::Filename,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Filename => Self::CancelButton,
            Self::Filter => Self::Filename,
            Self::List => Self::Filter,
            Self::OkButton => Self::List,
            Self::CancelButton => Self::OkButton,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Parent,
    Dir(String),
    File(String),
}

impl Entry {
    fn label(&self) -> String {
        match self {
            Entry::Parent => "..".to_string(),
            Entry::Dir(name) => format!("[{}]", name),
            Entry::File(name) => name.clone(),
        }
    }
}

/// File Open/Save dialog
pub struct FileDialog {
    title: String,
    mode: FileDialogMode,
    default_ext: String,
    /// Empty when every file is listed
    filters: Vec<FileFilter>,
    filter_index: usize,
    check_file_exists: bool,
    overwrite_prompt: bool,
    /// Directory being listed
    current_path: PathBuf,
    filename: TextField,
    entries: Vec<Entry>,
    selected: usize,
    list_top: usize,
    /// Visible list rows, updated on every draw
    list_rows: usize,
    focus: Focus,
    /// Validation message shown above the buttons
    error: Option<String>,
}

impl FileDialog {
    pub fn open(request: &OpenFileRequest) -> Self {
        let mut dialog = Self::new_with_mode("Open", FileDialogMode::Open, &request.default_ext, &request.filter, request.file_name.as_deref());
        dialog.check_file_exists = request.check_file_exists;
        dialog
    }

    pub fn save(request: &SaveFileRequest) -> Self {
        let mut dialog = Self::new_with_mode("Save As", FileDialogMode::Save, &request.default_ext, &request.filter, request.file_name.as_deref());
        dialog.overwrite_prompt = request.overwrite_prompt;
        dialog
    }

    fn new_with_mode(title: &str, mode: FileDialogMode, default_ext: &str, filter: &str, initial: Option<&Path>) -> Self {
        let filters = parse_filter(filter).unwrap_or_else(|err| {
            warn!("ignoring file filter: {}", err);
            Vec::new()
        });

        let mut current_path = std::env::current_dir().unwrap_or_default();
        let mut name = String::new();
        if let Some(initial) = initial {
            match initial.parent() {
                Some(parent) if parent.is_dir() => current_path = parent.to_path_buf(),
                Some(parent) if !parent.as_os_str().is_empty() => {
                    warn!("initial directory {} is missing", parent.display());
                }
                _ => {}
            }
            if let Some(file) = initial.file_name() {
                name = file.to_string_lossy().into_owned();
            }
        }

        let mut filename = TextField::new().with_text(name);
        filename.set_focus(true);

        let mut dialog = Self {
            title: title.to_string(),
            mode,
            default_ext: default_ext.to_string(),
            filters,
            filter_index: 0,
            check_file_exists: false,
            overwrite_prompt: false,
            current_path,
            filename,
            entries: Vec::new(),
            selected: 0,
            list_top: 0,
            list_rows: 7,
            focus: Focus::Filename,
            error: None,
        };
        dialog.refresh_list();
        dialog
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// True when `path` is about to be replaced and the user should be asked
    pub fn confirms_overwrite(&self, path: &Path) -> bool {
        self.mode == FileDialogMode::Save && self.overwrite_prompt && path.exists()
    }

    fn filter(&self) -> Option<&FileFilter> {
        self.filters.get(self.filter_index)
    }

    /// Step to the next or previous filter and re-list
    fn cycle_filter(&mut self, forward: bool) {
        let count = self.filters.len();
        if count < 2 {
            return;
        }
        self.filter_index = if forward {
            (self.filter_index + 1) % count
        } else {
            (self.filter_index + count - 1) % count
        };
        self.refresh_list();
    }

    /// Re-read the directory listing
    pub fn refresh_list(&mut self) {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        match std::fs::read_dir(&self.current_path) {
            Ok(entries) => {
                for entry in entries.filter_map(|e| e.ok()) {
                    let Ok(name) = entry.file_name().into_string() else {
                        continue;
                    };
                    if entry.path().is_dir() {
                        dirs.push(name);
                    } else if self.filter().map_or(true, |f| f.matches(&name)) {
                        files.push(name);
                    }
                }
            }
            Err(err) => warn!("cannot list {}: {}", self.current_path.display(), err),
        }

        dirs.sort_by_key(|name| name.to_lowercase());
        files.sort_by_key(|name| name.to_lowercase());

        self.entries.clear();
        if self.current_path.parent().is_some() {
            self.entries.push(Entry::Parent);
        }
        self.entries.extend(dirs.into_iter().map(Entry::Dir));
        self.entries.extend(files.into_iter().map(Entry::File));
        self.selected = 0;
        self.list_top = 0;
    }

    fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.current_path = path;
            self.refresh_list();
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.filename.set_focus(focus == Focus::Filename);
    }

    fn field_width() -> usize {
        (DIALOG_WIDTH - 16) as usize
    }

    /// Resolve the typed name against the listed directory
    fn accept(&mut self) -> ModalResult<Option<PathBuf>> {
        let text = self.filename.text().trim().to_string();
        if text.is_empty() {
            return ModalResult::Continue;
        }

        let typed = self.current_path.join(&text);
        if typed.is_dir() {
            self.navigate_to(typed);
            self.filename.set_text("");
            self.error = None;
            return ModalResult::Continue;
        }

        let path = match self.mode {
            FileDialogMode::Open if typed.exists() => typed,
            _ => with_default_ext(&typed, &self.default_ext),
        };

        if self.mode == FileDialogMode::Open && self.check_file_exists && !path.is_file() {
            self.error = Some(format!("File not found: {}", text));
            return ModalResult::Continue;
        }

        ModalResult::Close(Some(path))
    }

    fn select(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = index.min(self.entries.len() - 1);
        if self.selected < self.list_top {
            self.list_top = self.selected;
        } else if self.selected >= self.list_top + self.list_rows {
            self.list_top = self.selected + 1 - self.list_rows;
        }
        if let Some(Entry::File(name)) = self.entries.get(self.selected) {
            let name = name.clone();
            self.filename.set_text(name);
        }
    }

    fn handle_list_event(&mut self, event: &InputEvent) -> ModalResult<Option<PathBuf>> {
        let page = self.list_rows.max(1);
        match event {
            InputEvent::CursorUp => self.select(self.selected.saturating_sub(1)),
            InputEvent::CursorDown => self.select(self.selected + 1),
            InputEvent::PageUp => self.select(self.selected.saturating_sub(page)),
            InputEvent::PageDown => self.select(self.selected + page),
            InputEvent::Home => self.select(0),
            InputEvent::End => self.select(self.entries.len().saturating_sub(1)),
            InputEvent::Enter => {
                return match self.entries.get(self.selected).cloned() {
                    Some(Entry::Parent) => {
                        if let Some(parent) = self.current_path.parent() {
                            let parent = parent.to_path_buf();
                            self.navigate_to(parent);
                        }
                        ModalResult::Continue
                    }
                    Some(Entry::Dir(name)) => {
                        let path = self.current_path.join(name);
                        self.navigate_to(path);
                        ModalResult::Continue
                    }
                    Some(Entry::File(name)) => {
                        self.filename.set_text(name);
                        self.accept()
                    }
                    None => ModalResult::Continue,
                };
            }
            _ => {}
        }
        ModalResult::Continue
    }
}

impl ModalDialog for FileDialog {
    type Output = Option<PathBuf>;

    fn draw(&mut self, screen: &mut Screen) {
        let (screen_w, screen_h) = screen.size();
        let width = DIALOG_WIDTH.min(screen_w.saturating_sub(2));
        let height = DIALOG_HEIGHT.min(screen_h.saturating_sub(1));
        let (row, col) = draw_frame(screen, &self.title, width, height);
        let (fg, bg) = (Color::Black, Color::LightGray);
        let inner = width.saturating_sub(4) as usize;

        screen.write_str(row + 2, col + 2, "File Name:", fg, bg);
        let field_width = width.saturating_sub(16);
        self.filename.draw(screen, row + 2, col + 13, field_width);

        let dir = format!("Directory: {}", self.current_path.display());
        screen.write_str(row + 3, col + 2, &dir.chars().take(inner).collect::<String>(), fg, bg);

        let kind = match self.filter() {
            Some(filter) => format!("Type: {}", filter.description),
            None => "Type: All Files".to_string(),
        };
        let (kfg, kbg) = if self.focus == Focus::Filter {
            (Color::LightGray, Color::Black)
        } else {
            (fg, bg)
        };
        screen.write_str(row + 4, col + 2, &kind.chars().take(inner).collect::<String>(), kfg, kbg);

        let list_height = height.saturating_sub(9);
        screen.draw_box(row + 5, col + 2, width.saturating_sub(4), list_height, fg, bg);
        self.list_rows = list_height.saturating_sub(2) as usize;
        let item_width = width.saturating_sub(6) as usize;
        for (i, entry) in self.entries.iter().enumerate().skip(self.list_top).take(self.list_rows) {
            let mut label: String = entry.label().chars().take(item_width).collect();
            while label.chars().count() < item_width {
                label.push(' ');
            }
            let (efg, ebg) = if i == self.selected && self.focus == Focus::List {
                (Color::LightGray, Color::Black)
            } else {
                (fg, bg)
            };
            let r = row + 6 + (i - self.list_top) as u16;
            screen.write_str(r, col + 3, &label, efg, ebg);
        }

        if let Some(error) = &self.error {
            screen.write_str(row + height.saturating_sub(4), col + 2, error, Color::Red, bg);
        }

        let focused_button = match self.focus {
            Focus::OkButton => Some(0),
            Focus::CancelButton => Some(1),
            _ => None,
        };
        draw_buttons(screen, row + height.saturating_sub(2), col, width, &["OK", "Cancel"], focused_button);

        if self.focus == Focus::Filename {
            let cursor = self.filename.cursor_pos().min(field_width.saturating_sub(1) as usize);
            screen.set_cursor(row + 2, col + 13 + cursor as u16);
            screen.set_cursor_visible(true);
        } else {
            screen.set_cursor_visible(false);
        }
    }

    fn handle_event(&mut self, event: &InputEvent) -> ModalResult<Option<PathBuf>> {
        match event {
            InputEvent::Escape => return ModalResult::Close(None),
            InputEvent::Tab => {
                self.set_focus(self.focus.next());
                return ModalResult::Continue;
            }
            InputEvent::ShiftTab => {
                self.set_focus(self.focus.prev());
                return ModalResult::Continue;
            }
            _ => {}
        }

        match self.focus {
            Focus::Filename => match self.filename.handle_event(event, Self::field_width()) {
                FieldResult::Submit => self.accept(),
                FieldResult::Changed => {
                    self.error = None;
                    ModalResult::Continue
                }
                FieldResult::Consumed | FieldResult::Ignored => ModalResult::Continue,
            },
            Focus::Filter => {
                match event {
                    InputEvent::CursorDown | InputEvent::CursorRight | InputEvent::Char(' ') => self.cycle_filter(true),
                    InputEvent::CursorUp | InputEvent::CursorLeft => self.cycle_filter(false),
                    InputEvent::Enter => return self.accept(),
                    _ => {}
                }
                ModalResult::Continue
            }
            Focus::List => self.handle_list_event(event),
            Focus::OkButton => match event {
                InputEvent::Enter => self.accept(),
                _ => ModalResult::Continue,
            },
            Focus::CancelButton => match event {
                InputEvent::Enter => ModalResult::Close(None),
                _ => ModalResult::Continue,
            },
        }
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "n").unwrap();
        fs::write(dir.path().join("data.dat"), "d").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        dir
    }

    fn open_request(file_name: PathBuf) -> OpenFileRequest {
        OpenFileRequest {
            default_ext: "dat".to_string(),
            filter: "Data Files (*.dat)|*.dat|All Files (*.*)|*.*".to_string(),
            file_name: Some(file_name),
            check_file_exists: true,
        }
    }

    fn save_request(file_name: PathBuf) -> SaveFileRequest {
        SaveFileRequest {
            default_ext: "dat".to_string(),
            filter: "All Files (*.*)|*.*".to_string(),
            file_name: Some(file_name),
            overwrite_prompt: true,
        }
    }

    fn type_text(dialog: &mut FileDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_event(&InputEvent::Char(c));
        }
    }

    #[test]
    fn test_listing_uses_first_filter() {
        let dir = fixture();
        let dialog = FileDialog::open(&open_request(dir.path().join("x")));
        assert_eq!(dialog.current_path(), dir.path());
        assert_eq!(
            dialog.entries,
            vec![Entry::Parent, Entry::Dir("sub".to_string()), Entry::File("data.dat".to_string())]
        );
    }

    #[test]
    fn test_filter_row_cycles_filters() {
        let dir = fixture();
        let mut dialog = FileDialog::open(&open_request(dir.path().join("x")));
        dialog.handle_event(&InputEvent::Tab);
        assert_eq!(dialog.focus, Focus::Filter);

        dialog.handle_event(&InputEvent::CursorDown);
        assert_eq!(dialog.filter().map(|f| f.description.as_str()), Some("All Files (*.*)"));
        assert_eq!(
            dialog.entries,
            vec![
                Entry::Parent,
                Entry::Dir("sub".to_string()),
                Entry::File("data.dat".to_string()),
                Entry::File("notes.txt".to_string()),
            ]
        );

        // Frame top is row 4, so the type row is 8
        let mut screen = Screen::new(80, 25);
        dialog.draw(&mut screen);
        let type_row: String = (1..=80).filter_map(|c| screen.get(8, c).map(|cell| cell.ch)).collect();
        assert!(type_row.contains("Type: All Files (*.*)"));

        // Wraps back to the first filter
        dialog.handle_event(&InputEvent::CursorDown);
        assert_eq!(dialog.filter().map(|f| f.description.as_str()), Some("Data Files (*.dat)"));
        assert_eq!(dialog.entries.len(), 3);
    }

    #[test]
    fn test_save_appends_default_ext() {
        let dir = fixture();
        let mut dialog = FileDialog::save(&save_request(dir.path().join("draft")));
        assert_eq!(dialog.filename.text(), "draft");
        assert_eq!(
            dialog.handle_event(&InputEvent::Enter),
            ModalResult::Close(Some(dir.path().join("draft.dat")))
        );
    }

    #[test]
    fn test_open_missing_file_stays_open() {
        let dir = fixture();
        let mut dialog = FileDialog::open(&open_request(dir.path().join("missing")));
        assert_eq!(dialog.handle_event(&InputEvent::Enter), ModalResult::Continue);
        assert_eq!(dialog.error.as_deref(), Some("File not found: missing"));

        dialog.handle_event(&InputEvent::Backspace);
        assert_eq!(dialog.error, None);
    }

    #[test]
    fn test_open_resolves_name_without_extension() {
        let dir = fixture();
        let mut dialog = FileDialog::open(&open_request(dir.path().join("data")));
        assert_eq!(
            dialog.handle_event(&InputEvent::Enter),
            ModalResult::Close(Some(dir.path().join("data.dat")))
        );
    }

    #[test]
    fn test_enter_on_directory_descends() {
        let dir = fixture();
        let mut dialog = FileDialog::open(&open_request(dir.path().join("x")));
        for _ in 0..3 {
            dialog.handle_event(&InputEvent::Backspace);
        }
        type_text(&mut dialog, "sub");
        assert_eq!(dialog.handle_event(&InputEvent::Enter), ModalResult::Continue);
        assert_eq!(dialog.current_path(), dir.path().join("sub"));
        assert_eq!(dialog.filename.text(), "");
    }

    #[test]
    fn test_list_selection_fills_name() {
        let dir = fixture();
        let mut dialog = FileDialog::open(&open_request(dir.path().join("x")));
        dialog.handle_event(&InputEvent::Tab);
        dialog.handle_event(&InputEvent::Tab);
        dialog.handle_event(&InputEvent::End);
        assert_eq!(dialog.filename.text(), "data.dat");
        assert_eq!(
            dialog.handle_event(&InputEvent::Enter),
            ModalResult::Close(Some(dir.path().join("data.dat")))
        );
    }

    #[test]
    fn test_overwrite_check_and_cancel() {
        let dir = fixture();
        let mut dialog = FileDialog::save(&save_request(dir.path().join("data.dat")));
        assert!(dialog.confirms_overwrite(&dir.path().join("data.dat")));
        assert!(!dialog.confirms_overwrite(&dir.path().join("new.dat")));
        assert_eq!(dialog.handle_event(&InputEvent::Escape), ModalResult::Close(None));
    }
}
