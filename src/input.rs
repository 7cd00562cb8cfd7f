//! Input handling and key event processing

use crate::terminal::Key;

/// Processed input events for the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Regular character input
    Char(char),
    /// Navigation keys
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Home,
    End,
    PageUp,
    PageDown,
    CtrlHome,
    CtrlEnd,
    /// Editing keys
    Enter,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    Escape,
    /// File commands
    CtrlN, // New
    CtrlO, // Open
    CtrlS, // Save
    F12,   // Save As
    CtrlQ, // Quit
    AltX,  // Exit
    /// Line clipboard
    CtrlK, // Cut line
    CtrlU, // Paste line
    Unknown,
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => InputEvent::Char(c),
            Key::Enter => InputEvent::Enter,
            Key::Escape => InputEvent::Escape,
            Key::Backspace => InputEvent::Backspace,
            Key::Delete => InputEvent::Delete,
            Key::Tab => InputEvent::Tab,
            Key::ShiftTab => InputEvent::ShiftTab,
            Key::Up => InputEvent::CursorUp,
            Key::Down => InputEvent::CursorDown,
            Key::Left => InputEvent::CursorLeft,
            Key::Right => InputEvent::CursorRight,
            Key::Home => InputEvent::Home,
            Key::End => InputEvent::End,
            Key::PageUp => InputEvent::PageUp,
            Key::PageDown => InputEvent::PageDown,
            Key::CtrlHome => InputEvent::CtrlHome,
            Key::CtrlEnd => InputEvent::CtrlEnd,
            Key::F(12) => InputEvent::F12,
            Key::Alt('x') => InputEvent::AltX,
            Key::Ctrl('n') => InputEvent::CtrlN,
            Key::Ctrl('o') => InputEvent::CtrlO,
            Key::Ctrl('s') => InputEvent::CtrlS,
            Key::Ctrl('q') => InputEvent::CtrlQ,
            Key::Ctrl('k') => InputEvent::CtrlK,
            Key::Ctrl('u') => InputEvent::CtrlU,
            _ => InputEvent::Unknown,
        }
    }
}
