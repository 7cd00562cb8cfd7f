//! Raw-mode terminal and keyboard decoding
//!
//! Output is plain ANSI escape sequences. Input is read without blocking and
//! split into keys, so a paste or fast typing that arrives in one read is
//! delivered key by key.

use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::thread;
use std::time::Duration;

/// DOS color palette (16 colors)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

/// RGB values of the text-mode palette, indexed by `Color as usize`
const PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x00, 0x00, 0xAA),
    (0x00, 0xAA, 0x00),
    (0x00, 0xAA, 0xAA),
    (0xAA, 0x00, 0x00),
    (0xAA, 0x00, 0xAA),
    (0xAA, 0x55, 0x00),
    (0xAA, 0xAA, 0xAA),
    (0x55, 0x55, 0x55),
    (0x55, 0x55, 0xFF),
    (0x55, 0xFF, 0x55),
    (0x55, 0xFF, 0xFF),
    (0xFF, 0x55, 0x55),
    (0xFF, 0x55, 0xFF),
    (0xFF, 0xFF, 0x55),
    (0xFF, 0xFF, 0xFF),
];

impl Color {
    fn rgb(self) -> (u8, u8, u8) {
        PALETTE[self as usize]
    }

    /// SGR parameters selecting this color as foreground (true color)
    pub fn to_fg_sgr(self) -> String {
        let (r, g, b) = self.rgb();
        format!("38;2;{};{};{}", r, g, b)
    }

    /// SGR parameters selecting this color as background (true color)
    pub fn to_bg_sgr(self) -> String {
        let (r, g, b) = self.rgb();
        format!("48;2;{};{};{}", r, g, b)
    }
}

/// A decoded key press
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    CtrlHome,
    CtrlEnd,
    F(u8),
    Alt(char),
    Ctrl(char),
    Unknown(Vec<u8>),
}

/// Terminal in raw mode on the alternate screen; restored on drop
pub struct Terminal {
    stdout: io::Stdout,
    /// Settings to put back when the terminal is dropped
    original: libc::termios,
    width: u16,
    height: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let original = enter_raw_mode()?;
        let mut term = Self {
            stdout: io::stdout(),
            original,
            width: 80,
            height: 25,
        };
        term.update_size();

        // Alternate screen, hidden cursor, cleared
        term.write_raw("\x1b[?1049h\x1b[?25l\x1b[2J\x1b[H")?;
        term.flush()?;
        Ok(term)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Re-query the window size
    pub fn update_size(&mut self) {
        // SAFETY: TIOCGWINSZ only writes into the winsize we pass
        let ws = unsafe {
            let mut ws: libc::winsize = std::mem::zeroed();
            if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) != 0 {
                return;
            }
            ws
        };
        if ws.ws_col > 0 && ws.ws_row > 0 {
            self.width = ws.ws_col;
            self.height = ws.ws_row;
        }
    }

    pub fn write_raw(&mut self, s: &str) -> io::Result<()> {
        self.stdout.write_all(s.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    /// Move the cursor (1-based)
    pub fn goto(&mut self, row: u16, col: u16) -> io::Result<()> {
        write!(self.stdout, "\x1b[{};{}H", row, col)
    }

    pub fn set_colors(&mut self, fg: Color, bg: Color) -> io::Result<()> {
        write!(self.stdout, "\x1b[{};{}m", fg.to_fg_sgr(), bg.to_bg_sgr())
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[?25h")
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[?25l")
    }

    pub fn write_char(&mut self, c: char) -> io::Result<()> {
        write!(self.stdout, "{}", c)
    }

    /// Read every key waiting on stdin without blocking (empty if none)
    pub fn read_keys(&self) -> io::Result<Vec<Key>> {
        let mut buf = [0u8; 256];
        let mut stdin = io::stdin();

        let mut len = stdin.read(&mut buf)?;
        if len == 0 {
            return Ok(Vec::new());
        }

        // A lone ESC may be the first half of an escape sequence
        if buf[..len] == [0x1b] {
            thread::sleep(Duration::from_millis(10));
            len += stdin.read(&mut buf[len..])?;
        }

        Ok(parse_keys(&buf[..len]))
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.write_raw("\x1b[0m\x1b[?25h\x1b[?1049l");
        let _ = self.flush();
        // SAFETY: restores settings previously read by tcgetattr
        unsafe {
            libc::tcsetattr(io::stdin().as_raw_fd(), libc::TCSAFLUSH, &self.original);
        }
    }
}

/// Put stdin in raw, non-blocking mode, returning the previous settings
fn enter_raw_mode() -> io::Result<libc::termios> {
    let fd = io::stdin().as_raw_fd();
    // SAFETY: termios is plain data filled in by tcgetattr
    unsafe {
        let mut original: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut original) != 0 {
            return Err(io::Error::last_os_error());
        }

        let mut raw = original;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
        raw.c_iflag &= !(libc::IXON | libc::ICRNL | libc::BRKINT | libc::INPCK | libc::ISTRIP);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 0;

        if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw) != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(original)
    }
}

/// Split raw input into keys
pub fn parse_keys(input: &[u8]) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        let len = key_len(rest).clamp(1, rest.len());
        keys.push(parse_key(&rest[..len]));
        rest = &rest[len..];
    }
    keys
}

/// Length of the key at the start of `input`
fn key_len(input: &[u8]) -> usize {
    match input[0] {
        0x1b => escape_len(input),
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

fn escape_len(input: &[u8]) -> usize {
    match input.get(1) {
        // CSI: parameter bytes, then one final byte in 0x40..=0x7E
        Some(b'[') => input[2..]
            .iter()
            .position(|b| (0x40..=0x7E).contains(b))
            .map_or(input.len(), |i| i + 3),
        Some(b'O') => 3,
        Some(b) if b.is_ascii() && *b != 0x1b => 2,
        _ => 1,
    }
}

/// Decode exactly one key
pub fn parse_key(buf: &[u8]) -> Key {
    match buf {
        [b'\r'] | [b'\n'] => Key::Enter,
        [0x1b] => Key::Escape,
        [0x7f] | [0x08] => Key::Backspace,
        [b'\t'] => Key::Tab,
        [c @ 1..=26] => Key::Ctrl((b'a' + c - 1) as char),
        [c @ 32..=126] => Key::Char(*c as char),
        [0x1b, b'[', tail @ ..] => parse_csi(tail).unwrap_or_else(|| Key::Unknown(buf.to_vec())),
        [0x1b, b'O', c] => match c {
            b'P'..=b'S' => Key::F(c - b'P' + 1),
            b'H' => Key::Home,
            b'F' => Key::End,
            _ => Key::Unknown(buf.to_vec()),
        },
        [0x1b, c] if c.is_ascii_alphabetic() => Key::Alt(c.to_ascii_lowercase() as char),
        [first, ..] if *first >= 0xC0 => match std::str::from_utf8(buf) {
            Ok(s) => s.chars().next().map_or_else(|| Key::Unknown(buf.to_vec()), Key::Char),
            Err(_) => Key::Unknown(buf.to_vec()),
        },
        _ => Key::Unknown(buf.to_vec()),
    }
}

/// Decode the part of a CSI sequence after `ESC [`
fn parse_csi(tail: &[u8]) -> Option<Key> {
    let (&last, params) = tail.split_last()?;
    let params = std::str::from_utf8(params).ok()?;
    let mut fields = params.split(';');
    let number = fields.next().unwrap_or("");
    let ctrl = fields.next() == Some("5");

    let key = match last {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' if ctrl => Key::CtrlHome,
        b'F' if ctrl => Key::CtrlEnd,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'Z' => Key::ShiftTab,
        b'~' => match number {
            "1" | "7" => Key::Home,
            "4" | "8" => Key::End,
            "3" => Key::Delete,
            "5" => Key::PageUp,
            "6" => Key::PageDown,
            _ => Key::F(function_key(number.parse().ok()?)?),
        },
        _ => return None,
    };
    Some(key)
}

/// Function key number for the `ESC [ n ~` codes (there are gaps at 16 and 22)
fn function_key(code: u8) -> Option<u8> {
    match code {
        11..=15 => Some(code - 10),
        17..=21 => Some(code - 11),
        23 | 24 => Some(code - 12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_keys() {
        assert_eq!(parse_key(&[0x0f]), Key::Ctrl('o'));
        assert_eq!(parse_key(&[0x13]), Key::Ctrl('s'));
        assert_eq!(parse_key(b"\r"), Key::Enter);
        assert_eq!(parse_key(&[0x7f]), Key::Backspace);
        assert_eq!(parse_key(&[0x1b]), Key::Escape);
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(parse_key(b"\x1b[A"), Key::Up);
        assert_eq!(parse_key(b"\x1b[3~"), Key::Delete);
        assert_eq!(parse_key(b"\x1b[24~"), Key::F(12));
        assert_eq!(parse_key(b"\x1b[17~"), Key::F(6));
        assert_eq!(parse_key(b"\x1bOQ"), Key::F(2));
        assert_eq!(parse_key(b"\x1b[1;5H"), Key::CtrlHome);
        assert_eq!(parse_key(b"\x1bX"), Key::Alt('x'));
        assert_eq!(parse_key(b"\x1b[Z"), Key::ShiftTab);
    }

    #[test]
    fn test_text_input() {
        assert_eq!(parse_key(b"a"), Key::Char('a'));
        assert_eq!(parse_key("é".as_bytes()), Key::Char('é'));
        assert_eq!(parse_key(b"\x1b[99q"), Key::Unknown(b"\x1b[99q".to_vec()));
    }

    #[test]
    fn test_one_read_holds_several_keys() {
        assert_eq!(parse_keys(b"ab"), vec![Key::Char('a'), Key::Char('b')]);
        assert_eq!(parse_keys("éa".as_bytes()), vec![Key::Char('é'), Key::Char('a')]);
        assert_eq!(
            parse_keys(b"hi\r\x1b[Ax\x1b[24~\x13"),
            vec![
                Key::Char('h'),
                Key::Char('i'),
                Key::Enter,
                Key::Up,
                Key::Char('x'),
                Key::F(12),
                Key::Ctrl('s'),
            ]
        );
    }

    #[test]
    fn test_escape_followed_by_escape_sequence() {
        assert_eq!(parse_keys(b"\x1b\x1b[B"), vec![Key::Escape, Key::Down]);
        assert_eq!(parse_keys(b"\x1bq!"), vec![Key::Alt('q'), Key::Char('!')]);
    }

    #[test]
    fn test_truncated_input_is_not_lost() {
        // A split UTF-8 scalar at the end of a read decodes as unknown bytes
        assert_eq!(parse_keys(&[b'a', 0xC3]), vec![Key::Char('a'), Key::Unknown(vec![0xC3])]);
        assert_eq!(parse_keys(b""), Vec::<Key>::new());
    }
}
