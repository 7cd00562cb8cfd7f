//! Status bar

use crate::screen::Screen;
use crate::terminal::Color;

/// The status bar at the bottom of the screen (stateless)
pub struct StatusBar;

impl StatusBar {
    /// Draw the status bar on `row`: key hints on the left, position and
    /// the unsaved-changes marker on the right
    pub fn draw(screen: &mut Screen, row: u16, width: u16, modified: bool, cursor_line: usize, cursor_col: usize) {
        screen.fill(row, 1, width, 1, ' ', Color::Black, Color::Cyan);
        screen.write_str(row, 1, " ^N New  ^O Open  ^S Save  F12 Save As  ^Q Quit", Color::Black, Color::Cyan);

        let marker = if modified { '*' } else { ' ' };
        let right_text = format!("{} {:05}:{:03} ", marker, cursor_line + 1, cursor_col + 1);
        let right_x = 1 + width.saturating_sub(right_text.len() as u16);
        screen.write_str(row, right_x, &right_text, Color::Black, Color::Cyan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(screen: &Screen, row: u16, width: u16) -> String {
        (1..=width).filter_map(|c| screen.get(row, c).map(|cell| cell.ch)).collect()
    }

    #[test]
    fn test_modified_marker() {
        let mut screen = Screen::new(80, 3);
        StatusBar::draw(&mut screen, 3, 80, true, 0, 4);
        assert!(row_text(&screen, 3, 80).ends_with("* 00001:005 "));

        StatusBar::draw(&mut screen, 3, 80, false, 9, 0);
        assert!(row_text(&screen, 3, 80).ends_with("  00010:001 "));
    }
}
