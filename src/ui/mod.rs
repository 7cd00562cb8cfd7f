//! UI components for docpad

pub mod dialogs;
pub mod statusbar;
pub mod textbox;
pub mod textfield;

pub use statusbar::StatusBar;
pub use textbox::{EditResult, TextBox};
