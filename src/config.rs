//! Controller configuration

use crate::error::Error;
use crate::filter::{parse_filter, FileFilter};

pub const DEFAULT_EXT: &str = "dat";
pub const DEFAULT_FILTER: &str = "All Files (*.*)|*.*";
pub const DEFAULT_SAVE_PROMPT: &str = "File has been modified. Save changes?";
pub const DEFAULT_SAVE_TITLE: &str = "Save Changes";

/// Dialog settings used by the document controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Extension added to saved files when none was given (without the dot)
    pub default_ext: String,

    /// Filters for the open and save dialogs
    pub filter: String,

    /// Text shown when asking to save a modified document
    pub save_prompt: String,

    /// Title of the save-changes prompt
    pub save_title: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_ext: DEFAULT_EXT.to_string(),
            filter: DEFAULT_FILTER.to_string(),
            save_prompt: DEFAULT_SAVE_PROMPT.to_string(),
            save_title: DEFAULT_SAVE_TITLE.to_string(),
        }
    }
}

impl ControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_ext(mut self, ext: impl Into<String>) -> Self {
        self.default_ext = ext.into();
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_save_prompt(mut self, prompt: impl Into<String>, title: impl Into<String>) -> Self {
        self.save_prompt = prompt.into();
        self.save_title = title.into();
        self
    }

    /// Parse the configured filter string
    pub fn filters(&self) -> Result<Vec<FileFilter>, Error> {
        parse_filter(&self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.default_ext, "dat");
        assert_eq!(config.filter, "All Files (*.*)|*.*");
        assert_eq!(config.save_prompt, "File has been modified. Save changes?");
        assert_eq!(config.save_title, "Save Changes");
        assert_eq!(config.filters().unwrap().len(), 1);
    }

    #[test]
    fn test_builders_override() {
        let config = ControllerConfig::new()
            .with_default_ext("txt")
            .with_filter("Text Files (*.txt)|*.txt")
            .with_save_prompt("Keep your edits?", "Unsaved");
        assert_eq!(config.default_ext, "txt");
        assert_eq!(config.save_prompt, "Keep your edits?");
        assert_eq!(config.save_title, "Unsaved");
        assert!(config.filters().unwrap()[0].matches("a.txt"));
    }

    #[test]
    fn test_bad_filter_reported() {
        let config = ControllerConfig::new().with_filter("Text Files");
        assert!(matches!(config.filters(), Err(Error::InvalidFilter(_))));
    }
}
