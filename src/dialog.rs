//! Modal dialogs the controller asks the host to show
//!
//! Every method blocks until the user dismisses the dialog.

use std::path::{Path, PathBuf};

/// Answer from the three-button save-changes prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    No,
    Cancel,
}

/// Settings for an "open file" dialog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenFileRequest {
    pub default_ext: String,
    pub filter: String,
    /// Initial contents of the file name field
    pub file_name: Option<PathBuf>,
    /// Only accept a file that already exists
    pub check_file_exists: bool,
}

/// Settings for a "save file" dialog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveFileRequest {
    pub default_ext: String,
    pub filter: String,
    /// Initial path (the current file name, if any)
    pub file_name: Option<PathBuf>,
    /// Ask before replacing an existing file
    pub overwrite_prompt: bool,
}

/// Host-provided modal dialogs.
///
/// `open_file` / `save_file` return `None` when the user cancels.
pub trait DialogHost {
    fn open_file(&mut self, request: &OpenFileRequest) -> Option<PathBuf>;

    fn save_file(&mut self, request: &SaveFileRequest) -> Option<PathBuf>;

    /// Yes / No / Cancel question
    fn confirm(&mut self, message: &str, title: &str) -> ConfirmChoice;

    /// Blocking error box with a single OK button
    fn show_error(&mut self, message: &str, title: &str);
}

/// Append `ext` to `path` when the path has no extension of its own
pub fn with_default_ext(path: &Path, ext: &str) -> PathBuf {
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() || path.extension().is_some() {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ext_added_only_when_missing() {
        assert_eq!(with_default_ext(Path::new("notes"), "txt"), PathBuf::from("notes.txt"));
        assert_eq!(with_default_ext(Path::new("notes"), ".txt"), PathBuf::from("notes.txt"));
        assert_eq!(with_default_ext(Path::new("notes.md"), "txt"), PathBuf::from("notes.md"));
        assert_eq!(with_default_ext(Path::new("dir/report"), "dat"), PathBuf::from("dir/report.dat"));
        assert_eq!(with_default_ext(Path::new("notes"), ""), PathBuf::from("notes"));
    }
}
