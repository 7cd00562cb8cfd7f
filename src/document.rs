//! Document state: current file name and modified flag

use std::path::{Path, PathBuf};

/// Title used for a document that has no file name
pub const UNTITLED: &str = "Untitled";

/// Returns true if `path` names a file (present and not blank)
pub fn is_file_name(path: Option<&Path>) -> bool {
    path.map_or(false, |p| !p.as_os_str().to_string_lossy().trim().is_empty())
}

/// Get the display title for a path (file name without directory, or "Untitled")
pub fn file_title(path: Option<&Path>) -> String {
    match path {
        Some(p) if is_file_name(Some(p)) => p
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| p.to_string_lossy().into_owned()),
        _ => UNTITLED.to_string(),
    }
}

/// State of the current document
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentState {
    /// Current file path (None if untitled)
    pub(crate) file_path: Option<PathBuf>,

    /// Content changed since the last new/open/save
    pub(crate) modified: bool,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark the document as modified (or clean)
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn has_file_name(&self) -> bool {
        is_file_name(self.file_path())
    }

    /// Get the display title (filename or "Untitled")
    pub fn file_title(&self) -> String {
        file_title(self.file_path())
    }

    /// Adopt a confirmed path after a successful new/open/save
    pub(crate) fn settle(&mut self, file_path: Option<PathBuf>) {
        self.file_path = file_path;
        self.modified = false;
    }
}
