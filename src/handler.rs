//! Host notifications
//!
//! The controller never touches file contents. It asks the host to clear,
//! load, or save through a [`FileHandler`], and tells it when the current
//! file name has settled.

use std::path::{Path, PathBuf};

use crate::document;

/// Request passed to the new/open/save notifications
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRequest {
    /// Target path (None for a new, unnamed document)
    pub file_path: Option<PathBuf>,
}

impl FileRequest {
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self { file_path }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get the display title of the target path
    pub fn file_title(&self) -> String {
        document::file_title(self.file_path())
    }

    /// Accept the request with the requested path
    pub fn accept(self) -> FileResponse {
        FileResponse { file_path: self.file_path }
    }

    /// Accept the request but adopt a different path (e.g. a normalized one)
    pub fn accept_as(self, file_path: impl Into<PathBuf>) -> FileResponse {
        FileResponse { file_path: Some(file_path.into()) }
    }
}

/// What the host confirmed: the path the document should adopt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileResponse {
    pub file_path: Option<PathBuf>,
}

impl FileResponse {
    /// Leave the document without a name
    pub fn unnamed() -> Self {
        Self { file_path: None }
    }
}

/// Sent once the file name and modified flag have settled
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileChanged {
    pub file_path: Option<PathBuf>,
    pub file_title: String,
}

impl FileChanged {
    pub fn new(file_path: Option<PathBuf>) -> Self {
        let file_title = document::file_title(file_path.as_deref());
        Self { file_path, file_title }
    }
}

/// Host-side file operations.
///
/// Each request method returns the path to adopt, or an error to abort the
/// operation. The defaults accept the request unchanged.
pub trait FileHandler {
    /// Clear the host's data for a new document
    fn on_new(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        Ok(request.accept())
    }

    /// Load the host's data from `request.file_path`
    fn on_open(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        Ok(request.accept())
    }

    /// Write the host's data to `request.file_path`
    fn on_save(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        Ok(request.accept())
    }

    /// The current file name changed (title bars etc.)
    fn on_file_changed(&mut self, _event: &FileChanged) {}
}

type RequestFn<'a> = Box<dyn FnMut(FileRequest) -> anyhow::Result<FileResponse> + 'a>;
type ChangedFn<'a> = Box<dyn FnMut(&FileChanged) + 'a>;

/// `FileHandler` assembled from closures.
///
/// Notifications without a subscriber behave like the trait defaults.
#[derive(Default)]
pub struct Handlers<'a> {
    new_file: Option<RequestFn<'a>>,
    open_file: Option<RequestFn<'a>>,
    save_file: Option<RequestFn<'a>>,
    file_changed: Option<ChangedFn<'a>>,
}

impl<'a> Handlers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_new(mut self, f: impl FnMut(FileRequest) -> anyhow::Result<FileResponse> + 'a) -> Self {
        self.new_file = Some(Box::new(f));
        self
    }

    pub fn with_open(mut self, f: impl FnMut(FileRequest) -> anyhow::Result<FileResponse> + 'a) -> Self {
        self.open_file = Some(Box::new(f));
        self
    }

    pub fn with_save(mut self, f: impl FnMut(FileRequest) -> anyhow::Result<FileResponse> + 'a) -> Self {
        self.save_file = Some(Box::new(f));
        self
    }

    pub fn with_file_changed(mut self, f: impl FnMut(&FileChanged) + 'a) -> Self {
        self.file_changed = Some(Box::new(f));
        self
    }
}

fn dispatch(slot: &mut Option<RequestFn<'_>>, request: FileRequest) -> anyhow::Result<FileResponse> {
    match slot {
        Some(f) => f(request),
        None => Ok(request.accept()),
    }
}

impl FileHandler for Handlers<'_> {
    fn on_new(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        dispatch(&mut self.new_file, request)
    }

    fn on_open(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        dispatch(&mut self.open_file, request)
    }

    fn on_save(&mut self, request: FileRequest) -> anyhow::Result<FileResponse> {
        dispatch(&mut self.save_file, request)
    }

    fn on_file_changed(&mut self, event: &FileChanged) {
        if let Some(f) = self.file_changed.as_mut() {
            f(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_keeps_or_overrides_path() {
        let request = FileRequest::new(Some(PathBuf::from("a/b.dat")));
        assert_eq!(request.file_title(), "b.dat");
        assert_eq!(request.clone().accept().file_path, Some(PathBuf::from("a/b.dat")));
        assert_eq!(request.accept_as("/abs/b.dat").file_path, Some(PathBuf::from("/abs/b.dat")));
    }

    #[test]
    fn test_file_changed_title() {
        assert_eq!(FileChanged::new(None).file_title, "Untitled");
        assert_eq!(FileChanged::new(Some(PathBuf::from("x/y.txt"))).file_title, "y.txt");
    }

    #[test]
    fn test_unsubscribed_handlers_accept() {
        let mut handlers = Handlers::new();
        let response = handlers.on_open(FileRequest::new(Some(PathBuf::from("f.dat")))).unwrap();
        assert_eq!(response.file_path, Some(PathBuf::from("f.dat")));
        handlers.on_file_changed(&FileChanged::new(None));
    }

    #[test]
    fn test_closure_handlers_are_called() {
        let mut saved = Vec::new();
        let mut titles = Vec::new();
        {
            let mut handlers = Handlers::new()
                .with_save(|req| {
                    saved.push(req.file_title());
                    Ok(req.accept())
                })
                .with_new(|_| anyhow::bail!("disk full"))
                .with_file_changed(|ev| titles.push(ev.file_title.clone()));

            handlers.on_save(FileRequest::new(Some(PathBuf::from("out.dat")))).unwrap();
            let err = handlers.on_new(FileRequest::new(None)).unwrap_err();
            assert_eq!(err.to_string(), "disk full");
            handlers.on_file_changed(&FileChanged::new(Some(PathBuf::from("out.dat"))));
        }
        assert_eq!(saved, vec!["out.dat".to_string()]);
        assert_eq!(titles, vec!["out.dat".to_string()]);
    }
}
