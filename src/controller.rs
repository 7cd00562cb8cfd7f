//! Document controller
//!
//! Runs the New / Open / Save / Save As protocol for one document. Every
//! operation is synchronous: dialogs block, handlers run to completion, and
//! the state is updated only after the host confirms success.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::dialog::{ConfirmChoice, DialogHost, OpenFileRequest, SaveFileRequest};
use crate::document::{self, DocumentState};
use crate::error::{Error, Operation, Outcome};
use crate::handler::{FileChanged, FileHandler, FileRequest};

/// Host resources lent to the controller for the duration of one operation
pub struct HostContext<'a> {
    pub dialogs: &'a mut dyn DialogHost,
    pub handler: &'a mut dyn FileHandler,
}

impl<'a> HostContext<'a> {
    pub fn new(dialogs: &'a mut dyn DialogHost, handler: &'a mut dyn FileHandler) -> Self {
        Self { dialogs, handler }
    }
}

/// Tracks the current document and mediates new/open/save requests
#[derive(Clone, Debug, Default)]
pub struct DocumentController {
    state: DocumentState,
    config: ControllerConfig,
}

impl DocumentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        Self {
            state: DocumentState::new(),
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ControllerConfig {
        &mut self.config
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    /// Full path of the current file, or None if it has no name
    pub fn file_path(&self) -> Option<&Path> {
        self.state.file_path()
    }

    pub fn is_modified(&self) -> bool {
        self.state.is_modified()
    }

    /// Called by the host whenever the document content changes
    pub fn set_modified(&mut self, modified: bool) {
        self.state.set_modified(modified);
    }

    pub fn has_file_name(&self) -> bool {
        self.state.has_file_name()
    }

    pub fn file_title(&self) -> String {
        self.state.file_title()
    }

    /// Start a new, unnamed document
    pub fn new_document(&mut self, host: &mut HostContext<'_>) -> Outcome {
        match self.prompt_save_if_modified(host) {
            Outcome::Success => self.run(host, Operation::New, None),
            outcome => outcome,
        }
    }

    /// Ask the user for a file and open it
    pub fn open(&mut self, host: &mut HostContext<'_>) -> Outcome {
        let outcome = self.prompt_save_if_modified(host);
        if !outcome.is_success() {
            return outcome;
        }

        let request = OpenFileRequest {
            default_ext: self.config.default_ext.clone(),
            filter: self.config.filter.clone(),
            file_name: None,
            check_file_exists: true,
        };
        match host.dialogs.open_file(&request) {
            Some(path) => self.run(host, Operation::Open, Some(path)),
            None => {
                debug!("open dialog cancelled");
                Outcome::Cancelled
            }
        }
    }

    /// Open `path` directly, without prompting to save or showing a dialog
    pub fn open_path(&mut self, host: &mut HostContext<'_>, path: impl AsRef<Path>) -> Result<Outcome, Error> {
        let path = required_path(path.as_ref())?;
        Ok(self.run(host, Operation::Open, Some(path)))
    }

    /// Save to the current file, or ask for a name if there is none
    pub fn save(&mut self, host: &mut HostContext<'_>) -> Outcome {
        if self.has_file_name() {
            let path = self.state.file_path.clone();
            self.run(host, Operation::Save, path)
        } else {
            self.save_as(host)
        }
    }

    /// Ask for a file name and save to it
    pub fn save_as(&mut self, host: &mut HostContext<'_>) -> Outcome {
        let request = SaveFileRequest {
            default_ext: self.config.default_ext.clone(),
            filter: self.config.filter.clone(),
            file_name: self.state.file_path.clone(),
            overwrite_prompt: true,
        };
        match host.dialogs.save_file(&request) {
            Some(path) => self.run(host, Operation::Save, Some(path)),
            None => {
                debug!("save dialog cancelled");
                Outcome::Cancelled
            }
        }
    }

    /// Save to `path` directly, without showing a dialog
    pub fn save_as_path(&mut self, host: &mut HostContext<'_>, path: impl AsRef<Path>) -> Result<Outcome, Error> {
        let path = required_path(path.as_ref())?;
        Ok(self.run(host, Operation::Save, Some(path)))
    }

    /// Offer to save a modified document.
    ///
    /// Succeeds when the document is clean, the user declines to save, or the
    /// save completes. Cancel (or a failed save) stops the caller's operation.
    pub fn prompt_save_if_modified(&mut self, host: &mut HostContext<'_>) -> Outcome {
        if !self.state.is_modified() {
            return Outcome::Success;
        }

        let choice = host
            .dialogs
            .confirm(&self.config.save_prompt, &self.config.save_title);
        debug!("save prompt answered {:?}", choice);
        match choice {
            ConfirmChoice::Yes => self.save(host),
            ConfirmChoice::Cancel => Outcome::Cancelled,
            ConfirmChoice::No => Outcome::Success,
        }
    }

    /// Notify the host, then settle the state and announce the change.
    ///
    /// Handler errors are shown to the user and reported as `Failed`; the
    /// document state is left untouched in that case.
    fn run(&mut self, host: &mut HostContext<'_>, op: Operation, path: Option<PathBuf>) -> Outcome {
        debug!("{} requested for {:?}", op, path);
        let request = FileRequest::new(path.clone());
        let result = match op {
            Operation::New => host.handler.on_new(request),
            Operation::Open => host.handler.on_open(request),
            Operation::Save => host.handler.on_save(request),
        };

        match result {
            Ok(response) => {
                info!("{} completed, current file is {:?}", op, response.file_path);
                self.state.settle(response.file_path);
                let event = FileChanged::new(self.state.file_path.clone());
                host.handler.on_file_changed(&event);
                Outcome::Success
            }
            Err(err) => {
                warn!("{} failed for {:?}", op, path);
                let message = failure_message(op, path.as_deref(), &err);
                host.dialogs.show_error(&message, "Error");
                Outcome::Failed(op)
            }
        }
    }
}

fn required_path(path: &Path) -> Result<PathBuf, Error> {
    if document::is_file_name(Some(path)) {
        Ok(path.to_path_buf())
    } else {
        Err(Error::MissingPath)
    }
}

fn failure_message(op: Operation, path: Option<&Path>, err: &anyhow::Error) -> String {
    let name = path.map(|p| p.display().to_string()).unwrap_or_default();
    match op {
        Operation::New => format!("Error creating new file : {:#}", err),
        Operation::Open => format!("Error loading '{}' : {:#}", name, err),
        Operation::Save => format!("Error saving '{}' : {:#}", name, err),
    }
}
