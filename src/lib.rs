//! Current-document state controller
//!
//! Tracks the name and modified flag of a single document and runs the
//! New / Open / Save / Save As protocol around it. The host supplies the
//! dialogs (`DialogHost`) and does the actual file I/O (`FileHandler`).

pub mod config;
pub mod controller;
pub mod dialog;
pub mod document;
pub mod error;
pub mod filter;
pub mod handler;

pub use config::ControllerConfig;
pub use controller::{DocumentController, HostContext};
pub use dialog::{ConfirmChoice, DialogHost, OpenFileRequest, SaveFileRequest};
pub use document::DocumentState;
pub use error::{Error, Operation, Outcome};
pub use filter::FileFilter;
pub use handler::{FileChanged, FileHandler, FileRequest, FileResponse, Handlers};
