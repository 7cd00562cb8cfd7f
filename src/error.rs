//! Error and outcome types

use std::fmt;

/// Contract violations and invalid configuration.
///
/// These are programming errors on the host side. Handler failures and
/// cancelled dialogs are reported through [`Outcome`] instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A blank path was passed to an explicit open/save entry point
    #[error("a file path is required")]
    MissingPath,

    /// The dialog filter string is malformed
    #[error("invalid file filter '{0}'")]
    InvalidFilter(String),
}

/// Which protocol step an outcome refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    New,
    Open,
    Save,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::New => write!(f, "new"),
            Operation::Open => write!(f, "open"),
            Operation::Save => write!(f, "save"),
        }
    }
}

/// Result of a document operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// Operation completed and the document state settled
    Success,
    /// The user dismissed a dialog or chose Cancel
    Cancelled,
    /// The host handler failed; the user has already been shown the error
    Failed(Operation),
}

impl Outcome {
    /// Check if the operation completed (the classic success boolean)
    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn is_cancelled(self) -> bool {
        self == Outcome::Cancelled
    }

    pub fn is_failed(self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> bool {
        outcome.is_success()
    }
}
