//! Application errors

use conduit_core::environment::StorageError;
use conduit_runtime::StoreError;
use thiserror::Error;

/// Errors surfaced by the application layer and the shell
///
/// Page-level failures never become an `AppError`: they are folded into
/// state (form errors, not-found pages, alerts). These are the failures of
/// the plumbing around the store.
#[derive(Debug, Error)]
pub enum AppError {
    /// Durable storage could not be opened
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The store refused an action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A shell command could not be parsed
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// No control with this id is on screen
    #[error("no control `{0}` on this page")]
    UnknownControl(String),

    /// The control exists but is a form; use `submit`
    #[error("`{0}` is a form; use `submit {0} key=value ...`")]
    NotPressable(String),

    /// The control exists but is not a form
    #[error("`{0}` is not a form")]
    NotAForm(String),

    /// A required form field was left empty
    #[error("{form}: `{field}` is required")]
    MissingField {
        /// Form id
        form: String,
        /// Field name
        field: String,
    },

    /// The form has no field with this name
    #[error("{form}: no field named `{field}`")]
    UnknownField {
        /// Form id
        form: String,
        /// Field name
        field: String,
    },
}

/// Result alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;
