//! Error types for the gglib core library.
//!
//! Uses `thiserror` for structured error enums, one per domain. The registry
//! and launcher return these directly; they never print or log user-facing
//! text themselves.

use std::path::PathBuf;

/// Errors from the model registry and its storage backends.
///
/// A lookup miss is not represented here: `get_by_id` returns `Ok(None)`
/// for an id that was never inserted.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The caller supplied a record that fails field validation. Nothing
    /// was inserted.
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// The file path is already cataloged. Nothing was inserted or
    /// overwritten.
    #[error("model file already registered: {path}")]
    DuplicatePath { path: PathBuf },

    /// The storage backend could not be opened or a statement failed for
    /// infrastructure reasons. Not retried internally.
    #[error("catalog storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// A stored row could not be decoded. Surfaced rather than skipped so
    /// the catalog never silently diverges from the filesystem.
    #[error("corrupt catalog record: {message}")]
    CorruptRecord { message: String },
}

/// Errors from launching an external llama.cpp process.
///
/// A child that starts and then exits non-zero is *not* an error; its exit
/// status is passed through in [`crate::launcher::LaunchOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The process could not be started at all (binary not found,
    /// permission denied).
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process started but waiting on it failed.
    #[error("failed waiting on '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
