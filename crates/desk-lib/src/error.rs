//! Error types for `desk-lib`.

use thiserror::Error;

/// Primary error type for desk-lib operations.
#[derive(Error, Debug)]
pub enum DeskError {
    // === Issue Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// Status value is not one of Open, In Progress, Resolved.
    #[error("Invalid status: {status} (expected Open, In Progress or Resolved)")]
    InvalidStatus { status: String },

    // === Portal Errors ===
    /// The portal is gated and nobody is logged in.
    #[error("Not logged in: use `desk login` first")]
    NotLoggedIn,

    /// Committee updates were submitted while committee mode is off.
    #[error("Committee mode is off; status updates are not accepted")]
    CommitteeModeOff,

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === Storage Errors ===
    /// Storage key contains characters that cannot map to a file name.
    #[error("Invalid storage key: {key}")]
    InvalidStorageKey { key: String },

    /// Generic storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeskError {
    #[must_use]
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage(reason.into())
    }
}

/// Result type using `DeskError`.
pub type Result<T> = std::result::Result<T, DeskError>;
