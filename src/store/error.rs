// Lockbox: Store error types

use thiserror::Error;

use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid access level: {0}")]
    InvalidAccessLevel(String),

    #[error("Permission denied: only admins can modify the store")]
    PermissionDenied,

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Store data is not loaded; log in again to reload it")]
    NotLoaded,

    #[error("Malformed entry on line {line}: expected `key:value`")]
    MalformedEntry { line: usize },

    #[error("Entry cannot be stored: {0}")]
    InvalidEntry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True when the caller should re-authenticate and retry rather than
    /// treat the failure as fatal.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            StoreError::Session(SessionError::Expired { .. }) | StoreError::NotLoaded
        )
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
