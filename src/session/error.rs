// Lockbox: Session error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session was queried before `start` was ever called.
    #[error("session has not been started yet")]
    InvalidState,

    #[error("session expired {seconds_since} seconds ago")]
    Expired { seconds_since: u64 },

    #[error("invalid session duration: {0} seconds (must be positive)")]
    InvalidDuration(u64),
}
