// Lockbox: Access level model
//
// The access level is the caller's clearance. It decides both the session
// length and whether writes are allowed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::config::{ADMIN_SESSION_SECS, USER_SESSION_SECS};

/// Clearance for whoever is accessing the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Read-only access.
    User,
    /// Read and write access.
    Admin,
}

impl AccessLevel {
    /// Session length in seconds for this level.
    pub fn session_duration_secs(self) -> u64 {
        match self {
            AccessLevel::User => USER_SESSION_SECS,
            AccessLevel::Admin => ADMIN_SESSION_SECS,
        }
    }

    pub fn can_modify(self) -> bool {
        self == AccessLevel::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::User => "user",
            AccessLevel::Admin => "admin",
        }
    }
}

/// Parses exactly `"user"` or `"admin"`; matching is case-sensitive.
impl FromStr for AccessLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(AccessLevel::User),
            "admin" => Ok(AccessLevel::Admin),
            other => Err(StoreError::InvalidAccessLevel(other.to_string())),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
