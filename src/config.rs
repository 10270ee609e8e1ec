// Lockbox: Configuration
//
// Session lengths are fixed per access level and are deliberately not
// runtime-configurable. What an embedder can choose is how loads are cached
// and which clock the session reads.

use std::sync::Arc;

use crate::session::{Clock, SystemClock};

/// Users re-authenticate every half hour.
pub const USER_SESSION_SECS: u64 = 1800;

/// Admins can write, so they re-authenticate every 15 minutes.
pub const ADMIN_SESSION_SECS: u64 = 900;

/// Returned by `view` for a key that is not in the store.
pub const MISSING_KEY_SENTINEL: &str = "Key does not exist";

/// Whether a repeated `load` may reuse the mapping already in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Reuse loaded data unless the caller forces a reload.
    #[default]
    Cached,
    /// Read the backing source on every load.
    AlwaysReload,
}

/// Options applied when opening a store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub load_policy: LoadPolicy,
    pub clock: Arc<dyn Clock>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            load_policy: LoadPolicy::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl StoreOptions {
    pub fn with_load_policy(mut self, load_policy: LoadPolicy) -> Self {
        self.load_policy = load_policy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
