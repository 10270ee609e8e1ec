// Lockbox: Access-controlled store
//
// The store owns a session and consults it before every read or write.
// Writes additionally require the admin level. Nothing reaches the backing
// source until `logout()`, which expires the session and flushes the mapping.
//
// Values are never logged. Log events carry keys, counts and the source name.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use zeroize::Zeroize;

use super::backing::{BackingSource, FileSource};
use super::format;
use super::models::AccessLevel;
use super::StoreError;
use crate::config::{LoadPolicy, StoreOptions, MISSING_KEY_SENTINEL};
use crate::session::Session;

/// A key-value mapping gated by a time-limited session and an access level.
pub struct AccessControlledStore<S: BackingSource = FileSource> {
    access_level: AccessLevel,
    session: Session,
    source: S,
    load_policy: LoadPolicy,
    /// `None` until a load succeeds on a live session, and again after logout.
    data: Option<BTreeMap<String, String>>,
}

impl AccessControlledStore<FileSource> {
    /// Log in at `access_level` (`"user"` or `"admin"`) and load the store
    /// kept at `backing_path`.
    pub fn create(access_level: &str, backing_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open(
            access_level,
            FileSource::new(backing_path),
            StoreOptions::default(),
        )
    }
}

impl<S: BackingSource> AccessControlledStore<S> {
    /// Log in at `access_level` and load from `source`.
    ///
    /// An unknown access level fails before any session is started or any
    /// data is read. If the initial load finds the session already expired,
    /// the store is still returned but holds no data until
    /// `reauthenticate()` succeeds.
    pub fn open(access_level: &str, source: S, options: StoreOptions) -> Result<Self, StoreError> {
        let access_level: AccessLevel = access_level.parse()?;

        let mut session =
            Session::with_clock(access_level.session_duration_secs(), options.clock)?;
        session.start();
        tracing::info!(
            access_level = %access_level,
            duration_secs = access_level.session_duration_secs(),
            source = %source.describe(),
            "Logged in"
        );

        let mut store = Self {
            access_level,
            session,
            source,
            load_policy: options.load_policy,
            data: None,
        };

        match store.load(false) {
            Ok(()) => {}
            Err(e) if e.requires_reauthentication() => {
                tracing::warn!(
                    source = %store.source.describe(),
                    error = %e,
                    "Initial load skipped; re-authentication required"
                );
            }
            Err(e) => return Err(e),
        }

        Ok(store)
    }

    /// Load the mapping from the backing source. Requires a live session.
    ///
    /// Under `LoadPolicy::Cached` a store that already holds data keeps it
    /// unless `force_reload` is set. A reload discards unflushed changes.
    pub fn load(&mut self, force_reload: bool) -> Result<(), StoreError> {
        if !self.should_read(force_reload)? {
            return Ok(());
        }
        let origin = self.source.describe();
        let contents = self.source.read()?;
        self.install(contents, origin)
    }

    /// Load the mapping from `source` instead of the bound backing source,
    /// with the same session and cache rules as `load`.
    ///
    /// The bound source is unchanged, so `logout()` still flushes there.
    pub fn load_from<B>(&mut self, source: &B, force_reload: bool) -> Result<(), StoreError>
    where
        B: BackingSource + ?Sized,
    {
        if !self.should_read(force_reload)? {
            return Ok(());
        }
        let contents = source.read()?;
        self.install(contents, source.describe())
    }

    /// Convenience for `load_from` with a file at `path`.
    pub fn load_path(&mut self, path: impl Into<PathBuf>, force_reload: bool) -> Result<(), StoreError> {
        self.load_from(&FileSource::new(path), force_reload)
    }

    fn should_read(&self, force_reload: bool) -> Result<bool, StoreError> {
        self.require_live("load")?;

        if self.data.is_some() && !force_reload && self.load_policy == LoadPolicy::Cached {
            tracing::debug!(source = %self.source.describe(), "Using cached store data");
            return Ok(false);
        }
        Ok(true)
    }

    fn install(&mut self, contents: Option<String>, origin: String) -> Result<(), StoreError> {
        let data = match contents {
            Some(text) => format::parse(&text)?,
            None => {
                tracing::debug!(
                    source = %origin,
                    "Backing source does not exist yet; starting empty"
                );
                BTreeMap::new()
            }
        };

        tracing::info!(source = %origin, entries = data.len(), "Store loaded");

        if let Some(mut previous) = self.data.replace(data) {
            wipe(&mut previous);
        }
        Ok(())
    }

    /// Look up `key`. Requires a live session.
    ///
    /// A missing key is not an error: it yields `"Key does not exist"`.
    pub fn view(&self, key: &str) -> Result<String, StoreError> {
        self.require_live("view")?;
        let data = self.data.as_ref().ok_or(StoreError::NotLoaded)?;

        Ok(data
            .get(key)
            .cloned()
            .unwrap_or_else(|| MISSING_KEY_SENTINEL.to_string()))
    }

    /// Insert or overwrite `key` in memory. Requires a live session and the
    /// admin level. The change is only persisted by `logout()`.
    pub fn modify(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.require_live("modify")?;

        if !self.access_level.can_modify() {
            tracing::warn!(
                access_level = %self.access_level,
                key,
                "Modify refused: insufficient access level"
            );
            return Err(StoreError::PermissionDenied);
        }

        format::validate_entry(key, value)?;
        let data = self.data.as_mut().ok_or(StoreError::NotLoaded)?;

        if let Some(mut previous) = data.insert(key.to_string(), value.to_string()) {
            previous.zeroize();
        }
        tracing::debug!(key, "Entry modified in memory");
        Ok(())
    }

    /// Expire the session and write the mapping back to the backing source.
    ///
    /// The session is expired even if the write fails; in that case the
    /// mapping stays in memory so `logout()` can be retried. A store that
    /// never loaded data leaves the backing source untouched.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.session.expire();

        let Some(data) = self.data.as_mut() else {
            tracing::info!(
                source = %self.source.describe(),
                "Logged out with no data loaded; backing source left untouched"
            );
            return Ok(());
        };

        let mut text = format::serialize(data);
        let written = self.source.write(&text);
        text.zeroize();
        written?;

        tracing::info!(
            source = %self.source.describe(),
            entries = data.len(),
            "Logged out and flushed store"
        );

        wipe(data);
        self.data = None;
        Ok(())
    }

    /// Restart the session at the same access level and load the store.
    pub fn reauthenticate(&mut self) -> Result<(), StoreError> {
        self.session.start();
        tracing::info!(access_level = %self.access_level, "Re-authenticated");
        self.load(false)
    }

    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    fn require_live(&self, operation: &str) -> Result<(), StoreError> {
        self.session.require_session().map_err(|e| {
            tracing::warn!(operation, error = %e, "Operation refused: session not alive");
            StoreError::from(e)
        })
    }
}

/// Never prints values.
impl<S: BackingSource> fmt::Debug for AccessControlledStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessControlledStore")
            .field("access_level", &self.access_level)
            .field("session", &self.session.state())
            .field("source", &self.source.describe())
            .field("load_policy", &self.load_policy)
            .field("entries", &self.data.as_ref().map(BTreeMap::len))
            .finish()
    }
}

fn wipe(data: &mut BTreeMap<String, String>) {
    for value in data.values_mut() {
        value.zeroize();
    }
    data.clear();
}

// ─── Tests ───────────────────────────────────────────────────────────────────
