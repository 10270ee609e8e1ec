// Lockbox: Clock abstraction
//
// Sessions never call `Utc::now()` directly. They read time through `Clock`,
// which lets tests and embedders drive expiry deterministically instead of
// sleeping.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Source of the current wall-clock time.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// ─── System Clock ────────────────────────────────────────────────────────────

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ─── Manual Clock ────────────────────────────────────────────────────────────

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can hand one clone to a session
/// and keep another to advance time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Creates a manual clock frozen at the current system time.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Move the clock forward (or backward, for a negative delta).
    /// Out-of-range results leave the clock where it was.
    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.lock();
        if let Some(next) = now.checked_add_signed(by) {
            *now = next;
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        if let Some(delta) = TimeDelta::try_seconds(secs) {
            self.advance(delta);
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.lock() = instant;
    }

    fn lock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        // A poisoned lock still holds a valid timestamp.
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
