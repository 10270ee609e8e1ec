// Lockbox: Session lifecycle
//
// State machine: Unstarted -> Active -> Expired, with `start` returning to
// Active from any state. Expiry is evaluated lazily against the clock on
// every query; nothing is cached and there is no background timer.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::SessionError;

/// Where a session currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Unstarted,
    Active,
    Expired,
}

/// A time-limited session identified by its expiry instant.
#[derive(Debug)]
pub struct Session {
    duration: TimeDelta,
    /// `None` until the first `start()` (or `expire()`).
    expiry: Option<DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Create an unstarted session that will last `duration_secs` once started.
    pub fn new(duration_secs: u64) -> Result<Self, SessionError> {
        Self::with_clock(duration_secs, Arc::new(SystemClock))
    }

    /// Create an unstarted session that reads time from `clock`.
    pub fn with_clock(duration_secs: u64, clock: Arc<dyn Clock>) -> Result<Self, SessionError> {
        if duration_secs == 0 {
            return Err(SessionError::InvalidDuration(duration_secs));
        }
        let duration = i64::try_from(duration_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or(SessionError::InvalidDuration(duration_secs))?;

        Ok(Self {
            duration,
            expiry: None,
            clock,
        })
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// The expiry instant, if the session has ever been started or expired.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    /// Start (or restart) the session. Restarting resets the expiry to
    /// now + duration; it does not extend the previous window.
    pub fn start(&mut self) {
        let now = self.clock.now();
        let expiry = now
            .checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        if self.expiry.is_some() {
            tracing::debug!(expires_at = %expiry, "Session restarted");
        } else {
            tracing::debug!(expires_at = %expiry, "Session started");
        }
        self.expiry = Some(expiry);
    }

    /// Force the session to expire now.
    pub fn expire(&mut self) {
        let now = self.clock.now();
        self.expiry = Some(now);
        tracing::debug!(expired_at = %now, "Session expired explicitly");
    }

    /// Check whether the session has expired.
    /// Fails with `InvalidState` if the session was never started.
    pub fn has_expired(&self) -> Result<bool, SessionError> {
        let (now, expiry) = self.observe()?;
        Ok(is_past(now, expiry))
    }

    /// Whole seconds left before expiry, or 0 once expired.
    pub fn time_until_expiry(&self) -> Result<u64, SessionError> {
        let (now, expiry) = self.observe()?;
        if is_past(now, expiry) {
            return Ok(0);
        }
        Ok(whole_seconds(expiry - now))
    }

    /// Whole seconds since expiry, or 0 while still alive.
    pub fn time_since_expiry(&self) -> Result<u64, SessionError> {
        let (now, expiry) = self.observe()?;
        if !is_past(now, expiry) {
            return Ok(0);
        }
        Ok(whole_seconds(now - expiry))
    }

    /// Require the session to be alive.
    ///
    /// This is the gate every protected operation goes through. An expired
    /// session yields `SessionError::Expired` carrying how long ago it ended.
    pub fn require_session(&self) -> Result<(), SessionError> {
        let (now, expiry) = self.observe()?;
        if is_past(now, expiry) {
            return Err(SessionError::Expired {
                seconds_since: whole_seconds(now - expiry),
            });
        }
        Ok(())
    }

    /// Non-failing view of the lifecycle state.
    pub fn state(&self) -> SessionState {
        match self.observe() {
            Err(_) => SessionState::Unstarted,
            Ok((now, expiry)) if is_past(now, expiry) => SessionState::Expired,
            Ok(_) => SessionState::Active,
        }
    }

    /// Read the clock once alongside the expiry so each query answers for a
    /// single instant.
    fn observe(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), SessionError> {
        let expiry = self.expiry.ok_or(SessionError::InvalidState)?;
        Ok((self.clock.now(), expiry))
    }
}

/// The session is still alive at the expiry instant itself.
fn is_past(now: DateTime<Utc>, expiry: DateTime<Utc>) -> bool {
    now > expiry
}

/// Floor a non-negative delta to whole seconds.
fn whole_seconds(delta: TimeDelta) -> u64 {
    u64::try_from(delta.num_seconds()).unwrap_or(0)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
