// Lockbox: Library root
//
// Re-exports the session, store, and configuration modules.

pub mod config;
pub mod session;
pub mod store;

pub use config::{LoadPolicy, StoreOptions};
pub use session::{Clock, ManualClock, Session, SessionError, SessionState, SystemClock};
pub use store::{AccessControlledStore, AccessLevel, BackingSource, FileSource, MemorySource, StoreError};
