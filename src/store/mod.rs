// Lockbox: Store Module
//
// A key-value mapping guarded by a session. Reads need a live session, writes
// also need the admin level, and only logout persists anything.

mod backing;
mod error;
pub mod format;
mod models;
mod repository;

pub use backing::{BackingSource, FileSource, MemorySource};
pub use error::StoreError;
pub use models::AccessLevel;
pub use repository::AccessControlledStore;
