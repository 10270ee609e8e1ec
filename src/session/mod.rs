// Lockbox: Session Module
//
// A time-bounded liveness window. Every protected store operation asks the
// session whether it is still alive before touching data.

mod clock;
mod error;
mod lifecycle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use lifecycle::{Session, SessionState};
