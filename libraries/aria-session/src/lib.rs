//! Aria Player - Session Facade
//!
//! The single entry point a host UI drives. [`Session`] owns the
//! library store, the play queue, the transport, and lyrics sync, and
//! exposes every user-facing operation as one method. State flows out
//! as [`PlayerSnapshot`] values over a broadcast channel: call
//! [`Session::subscribe`] once, then render each snapshot as it
//! arrives.
//!
//! A host is expected to call [`Session::tick`] on a timer (a few times
//! per second); the tick settles pending seeks, advances the queue when
//! a song ends, and publishes a fresh snapshot.

mod session;
mod snapshot;

pub use session::{Session, SessionBuilder};
pub use snapshot::PlayerSnapshot;
