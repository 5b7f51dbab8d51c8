//! Generation sessions: one in-flight plan build per controller.
//!
//! Starting a new session supersedes the previous one. A superseded session
//! is cancelled, its observer callbacks are silenced before `cancel` returns,
//! and its partial document is dropped.

mod controller;
mod error;
mod gate;
mod observer;

pub use controller::{SessionController, SessionHandle};
pub use error::SessionError;
pub use observer::{SessionObserver, SessionOutcome};
