use std::sync::{Mutex, PoisonError};

/// Open/closed switch guarding observer callbacks.
///
/// Callbacks run while the lock is held, so once [`close`](Self::close)
/// returns no callback is running and none will start.
#[derive(Debug)]
pub(crate) struct SessionGate {
    open: Mutex<bool>,
}

impl SessionGate {
    pub(crate) fn new() -> Self {
        Self {
            open: Mutex::new(true),
        }
    }

    pub(crate) fn close(&self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    pub(crate) fn is_open(&self) -> bool {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` if the gate is still open. Returns whether it ran.
    pub(crate) fn emit(&self, f: impl FnOnce()) -> bool {
        let open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        if *open {
            f();
        }
        *open
    }
}
