use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable handle for interrupting a render in progress.
///
/// The engine polls the token before every unit of work and before every
/// renderer operation, so a render observes a cancellation within one
/// renderer call. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
