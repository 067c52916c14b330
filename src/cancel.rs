use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag used to abort a runaway construction.
///
/// Clones share the same flag, so a token handed to [`BddConfig`][crate::bdd::BddConfig]
/// can be triggered from another thread, a timer or a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Re-arms the token after a cancelled run.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}
