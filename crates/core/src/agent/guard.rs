//! Exclusive run flag.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::metrics;

/// Holds the agent's running flag for the duration of one run.
///
/// The flag is cleared on drop, so every exit path (early return, error,
/// panic unwinding) releases it.
#[derive(Debug)]
pub struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    /// Set the flag if it is clear. Returns `None` when a run already holds it.
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        metrics::RUN_IN_PROGRESS.set(1);
        Some(Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        metrics::RUN_IN_PROGRESS.set(0);
    }
}
