//! Lock-free counters for the index worker

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct WorkerStats {
    pub requests: AtomicUsize,
    pub searches_completed: AtomicUsize,
    pub searches_canceled: AtomicUsize,
    pub errors: AtomicUsize,
}

impl WorkerStats {
    #[inline]
    pub fn snapshot(&self) -> WorkerStatsSnapshot {
        WorkerStatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            searches_completed: self.searches_completed.load(Ordering::Relaxed),
            searches_canceled: self.searches_canceled.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`WorkerStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStatsSnapshot {
    pub requests: usize,
    pub searches_completed: usize,
    pub searches_canceled: usize,
    pub errors: usize,
}
