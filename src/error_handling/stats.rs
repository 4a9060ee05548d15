//! Bulk scan statistics.
//!
//! Thread-safe counters for scanned items and failures, keyed by `ScanFailure`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ScanFailure;

/// Thread-safe bulk scan statistics.
///
/// Every `ScanFailure` kind is initialized to zero on creation. Share across tasks
/// with `Arc`.
pub struct ScanStats {
    succeeded: AtomicUsize,
    failures: HashMap<ScanFailure, AtomicUsize>,
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for failure in ScanFailure::iter() {
            failures.insert(failure, AtomicUsize::new(0));
        }

        ScanStats {
            succeeded: AtomicUsize::new(0),
            failures,
        }
    }

    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment a failure counter.
    pub fn increment_failure(&self, failure: ScanFailure) {
        if let Some(counter) = self.failures.get(&failure) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in ScanStats initialization.",
                failure
            );
        }
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    pub fn failure_count(&self, failure: ScanFailure) -> usize {
        self.failures
            .get(&failure)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Logs a one-line summary followed by each non-zero failure kind.
    pub fn log_summary(&self) {
        log::info!(
            "Bulk scan finished: {} succeeded, {} failed",
            self.succeeded(),
            self.total_failures()
        );
        for failure in ScanFailure::iter() {
            let count = self.failure_count(failure);
            if count > 0 {
                log::info!("   {}: {}", failure, count);
            }
        }
    }
}
