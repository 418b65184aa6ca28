//! Shared performance counters.

use std::sync::{Arc, Mutex, MutexGuard};
use tunebridge_domain::PerformanceStats;

/// Cloneable handle to one set of [`PerformanceStats`].
///
/// Updates go through a mutex so concurrent message handlers never lose a
/// sample.
#[derive(Clone, Default)]
pub struct SharedStats {
    inner: Arc<Mutex<PerformanceStats>>,
}

impl SharedStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, processing_time_ms: f64) {
        self.lock().record_request(processing_time_ms);
    }

    pub fn record_cache_lookup(&self, hit: bool) {
        self.lock().record_cache_lookup(hit);
    }

    /// Copy of the current counters.
    pub fn snapshot(&self) -> PerformanceStats {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PerformanceStats> {
        // Counters stay usable even if a holder panicked mid-update.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let stats = SharedStats::new();
        let other = stats.clone();
        stats.record_request(10.0);
        other.record_request(30.0);
        other.record_cache_lookup(true);

        let snap = stats.snapshot();
        assert_eq!(snap.total_requests, 2);
        assert_eq!(snap.avg_processing_time_ms, 20.0);
        assert_eq!(snap.cache_hits, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_are_not_lost() {
        let stats = SharedStats::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = stats.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..100 {
                    stats.record_request(5.0);
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        let snap = stats.snapshot();
        assert_eq!(snap.total_requests, 800);
        assert!((snap.avg_processing_time_ms - 5.0).abs() < 1e-9);
    }
}
