//! Processing counters.

use serde::{Deserialize, Serialize};

/// Running request statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Requests that went through the model ensemble.
    pub total_requests: u64,
    /// Cumulative average latency of those requests.
    pub avg_processing_time_ms: f64,
    pub cache_lookups: u64,
    pub cache_hits: u64,
    pub cache_hit_rate: f64,
}

impl PerformanceStats {
    /// Fold one latency into the running average:
    /// `avg = (avg * (n - 1) + latency) / n`.
    pub fn record_request(&mut self, processing_time_ms: f64) {
        self.total_requests += 1;
        let n = self.total_requests as f64;
        self.avg_processing_time_ms =
            (self.avg_processing_time_ms * (n - 1.0) + processing_time_ms) / n;
    }

    pub fn record_cache_lookup(&mut self, hit: bool) {
        self.cache_lookups += 1;
        if hit {
            self.cache_hits += 1;
        }
        self.cache_hit_rate = self.cache_hits as f64 / self.cache_lookups as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_average() {
        let mut stats = PerformanceStats::default();
        stats.record_request(100.0);
        assert_eq!(stats.avg_processing_time_ms, 100.0);
        stats.record_request(200.0);
        assert_eq!(stats.avg_processing_time_ms, 150.0);
        stats.record_request(30.0);
        assert!((stats.avg_processing_time_ms - 110.0).abs() < 1e-9);
        assert_eq!(stats.total_requests, 3);
    }

    #[test]
    fn test_cache_hit_rate() {
        let mut stats = PerformanceStats::default();
        stats.record_cache_lookup(false);
        stats.record_cache_lookup(true);
        stats.record_cache_lookup(true);
        stats.record_cache_lookup(false);
        assert_eq!(stats.cache_lookups, 4);
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(stats.cache_hit_rate, 0.5);
        assert_eq!(stats.total_requests, 0);
    }
}
