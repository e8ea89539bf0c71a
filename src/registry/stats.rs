//! Registry statistics
//!
//! Relaxed atomic counters, readable without taking the channel lock.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the registry
#[derive(Debug, Default)]
pub struct RegistryStats {
    /// Handlers appended
    pub subscriptions: AtomicU64,
    /// Handler occurrences removed
    pub unsubscriptions: AtomicU64,
    /// Publish calls, including those that reached no handler
    pub publishes: AtomicU64,
    /// Successful handler invocations
    pub deliveries: AtomicU64,
    /// Failed or panicked handler invocations
    pub failures: AtomicU64,
    /// Last publish timestamp (Unix millis)
    pub last_publish_ms: AtomicU64,
}

impl RegistryStats {
    #[inline]
    pub fn record_subscribe(&self) {
        self.subscriptions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_unsubscribe(&self, removed: usize) {
        self.unsubscriptions
            .fetch_add(removed as u64, Ordering::Relaxed);
    }

    /// Record a completed publish
    pub fn record_publish(&self, delivered: usize, failed: usize) {
        self.publishes.fetch_add(1, Ordering::Relaxed);
        self.deliveries
            .fetch_add(delivered as u64, Ordering::Relaxed);
        self.failures.fetch_add(failed as u64, Ordering::Relaxed);
        self.last_publish_ms
            .store(Utc::now().timestamp_millis() as u64, Ordering::Release);
    }

    /// Create a snapshot of current stats
    pub fn snapshot(&self) -> RegistryStatsSnapshot {
        let last_ms = self.last_publish_ms.load(Ordering::Acquire);
        RegistryStatsSnapshot {
            subscriptions: self.subscriptions.load(Ordering::Relaxed),
            unsubscriptions: self.unsubscriptions.load(Ordering::Relaxed),
            publishes: self.publishes.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            last_publish_at: if last_ms == 0 {
                None
            } else {
                Utc.timestamp_millis_opt(last_ms as i64).single()
            },
        }
    }
}

/// Snapshot of registry statistics
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryStatsSnapshot {
    pub subscriptions: u64,
    pub unsubscriptions: u64,
    pub publishes: u64,
    pub deliveries: u64,
    pub failures: u64,
    pub last_publish_at: Option<DateTime<Utc>>,
}

impl RegistryStatsSnapshot {
    /// Fraction of attempted deliveries that failed
    pub fn failure_ratio(&self) -> f64 {
        let attempted = self.deliveries + self.failures;
        if attempted == 0 {
            0.0
        } else {
            self.failures as f64 / attempted as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_snapshot() {
        let stats = RegistryStats::default();
        assert_eq!(stats.snapshot().last_publish_at, None);

        stats.record_subscribe();
        stats.record_subscribe();
        stats.record_unsubscribe(2);
        stats.record_publish(3, 1);

        let snap = stats.snapshot();
        assert_eq!(snap.subscriptions, 2);
        assert_eq!(snap.unsubscriptions, 2);
        assert_eq!(snap.publishes, 1);
        assert_eq!(snap.deliveries, 3);
        assert_eq!(snap.failures, 1);
        assert!(snap.last_publish_at.is_some());
        assert!((snap.failure_ratio() - 0.25).abs() < f64::EPSILON);
    }
}
