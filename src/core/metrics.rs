//! Logger metrics for observability
//!
//! Counters describing queue and dispatch activity. Writer-internal failures
//! are invisible here by contract; only writer panics are counted.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use fanout_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.pending(), 0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Envelopes accepted into the queue
    enqueued: AtomicU64,

    /// Envelopes fanned out to the writers
    delivered: AtomicU64,

    /// Emission calls that found the queue full and had to wait
    blocked_enqueues: AtomicU64,

    /// Emission calls refused because the logger was closed
    rejected: AtomicU64,

    /// Writer calls that panicked
    writer_panics: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            blocked_enqueues: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            writer_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn blocked_enqueues(&self) -> u64 {
        self.blocked_enqueues.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn writer_panics(&self) -> u64 {
        self.writer_panics.load(Ordering::Relaxed)
    }

    /// Envelopes accepted but not yet delivered
    pub fn pending(&self) -> u64 {
        self.enqueued().saturating_sub(self.delivered())
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_blocked(&self) -> u64 {
        self.blocked_enqueues.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_writer_panic(&self) -> u64 {
        self.writer_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.blocked_enqueues.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.writer_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            delivered: AtomicU64::new(self.delivered()),
            blocked_enqueues: AtomicU64::new(self.blocked_enqueues()),
            rejected: AtomicU64::new(self.rejected()),
            writer_panics: AtomicU64::new(self.writer_panics()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.enqueued(), 0);
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.blocked_enqueues(), 0);
        assert_eq!(metrics.rejected(), 0);
        assert_eq!(metrics.writer_panics(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_rejected(), 0);
        assert_eq!(metrics.record_rejected(), 1);
        assert_eq!(metrics.rejected(), 2);
    }

    #[test]
    fn test_pending() {
        let metrics = LoggerMetrics::new();
        for _ in 0..5 {
            metrics.record_enqueued();
        }
        for _ in 0..3 {
            metrics.record_delivered();
        }
        assert_eq!(metrics.pending(), 2);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_enqueued();
        metrics.record_blocked();
        metrics.record_writer_panic();

        metrics.reset();

        assert_eq!(metrics.enqueued(), 0);
        assert_eq!(metrics.blocked_enqueues(), 0);
        assert_eq!(metrics.writer_panics(), 0);
    }

    #[test]
    fn test_metrics_clone_is_a_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_enqueued();

        let snapshot = metrics.clone();
        metrics.record_enqueued();

        assert_eq!(metrics.enqueued(), 2);
        assert_eq!(snapshot.enqueued(), 1);
    }
}
