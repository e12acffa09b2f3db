//! Packet counters
//!
//! Each [`Dispatcher`](crate::Dispatcher) owns one `Metrics` block. There is no global
//! instance; counters are atomics so a dispatcher can be shared between threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Per-dispatcher packet counters
#[derive(Debug)]
pub struct Metrics {
    /// Packets successfully marshalled
    pub packets_encoded: AtomicU64,
    /// Packets successfully loaded
    pub packets_decoded: AtomicU64,
    /// Total bytes produced by marshal
    pub bytes_encoded: AtomicU64,
    /// Total bytes accepted by load
    pub bytes_decoded: AtomicU64,
    /// Marshal failures
    pub encode_errors: AtomicU64,
    /// Load failures (framing errors and oversized buffers)
    pub decode_errors: AtomicU64,
    /// Payload blocks deserialized on demand
    pub materializations: AtomicU64,
    /// Payload blocks that failed to deserialize
    pub materialization_errors: AtomicU64,
    /// Creation time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            packets_encoded: AtomicU64::new(0),
            packets_decoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            encode_errors: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            materializations: AtomicU64::new(0),
            materialization_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a marshalled packet
    pub fn packet_encoded(&self, byte_count: u64) {
        self.packets_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a loaded packet
    pub fn packet_decoded(&self, byte_count: u64) {
        self.packets_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn encode_error(&self) {
        self.encode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of deserializing a payload block
    pub fn materialized(&self, ok: bool) {
        if ok {
            self.materializations.fetch_add(1, Ordering::Relaxed);
        } else {
            self.materialization_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_encoded: self.packets_encoded.load(Ordering::Relaxed),
            packets_decoded: self.packets_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            encode_errors: self.encode_errors.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            materializations: self.materializations.load(Ordering::Relaxed),
            materialization_errors: self.materialization_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            packets_encoded = snapshot.packets_encoded,
            packets_decoded = snapshot.packets_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            bytes_decoded = snapshot.bytes_decoded,
            encode_errors = snapshot.encode_errors,
            decode_errors = snapshot.decode_errors,
            materializations = snapshot.materializations,
            materialization_errors = snapshot.materialization_errors,
            uptime_seconds = snapshot.uptime_seconds,
            "Packet metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub packets_encoded: u64,
    pub packets_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
    pub encode_errors: u64,
    pub decode_errors: u64,
    pub materializations: u64,
    pub materialization_errors: u64,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = Metrics::new();
        metrics.packet_encoded(10);
        metrics.packet_encoded(5);
        metrics.packet_decoded(15);
        metrics.decode_error();
        metrics.materialized(true);
        metrics.materialized(false);

        let snap = metrics.snapshot();
        assert_eq!(snap.packets_encoded, 2);
        assert_eq!(snap.bytes_encoded, 15);
        assert_eq!(snap.packets_decoded, 1);
        assert_eq!(snap.bytes_decoded, 15);
        assert_eq!(snap.decode_errors, 1);
        assert_eq!(snap.encode_errors, 0);
        assert_eq!(snap.materializations, 1);
        assert_eq!(snap.materialization_errors, 1);
    }
}
