//! Request hit counter.
//!
//! Backs the `/api/metrics` endpoint: each call bumps the counter, which
//! makes request deduplication by a caching client directly observable
//! (a deduplicated fetch never reaches the handler, so the count stands
//! still).

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide monotonic hit counter. Resets on restart or on demand.
#[derive(Debug, Default)]
pub struct HitCounter {
    count: AtomicU64,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new value.
    pub fn bump(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Zero the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    pub fn value(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
