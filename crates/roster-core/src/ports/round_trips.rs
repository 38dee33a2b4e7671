//! Statement counter shared between the store adapter and its callers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts statements executed against the store.
///
/// Clones share the same counter. Used to observe how many round trips a
/// read costs (lazy team resolution vs. fetch join).
#[derive(Debug, Clone, Default)]
pub struct RoundTrips(Arc<AtomicU64>);

impl RoundTrips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one executed statement.
    pub fn record(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Statements recorded so far.
    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Statements recorded since `start`, a value previously returned by
    /// [`count`](Self::count).
    pub fn since(&self, start: u64) -> u64 {
        self.count().saturating_sub(start)
    }
}
