use std::sync::atomic::{AtomicI64, Ordering};

use super::models::Sequence;

/// Strictly decreasing counter.
///
/// Newer content gets a numerically smaller value, so "most recent first"
/// becomes "smallest first" and a min-heap can drive the feed merge.
/// Starts at 0 and is never reset. Posts and stories each own one; their
/// values are not comparable with each other.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: AtomicI64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(0),
        }
    }

    /// Issue a value lower than every value issued before
    pub fn next(&self) -> Sequence {
        self.next.fetch_sub(1, Ordering::SeqCst)
    }
}
