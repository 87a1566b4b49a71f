//! Feed composition
//!
//! Bounded k-way merge of per-user post logs. Each log is sorted oldest to
//! newest with strictly decreasing sequence numbers, so its newest post has
//! the smallest sequence. A min-heap holds at most one cursor per source;
//! popping yields the newest remaining post across all sources, and the
//! popped source pushes its next-older post.
//!
//! Cost is O((F + R) log F) for F sources and R results: the heap starts with
//! F entries and takes one replacement push per emitted id.

use crate::domain::models::{PostId, Sequence};
use crate::repository::Timeline;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Random-access view over one user's posts, oldest at index 0
pub trait PostSequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (sequence, post id) at `index`
    fn entry(&self, index: usize) -> Option<(Sequence, PostId)>;
}

impl PostSequence for Timeline {
    fn len(&self) -> usize {
        Timeline::len(self)
    }

    fn entry(&self, index: usize) -> Option<(Sequence, PostId)> {
        Timeline::entry(self, index)
    }
}

impl PostSequence for Vec<(Sequence, PostId)> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn entry(&self, index: usize) -> Option<(Sequence, PostId)> {
        self.get(index).copied()
    }
}

/// Heap cursor: the next post to emit from one source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    sequence: Sequence,
    post_id: PostId,
    source: usize,
    index: usize,
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the smallest sequence (newest) pops first.
        // Equal sequences fall back to the smaller post id.
        other
            .sequence
            .cmp(&self.sequence)
            .then_with(|| other.post_id.cmp(&self.post_id))
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Merges post logs into a bounded, newest-first list of post ids
#[derive(Debug, Clone, Copy)]
pub struct FeedComposer {
    limit: usize,
}

impl FeedComposer {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn compose<S: PostSequence + ?Sized>(&self, sources: &[&S]) -> Vec<PostId> {
        let mut heap = BinaryHeap::with_capacity(sources.len());
        for (source, log) in sources.iter().enumerate() {
            if let Some(cursor) = newest_before(*log, source, log.len()) {
                heap.push(cursor);
            }
        }

        let mut feed = Vec::with_capacity(self.limit.min(64));
        while feed.len() < self.limit {
            let Some(cursor) = heap.pop() else {
                break;
            };
            feed.push(cursor.post_id);
            if let Some(older) = newest_before(sources[cursor.source], cursor.source, cursor.index)
            {
                heap.push(older);
            }
        }
        feed
    }
}

/// Cursor for the newest post strictly below position `end`
fn newest_before<S: PostSequence + ?Sized>(log: &S, source: usize, end: usize) -> Option<Cursor> {
    let index = end.checked_sub(1)?;
    let (sequence, post_id) = log.entry(index)?;
    Some(Cursor {
        sequence,
        post_id,
        source,
        index,
    })
}
