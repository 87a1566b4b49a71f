use crate::domain::models::{Comment, PostId, UserId};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::HashSet;

/// Like set and comment log of one post, guarded together
#[derive(Debug, Default)]
struct Engagement {
    likes: HashSet<UserId>,
    comments: Vec<Comment>,
}

/// Canonical likes and comments, keyed by post id.
///
/// Counts are never stored; they are the live sizes of the set and the log,
/// read under the same entry lock that guards mutation.
#[derive(Debug, Default)]
pub struct EngagementStore {
    posts: DashMap<PostId, Engagement>,
}

impl EngagementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a like (idempotent).
    /// Returns (was_created, like_count)
    pub fn like(&self, user_id: UserId, post_id: PostId) -> (bool, usize) {
        let mut engagement = self.posts.entry(post_id).or_default();
        let created = engagement.likes.insert(user_id);
        (created, engagement.likes.len())
    }

    /// Remove a like (idempotent).
    /// Returns (was_removed, like_count)
    pub fn unlike(&self, user_id: UserId, post_id: PostId) -> (bool, usize) {
        match self.posts.get_mut(&post_id) {
            Some(mut engagement) => {
                let removed = engagement.likes.remove(&user_id);
                (removed, engagement.likes.len())
            }
            None => (false, 0),
        }
    }

    /// Append a comment; returns the stored entry and the new comment count
    pub fn comment(
        &self,
        user_id: UserId,
        post_id: PostId,
        text: String,
        created_at: DateTime<Utc>,
    ) -> (Comment, usize) {
        let comment = Comment {
            user_id,
            text,
            created_at,
        };
        let mut engagement = self.posts.entry(post_id).or_default();
        engagement.comments.push(comment.clone());
        (comment, engagement.comments.len())
    }

    /// Comment log in insertion order
    pub fn comments_of(&self, post_id: PostId) -> Vec<Comment> {
        self.posts
            .get(&post_id)
            .map(|engagement| engagement.comments.clone())
            .unwrap_or_default()
    }

    pub fn has_liked(&self, user_id: UserId, post_id: PostId) -> bool {
        self.posts
            .get(&post_id)
            .map(|engagement| engagement.likes.contains(&user_id))
            .unwrap_or(false)
    }

    /// (like_count, comment_count) read atomically
    pub fn counts(&self, post_id: PostId) -> (usize, usize) {
        self.posts
            .get(&post_id)
            .map(|engagement| (engagement.likes.len(), engagement.comments.len()))
            .unwrap_or((0, 0))
    }

    pub fn like_count(&self, post_id: PostId) -> usize {
        self.counts(post_id).0
    }

    pub fn comment_count(&self, post_id: PostId) -> usize {
        self.counts(post_id).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_is_idempotent() {
        let store = EngagementStore::new();
        assert_eq!(store.like(2, 101), (true, 1));
        assert_eq!(store.like(2, 101), (false, 1));
        assert_eq!(store.like(3, 101), (true, 2));
        assert_eq!(store.like_count(101), 2);
    }

    #[test]
    fn test_like_then_unlike_restores_count() {
        let store = EngagementStore::new();
        store.like(3, 101);
        let before = store.like_count(101);

        store.like(2, 101);
        let (removed, count) = store.unlike(2, 101);

        assert!(removed);
        assert_eq!(count, before);
        assert!(!store.has_liked(2, 101));
    }

    #[test]
    fn test_unlike_without_like_is_noop() {
        let store = EngagementStore::new();
        assert_eq!(store.unlike(2, 101), (false, 0));

        store.like(3, 101);
        assert_eq!(store.unlike(2, 101), (false, 1));
        assert_eq!(store.unlike(2, 101), (false, 1));
    }

    #[test]
    fn test_comments_keep_insertion_order() {
        let store = EngagementStore::new();
        let now = Utc::now();
        store.comment(2, 101, "first".into(), now);
        let (_, count) = store.comment(1, 101, "second".into(), now);

        assert_eq!(count, 2);
        let texts: Vec<String> = store.comments_of(101).into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(store.counts(101), (0, 2));
    }

    #[test]
    fn test_posts_are_isolated() {
        let store = EngagementStore::new();
        store.like(1, 101);
        store.comment(1, 102, "hi".into(), Utc::now());

        assert_eq!(store.counts(101), (1, 0));
        assert_eq!(store.counts(102), (0, 1));
        assert!(store.comments_of(103).is_empty());
    }
}
