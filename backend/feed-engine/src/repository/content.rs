use crate::domain::models::{Post, PostId, Sequence, Story, StoryId, UserId};
use crate::domain::SequenceCounter;
use crate::error::{FeedError, FeedResult};
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

type Log<T> = Arc<RwLock<Vec<T>>>;

/// Where a post lives: owner's log and its position in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostLocation {
    pub user_id: UserId,
    pub index: usize,
}

/// Per-user append-only post and story logs.
///
/// Each log sits behind its own lock. Sequence numbers are drawn while that
/// lock is held, so a user's storage order always matches sequence order.
/// Lock order is post index -> log; nothing takes the index while holding a log.
#[derive(Debug, Default)]
pub struct ContentStore {
    post_sequence: SequenceCounter,
    story_sequence: SequenceCounter,
    posts: DashMap<UserId, Log<Post>>,
    stories: DashMap<UserId, Log<Story>>,
    post_index: DashMap<PostId, PostLocation>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a post to the owner's log.
    ///
    /// Post ids are unique across all users; reuse is a conflict.
    pub fn create_post(
        &self,
        user_id: UserId,
        post_id: PostId,
        caption: String,
        created_at: DateTime<Utc>,
    ) -> FeedResult<Post> {
        let log = self.posts.entry(user_id).or_default().clone();

        match self.post_index.entry(post_id) {
            Entry::Occupied(existing) => Err(FeedError::Conflict(format!(
                "post {} already exists (owner {})",
                post_id,
                existing.get().user_id
            ))),
            Entry::Vacant(slot) => {
                let mut posts = log.write();
                let post = Post {
                    user_id,
                    post_id,
                    caption,
                    sequence: self.post_sequence.next(),
                    created_at,
                };
                slot.insert(PostLocation {
                    user_id,
                    index: posts.len(),
                });
                posts.push(post.clone());
                Ok(post)
            }
        }
    }

    /// Append a story to the owner's log
    pub fn create_story(
        &self,
        user_id: UserId,
        story_id: StoryId,
        created_at: DateTime<Utc>,
    ) -> Story {
        let log = self.stories.entry(user_id).or_default().clone();
        let mut stories = log.write();
        let story = Story {
            user_id,
            story_id,
            sequence: self.story_sequence.next(),
            created_at,
        };
        stories.push(story.clone());
        story
    }

    /// A user's posts, oldest first
    pub fn posts_of(&self, user_id: UserId) -> Vec<Post> {
        self.post_log(user_id)
            .map(|log| log.read().clone())
            .unwrap_or_default()
    }

    /// A user's stories, oldest first
    pub fn stories_of(&self, user_id: UserId) -> Vec<Story> {
        self.stories
            .get(&user_id)
            .map(|log| log.clone())
            .map(|log| log.read().clone())
            .unwrap_or_default()
    }

    pub fn locate_post(&self, post_id: PostId) -> Option<PostLocation> {
        self.post_index.get(&post_id).map(|location| *location)
    }

    pub fn contains_post(&self, post_id: PostId) -> bool {
        self.post_index.contains_key(&post_id)
    }

    /// Look a post up through the id index, without scanning any log
    pub fn find_post(&self, post_id: PostId) -> Option<Post> {
        let location = self.locate_post(post_id)?;
        let log = self.post_log(location.user_id)?;
        let posts = log.read();
        posts.get(location.index).cloned()
    }

    /// Read-only cursor source over a user's posts, fixed at the current length
    pub fn timeline(&self, user_id: UserId) -> Option<Timeline> {
        let log = self.post_log(user_id)?;
        let len = log.read().len();
        (len > 0).then_some(Timeline { log, len })
    }

    fn post_log(&self, user_id: UserId) -> Option<Log<Post>> {
        // Clone the Arc so the map shard is released before the log is locked
        self.posts.get(&user_id).map(|log| log.clone())
    }
}

/// Snapshot view over one user's post log.
///
/// The length is captured on creation; posts appended afterwards are not seen.
/// Every entry read takes the log's read lock only for that one record.
#[derive(Debug, Clone)]
pub struct Timeline {
    log: Log<Post>,
    len: usize,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// (sequence, post id) at `index`, oldest post at 0
    pub fn entry(&self, index: usize) -> Option<(Sequence, PostId)> {
        if index >= self.len {
            return None;
        }
        self.log
            .read()
            .get(index)
            .map(|post| (post.sequence, post.post_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_posts(posts: &[(UserId, PostId)]) -> ContentStore {
        let store = ContentStore::new();
        for (user_id, post_id) in posts {
            store
                .create_post(*user_id, *post_id, String::new(), Utc::now())
                .unwrap();
        }
        store
    }

    #[test]
    fn test_sequences_strictly_decrease_per_user() {
        let store = store_with_posts(&[(1, 101), (2, 102), (1, 103), (1, 104)]);

        let sequences: Vec<Sequence> = store.posts_of(1).iter().map(|p| p.sequence).collect();
        assert_eq!(sequences, vec![0, -2, -3]);
        assert!(sequences.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_story_sequence_is_independent_of_posts() {
        let store = store_with_posts(&[(1, 101), (1, 102)]);
        let story = store.create_story(1, 201, Utc::now());
        assert_eq!(story.sequence, 0);
        assert_eq!(store.stories_of(1).len(), 1);
    }

    #[test]
    fn test_duplicate_post_id_is_conflict() {
        let store = store_with_posts(&[(1, 101)]);
        let err = store
            .create_post(2, 101, "again".into(), Utc::now())
            .unwrap_err();

        assert!(matches!(err, FeedError::Conflict(_)));
        assert!(store.posts_of(2).is_empty());
        assert_eq!(store.locate_post(101).unwrap().user_id, 1);
    }

    #[test]
    fn test_find_post_uses_index() {
        let store = store_with_posts(&[(1, 101), (2, 102), (1, 103)]);
        assert_eq!(
            store.locate_post(103),
            Some(PostLocation {
                user_id: 1,
                index: 1
            })
        );
        assert_eq!(store.find_post(102).unwrap().user_id, 2);
        assert!(store.find_post(999).is_none());
    }

    #[test]
    fn test_timeline_snapshot_ignores_later_appends() {
        let store = store_with_posts(&[(1, 101)]);
        let timeline = store.timeline(1).unwrap();

        store.create_post(1, 102, String::new(), Utc::now()).unwrap();

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.entry(0).map(|(_, id)| id), Some(101));
        assert!(timeline.entry(1).is_none());
    }

    #[test]
    fn test_unknown_user_reads_are_empty() {
        let store = ContentStore::new();
        assert!(store.posts_of(7).is_empty());
        assert!(store.stories_of(7).is_empty());
        assert!(store.timeline(7).is_none());
    }
}
