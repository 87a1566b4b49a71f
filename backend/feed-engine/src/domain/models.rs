use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Externally supplied identifiers; never assumed dense or small
pub type UserId = i64;
pub type PostId = i64;
pub type StoryId = i64;

/// Creation order stamp. Smaller means newer.
pub type Sequence = i64;

/// Profile entity - username, bio and denormalized activity counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub username: String,
    pub bio: String,
    pub post_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
}

impl Profile {
    pub fn new(user_id: UserId, username: String, bio: String) -> Self {
        Self {
            user_id,
            username,
            bio,
            post_count: 0,
            follower_count: 0,
            following_count: 0,
        }
    }
}

/// Post entity - immutable once stored; counts live in the engagement store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub user_id: UserId,
    pub post_id: PostId,
    pub caption: String,
    pub sequence: Sequence,
    pub created_at: DateTime<Utc>,
}

/// Story entity - visible for a fixed window after `created_at`, never deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub user_id: UserId,
    pub story_id: StoryId,
    pub sequence: Sequence,
    pub created_at: DateTime<Utc>,
}

/// Comment entity - append-only log entry on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Post with live engagement counts, as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub post_id: PostId,
    pub user_id: UserId,
    pub caption: String,
    pub sequence: Sequence,
    pub created_at: i64,
    pub like_count: usize,
    pub comment_count: usize,
}

impl PostView {
    pub fn new(post: &Post, like_count: usize, comment_count: usize) -> Self {
        Self {
            post_id: post.post_id,
            user_id: post.user_id,
            caption: post.caption.clone(),
            sequence: post.sequence,
            created_at: post.created_at.timestamp(),
            like_count,
            comment_count,
        }
    }
}
