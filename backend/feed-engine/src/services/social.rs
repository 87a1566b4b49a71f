use crate::config::Config;
use crate::domain::models::{Comment, Post, PostId, PostView, Profile, Story, StoryId, UserId};
use crate::domain::{Clock, SystemClock};
use crate::error::{FeedError, FeedResult};
use crate::metrics;
use crate::repository::{ContentStore, EngagementStore, ProfileRepository, SocialGraph, Timeline};
use crate::services::feed::FeedComposer;
use crate::services::stories::StoryFilter;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Social feed facade: profiles, follow graph, content, engagement and reads.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SocialFeedService {
    config: Arc<Config>,
    clock: Arc<dyn Clock>,
    profiles: Arc<ProfileRepository>,
    graph: Arc<SocialGraph>,
    content: Arc<ContentStore>,
    engagement: Arc<EngagementStore>,
    composer: FeedComposer,
    stories: StoryFilter,
}

impl SocialFeedService {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        config.validate().context("Invalid feed engine configuration")?;
        let window = chrono::Duration::from_std(config.feed.story_ttl())
            .context("Story window out of range")?;
        Ok(Self {
            composer: FeedComposer::new(config.feed.limit),
            stories: StoryFilter::new(window),
            config: Arc::new(config),
            clock,
            profiles: Arc::new(ProfileRepository::new()),
            graph: Arc::new(SocialGraph::new()),
            content: Arc::new(ContentStore::new()),
            engagement: Arc::new(EngagementStore::new()),
        })
    }

    // ========== Profiles ==========

    /// Create or replace a profile; replacing resets its counters
    pub fn create_profile(
        &self,
        user_id: UserId,
        username: &str,
        bio: &str,
    ) -> FeedResult<Profile> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FeedError::InvalidInput("username must not be empty".into()));
        }
        let max = self.config.limits.max_username_len;
        if username.chars().count() > max {
            warn!(user_id, "Rejected username over {} characters", max);
            return Err(FeedError::InvalidInput(format!(
                "username exceeds {} characters",
                max
            )));
        }

        let profile = Profile::new(user_id, username.to_string(), bio.to_string());
        let replaced = self.profiles.upsert(profile.clone());
        debug!(user_id, replaced, "Profile stored");
        Ok(profile)
    }

    pub fn get_profile(&self, user_id: UserId) -> Option<Profile> {
        self.profiles.get(user_id)
    }

    // ========== Follow graph ==========

    /// Follow a user. Returns false when the edge already existed.
    pub fn follow(&self, follower_id: UserId, followee_id: UserId) -> bool {
        let created = self.graph.follow(follower_id, followee_id);
        if created {
            self.profiles.record_follow(follower_id, followee_id);
            metrics::record_engagement("follow");
        }
        debug!(follower_id, followee_id, created, "Follow");
        created
    }

    /// Unfollow a user. Returns false when there was no edge.
    pub fn unfollow(&self, follower_id: UserId, followee_id: UserId) -> bool {
        let removed = self.graph.unfollow(follower_id, followee_id);
        if removed {
            self.profiles.record_unfollow(follower_id, followee_id);
            metrics::record_engagement("unfollow");
        }
        debug!(follower_id, followee_id, removed, "Unfollow");
        removed
    }

    pub fn is_following(&self, follower_id: UserId, followee_id: UserId) -> bool {
        self.graph.is_following(follower_id, followee_id)
    }

    pub fn followees(&self, user_id: UserId) -> Vec<UserId> {
        self.graph.followees_of(user_id)
    }

    // ========== Content ==========

    pub fn post_content(&self, user_id: UserId, post_id: PostId, caption: &str) -> FeedResult<Post> {
        let max = self.config.limits.max_caption_len;
        if caption.chars().count() > max {
            warn!(user_id, post_id, "Rejected caption over {} characters", max);
            return Err(FeedError::InvalidInput(format!(
                "caption exceeds {} characters",
                max
            )));
        }

        let post = self
            .content
            .create_post(user_id, post_id, caption.to_string(), self.clock.now())?;
        self.profiles.increment_post_count(user_id);
        metrics::record_content_created("post");
        debug!(user_id, post_id, sequence = post.sequence, "Post created");
        Ok(post)
    }

    pub fn add_story(&self, user_id: UserId, story_id: StoryId) -> Story {
        let story = self.content.create_story(user_id, story_id, self.clock.now());
        metrics::record_content_created("story");
        debug!(user_id, story_id, sequence = story.sequence, "Story added");
        story
    }

    /// A user's posts, oldest first
    pub fn posts_of(&self, user_id: UserId) -> Vec<Post> {
        self.content.posts_of(user_id)
    }

    /// A user's stories, oldest first, expired ones included
    pub fn stories_of(&self, user_id: UserId) -> Vec<Story> {
        self.content.stories_of(user_id)
    }

    /// Post with live like/comment counts
    pub fn get_post(&self, post_id: PostId) -> Option<PostView> {
        let post = self.content.find_post(post_id)?;
        let (likes, comments) = self.engagement.counts(post_id);
        Some(PostView::new(&post, likes, comments))
    }

    // ========== Engagement ==========

    /// Like a post (idempotent). Returns the like count after the call.
    pub fn like_post(&self, user_id: UserId, post_id: PostId) -> FeedResult<usize> {
        if !self.content.contains_post(post_id) {
            return Err(FeedError::PostNotFound(post_id));
        }
        let (created, count) = self.engagement.like(user_id, post_id);
        if created {
            metrics::record_engagement("like");
        }
        debug!(user_id, post_id, created, like_count = count, "Like");
        Ok(count)
    }

    /// Unlike a post. Unknown posts and missing likes are no-ops.
    /// Returns the like count after the call.
    pub fn unlike_post(&self, user_id: UserId, post_id: PostId) -> usize {
        let (removed, count) = self.engagement.unlike(user_id, post_id);
        if removed {
            metrics::record_engagement("unlike");
        }
        debug!(user_id, post_id, removed, like_count = count, "Unlike");
        count
    }

    pub fn has_liked(&self, user_id: UserId, post_id: PostId) -> bool {
        self.engagement.has_liked(user_id, post_id)
    }

    pub fn add_comment(&self, user_id: UserId, post_id: PostId, text: &str) -> FeedResult<Comment> {
        if text.trim().is_empty() {
            return Err(FeedError::InvalidInput("comment must not be empty".into()));
        }
        let max = self.config.limits.max_comment_len;
        if text.chars().count() > max {
            warn!(user_id, post_id, "Rejected comment over {} characters", max);
            return Err(FeedError::InvalidInput(format!(
                "comment exceeds {} characters",
                max
            )));
        }
        if !self.content.contains_post(post_id) {
            return Err(FeedError::PostNotFound(post_id));
        }

        let (comment, count) =
            self.engagement
                .comment(user_id, post_id, text.to_string(), self.clock.now());
        metrics::record_engagement("comment");
        debug!(user_id, post_id, comment_count = count, "Comment added");
        Ok(comment)
    }

    /// Comment log in insertion order; empty for unknown posts
    pub fn get_comments(&self, post_id: PostId) -> Vec<Comment> {
        metrics::record_read("comments");
        self.engagement.comments_of(post_id)
    }

    pub fn like_count(&self, post_id: PostId) -> usize {
        self.engagement.like_count(post_id)
    }

    pub fn comment_count(&self, post_id: PostId) -> usize {
        self.engagement.comment_count(post_id)
    }

    // ========== Reads ==========

    /// Newest posts from the user and everyone they follow, newest first
    #[instrument(skip(self))]
    pub fn get_feed(&self, user_id: UserId) -> Vec<PostId> {
        metrics::record_read("feed");
        let started = Instant::now();

        let mut authors = self.graph.followees_of(user_id);
        if !authors.contains(&user_id) {
            authors.push(user_id);
        }

        let timelines: Vec<Timeline> = authors
            .iter()
            .filter_map(|author| self.content.timeline(*author))
            .collect();
        let sources: Vec<&Timeline> = timelines.iter().collect();
        let feed = self.composer.compose(&sources);

        metrics::record_feed_composed(started.elapsed(), feed.len());
        debug!(sources = sources.len(), returned = feed.len(), "Feed composed");
        feed
    }

    /// Same order as `get_feed`, with live counts attached
    pub fn get_feed_posts(&self, user_id: UserId) -> Vec<PostView> {
        self.get_feed(user_id)
            .into_iter()
            .filter_map(|post_id| self.get_post(post_id))
            .collect()
    }

    /// Active stories of followed users, grouped by followee.
    /// The user's own stories are not included.
    pub fn get_stories(&self, user_id: UserId) -> Vec<StoryId> {
        self.get_stories_at(user_id, self.clock.now())
    }

    #[instrument(skip(self))]
    pub fn get_stories_at(&self, user_id: UserId, now: DateTime<Utc>) -> Vec<StoryId> {
        metrics::record_read("stories");
        let logs = self
            .graph
            .followees_of(user_id)
            .into_iter()
            .map(|followee| self.content.stories_of(followee));
        let active = self.stories.collect_grouped(logs, now);
        debug!(returned = active.len(), "Stories filtered");
        active
    }
}
