use crate::domain::models::UserId;
use dashmap::DashMap;
use std::collections::BTreeSet;

/// Directed follow edges, keyed by follower.
///
/// Followee sets are ordered so every read walks followees in the same order.
#[derive(Debug, Default)]
pub struct SocialGraph {
    following: DashMap<UserId, BTreeSet<UserId>>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent create follow; returns true if the edge is new.
    pub fn follow(&self, follower_id: UserId, followee_id: UserId) -> bool {
        self.following
            .entry(follower_id)
            .or_default()
            .insert(followee_id)
    }

    /// Idempotent delete; returns true if an edge was removed.
    pub fn unfollow(&self, follower_id: UserId, followee_id: UserId) -> bool {
        self.following
            .get_mut(&follower_id)
            .map(|mut followees| followees.remove(&followee_id))
            .unwrap_or(false)
    }

    pub fn is_following(&self, follower_id: UserId, followee_id: UserId) -> bool {
        self.following
            .get(&follower_id)
            .map(|followees| followees.contains(&followee_id))
            .unwrap_or(false)
    }

    /// Snapshot of the users `user_id` follows, ascending by id
    pub fn followees_of(&self, user_id: UserId) -> Vec<UserId> {
        self.following
            .get(&user_id)
            .map(|followees| followees.iter().copied().collect())
            .unwrap_or_default()
    }
}
