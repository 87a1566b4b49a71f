use crate::domain::models::{Profile, UserId};
use dashmap::DashMap;
use tracing::debug;

/// Repository for Profile operations
///
/// Counter updates on a user without a profile are skipped, not errors:
/// content and follow edges can exist before the profile does.
#[derive(Debug, Default)]
pub struct ProfileRepository {
    profiles: DashMap<UserId, Profile>,
}

impl ProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a profile. Returns true if a profile was replaced.
    pub fn upsert(&self, profile: Profile) -> bool {
        self.profiles.insert(profile.user_id, profile).is_some()
    }

    pub fn get(&self, user_id: UserId) -> Option<Profile> {
        self.profiles.get(&user_id).map(|p| p.clone())
    }

    pub fn exists(&self, user_id: UserId) -> bool {
        self.profiles.contains_key(&user_id)
    }

    pub fn increment_post_count(&self, user_id: UserId) {
        self.update(user_id, "post_count", |p| p.post_count += 1);
    }

    /// Apply the counter side of a newly inserted follow edge
    pub fn record_follow(&self, follower_id: UserId, followee_id: UserId) {
        // One entry guard at a time; both ids may hash to the same shard.
        self.update(follower_id, "following_count", |p| p.following_count += 1);
        self.update(followee_id, "follower_count", |p| p.follower_count += 1);
    }

    /// Apply the counter side of a removed follow edge
    pub fn record_unfollow(&self, follower_id: UserId, followee_id: UserId) {
        self.update(follower_id, "following_count", |p| {
            p.following_count = p.following_count.saturating_sub(1)
        });
        self.update(followee_id, "follower_count", |p| {
            p.follower_count = p.follower_count.saturating_sub(1)
        });
    }

    fn update(&self, user_id: UserId, counter: &'static str, f: impl FnOnce(&mut Profile)) {
        match self.profiles.get_mut(&user_id) {
            Some(mut profile) => f(profile.value_mut()),
            None => debug!(user_id, counter, "No profile; counter update skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with(ids: &[UserId]) -> ProfileRepository {
        let repo = ProfileRepository::new();
        for id in ids {
            repo.upsert(Profile::new(*id, format!("user{}", id), String::new()));
        }
        repo
    }

    #[test]
    fn test_upsert_replaces_and_resets_counters() {
        let repo = repo_with(&[1]);
        repo.increment_post_count(1);
        assert_eq!(repo.get(1).unwrap().post_count, 1);

        let replaced = repo.upsert(Profile::new(1, "renamed".into(), "bio".into()));
        assert!(replaced);

        let profile = repo.get(1).unwrap();
        assert_eq!(profile.username, "renamed");
        assert_eq!(profile.post_count, 0);
    }

    #[test]
    fn test_follow_counters_are_symmetric() {
        let repo = repo_with(&[1, 2]);
        repo.record_follow(1, 2);
        assert_eq!(repo.get(1).unwrap().following_count, 1);
        assert_eq!(repo.get(2).unwrap().follower_count, 1);

        repo.record_unfollow(1, 2);
        assert_eq!(repo.get(1).unwrap().following_count, 0);
        assert_eq!(repo.get(2).unwrap().follower_count, 0);
    }

    #[test]
    fn test_counters_never_go_negative() {
        let repo = repo_with(&[1, 2]);
        repo.record_unfollow(1, 2);
        assert_eq!(repo.get(1).unwrap().following_count, 0);
    }

    #[test]
    fn test_missing_profile_is_skipped() {
        let repo = repo_with(&[1]);
        repo.record_follow(1, 99);
        repo.increment_post_count(42);

        assert_eq!(repo.get(1).unwrap().following_count, 1);
        assert!(repo.get(99).is_none());
        assert!(!repo.exists(42));
    }
}
