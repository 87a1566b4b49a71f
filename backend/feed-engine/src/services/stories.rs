use crate::domain::models::{Story, StoryId};
use chrono::{DateTime, Duration, Utc};

/// A story is visible while its age is strictly below the window
pub fn is_visible(story: &Story, now: DateTime<Utc>, window: Duration) -> bool {
    now.signed_duration_since(story.created_at) < window
}

/// Selects active stories at an explicit point in time.
///
/// Never caches: every call re-evaluates against the `now` it is given.
#[derive(Debug, Clone, Copy)]
pub struct StoryFilter {
    window: Duration,
}

impl StoryFilter {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Ids of the visible stories in one log, in stored order
    pub fn visible<'a, I>(&self, stories: I, now: DateTime<Utc>) -> impl Iterator<Item = StoryId> + 'a
    where
        I: IntoIterator<Item = &'a Story>,
        I::IntoIter: 'a,
    {
        let window = self.window;
        stories
            .into_iter()
            .filter(move |story| is_visible(story, now, window))
            .map(|story| story.story_id)
    }

    /// Concatenate visible stories log by log.
    /// Output stays grouped by log; it is not merged by time.
    pub fn collect_grouped<L>(&self, logs: L, now: DateTime<Utc>) -> Vec<StoryId>
    where
        L: IntoIterator,
        L::Item: AsRef<[Story]>,
    {
        let mut active = Vec::new();
        for log in logs {
            active.extend(self.visible(log.as_ref(), now));
        }
        active
    }
}
