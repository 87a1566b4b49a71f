pub mod feed;
pub mod social;
pub mod stories;

pub use feed::{FeedComposer, PostSequence};
pub use social::SocialFeedService;
pub use stories::StoryFilter;
