pub mod clock;
pub mod models;
pub mod sequence;

pub use clock::{Clock, ManualClock, SystemClock};
pub use models::{Comment, Post, PostId, PostView, Profile, Sequence, Story, StoryId, UserId};
pub use sequence::SequenceCounter;
