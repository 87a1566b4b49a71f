pub mod content;
pub mod engagement;
pub mod graph;
pub mod profiles;

pub use content::{ContentStore, PostLocation, Timeline};
pub use engagement::EngagementStore;
pub use graph::SocialGraph;
pub use profiles::ProfileRepository;
