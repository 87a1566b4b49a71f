//! In-memory social feed engine
//!
//! Follow graph, posts, 24-hour stories, likes and comments, with a
//! newest-first feed built by a bounded k-way merge over followees' posts.

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{FeedError, FeedResult};
pub use services::SocialFeedService;
