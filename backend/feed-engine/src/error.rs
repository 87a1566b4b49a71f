/// Error types for feed-engine
use thiserror::Error;

use crate::domain::models::PostId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Result type alias for engine operations
pub type FeedResult<T> = Result<T, FeedError>;
