/// Configuration management for the feed engine
///
/// Loads configuration from environment variables.
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Upper bound on the story window, 30 days
pub const MAX_STORY_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Feed composition settings
    pub feed: FeedConfig,
    /// Input limits
    pub limits: LimitsConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
}

/// Feed and story settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Maximum number of post ids returned by a feed read
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
    /// Story visibility window in seconds
    #[serde(default = "default_story_ttl_secs")]
    pub story_ttl_secs: u64,
}

/// Input validation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_username_len")]
    pub max_username_len: usize,
    #[serde(default = "default_max_caption_len")]
    pub max_caption_len: usize,
    #[serde(default = "default_max_comment_len")]
    pub max_comment_len: usize,
}

// Default values
fn default_feed_limit() -> usize {
    10
}

fn default_story_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_max_username_len() -> usize {
    30
}

fn default_max_caption_len() -> usize {
    2200
}

fn default_max_comment_len() -> usize {
    1000
}

impl FeedConfig {
    pub fn story_ttl(&self) -> Duration {
        Duration::from_secs(self.story_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                env: "development".to_string(),
            },
            feed: FeedConfig {
                limit: default_feed_limit(),
                story_ttl_secs: default_story_ttl_secs(),
            },
            limits: LimitsConfig {
                max_username_len: default_max_username_len(),
                max_caption_len: default_max_caption_len(),
                max_comment_len: default_max_comment_len(),
            },
        }
    }
}

/// Read an optional variable, falling back to `default` when unset.
/// A value that is present but unparsable is an error rather than a silent default.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        };

        let feed = FeedConfig {
            limit: env_or("FEED_LIMIT", default_feed_limit())?,
            story_ttl_secs: env_or("STORY_TTL_SECS", default_story_ttl_secs())?,
        };

        let limits = LimitsConfig {
            max_username_len: env_or("MAX_USERNAME_LEN", default_max_username_len())?,
            max_caption_len: env_or("MAX_CAPTION_LEN", default_max_caption_len())?,
            max_comment_len: env_or("MAX_COMMENT_LEN", default_max_comment_len())?,
        };

        let config = Config { app, feed, limits };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed.limit == 0 {
            bail!("FEED_LIMIT must be at least 1");
        }
        if self.feed.story_ttl_secs == 0 {
            bail!("STORY_TTL_SECS must be at least 1");
        }
        if self.feed.story_ttl_secs > MAX_STORY_TTL_SECS {
            bail!(
                "STORY_TTL_SECS must not exceed {} (got {})",
                MAX_STORY_TTL_SECS,
                self.feed.story_ttl_secs
            );
        }
        if self.limits.max_username_len == 0 {
            bail!("MAX_USERNAME_LEN must be at least 1");
        }
        Ok(())
    }
}
