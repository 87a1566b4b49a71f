use anyhow::{Context, Result};
use feed_engine::{metrics, Config, SocialFeedService};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,feed_engine=debug".into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
        }))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Walk through the engine end to end with three users
fn run_walkthrough(service: &SocialFeedService) -> Result<()> {
    service.create_profile(1, "john_doe", "Photography enthusiast 📸")?;
    service.create_profile(2, "jane_smith", "Travel blogger ✈️")?;
    service.create_profile(3, "mike_jones", "Food lover 🍕")?;

    service.follow(2, 1);
    service.follow(3, 1);
    service.follow(1, 2);

    service.post_content(1, 101, "Beautiful sunset at the beach! 🌅")?;
    service.post_content(2, 102, "My morning coffee ☕")?;
    service.post_content(1, 103, "Mountain hiking adventures 🏔️")?;
    info!("Posts created");

    service.add_story(1, 201);
    service.add_story(2, 202);
    info!(stories = ?service.get_stories(2), "Stories visible to jane_smith");

    service.like_post(2, 101)?;
    service.like_post(3, 101)?;
    service.like_post(1, 102)?;
    service.add_comment(2, 101, "This is gorgeous! Where was this taken? 😍")?;
    service.add_comment(1, 102, "Looks delicious! What blend is this?")?;

    let feed = service.get_feed_posts(2);
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "user": 2, "feed": feed }))
            .context("Failed to encode feed")?
    );

    let comments = service.get_comments(101);
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "post": 101, "comments": comments }))
            .context("Failed to encode comments")?
    );

    let likes = service.unlike_post(2, 101);
    info!(post_id = 101, like_count = likes, "jane_smith unliked");

    service.unfollow(2, 1);
    info!(feed = ?service.get_feed(2), "jane_smith feed after unfollowing john_doe");

    for user_id in 1..=3 {
        if let Some(profile) = service.get_profile(user_id) {
            println!(
                "{}",
                serde_json::to_string(&profile).context("Failed to encode profile")?
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("🔧 Starting feed-engine walkthrough");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "✅ Configuration loaded: env={}, feed_limit={}, story_ttl_secs={}",
        config.app.env, config.feed.limit, config.feed.story_ttl_secs
    );

    let service = SocialFeedService::new(config)?;
    run_walkthrough(&service)?;

    if std::env::var("PRINT_METRICS").is_ok() {
        print!("{}", metrics::render());
    }
    info!("Walkthrough finished");
    Ok(())
}
