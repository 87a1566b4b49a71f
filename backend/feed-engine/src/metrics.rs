//! Feed Engine Metrics
//!
//! Prometheus metrics for content writes, engagement and feed reads

use once_cell::sync::Lazy;
use prometheus::proto::MetricFamily;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};
use std::time::Duration;

static CONTENT_CREATED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_engine_content_created_total",
        "Total content created (post/story)",
        &["kind"]
    )
    .expect("Failed to register content created metric")
});

static ENGAGEMENT_EVENTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_engine_engagement_events_total",
        "Total engagement mutations that changed state",
        &["action"]
    )
    .expect("Failed to register engagement events metric")
});

static READS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_engine_reads_total",
        "Total read operations",
        &["endpoint"]
    )
    .expect("Failed to register reads metric")
});

static FEED_COMPOSE_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "feed_engine_compose_duration_seconds",
        "Duration of feed merges",
        vec![0.00001, 0.0001, 0.001, 0.01, 0.1, 1.0]
    )
    .expect("Failed to register feed compose duration metric")
});

static FEED_RESULT_SIZE: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "feed_engine_feed_result_size",
        "Number of post ids returned per feed read",
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]
    )
    .expect("Failed to register feed result size metric")
});

/// Record a created post or story
pub fn record_content_created(kind: &str) {
    CONTENT_CREATED_TOTAL.with_label_values(&[kind]).inc();
}

/// Record a like/unlike/comment/follow/unfollow that changed state
pub fn record_engagement(action: &str) {
    ENGAGEMENT_EVENTS_TOTAL.with_label_values(&[action]).inc();
}

pub fn record_read(endpoint: &str) {
    READS_TOTAL.with_label_values(&[endpoint]).inc();
}

/// Record one feed merge: duration and result length
pub fn record_feed_composed(duration: Duration, size: usize) {
    FEED_COMPOSE_SECONDS.observe(duration.as_secs_f64());
    FEED_RESULT_SIZE.observe(size as f64);
}

/// Render the default registry in the Prometheus text format
pub fn render() -> String {
    encode_text(&prometheus::gather())
}

fn encode_text(families: &[MetricFamily]) -> String {
    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Encoded metrics are not valid UTF-8");
            String::new()
        }
    }
}
