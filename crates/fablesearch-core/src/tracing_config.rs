//! Tracing conventions for fablesearch.
//!
//! This module fixes the span and field names used across the workspace so
//! that consumers can filter and query fablesearch telemetry consistently.
//! Subscriber setup is left to the consumer: bring your own
//! `tracing-subscriber` configuration.

use tracing::Level;

/// Target prefix used by all fablesearch tracing spans and events.
///
/// Consumers can use this to filter fablesearch logs:
/// ```text
/// RUST_LOG=fablesearch=debug
/// ```
pub const TARGET_PREFIX: &str = "fablesearch";

/// Standard tracing span names used across the pipeline.
pub mod span_names {
    /// Root span for one tiered search.
    pub const SEARCH: &str = "fablesearch::search";
    /// One tier attempt inside a search.
    pub const TIER_ATTEMPT: &str = "fablesearch::tier_attempt";
    /// Quality assessment of a result set.
    pub const ASSESS: &str = "fablesearch::assess";
    /// Weight recommendation from query text.
    pub const RECOMMEND: &str = "fablesearch::recommend";
    /// Batch fan-out and merge.
    pub const BATCH: &str = "fablesearch::batch";
}

/// Standard structured field names used in tracing events.
pub mod field_names {
    pub const TIER: &str = "tier";
    pub const LIMIT: &str = "limit";
    pub const RESULT_COUNT: &str = "result_count";
    pub const DURATION_MS: &str = "duration_ms";
    pub const GRADE: &str = "grade";
    pub const DIVERSITY: &str = "diversity";
    pub const PRESET: &str = "preset";
    pub const KEYWORD_HITS: &str = "keyword_hits";
    pub const CLASSIFICATION: &str = "classification";
}

/// Parse a log level string (case-insensitive).
///
/// Recognized values: `trace`, `debug`, `info`, `warn`, `error`.
/// Returns `None` for unrecognized strings.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Returns the recommended `tracing::Level` for the given environment.
///
/// Checks `FABLESEARCH_LOG_LEVEL` first, then falls back to the provided
/// default.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var("FABLESEARCH_LOG_LEVEL")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}
