//! Rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Per-client token-bucket rate limit settings.
///
/// Buckets are created lazily per client IP. Defaults allow a burst of
/// five requests refilled at five tokens per minute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enforced.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum tokens per bucket (burst size).
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Tokens refilled per minute.
    #[serde(default = "default_per_minute")]
    pub tokens_per_minute: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            burst: default_burst(),
            tokens_per_minute: default_per_minute(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_burst() -> u32 {
    5
}

fn default_per_minute() -> f64 {
    5.0
}
