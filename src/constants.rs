//! Crate-wide constants and default configuration values
//!
//! Every magic number used by the client lives here so that defaults are easy
//! to find and tweak in one place.

/// Base URL of the public Ausmash API
pub const DEFAULT_ENDPOINT: &str = "https://api.ausmash.com.au";

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-ApiKey";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Default number of entries kept in the in-memory response cache
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Longest response body (in characters) copied into an API error message
pub const MAX_ERROR_BODY_CHARS: usize = 500;

/// Cache TTL (Time To Live) values in seconds
pub mod cache_ttl {
    /// Default TTL for cached GET responses (2 days)
    pub const DEFAULT_SECONDS: u64 = 172_800;

    /// Minimum TTL for reference data that almost never changes (games, regions, characters)
    pub const REFERENCE_DATA_SECONDS: u64 = 2_592_000;

    /// Upper bound for Elo data, which is recalculated weekly
    pub const ELO_SECONDS: u64 = 604_800;
}

/// Retry configuration
pub mod retry {
    /// Maximum number of retries after the first attempt
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;

    /// Jitter applied to each backoff delay, as a fraction of the delay
    pub const JITTER_FRACTION: f64 = 0.2;
}

/// Rate limit configuration
pub mod rate_limit {
    /// Default name of the header carrying the remaining request quota
    pub const REMAINING_HEADER: &str = "X-RateLimit-Remaining";

    /// Default name of the header carrying the quota reset time
    pub const RESET_HEADER: &str = "X-RateLimit-Reset";

    /// Reset values at or above this are Unix timestamps, below it they are seconds from now
    pub const EPOCH_THRESHOLD: i64 = 1_000_000_000;

    /// Longest block a server header can impose (1 day); larger values are clamped
    pub const MAX_BLOCK_SECONDS: u64 = 86_400;

    /// Client-side request windows as (max requests, window length in seconds)
    pub const WINDOWS: [(u32, u64); 3] = [(200, 1), (5_000, 60), (300_000, 3_600)];
}

/// Environment variable names
pub mod env_vars {
    /// API key
    pub const API_KEY: &str = "AUSMASH_API_KEY";

    /// API endpoint override
    pub const ENDPOINT: &str = "AUSMASH_ENDPOINT";

    /// HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "AUSMASH_HTTP_TIMEOUT";

    /// Response cache TTL in seconds (0 disables caching)
    pub const CACHE_TTL: &str = "AUSMASH_CACHE_TTL";

    /// Whether to sleep instead of failing when a client-side window is full
    pub const SLEEP_ON_RATE_LIMIT: &str = "AUSMASH_SLEEP_ON_RATE_LIMIT";

    /// Log file path override
    pub const LOG_FILE: &str = "AUSMASH_LOG_FILE";
}
