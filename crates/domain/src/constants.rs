//! Domain-level constants

/// Client used when nothing more specific resolves
pub const DEFAULT_CLIENT_NAME: &str = "default";

/// Response field unwrapped by `results_only` projection
pub const RESULT_FIELD: &str = "result";

// Retry defaults
/// 429 retries per request
pub const DEFAULT_MAX_RATE_LIMIT_RETRIES: u32 = 3;
/// 5xx retries per request
pub const DEFAULT_MAX_SERVER_ERROR_RETRIES: u32 = 1;
/// First backoff step
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

// Circuit breaker defaults
/// Consecutive failures that open a circuit
pub const DEFAULT_BREAKER_THRESHOLD: u32 = 5;
/// Open period before auto-reset
pub const DEFAULT_BREAKER_RESET_MS: u64 = 30_000;

// Structured-detail reasons reported by the remote side
/// Reasons meaning "slow down"
pub const RATE_LIMIT_REASONS: &[&str] = &["rateLimitExceeded", "userRateLimitExceeded"];
/// Reasons meaning a quota is used up
pub const QUOTA_REASONS: &[&str] = &["quotaExceeded", "dailyLimitExceeded"];
