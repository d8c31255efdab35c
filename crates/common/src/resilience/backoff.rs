//! Retry delay calculation
//!
//! Exponential backoff with additive jitter, overridden by a server-supplied
//! Retry-After hint whenever one parses. Pure: no sleeping, no I/O. The only
//! ambient inputs (current time and randomness) are parameters of
//! [`backoff_delay_at`].

use chrono::{DateTime, NaiveDateTime, Utc};

/// HTTP statuses worth retrying: throttling (429) and any server error.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || status >= 500
}

/// Interpret a Retry-After header value as a delay in milliseconds.
///
/// Accepts a non-negative integer number of seconds or an HTTP-date
/// (IMF-fixdate, RFC 850 or asctime). Dates in the past yield `0`.
/// Anything else yields `None`.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        // Too many digits for u64 still means "wait a very long time"
        return Some(value.parse::<u64>().map_or(u64::MAX, |secs| secs.saturating_mul(1000)));
    }

    let at = parse_http_date(value)?;
    let millis = (at - now).num_milliseconds();
    Some(u64::try_from(millis).unwrap_or(0))
}

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    // RFC 850 and asctime, both implicitly GMT
    ["%A, %d-%b-%y %H:%M:%S GMT", "%a %b %e %H:%M:%S %Y"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Delay before retry number `attempt` (0-based), in milliseconds.
///
/// 1. A Retry-After hint that parses wins outright.
/// 2. Otherwise `base = base_delay_ms * 2^attempt`; zero base or overflow
///    yields `0`.
/// 3. Jitter in `[0, base / 2]` is added, scaled by `random()` clamped to
///    `[0, 1]`.
pub fn backoff_delay_at<R>(
    now: DateTime<Utc>,
    attempt: u32,
    retry_after: Option<&str>,
    base_delay_ms: u64,
    random: R,
) -> u64
where
    R: FnOnce() -> f64,
{
    if let Some(delay) = retry_after.and_then(|hint| parse_retry_after(hint, now)) {
        return delay;
    }

    if base_delay_ms == 0 {
        return 0;
    }

    let Some(base) = 2u64.checked_pow(attempt).and_then(|factor| base_delay_ms.checked_mul(factor))
    else {
        return 0;
    };

    let jitter_range = base / 2;
    if jitter_range == 0 {
        return base;
    }

    let sample = random();
    let sample = if sample.is_nan() { 0.0 } else { sample.clamp(0.0, 1.0) };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let jitter = (sample * jitter_range as f64).floor() as u64;

    base.saturating_add(jitter)
}

/// [`backoff_delay_at`] against the wall clock and the thread-local RNG.
pub fn backoff_delay(attempt: u32, retry_after: Option<&str>, base_delay_ms: u64) -> u64 {
    backoff_delay_at(Utc::now(), attempt, retry_after, base_delay_ms, rand::random::<f64>)
}
