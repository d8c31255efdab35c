//! Integration tests for resilience module
//!
//! Tests the circuit breaker state machine and backoff calculation through
//! the public API, with a mock clock driving time.

#![cfg(feature = "runtime")]

use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use suitegate_common::resilience::{
    backoff_delay_at, parse_retry_after, transition, BreakerConfig, BreakerEvent, BreakerState,
    CircuitBreaker, CircuitStatus, FnClock, MockClock,
};

fn breaker(threshold: u32, window_ms: u64) -> (CircuitBreaker<MockClock>, MockClock) {
    let clock = MockClock::new();
    let config = BreakerConfig::new(threshold, Duration::from_millis(window_ms))
        .expect("valid breaker config");
    let breaker = CircuitBreaker::with_clock(config, clock.clone()).expect("valid breaker");
    (breaker, clock)
}

/// Validates the open/reset cycle for threshold 3 and a 1000ms window.
///
/// # Test Steps
/// 1. Record two failures: breaker stays closed
/// 2. Record a third failure: breaker opens and reports it
/// 3. Advance the clock 1500ms past the last failure
/// 4. Verify the breaker closed and the failure count reset to zero
#[test]
fn test_breaker_open_and_reset_cycle() {
    let (mut breaker, clock) = breaker(3, 1000);

    assert!(!breaker.record_failure());
    assert!(!breaker.record_failure());
    assert!(!breaker.is_open());

    assert!(breaker.record_failure(), "third failure should open the circuit");
    assert!(breaker.is_open());

    clock.advance_millis(1500);
    assert!(!breaker.is_open());
    assert_eq!(breaker.failure_count(), 0);
}

/// Validates that the breaker opens exactly at the threshold, never before.
///
/// Runs the failure sequence for several thresholds and checks `is_open`
/// after every recorded failure.
#[test]
fn test_breaker_opens_exactly_at_threshold() {
    for threshold in 1..=6 {
        let (mut breaker, _clock) = breaker(threshold, 10_000);
        for failures in 1..=threshold + 2 {
            breaker.record_failure();
            assert_eq!(
                breaker.is_open(),
                failures >= threshold,
                "threshold {threshold}, after {failures} failures"
            );
        }
    }
}

/// Validates that a success resets the breaker from any state.
///
/// # Test Steps
/// 1. Drive the breaker to open
/// 2. Record a success
/// 3. Verify closed with zero failures, and that the full threshold is
///    needed to open it again
#[test]
fn test_success_resets_from_any_state() {
    let (mut breaker, _clock) = breaker(2, 10_000);

    breaker.record_failure();
    breaker.record_failure();
    assert!(breaker.is_open());

    breaker.record_success();
    assert!(!breaker.is_open());
    assert_eq!(breaker.failure_count(), 0);

    assert!(!breaker.record_failure());
    assert!(breaker.record_failure());
}

/// Validates that reset requires the window to be strictly exceeded.
#[test]
fn test_reset_window_boundary() {
    let (mut breaker, clock) = breaker(1, 1000);
    breaker.record_failure();

    clock.advance_millis(1000);
    assert!(breaker.is_open(), "exactly the window is not enough");

    clock.advance_millis(1);
    assert!(!breaker.is_open());
}

/// Validates that a failure right after an auto-reset does not reopen the
/// circuit on its own (there is no half-open trial state).
#[test]
fn test_no_half_open_state() {
    let (mut breaker, clock) = breaker(3, 100);
    for _ in 0..3 {
        breaker.record_failure();
    }
    clock.advance_millis(101);
    assert!(!breaker.is_open());

    assert!(!breaker.record_failure());
    assert!(!breaker.is_open());
    assert_eq!(breaker.state().status, CircuitStatus::Closed);
}

/// Validates the pure transition function without any clock.
#[test]
fn test_pure_transition_function() {
    let config = BreakerConfig::new(2, Duration::from_millis(50)).expect("valid config");
    let t0 = Instant::now();

    let first = transition(BreakerState::closed(), BreakerEvent::Failure, t0, &config);
    assert!(!first.opened);
    let second = transition(first.state, BreakerEvent::Failure, t0, &config);
    assert!(second.opened);
    assert!(second.state.is_open());

    let early = transition(second.state, BreakerEvent::Check, t0 + Duration::from_millis(50), &config);
    assert!(early.state.is_open());
    assert!(!early.reset);

    let late = transition(second.state, BreakerEvent::Check, t0 + Duration::from_millis(51), &config);
    assert!(late.reset);
    assert_eq!(late.state.failure_count, 0);
}

/// Validates that any zero-argument function can drive the breaker.
#[test]
fn test_function_clock() {
    let fixed = Instant::now();
    let config = BreakerConfig::new(1, Duration::from_secs(1)).expect("valid config");
    let mut breaker =
        CircuitBreaker::with_clock(config, FnClock(move || fixed)).expect("valid breaker");

    assert!(breaker.record_failure());
    assert!(breaker.is_open());
}

/// Validates the documented backoff examples.
///
/// # Test Steps
/// 1. attempt 1, base 1000ms, random 0.5: 2000 + floor(0.5 * 1000) = 2500
/// 2. attempt 0 with a "3" second hint: the hint wins, 3000
/// 3. An HTTP-date hint 90 seconds ahead of "now": 90000
#[test]
fn test_backoff_examples() {
    let now = Utc.with_ymd_and_hms(2015, 10, 21, 7, 26, 30).single().expect("valid date");

    assert_eq!(backoff_delay_at(now, 1, None, 1000, || 0.5), 2500);
    assert_eq!(backoff_delay_at(now, 0, Some("3"), 1000, || 0.99), 3000);
    assert_eq!(
        backoff_delay_at(now, 4, Some("Wed, 21 Oct 2015 07:28:00 GMT"), 1000, || 0.5),
        90_000
    );
}

/// Validates Retry-After edge cases: garbage falls back to exponential
/// backoff, past dates mean "retry now".
#[test]
fn test_retry_after_edge_cases() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");

    assert_eq!(parse_retry_after("soon", now), None);
    assert_eq!(parse_retry_after("-5", now), None);
    assert_eq!(parse_retry_after("Sun, 31 Dec 2023 23:59:00 GMT", now), Some(0));
    assert_eq!(backoff_delay_at(now, 0, Some("soon"), 400, || 0.0), 400);
    assert_eq!(backoff_delay_at(now, 3, None, 0, || 0.7), 0);
}
