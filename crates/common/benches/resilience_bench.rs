//! Resilience benchmarks
//!
//! Hot paths of the circuit breaker state machine and the backoff
//! calculator. Both run once per remote call, so they should stay cheap.
//!
//! Run with: `cargo bench --bench resilience_bench -p suitegate-common
//! --features runtime`

use std::time::{Duration, Instant};

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use suitegate_common::resilience::{
    backoff_delay_at, parse_retry_after, transition, BreakerConfig, BreakerEvent, BreakerState,
    CircuitBreaker, MockClock,
};

// ============================================================================
// Circuit Breaker Benchmarks
// ============================================================================

fn bench_circuit_breaker(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_breaker");

    group.bench_function("is_open_closed", |b| {
        let mut breaker = CircuitBreaker::with_defaults();
        b.iter(|| black_box(breaker.is_open()));
    });

    group.bench_function("record_success", |b| {
        let mut breaker = CircuitBreaker::with_defaults();
        b.iter(|| breaker.record_success());
    });

    group.bench_function("fail_to_open", |b| {
        let config = BreakerConfig::new(5, Duration::from_secs(30))
            .expect("valid circuit breaker config for benchmarks");
        b.iter(|| {
            let mut breaker = CircuitBreaker::with_clock(config, MockClock::new())
                .expect("circuit breaker should build with benchmark configuration");
            for _ in 0..5 {
                black_box(breaker.record_failure());
            }
            black_box(breaker.is_open());
        });
    });

    group.bench_function("pure_transition", |b| {
        let config = BreakerConfig::default();
        let now = Instant::now();
        b.iter(|| {
            let state = transition(BreakerState::closed(), BreakerEvent::Failure, now, &config);
            black_box(transition(state.state, BreakerEvent::Check, now, &config))
        });
    });

    group.finish();
}

// ============================================================================
// Backoff Benchmarks
// ============================================================================

fn bench_backoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("backoff");
    let now = Utc::now();

    for attempt in [0u32, 4, 16] {
        group.bench_with_input(BenchmarkId::new("exponential", attempt), &attempt, |b, &a| {
            b.iter(|| black_box(backoff_delay_at(now, a, None, 1000, || 0.5)));
        });
    }

    group.bench_function("retry_after_seconds", |b| {
        b.iter(|| black_box(parse_retry_after(black_box("120"), now)));
    });

    group.bench_function("retry_after_http_date", |b| {
        b.iter(|| black_box(parse_retry_after(black_box("Wed, 21 Oct 2015 07:28:00 GMT"), now)));
    });

    group.finish();
}

criterion_group!(benches, bench_circuit_breaker, bench_backoff);
criterion_main!(benches);
