//! Consecutive-failure circuit breaker
//!
//! The breaker is split into a pure transition function over an explicit
//! [`BreakerState`] value and a thin [`CircuitBreaker`] shell that owns the
//! state and reads the clock.
//!
//! # State Transitions
//! ```text
//! Closed → Open:   failure_count >= failure_threshold
//! Open → Closed:   now - last_failure > reset_window (checked on query)
//! any → Closed:    recorded success (failure_count := 0)
//! ```
//!
//! There is no half-open trial state: once the window has elapsed the
//! breaker closes unconditionally and must accumulate `failure_threshold`
//! fresh failures to open again.
//!
//! The shell is not internally synchronised. Hold one breaker per serialised
//! execution context (see `BreakerRegistry` in the core crate) or wrap it in
//! your own lock.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

//==============================================================================
// Time Abstraction for Testability
//==============================================================================

/// Trait for time operations to enable deterministic testing
///
/// Production code uses [`SystemClock`]; tests drive a [`MockClock`] forward
/// explicitly so reset-window behaviour needs no real sleeping.
pub trait Clock: Send + Sync + 'static {
    /// Get current instant (monotonic time)
    fn now(&self) -> Instant;
}

/// Real system clock implementation for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Implement Clock for Arc<T> where T: Clock for convenient sharing
impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Adapter turning any zero-argument function into a [`Clock`]
#[derive(Clone, Copy)]
pub struct FnClock<F>(pub F);

impl<F> fmt::Debug for FnClock<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnClock")
    }
}

impl<F> Clock for FnClock<F>
where
    F: Fn() -> Instant + Send + Sync + 'static,
{
    fn now(&self) -> Instant {
        (self.0)()
    }
}

/// Mock clock for deterministic testing
///
/// Clones share the same elapsed counter, so a test can keep one handle and
/// hand another to the breaker.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// Create a new mock clock starting at the current instant
    pub fn new() -> Self {
        Self { start: Instant::now(), elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Advance the mock clock by a duration
    pub fn advance(&self, duration: Duration) {
        if let Ok(mut elapsed) = self.elapsed.lock() {
            *elapsed += duration;
        }
    }

    /// Advance the mock clock by milliseconds (convenience method)
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Get the current elapsed time
    pub fn elapsed(&self) -> Duration {
        self.elapsed.lock().map(|e| *e).unwrap_or(Duration::ZERO)
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }
}

//==============================================================================
// Configuration
//==============================================================================

/// Simple configuration error for validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Configuration result type using simple config errors
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Thresholds for one breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerConfig {
    /// Consecutive failures that open the circuit
    pub failure_threshold: u32,
    /// Cooldown after the last failure before an open circuit closes again
    pub reset_window: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self { failure_threshold: 5, reset_window: Duration::from_secs(30) }
    }
}

impl BreakerConfig {
    /// Create a validated configuration
    pub fn new(failure_threshold: u32, reset_window: Duration) -> ConfigResult<Self> {
        let config = Self { failure_threshold, reset_window };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.failure_threshold == 0 {
            return Err(ConfigError::Invalid {
                message: "failure_threshold must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

//==============================================================================
// Pure state machine
//==============================================================================

/// Circuit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitStatus {
    /// Calls are allowed
    Closed,
    /// Calls fail fast
    Open,
}

impl fmt::Display for CircuitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "CLOSED"),
            Self::Open => write!(f, "OPEN"),
        }
    }
}

/// Explicit breaker state value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerState {
    /// Closed or open
    pub status: CircuitStatus,
    /// Failures since the last success or auto-reset
    pub failure_count: u32,
    /// When the most recent failure was recorded
    pub last_failure: Option<Instant>,
}

impl BreakerState {
    /// Initial state: closed, no failures
    pub const fn closed() -> Self {
        Self { status: CircuitStatus::Closed, failure_count: 0, last_failure: None }
    }

    /// Whether the stored status is open (no reset-window check)
    pub fn is_open(&self) -> bool {
        self.status == CircuitStatus::Open
    }
}

impl Default for BreakerState {
    fn default() -> Self {
        Self::closed()
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerEvent {
    /// A call succeeded
    Success,
    /// A call failed
    Failure,
    /// State query; may auto-close an open circuit whose window elapsed
    Check,
}

/// Result of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the event
    pub state: BreakerState,
    /// The circuit went from closed to open on this event
    pub opened: bool,
    /// The circuit auto-closed because the reset window elapsed
    pub reset: bool,
}

/// Apply `event` to `state` at time `now`.
pub fn transition(
    state: BreakerState,
    event: BreakerEvent,
    now: Instant,
    config: &BreakerConfig,
) -> Transition {
    match event {
        BreakerEvent::Success => Transition {
            state: BreakerState { status: CircuitStatus::Closed, failure_count: 0, ..state },
            opened: false,
            reset: false,
        },
        BreakerEvent::Failure => {
            let failure_count = state.failure_count.saturating_add(1);
            let status = if failure_count >= config.failure_threshold {
                CircuitStatus::Open
            } else {
                state.status
            };
            Transition {
                state: BreakerState { status, failure_count, last_failure: Some(now) },
                opened: !state.is_open() && status == CircuitStatus::Open,
                reset: false,
            }
        }
        BreakerEvent::Check => {
            if !state.is_open() {
                return Transition { state, opened: false, reset: false };
            }
            let since_failure = state
                .last_failure
                .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
            if since_failure > config.reset_window {
                Transition {
                    state: BreakerState {
                        status: CircuitStatus::Closed,
                        failure_count: 0,
                        ..state
                    },
                    opened: false,
                    reset: true,
                }
            } else {
                Transition { state, opened: false, reset: false }
            }
        }
    }
}

//==============================================================================
// Imperative shell
//==============================================================================

/// Point-in-time view of a breaker for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakerSnapshot {
    /// Closed or open at snapshot time
    pub status: CircuitStatus,
    /// Failures counted so far
    pub failure_count: u32,
    /// Failures that open the circuit
    pub failure_threshold: u32,
    /// Open period before auto-reset, in milliseconds
    pub reset_window_ms: u64,
}

/// Circuit breaker owning its state and clock
#[derive(Clone)]
pub struct CircuitBreaker<C: Clock = SystemClock> {
    config: BreakerConfig,
    state: BreakerState,
    clock: C,
}

impl<C: Clock> fmt::Debug for CircuitBreaker<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("config", &self.config)
            .field("status", &self.state.status)
            .field("failure_count", &self.state.failure_count)
            .finish()
    }
}

impl CircuitBreaker<SystemClock> {
    /// Create a breaker driven by wall-clock time
    pub fn new(config: BreakerConfig) -> ConfigResult<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// Create a breaker with default configuration
    pub fn with_defaults() -> Self {
        Self { config: BreakerConfig::default(), state: BreakerState::closed(), clock: SystemClock }
    }
}

impl<C: Clock> CircuitBreaker<C> {
    /// Create a breaker with a custom clock (useful for testing)
    pub fn with_clock(config: BreakerConfig, clock: C) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config, state: BreakerState::closed(), clock })
    }

    /// Whether calls should currently fail fast.
    ///
    /// An open circuit whose reset window has elapsed closes here and the
    /// failure count drops to zero.
    pub fn is_open(&mut self) -> bool {
        let applied = self.apply(BreakerEvent::Check);
        if applied.reset {
            info!(
                reset_window_ms = duration_millis(self.config.reset_window),
                "Circuit breaker closed after reset window elapsed"
            );
        }
        applied.state.is_open()
    }

    /// Record a successful call: failures cleared, circuit closed
    pub fn record_success(&mut self) {
        let was_open = self.state.is_open();
        self.apply(BreakerEvent::Success);
        if was_open {
            info!("Circuit breaker closed after success");
        }
    }

    /// Record a failed call. Returns `true` when this failure opened the
    /// circuit.
    pub fn record_failure(&mut self) -> bool {
        let applied = self.apply(BreakerEvent::Failure);
        if applied.opened {
            warn!(
                failure_count = applied.state.failure_count,
                failure_threshold = self.config.failure_threshold,
                "Circuit breaker opened"
            );
        } else {
            debug!(failure_count = applied.state.failure_count, "Circuit breaker recorded failure");
        }
        applied.opened
    }

    /// Current state without evaluating the reset window
    pub fn state(&self) -> BreakerState {
        self.state
    }

    /// Failures since the last success or reset
    pub fn failure_count(&self) -> u32 {
        self.state.failure_count
    }

    /// Thresholds this breaker was built with
    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Diagnostics view
    pub fn snapshot(&self) -> BreakerSnapshot {
        BreakerSnapshot {
            status: self.state.status,
            failure_count: self.state.failure_count,
            failure_threshold: self.config.failure_threshold,
            reset_window_ms: duration_millis(self.config.reset_window),
        }
    }

    fn apply(&mut self, event: BreakerEvent) -> Transition {
        let applied = transition(self.state, event, self.clock.now(), &self.config);
        self.state = applied.state;
        applied
    }
}

impl Default for CircuitBreaker<SystemClock> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
