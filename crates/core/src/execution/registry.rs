//! One circuit breaker per logical endpoint group
//!
//! Breakers are created lazily on first use with the shared configuration.
//! Each breaker is only touched while the registry lock is held, which is
//! the external mutual exclusion the breaker itself does not provide.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use suitegate_common::resilience::{
    BreakerConfig, BreakerSnapshot, CircuitBreaker, Clock, ConfigResult, SystemClock,
};

/// Lazily populated map of endpoint group to circuit breaker
pub struct BreakerRegistry<C: Clock + Clone = SystemClock> {
    /// Closed breaker cloned for each new group
    template: CircuitBreaker<C>,
    breakers: Mutex<HashMap<String, CircuitBreaker<C>>>,
}

impl BreakerRegistry<SystemClock> {
    /// Registry on the system clock
    pub fn new(config: BreakerConfig) -> ConfigResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock + Clone> BreakerRegistry<C> {
    /// Registry whose breakers share `clock`
    pub fn with_clock(config: BreakerConfig, clock: C) -> ConfigResult<Self> {
        let template = CircuitBreaker::with_clock(config, clock)?;
        Ok(Self { template, breakers: Mutex::new(HashMap::new()) })
    }

    /// Whether calls to `group` should fail fast
    pub fn is_open(&self, group: &str) -> bool {
        self.with_breaker(group, CircuitBreaker::is_open)
    }

    /// Reset the group's failure count
    pub fn record_success(&self, group: &str) {
        self.with_breaker(group, CircuitBreaker::record_success);
    }

    /// Returns `true` when this failure opened the group's circuit
    pub fn record_failure(&self, group: &str) -> bool {
        self.with_breaker(group, CircuitBreaker::record_failure)
    }

    /// Diagnostics view of every breaker created so far, keyed by group
    pub fn snapshot(&self) -> BreakerMap {
        self.lock().iter().map(|(group, breaker)| (group.clone(), breaker.snapshot())).collect()
    }

    /// Settings every new breaker starts from
    pub fn config(&self) -> &BreakerConfig {
        self.template.config()
    }

    fn with_breaker<R>(&self, group: &str, f: impl FnOnce(&mut CircuitBreaker<C>) -> R) -> R {
        let mut breakers = self.lock();
        if let Some(breaker) = breakers.get_mut(group) {
            return f(breaker);
        }
        let mut breaker = self.template.clone();
        let result = f(&mut breaker);
        breakers.insert(group.to_string(), breaker);
        result
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CircuitBreaker<C>>> {
        self.breakers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Snapshot of all breakers, ordered by group name
pub type BreakerMap = BTreeMap<String, BreakerSnapshot>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use suitegate_common::resilience::{CircuitStatus, MockClock};

    use super::*;

    fn registry(clock: MockClock) -> BreakerRegistry<MockClock> {
        let config = BreakerConfig::new(2, Duration::from_millis(100)).unwrap();
        BreakerRegistry::with_clock(config, clock).unwrap()
    }

    #[test]
    fn test_groups_are_isolated() {
        let registry = registry(MockClock::new());

        registry.record_failure("drive");
        assert!(registry.record_failure("drive"));
        assert!(registry.is_open("drive"));
        assert!(!registry.is_open("gmail"));
    }

    #[test]
    fn test_snapshot_lists_known_groups() {
        let clock = MockClock::new();
        let registry = registry(clock.clone());

        registry.record_failure("drive");
        registry.record_failure("drive");
        registry.record_success("gmail");

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["drive"].status, CircuitStatus::Open);
        assert_eq!(snapshot["gmail"].failure_count, 0);

        clock.advance_millis(101);
        assert!(!registry.is_open("drive"));
        assert_eq!(registry.snapshot()["drive"].failure_count, 0);
    }
}
