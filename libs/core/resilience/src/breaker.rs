//! Circuit breaker state machine.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Circuit breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls pass through, outcomes are counted against the rolling window.
    Closed,
    /// Calls are rejected immediately until the cooldown elapses.
    Open,
    /// A limited number of probe calls pass through to test recovery.
    HalfOpen,
}

/// Configuration for the circuit breaker.
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Failure ratio (0-100 percent) that trips the circuit.
    pub failure_rate_threshold: u32,
    /// Minimum number of recorded calls before the ratio is evaluated.
    pub min_calls: u32,
    /// Size of the rolling window, in calls.
    pub window_size: u32,
    /// How long the circuit stays open before probing.
    pub open_duration: Duration,
    /// Number of probe calls admitted in half-open state; all must succeed
    /// for the circuit to close.
    pub half_open_max_calls: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 50,
            min_calls: 5,
            window_size: 20,
            open_duration: Duration::from_secs(30),
            half_open_max_calls: 3,
        }
    }
}

impl CircuitBreakerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure_rate_threshold(mut self, percent: u32) -> Self {
        self.failure_rate_threshold = percent.min(100);
        self
    }

    pub fn with_min_calls(mut self, calls: u32) -> Self {
        self.min_calls = calls.max(1);
        self
    }

    pub fn with_window_size(mut self, size: u32) -> Self {
        self.window_size = size.max(1);
        self
    }

    pub fn with_open_duration(mut self, duration: Duration) -> Self {
        self.open_duration = duration;
        self
    }

    pub fn with_half_open_max_calls(mut self, calls: u32) -> Self {
        self.half_open_max_calls = calls.max(1);
        self
    }

    /// Load a config from `{prefix}_FAILURE_RATE_THRESHOLD`, `{prefix}_MIN_CALLS`,
    /// `{prefix}_WINDOW_SIZE`, `{prefix}_OPEN_SECS` and `{prefix}_HALF_OPEN_MAX_CALLS`,
    /// falling back to `base` for any variable that is unset or unparseable.
    pub fn from_env_prefixed(prefix: &str, base: &CircuitBreakerConfig) -> Self {
        fn parsed(prefix: &str, key: &str, default: u32) -> u32 {
            std::env::var(format!("{}_{}", prefix, key))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        Self {
            failure_rate_threshold: parsed(prefix, "FAILURE_RATE_THRESHOLD", base.failure_rate_threshold)
                .min(100),
            min_calls: parsed(prefix, "MIN_CALLS", base.min_calls).max(1),
            window_size: parsed(prefix, "WINDOW_SIZE", base.window_size).max(1),
            open_duration: Duration::from_secs(u64::from(parsed(
                prefix,
                "OPEN_SECS",
                base.open_duration.as_secs() as u32,
            ))),
            half_open_max_calls: parsed(prefix, "HALF_OPEN_MAX_CALLS", base.half_open_max_calls)
                .max(1),
        }
    }
}

/// Thread-safe circuit breaker.
///
/// One instance guards one logical operation; its counters are shared by every
/// concurrent call to that operation.
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    state: RwLock<CircuitState>,
    window_total: AtomicU32,
    window_failures: AtomicU32,
    opened_at: RwLock<Option<Instant>>,
    half_open_permits: AtomicU32,
    half_open_successes: AtomicU32,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: RwLock::new(CircuitState::Closed),
            window_total: AtomicU32::new(0),
            window_failures: AtomicU32::new(0),
            opened_at: RwLock::new(None),
            half_open_permits: AtomicU32::new(0),
            half_open_successes: AtomicU32::new(0),
        }
    }

    pub fn default_config() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }

    /// Current state of the circuit.
    pub fn state(&self) -> CircuitState {
        *self.state.read().unwrap()
    }

    /// Whether a call may proceed.
    ///
    /// Open circuits transition to half-open once the cooldown has elapsed;
    /// half-open circuits admit at most `half_open_max_calls` probes.
    pub fn can_execute(&self) -> bool {
        let current_state = *self.state.read().unwrap();

        match current_state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                if self.cooldown_elapsed() {
                    self.transition_to_half_open();
                    self.half_open_permits.fetch_add(1, Ordering::SeqCst);
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                let issued = self.half_open_permits.fetch_add(1, Ordering::SeqCst);
                issued < self.config.half_open_max_calls
            }
        }
    }

    /// Record a successful call.
    pub fn record_success(&self) {
        let current_state = *self.state.read().unwrap();

        match current_state {
            CircuitState::Closed => {
                let (total, _) = self.record_window(false);
                self.roll_window_if_full(total);
            }
            CircuitState::HalfOpen => {
                let successes = self.half_open_successes.fetch_add(1, Ordering::SeqCst) + 1;
                if successes >= self.config.half_open_max_calls {
                    self.transition_to_closed();
                }
            }
            CircuitState::Open => {
                // Stale outcome from a call admitted before the trip; ignore.
            }
        }
    }

    /// Record a failed call.
    pub fn record_failure(&self) {
        let current_state = *self.state.read().unwrap();

        match current_state {
            CircuitState::Closed => {
                let (total, failures) = self.record_window(true);
                if total >= self.config.min_calls
                    && failures * 100 >= self.config.failure_rate_threshold * total
                {
                    self.transition_to_open();
                } else {
                    self.roll_window_if_full(total);
                }
            }
            CircuitState::HalfOpen => {
                // Any probe failure reopens the circuit.
                self.transition_to_open();
            }
            CircuitState::Open => {}
        }
    }

    /// Current failure ratio of the window, 0-100.
    pub fn failure_rate(&self) -> u32 {
        let total = self.window_total.load(Ordering::SeqCst);
        if total == 0 {
            return 0;
        }
        let failures = self.window_failures.load(Ordering::SeqCst);
        failures * 100 / total
    }

    /// Reset to closed with an empty window.
    pub fn reset(&self) {
        self.transition_to_closed();
    }

    // Internal methods

    fn cooldown_elapsed(&self) -> bool {
        let opened_at = self.opened_at.read().unwrap();
        match *opened_at {
            Some(at) => at.elapsed() >= self.config.open_duration,
            None => true,
        }
    }

    fn record_window(&self, is_failure: bool) -> (u32, u32) {
        let total = self.window_total.fetch_add(1, Ordering::SeqCst) + 1;
        let failures = if is_failure {
            self.window_failures.fetch_add(1, Ordering::SeqCst) + 1
        } else {
            self.window_failures.load(Ordering::SeqCst)
        };
        (total, failures)
    }

    fn roll_window_if_full(&self, total: u32) {
        if total >= self.config.window_size {
            self.window_total.store(0, Ordering::SeqCst);
            self.window_failures.store(0, Ordering::SeqCst);
        }
    }

    fn transition_to_open(&self) {
        let mut state = self.state.write().unwrap();
        *state = CircuitState::Open;
        *self.opened_at.write().unwrap() = Some(Instant::now());
        self.half_open_permits.store(0, Ordering::SeqCst);
        self.half_open_successes.store(0, Ordering::SeqCst);
        tracing::warn!("Circuit breaker OPENED");
    }

    fn transition_to_half_open(&self) {
        let mut state = self.state.write().unwrap();
        *state = CircuitState::HalfOpen;
        self.half_open_permits.store(0, Ordering::SeqCst);
        self.half_open_successes.store(0, Ordering::SeqCst);
        tracing::info!("Circuit breaker HALF-OPEN (testing recovery)");
    }

    fn transition_to_closed(&self) {
        let mut state = self.state.write().unwrap();
        *state = CircuitState::Closed;
        self.window_total.store(0, Ordering::SeqCst);
        self.window_failures.store(0, Ordering::SeqCst);
        self.half_open_permits.store(0, Ordering::SeqCst);
        self.half_open_successes.store(0, Ordering::SeqCst);
        tracing::info!("Circuit breaker CLOSED (recovered)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tripping_config() -> CircuitBreakerConfig {
        CircuitBreakerConfig::new()
            .with_failure_rate_threshold(50)
            .with_min_calls(3)
            .with_window_size(10)
            .with_open_duration(Duration::from_secs(30))
            .with_half_open_max_calls(2)
    }

    #[test]
    fn test_initial_state_is_closed() {
        let breaker = CircuitBreaker::default_config();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert!(breaker.can_execute());
    }

    #[test]
    fn test_opens_once_failure_rate_crosses_threshold() {
        let breaker = CircuitBreaker::new(tripping_config());

        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.can_execute());
    }

    #[test]
    fn test_stays_closed_below_min_calls() {
        let breaker = CircuitBreaker::new(tripping_config().with_min_calls(5));

        for _ in 0..4 {
            breaker.record_failure();
        }
        assert_eq!(breaker.state(), CircuitState::Closed);

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
    }

    #[test]
    fn test_successes_keep_rate_below_threshold() {
        let breaker = CircuitBreaker::new(tripping_config());

        breaker.record_success();
        breaker.record_success();
        breaker.record_success();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_rate(), 25);
    }

    #[test]
    fn test_half_open_after_cooldown() {
        let breaker = CircuitBreaker::new(tripping_config().with_open_duration(Duration::ZERO));

        for _ in 0..3 {
            breaker.record_failure();
        }
        assert_eq!(breaker.state(), CircuitState::Open);

        assert!(breaker.can_execute());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
    }

    #[test]
    fn test_half_open_closes_after_enough_successes() {
        let breaker = CircuitBreaker::new(tripping_config().with_open_duration(Duration::ZERO));

        for _ in 0..3 {
            breaker.record_failure();
        }

        assert!(breaker.can_execute());
        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::HalfOpen);

        assert!(breaker.can_execute());
        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn test_half_open_reopens_on_failure() {
        let breaker = CircuitBreaker::new(tripping_config().with_open_duration(Duration::ZERO));

        for _ in 0..3 {
            breaker.record_failure();
        }

        assert!(breaker.can_execute());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
    }

    #[test]
    fn test_half_open_limits_probe_calls() {
        let breaker = CircuitBreaker::new(
            tripping_config()
                .with_open_duration(Duration::ZERO)
                .with_half_open_max_calls(1),
        );

        for _ in 0..3 {
            breaker.record_failure();
        }

        assert!(breaker.can_execute());
        // Probe budget exhausted until an outcome is recorded.
        assert!(!breaker.can_execute());
    }

    #[test]
    fn test_window_rolls_over() {
        let breaker = CircuitBreaker::new(tripping_config().with_window_size(4));

        breaker.record_success();
        breaker.record_success();
        breaker.record_success();
        breaker.record_success();
        assert_eq!(breaker.failure_rate(), 0);
        assert_eq!(breaker.window_total.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reset_closes_and_clears() {
        let breaker = CircuitBreaker::new(tripping_config());
        for _ in 0..3 {
            breaker.record_failure();
        }
        assert_eq!(breaker.state(), CircuitState::Open);

        breaker.reset();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_rate(), 0);
    }

    #[test]
    fn test_config_from_env_prefixed() {
        temp_env::with_vars(
            [
                ("CB_TEST_FAILURE_RATE_THRESHOLD", Some("80")),
                ("CB_TEST_OPEN_SECS", Some("5")),
            ],
            || {
                let base = CircuitBreakerConfig::default();
                let config = CircuitBreakerConfig::from_env_prefixed("CB_TEST", &base);
                assert_eq!(config.failure_rate_threshold, 80);
                assert_eq!(config.open_duration, Duration::from_secs(5));
                assert_eq!(config.min_calls, base.min_calls);
                assert_eq!(config.window_size, base.window_size);
            },
        );
    }

    #[test]
    fn test_config_from_env_prefixed_ignores_garbage() {
        temp_env::with_var("CB_BAD_WINDOW_SIZE", Some("not-a-number"), || {
            let base = CircuitBreakerConfig::default();
            let config = CircuitBreakerConfig::from_env_prefixed("CB_BAD", &base);
            assert_eq!(config.window_size, base.window_size);
        });
    }
}
