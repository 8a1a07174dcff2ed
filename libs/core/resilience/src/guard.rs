//! Per-operation circuit breaker decorator with a fallback function.

use std::fmt;
use std::future::Future;

use crate::breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};

/// Pairs one [`CircuitBreaker`] with one logical operation and its fallback.
///
/// Register one guard per operation kind; every failure of the wrapped call —
/// business-rule or transport — is recorded against the breaker and converted
/// into `fallback(&message)` instead of propagating. When the circuit is open
/// the operation future is dropped unawaited, so the underlying call is never
/// made.
pub struct CircuitGuard {
    name: &'static str,
    breaker: CircuitBreaker,
}

impl CircuitGuard {
    pub fn new(name: &'static str, config: CircuitBreakerConfig) -> Self {
        Self {
            name,
            breaker: CircuitBreaker::new(config),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Run `operation` under the breaker, producing the fallback value on any
    /// failure. The fallback must be pure: it receives the triggering error
    /// message and builds a degraded result, nothing else.
    pub async fn call<T, E, Fut, FB>(&self, operation: Fut, fallback: FB) -> T
    where
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        FB: FnOnce(&str) -> T,
    {
        if !self.breaker.can_execute() {
            let message = format!("circuit breaker '{}' is open", self.name);
            tracing::warn!(circuit = self.name, "short-circuiting to fallback");
            return fallback(&message);
        }

        match operation.await {
            Ok(value) => {
                self.breaker.record_success();
                value
            }
            Err(err) => {
                self.breaker.record_failure();
                let message = err.to_string();
                tracing::warn!(circuit = self.name, error = %message, "serving fallback");
                fallback(&message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn guard(name: &'static str) -> CircuitGuard {
        CircuitGuard::new(
            name,
            CircuitBreakerConfig::new()
                .with_failure_rate_threshold(50)
                .with_min_calls(2)
                .with_open_duration(Duration::from_secs(60)),
        )
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let guard = guard("ok");

        let value = guard
            .call(async { Ok::<_, String>(42) }, |_| -1)
            .await;

        assert_eq!(value, 42);
        assert_eq!(guard.state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn test_error_is_converted_to_fallback() {
        let guard = guard("fails");

        let value = guard
            .call(async { Err::<i32, _>("boom".to_string()) }, |msg| {
                assert_eq!(msg, "boom");
                -1
            })
            .await;

        assert_eq!(value, -1);
    }

    #[tokio::test]
    async fn test_open_circuit_never_runs_operation() {
        let guard = guard("open");
        let calls = AtomicU32::new(0);

        for _ in 0..2 {
            guard
                .call(
                    async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err::<(), _>("down".to_string())
                    },
                    |_| (),
                )
                .await;
        }
        assert_eq!(guard.state(), CircuitState::Open);

        let value = guard
            .call(
                async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>("live")
                },
                |msg| {
                    assert!(msg.contains("open"));
                    "degraded"
                },
            )
            .await;

        assert_eq!(value, "degraded");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
