//! Resilience primitives for outbound service calls.
//!
//! This crate provides:
//! - **Circuit Breaker**: stops calling a failing dependency once the failure
//!   ratio over a rolling window crosses a threshold, then probes recovery
//!   after a cooldown.
//! - **Circuit Guard**: a per-operation decorator pairing one breaker instance
//!   with one fallback function, so every failure is converted into a
//!   well-formed degraded result instead of an error.
//!
//! ## Circuit Breaker States
//!
//! ```text
//! ┌─────────┐  failure ratio >= threshold  ┌────────┐
//! │ CLOSED  │ ───────────────────────────> │  OPEN  │
//! └─────────┘                              └────────┘
//!      ^                                        │
//!      │                                        │ cooldown elapsed
//!      │                                        v
//!      │   all probes succeed        ┌─────────────┐
//!      └──────────────────────────── │ HALF-OPEN   │
//!                                    └─────────────┘
//!                                          │
//!                       any probe fails    │
//!                       ───────────────────┘
//! ```

mod breaker;
mod guard;

pub use breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use guard::CircuitGuard;
