//! Wait policy for price-conditioned quote acceptance.
//!
//! A single pure decision function drives both the "accept first
//! quote" and "wait for price" behaviors, so the monitor state
//! machine stays single-sourced. The policy never performs I/O and
//! never backs off: the polling cadence is caller-controlled and
//! constant.

use std::time::Duration;

use rust_decimal::Decimal;

use super::swap::Quote;

/// Decision emitted for each fresh quote.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitDecision {
    /// Keep polling; sleep for exactly this delay before the next tick.
    Wait(Duration),
    /// The quote satisfies the acceptance condition.
    Accept(Quote),
    /// Continuing to wait would exceed the budget.
    GiveUp,
}

/// Pure acceptance policy for the monitor loop.
///
/// Gives up only once continuing would exceed the wait budget, never
/// pre-emptively: `GiveUp` requires `elapsed + interval > max_wait`.
/// With `max_wait == 0` that means exactly one quote attempt, then an
/// immediate accept-or-give-up.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    /// Minimum acceptable price; `None` accepts the first quote.
    min_price: Option<Decimal>,
    /// Fixed polling cadence.
    interval: Duration,
    /// Total wait budget.
    max_wait: Duration,
}

impl WaitPolicy {
    /// Create a policy from the request's monitoring parameters.
    pub fn new(min_price: Option<Decimal>, interval: Duration, max_wait: Duration) -> Self {
        Self {
            min_price,
            interval,
            max_wait,
        }
    }

    /// Decide what to do with the latest quote at the given elapsed time.
    ///
    /// Pure and idempotent: identical inputs always produce identical
    /// decisions.
    pub fn decide(&self, elapsed: Duration, latest_quote: &Quote) -> WaitDecision {
        let Some(min_price) = self.min_price else {
            return WaitDecision::Accept(latest_quote.clone());
        };

        if latest_quote.clears(min_price) {
            return WaitDecision::Accept(latest_quote.clone());
        }

        if elapsed + self.interval > self.max_wait {
            return WaitDecision::GiveUp;
        }

        WaitDecision::Wait(self.interval)
    }

    /// The fixed polling cadence this policy was built with.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
