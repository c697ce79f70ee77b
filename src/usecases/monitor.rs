//! Swap Monitor - Price-conditioned Polling State Machine
//!
//! Owns the polling loop: `Polling -> {Accepted, TimedOut, Cancelled,
//! Errored}`. Each tick fetches a fresh quote through the oracle and
//! feeds it into the wait policy. Transient oracle failures are
//! retried a bounded number of times with the same interval spacing;
//! exhaustion surfaces as `Errored` rather than being swallowed.
//!
//! Cancellation is cooperative: the signal is checked between ticks,
//! never mid-flight of an in-progress fetch. A fresh monitor is built
//! per request; a single instance runs to exactly one terminal state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::domain::swap::{Quote, SwapError, SwapRequest};
use crate::domain::wait_policy::{WaitDecision, WaitPolicy};
use crate::ports::clock::Clock;
use crate::ports::quote_service::QuoteService;

use super::oracle::PriceOracle;

/// Terminal state of one monitor run.
#[derive(Debug, Clone)]
pub enum MonitorOutcome {
  /// The wait policy accepted this quote.
  Accepted(Quote),
  /// Budget exhausted; carries the last quote seen, if any.
  TimedOut { last_quote: Option<Quote> },
  /// Cancellation signal observed between ticks.
  Cancelled,
  /// Oracle retries exhausted or a permanent oracle failure.
  Errored(SwapError),
}

/// Polling state machine for a single swap request.
pub struct SwapMonitor<Q: QuoteService, C: Clock> {
  oracle: PriceOracle<Q>,
  clock: Arc<C>,
  /// Bounded retry count for transient oracle failures.
  max_oracle_retries: u32,
  /// Cancellation signal, checked between ticks.
  cancel_rx: broadcast::Receiver<()>,
}

impl<Q: QuoteService, C: Clock> SwapMonitor<Q, C> {
  /// Create a monitor for one request.
  pub fn new(
    oracle: PriceOracle<Q>,
    clock: Arc<C>,
    max_oracle_retries: u32,
    cancel_rx: broadcast::Receiver<()>,
  ) -> Self {
    Self {
      oracle,
      clock,
      max_oracle_retries,
      cancel_rx,
    }
  }

  /// Drive the state machine to its terminal state.
  #[instrument(
    skip_all,
    name = "swap_monitor",
    fields(token_in = %request.token_in, token_out = %request.token_out)
  )]
  pub async fn run(mut self, request: &SwapRequest) -> MonitorOutcome {
    let policy = WaitPolicy::new(
      request.min_price,
      request.monitor_interval,
      request.max_wait_time,
    );

    let mut elapsed = Duration::ZERO;
    let mut retries = 0u32;
    let mut last_quote: Option<Quote> = None;

    loop {
      if self.cancel_requested() {
        info!(elapsed_secs = elapsed.as_secs(), "Cancellation observed, stopping monitor");
        return MonitorOutcome::Cancelled;
      }

      match self.oracle.fetch(request).await {
        Ok(quote) => {
          retries = 0;
          debug!(
            price = %quote.price,
            elapsed_secs = elapsed.as_secs(),
            "Fresh quote obtained"
          );
          last_quote = Some(quote.clone());

          match policy.decide(elapsed, &quote) {
            WaitDecision::Accept(accepted) => {
              info!(
                price = %accepted.price,
                quote_hash = %accepted.quote_hash,
                elapsed_secs = elapsed.as_secs(),
                "Quote accepted"
              );
              return MonitorOutcome::Accepted(accepted);
            }
            WaitDecision::GiveUp => {
              info!(
                elapsed_secs = elapsed.as_secs(),
                last_price = ?last_quote.as_ref().map(|q| q.price.to_string()),
                "Wait budget exhausted"
              );
              return MonitorOutcome::TimedOut { last_quote };
            }
            WaitDecision::Wait(delay) => {
              self.clock.sleep(delay).await;
              elapsed += delay;
            }
          }
        }
        Err(e) if e.is_transient() && retries < self.max_oracle_retries => {
          retries += 1;
          warn!(
            error = %e,
            retry = retries,
            max = self.max_oracle_retries,
            "Oracle fetch failed, retrying"
          );
          self.clock.sleep(request.monitor_interval).await;
          elapsed += request.monitor_interval;
        }
        Err(e) => {
          warn!(error = %e, "Oracle failed, stopping monitor");
          return MonitorOutcome::Errored(e.into());
        }
      }
    }
  }

  /// Non-blocking cancellation check between ticks.
  fn cancel_requested(&mut self) -> bool {
    use broadcast::error::TryRecvError;
    match self.cancel_rx.try_recv() {
      Ok(()) | Err(TryRecvError::Lagged(_)) => true,
      Err(TryRecvError::Empty | TryRecvError::Closed) => false,
    }
  }
}
