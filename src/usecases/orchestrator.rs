//! Swap Orchestrator - Full Lifecycle Sequencing
//!
//! Composes the monitor, executor, and withdrawal coordinator into
//! one strictly sequential run: validate -> monitor -> execute ->
//! withdraw, producing exactly one `SwapOutcome`. Any stage failure
//! short-circuits the remaining stages. A withdrawal failure does NOT
//! roll back the swap (swaps are irreversible once submitted): the
//! outcome then carries the swap receipt alongside the withdraw-stage
//! error so the caller can retry the withdrawal alone.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use crate::domain::assets::AssetRegistry;
use crate::domain::swap::{self, Stage, SwapError, SwapOutcome, SwapRequest};
use crate::ports::clock::Clock;
use crate::ports::quote_service::QuoteService;
use crate::ports::signer::Signer;

use super::executor::SwapExecutor;
use super::monitor::{MonitorOutcome, SwapMonitor};
use super::oracle::PriceOracle;
use super::withdrawal::WithdrawalCoordinator;

/// Explicit orchestration settings; nothing ambient.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
  /// Bounded retry count for transient oracle failures.
  pub max_oracle_retries: u32,
  /// Whether an explicitly requested withdrawal to the native chain
  /// is submitted as a same-chain transfer (true) or skipped as a
  /// no-op (false).
  pub withdraw_on_native: bool,
  /// Minimum quote validity requested from solvers (milliseconds).
  pub quote_min_deadline_ms: u64,
}

impl Default for OrchestratorSettings {
  fn default() -> Self {
    Self {
      max_oracle_retries: 3,
      withdraw_on_native: true,
      quote_min_deadline_ms: 120_000,
    }
  }
}

/// Top-level sequencer for one swap request.
///
/// Holds only shared read-only capabilities, so multiple requests can
/// run concurrently against one orchestrator, each with its own
/// monitor instance.
pub struct SwapOrchestrator<Q: QuoteService, S: Signer, C: Clock> {
  quotes: Arc<Q>,
  signer: Arc<S>,
  clock: Arc<C>,
  registry: Arc<AssetRegistry>,
  settings: OrchestratorSettings,
}

impl<Q: QuoteService, S: Signer, C: Clock> SwapOrchestrator<Q, S, C> {
  /// Create an orchestrator over shared capabilities.
  pub fn new(
    quotes: Arc<Q>,
    signer: Arc<S>,
    clock: Arc<C>,
    registry: Arc<AssetRegistry>,
    settings: OrchestratorSettings,
  ) -> Self {
    Self {
      quotes,
      signer,
      clock,
      registry,
      settings,
    }
  }

  /// Run one request to its terminal outcome.
  #[instrument(
    skip_all,
    name = "swap_orchestration",
    fields(
      run_id = %swap::new_run_id(),
      token_in = %request.token_in,
      token_out = %request.token_out,
      chain_out = %request.chain_out,
    )
  )]
  pub async fn run(
    &self,
    request: SwapRequest,
    cancel_rx: broadcast::Receiver<()>,
  ) -> SwapOutcome {
    // ── Stage 1: validate ───────────────────────────────────
    if let Err(error) = self.validate(&request) {
      warn!(error = %error, "Request validation failed");
      return SwapOutcome::Failed {
        stage: Stage::Validate,
        error,
        swap: None,
      };
    }

    // ── Stage 2: monitor until a quote is accepted ──────────
    let oracle = PriceOracle::new(
      Arc::clone(&self.quotes),
      Arc::clone(&self.registry),
      self.settings.quote_min_deadline_ms,
    );
    let monitor = SwapMonitor::new(
      oracle,
      Arc::clone(&self.clock),
      self.settings.max_oracle_retries,
      cancel_rx,
    );

    let accepted = match monitor.run(&request).await {
      MonitorOutcome::Accepted(quote) => quote,
      MonitorOutcome::TimedOut { last_quote } => {
        return SwapOutcome::TimedOut { last_quote };
      }
      MonitorOutcome::Cancelled => return SwapOutcome::Cancelled,
      MonitorOutcome::Errored(error) => {
        return SwapOutcome::Failed {
          stage: Stage::Monitor,
          error,
          swap: None,
        };
      }
    };

    // ── Stage 3: execute the swap ───────────────────────────
    let executor = SwapExecutor::new(Arc::clone(&self.signer), Arc::clone(&self.clock));
    let swap = match executor.execute(&request, &accepted).await {
      Ok(receipt) => receipt,
      Err(error) => {
        warn!(error = %error, "Swap execution failed, no funds moved");
        return SwapOutcome::Failed {
          stage: Stage::Execute,
          error,
          swap: None,
        };
      }
    };

    // ── Stage 4: withdraw, when one was requested ───────────
    let withdrawal = match request.withdrawal_request(self.registry.native_chain()) {
      None => None,
      Some(w)
        if w.destination_chain == self.registry.native_chain()
          && !self.settings.withdraw_on_native =>
      {
        info!(
          destination_chain = %w.destination_chain,
          "Same-chain withdrawal skipped as a no-op"
        );
        None
      }
      Some(w) => {
        let coordinator =
          WithdrawalCoordinator::new(Arc::clone(&self.signer), Arc::clone(&self.registry));
        match coordinator.withdraw(&swap, &w).await {
          Ok(receipt) => Some(receipt),
          Err(error) => {
            // The swap settled; only the withdrawal is uncertain.
            warn!(
              error = %error,
              swap_intent = %swap.intent_hash,
              "Withdrawal failed after successful swap"
            );
            return SwapOutcome::Failed {
              stage: Stage::Withdraw,
              error,
              swap: Some(swap),
            };
          }
        }
      }
    };

    info!(
      swap_intent = %swap.intent_hash,
      withdrawal = ?withdrawal.as_ref().map(|w| &w.intent_hash),
      "Swap orchestration complete"
    );

    SwapOutcome::Executed { swap, withdrawal }
  }

  /// Registry-backed request validation.
  fn validate(&self, request: &SwapRequest) -> Result<(), SwapError> {
    request.validate_shape()?;

    if let Some(min_price) = request.min_price {
      if min_price <= rust_decimal::Decimal::ZERO {
        return Err(SwapError::InvalidRequest(format!(
          "min_price must be positive, got {min_price}"
        )));
      }
    }

    self
      .registry
      .asset_id(&request.token_in, self.registry.native_chain())
      .map_err(|e| SwapError::InvalidRequest(e.to_string()))?;
    self
      .registry
      .asset_id(&request.token_out, &request.chain_out)
      .map_err(|e| SwapError::InvalidRequest(e.to_string()))?;
    self
      .registry
      .to_atomic(&request.token_in, request.amount_in)
      .map_err(|e| SwapError::InvalidRequest(e.to_string()))?;

    Ok(())
  }
}
