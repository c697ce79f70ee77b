//! Swap Executor - Accepted Quote Submission
//!
//! Turns an accepted quote into exactly one signed swap submission.
//! The only precondition is freshness: a quote whose expiry has
//! passed is rejected without submitting, guarding against acting on
//! stale prices. There is no internal retry; re-submission requires a
//! fresh quote and is therefore the orchestrator's call.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::swap::{Quote, SwapError, SwapReceipt, SwapRequest};
use crate::ports::clock::Clock;
use crate::ports::signer::{Signer, SwapSubmission};

/// Submits accepted quotes through the signer.
pub struct SwapExecutor<S: Signer, C: Clock> {
  signer: Arc<S>,
  clock: Arc<C>,
}

impl<S: Signer, C: Clock> SwapExecutor<S, C> {
  /// Create an executor over a signer capability.
  pub fn new(signer: Arc<S>, clock: Arc<C>) -> Self {
    Self { signer, clock }
  }

  /// Submit the accepted quote as a swap intent.
  #[instrument(skip_all, fields(quote_hash = %quote.quote_hash))]
  pub async fn execute(
    &self,
    request: &SwapRequest,
    quote: &Quote,
  ) -> Result<SwapReceipt, SwapError> {
    if quote.is_expired_at(self.clock.now()) {
      warn!(expiry = ?quote.expiry, "Accepted quote expired before submission");
      return Err(SwapError::QuoteExpired);
    }

    let submission = SwapSubmission {
      token_in: request.token_in.clone(),
      amount_in: request.amount_in,
      token_out: request.token_out.clone(),
      amount_out: quote.amount_out,
      chain_out: request.chain_out.clone(),
      quote_hash: quote.quote_hash.clone(),
    };

    let receipt = self.signer.submit_swap(&submission).await?;

    info!(
      intent_hash = %receipt.intent_hash,
      amount_out = %receipt.amount_out,
      "Swap intent submitted"
    );

    Ok(receipt)
  }
}
