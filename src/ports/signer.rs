//! Signer Port - Intent Submission Interface
//!
//! Defines the trait for submitting signed swap and withdrawal
//! intents. Implementors own all cryptographic signing, nonce
//! management, and (when shared across concurrent orchestrations)
//! serialization of conflicting nonce-bearing operations. This core
//! never sees a private key.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::swap::{
  ChainId, SwapError, SwapReceipt, TokenSymbol, WithdrawalReceipt,
};

/// Failure modes of an intent submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
  /// The network (or the signer's own checks) refused the intent.
  #[error("submission rejected: {0}")]
  Rejected(String),

  /// The signer backend itself is unreachable or misconfigured.
  #[error("signer unavailable: {0}")]
  Unavailable(String),

  /// The signer cannot route a withdrawal to this destination.
  #[error("unsupported destination: {0}")]
  UnsupportedDestination(String),
}

impl From<SignerError> for SwapError {
  fn from(err: SignerError) -> Self {
    match err {
      SignerError::Rejected(msg) => Self::SubmissionRejected(msg),
      SignerError::Unavailable(msg) => Self::SignerUnavailable(msg),
      SignerError::UnsupportedDestination(msg) => Self::UnsupportedDestination(msg),
    }
  }
}

/// Parameters for a swap intent submission.
///
/// Carries the accepted quote's hash and amounts so the signer can
/// build the token-diff payload the solvers committed to.
#[derive(Debug, Clone)]
pub struct SwapSubmission {
  /// Input token symbol.
  pub token_in: TokenSymbol,
  /// Input amount (human units).
  pub amount_in: Decimal,
  /// Output token symbol.
  pub token_out: TokenSymbol,
  /// Quoted output amount (human units).
  pub amount_out: Decimal,
  /// Settlement chain of the output leg.
  pub chain_out: ChainId,
  /// Accepted quote's solver hash.
  pub quote_hash: String,
}

/// Parameters for a withdrawal intent submission.
///
/// A destination chain other than the native chain routes through the
/// omni-token representation with a `WITHDRAW_TO:<address>` memo; on
/// the native chain the transfer goes to the receiver directly.
#[derive(Debug, Clone)]
pub struct WithdrawalSubmission {
  /// Token to withdraw.
  pub token: TokenSymbol,
  /// Amount to withdraw (human units).
  pub amount: Decimal,
  /// Chain the funds should land on.
  pub destination_chain: ChainId,
  /// Receiver address on the destination chain (already defaulted).
  pub destination_address: String,
}

/// Trait for signing-and-submitting backends.
///
/// Exactly one network submission per call; retry policy is the
/// orchestrator's responsibility since re-submission of a swap
/// requires a fresh quote.
#[async_trait]
pub trait Signer: Send + Sync + 'static {
  /// Account id the signer acts for. Used as the default withdrawal
  /// destination.
  fn account_id(&self) -> &str;

  /// Sign and publish a swap intent.
  async fn submit_swap(
    &self,
    submission: &SwapSubmission,
  ) -> Result<SwapReceipt, SignerError>;

  /// Sign and publish a withdrawal intent.
  async fn submit_withdrawal(
    &self,
    submission: &WithdrawalSubmission,
  ) -> Result<WithdrawalReceipt, SignerError>;
}
